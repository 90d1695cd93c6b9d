// MiniBrowser state managers
// Managers handle stateful operations on the open tabs.

pub mod tab_manager;
