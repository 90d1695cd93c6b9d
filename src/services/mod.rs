// MiniBrowser services
// Services connect the tab store to the outside world: navigation and settings.

pub mod navigation_bridge;
pub mod settings_engine;
