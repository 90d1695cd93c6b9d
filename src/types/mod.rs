// MiniBrowser shared type definitions
// Each submodule defines types used across the application.

pub mod command;
pub mod errors;
pub mod settings;
pub mod tab;
