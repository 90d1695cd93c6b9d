// MiniBrowser platform paths
// Selects the per-OS configuration directory at compile time.

use std::env;
use std::path::PathBuf;

/// Returns the platform-specific configuration directory for MiniBrowser.
///
/// - **Linux**: `$XDG_CONFIG_HOME/minibrowser`, else `~/.config/minibrowser`
/// - **macOS**: `~/Library/Application Support/MiniBrowser`
/// - **Windows**: `%APPDATA%/MiniBrowser`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("MiniBrowser")
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join("MiniBrowser")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("minibrowser"),
            _ => home_dir().join(".config").join("minibrowser"),
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}
