use serde::{Deserialize, Serialize};

/// Top-level browser settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BrowserSettings {
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub chrome: ChromeSettings,
    #[serde(default)]
    pub developer: DeveloperSettings,
}

/// Initial host window geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "MiniBrowser".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

/// Browser chrome (tab strip + address bar) settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChromeSettings {
    /// Vertical space reserved above the content views.
    pub offset: u32,
    /// Tab strip label used until a page reports its title.
    pub default_tab_title: String,
}

impl Default for ChromeSettings {
    fn default() -> Self {
        Self {
            offset: 100,
            default_tab_title: "New Tab".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeveloperSettings {
    pub devtools: bool,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for DeveloperSettings {
    fn default() -> Self {
        Self {
            devtools: cfg!(debug_assertions),
            log_filter: "minibrowser=info".to_string(),
        }
    }
}
