use std::fmt;

// === TabError ===

/// Errors related to tab store operations.
#[derive(Debug, PartialEq)]
pub enum TabError {
    /// Tab with the given ID was not found.
    NotFound(String),
    /// The active id does not resolve to any tab. Only reachable if the
    /// store's invariants were broken.
    NoActiveTab,
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::NotFound(id) => write!(f, "Tab not found: {}", id),
            TabError::NoActiveTab => write!(f, "No active tab"),
        }
    }
}

impl std::error::Error for TabError {}

// === NavigationError ===

/// Errors reported by the content host while driving content views.
#[derive(Debug, PartialEq)]
pub enum NavigationError {
    /// The content view for the given handle does not exist.
    ViewUnavailable(String),
    /// The engine refused to load the navigation target.
    LoadFailed(String),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::ViewUnavailable(view) => {
                write!(f, "Content view unavailable: {}", view)
            }
            NavigationError::LoadFailed(msg) => write!(f, "Navigation failed: {}", msg),
        }
    }
}

impl std::error::Error for NavigationError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred reading/writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The settings key is invalid.
    InvalidKey(String),
    /// The settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => write!(f, "Invalid settings value: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

// === BrowserError ===

/// Top-level error surfaced by the app controller.
#[derive(Debug)]
pub enum BrowserError {
    Tab(TabError),
    Navigation(NavigationError),
    Settings(SettingsError),
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::Tab(e) => write!(f, "{}", e),
            BrowserError::Navigation(e) => write!(f, "{}", e),
            BrowserError::Settings(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrowserError::Tab(e) => Some(e),
            BrowserError::Navigation(e) => Some(e),
            BrowserError::Settings(e) => Some(e),
        }
    }
}

impl From<TabError> for BrowserError {
    fn from(e: TabError) -> Self {
        BrowserError::Tab(e)
    }
}

impl From<NavigationError> for BrowserError {
    fn from(e: NavigationError) -> Self {
        BrowserError::Navigation(e)
    }
}

impl From<SettingsError> for BrowserError {
    fn from(e: SettingsError) -> Self {
        BrowserError::Settings(e)
    }
}
