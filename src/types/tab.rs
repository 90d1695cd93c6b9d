use serde::{Deserialize, Serialize};

/// One browsing session: a navigation target plus whatever title its
/// content view last reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    /// Raw address-bar text. Empty means nothing is loaded.
    pub url: String,
    pub title: Option<String>,
}

impl Tab {
    /// A blank tab with a fresh UUID.
    pub fn blank() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: String::new(),
            title: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.url.is_empty()
    }

    /// Title shown in the tab strip, falling back to `default` until the page reports one.
    pub fn display_title<'a>(&'a self, default: &'a str) -> &'a str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => default,
        }
    }
}

/// Entry of the tab strip as rendered by the chrome UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabStripEntry {
    pub id: String,
    pub title: String,
    pub url: String,
    pub active: bool,
}

/// Snapshot of everything the chrome UI needs to draw itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStripView {
    pub tabs: Vec<TabStripEntry>,
    pub active_id: String,
    pub address_text: String,
}
