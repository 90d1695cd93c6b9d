use serde::{Deserialize, Serialize};

/// Commands posted by the browser chrome (tab strip + address bar) over IPC.
///
/// Wire shape: `{"cmd": "select_tab", "id": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ChromeCommand {
    /// The chrome page finished loading and wants the current tab strip.
    UiReady,
    NewTab,
    SelectTab { id: String },
    CloseTab { id: String },
    /// Address-bar text changed; stored verbatim, nothing is loaded.
    AddressInput { url: String },
    /// Address-bar text submitted; stored and loaded.
    Navigate { url: String },
}

impl ChromeCommand {
    pub fn parse(message: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(message)
    }
}
