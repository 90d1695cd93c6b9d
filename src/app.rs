//! App Core for MiniBrowser.
//!
//! Owns the tab store, the navigation bridge, the settings and the content
//! host, and turns chrome commands and content notifications into state
//! changes. The UI layer only feeds events in and renders [`TabStripView`]
//! snapshots back out.

use serde_json::Value;

use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::navigation_bridge::{ContentHost, NavigationBridge, ViewHandle, ViewSize};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::command::ChromeCommand;
use crate::types::errors::{BrowserError, TabError};
use crate::types::tab::{TabStripEntry, TabStripView};

/// Central application struct.
pub struct App<H: ContentHost> {
    pub tab_manager: TabManager,
    pub bridge: NavigationBridge,
    pub settings_engine: SettingsEngine,
    host: H,
}

impl<H: ContentHost> App<H> {
    /// Creates a new App with one blank tab. Views are sized from the
    /// configured window geometry until the first resize arrives.
    pub fn new(host: H, settings_engine: SettingsEngine) -> Self {
        let settings = settings_engine.get_settings();
        let size = ViewSize::for_window(
            settings.window.width,
            settings.window.height,
            settings.chrome.offset,
        );

        Self {
            tab_manager: TabManager::new(),
            bridge: NavigationBridge::new(size),
            settings_engine,
            host,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Bring the content views in line with the initial tab.
    pub fn startup(&mut self) -> Result<(), BrowserError> {
        tracing::info!(tabs = self.tab_manager.tab_count(), "starting up");
        self.bridge.sync(&self.tab_manager, &mut self.host)
    }

    /// Apply one chrome command.
    pub fn handle_command(&mut self, command: ChromeCommand) -> Result<(), BrowserError> {
        tracing::debug!(?command, "chrome command");
        match command {
            ChromeCommand::UiReady => {}
            ChromeCommand::NewTab => {
                let id = self.tab_manager.create_tab();
                tracing::info!(tab = %id, "tab created");
            }
            ChromeCommand::SelectTab { id } => self.tab_manager.select_tab(&id)?,
            ChromeCommand::CloseTab { id } => {
                self.tab_manager.close_tab(&id)?;
                tracing::info!(tab = %id, remaining = self.tab_manager.tab_count(), "tab closed");
            }
            ChromeCommand::AddressInput { url } => {
                // Typing only edits the tab; nothing loads until submit.
                // Clearing the text drops back to the placeholder.
                self.bridge.set_address_text(&mut self.tab_manager, &url)?;
                if !url.is_empty() {
                    return Ok(());
                }
            }
            ChromeCommand::Navigate { url } => {
                return self
                    .bridge
                    .navigate(&mut self.tab_manager, &mut self.host, &url);
            }
        }
        self.bridge.sync(&self.tab_manager, &mut self.host)
    }

    /// Decode and apply a raw IPC message from the chrome.
    ///
    /// Returns `true` when the chrome should be re-rendered. Failures are
    /// logged, never propagated into the event loop.
    pub fn handle_ipc(&mut self, message: &str) -> bool {
        let command = match ChromeCommand::parse(message) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed chrome message");
                return false;
            }
        };
        if let Err(e) = self.handle_command(command) {
            tracing::error!(error = %e, "chrome command failed");
        }
        true
    }

    /// Route a title notification from a content view. Returns `true` when a
    /// tab title changed.
    pub fn handle_title_notification(&mut self, view: ViewHandle, payload: &Value) -> bool {
        match self
            .bridge
            .on_title_notification(&mut self.tab_manager, view, payload)
        {
            Ok(changed) => changed,
            Err(e) => {
                tracing::warn!(%view, error = %e, "title update failed");
                false
            }
        }
    }

    /// The host window changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        let offset = self.settings_engine.get_settings().chrome.offset;
        if let Err(e) = self.bridge.resize(&mut self.host, width, height, offset) {
            tracing::warn!(error = %e, "resizing content views failed");
        }
    }

    /// Snapshot for the chrome UI.
    pub fn tab_strip(&self) -> Result<TabStripView, TabError> {
        let default_title = &self.settings_engine.get_settings().chrome.default_tab_title;
        let active = self.tab_manager.get_active_tab()?;

        let tabs = self
            .tab_manager
            .get_all_tabs()
            .iter()
            .map(|t| TabStripEntry {
                id: t.id.clone(),
                title: t.display_title(default_title).to_string(),
                url: t.url.clone(),
                active: t.id == active.id,
            })
            .collect();

        Ok(TabStripView {
            tabs,
            active_id: active.id.clone(),
            address_text: active.url.clone(),
        })
    }

    /// Release the title listener and all content views.
    pub fn shutdown(&mut self) {
        tracing::info!("shutting down");
        self.bridge.teardown(&mut self.host);
    }
}
