use crate::types::errors::TabError;
use crate::types::tab::Tab;

/// Trait defining the tab store interface.
pub trait TabManagerTrait {
    fn create_tab(&mut self) -> String;
    fn select_tab(&mut self, tab_id: &str) -> Result<(), TabError>;
    fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError>;
    fn update_tab_url(&mut self, tab_id: &str, url: &str) -> Result<(), TabError>;
    fn update_tab_title(&mut self, tab_id: &str, title: &str) -> Result<(), TabError>;
    fn get_tab(&self, tab_id: &str) -> Option<&Tab>;
    fn get_all_tabs(&self) -> &[Tab];
    fn get_active_tab(&self) -> Result<&Tab, TabError>;
    fn active_tab_id(&self) -> &str;
    fn tab_count(&self) -> usize;
}

/// In-memory tab store.
///
/// Holds the tabs in creation order plus the id of the active tab. The store
/// is never empty: it starts with one blank tab and closing the last tab
/// replaces it with a fresh one.
#[derive(Debug, Clone)]
pub struct TabManager {
    tabs: Vec<Tab>,
    active_tab_id: String,
}

impl TabManager {
    pub fn new() -> Self {
        let first = Tab::blank();
        Self {
            active_tab_id: first.id.clone(),
            tabs: vec![first],
        }
    }

    fn find_tab_mut(&mut self, tab_id: &str) -> Result<&mut Tab, TabError> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TabManagerTrait for TabManager {
    /// Append a blank tab and make it active. Returns the new tab's ID.
    fn create_tab(&mut self) -> String {
        let tab = Tab::blank();
        let id = tab.id.clone();
        self.tabs.push(tab);
        self.active_tab_id = id.clone();
        id
    }

    /// Switch the active tab. Unknown ids are rejected and leave the
    /// current selection in place.
    fn select_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        if self.get_tab(tab_id).is_none() {
            return Err(TabError::NotFound(tab_id.to_string()));
        }
        self.active_tab_id = tab_id.to_string();
        Ok(())
    }

    /// Close a tab. Closing the active tab activates the first remaining
    /// one; closing the last tab leaves a single fresh blank tab behind.
    fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        if self.get_tab(tab_id).is_none() {
            return Err(TabError::NotFound(tab_id.to_string()));
        }

        self.tabs.retain(|t| t.id != tab_id);

        if self.tabs.is_empty() {
            let fresh = Tab::blank();
            self.active_tab_id = fresh.id.clone();
            self.tabs.push(fresh);
            return Ok(());
        }

        if self.active_tab_id == tab_id {
            self.active_tab_id = self.tabs[0].id.clone();
        }

        Ok(())
    }

    /// Store the url verbatim; normalization happens at navigation time.
    fn update_tab_url(&mut self, tab_id: &str, url: &str) -> Result<(), TabError> {
        let tab = self.find_tab_mut(tab_id)?;
        tab.url = url.to_string();
        Ok(())
    }

    fn update_tab_title(&mut self, tab_id: &str, title: &str) -> Result<(), TabError> {
        let tab = self.find_tab_mut(tab_id)?;
        tab.title = Some(title.to_string());
        Ok(())
    }

    fn get_tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn get_all_tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn get_active_tab(&self) -> Result<&Tab, TabError> {
        self.get_tab(&self.active_tab_id)
            .ok_or(TabError::NoActiveTab)
    }

    fn active_tab_id(&self) -> &str {
        &self.active_tab_id
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }
}
