//! Navigation Bridge for MiniBrowser.
//!
//! Connects address-bar input and content-view notifications to the tab
//! store. The bridge owns the mapping from tabs to content views and the one
//! title listener that is live at any moment, bound to the active tab's view.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::managers::tab_manager::TabManagerTrait;
use crate::types::errors::{BrowserError, NavigationError, TabError};

const SECURE_SCHEME: &str = "https://";

/// Build the string handed to the content view for a tab's raw url.
///
/// The scheme check is a substring match, so `"foo.https://bar"` is passed
/// through untouched.
pub fn navigation_target(url: &str) -> String {
    if url.contains(SECURE_SCHEME) {
        url.to_string()
    } else {
        format!("{}{}", SECURE_SCHEME, url)
    }
}

/// Pull a page title out of a title notification.
///
/// Accepts `{"title": ..}` and `{"detail": {"title": ..}}`; the direct field
/// wins when both are present and non-empty.
pub fn title_from_payload(payload: &Value) -> Option<String> {
    let direct = payload.get("title").and_then(Value::as_str);
    let nested = payload
        .get("detail")
        .and_then(|d| d.get("title"))
        .and_then(Value::as_str);

    direct
        .filter(|t| !t.is_empty())
        .or(nested.filter(|t| !t.is_empty()))
        .map(str::to_string)
}

/// Opaque handle of a content view, assigned by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub u64);

impl fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

/// Size of a content view: the full window width and whatever height is
/// left under the browser chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSize {
    pub width: u32,
    pub height: u32,
}

impl ViewSize {
    pub fn for_window(width: u32, height: u32, chrome_offset: u32) -> Self {
        Self {
            width,
            height: height.saturating_sub(chrome_offset),
        }
    }
}

/// The embedding engine, seen from the bridge.
pub trait ContentHost {
    fn create_view(&mut self, view: ViewHandle, size: ViewSize) -> Result<(), NavigationError>;
    fn load(&mut self, view: ViewHandle, target: &str) -> Result<(), NavigationError>;
    /// Make `view` the only visible content view. `None` shows the placeholder.
    fn show(&mut self, view: Option<ViewHandle>) -> Result<(), NavigationError>;
    fn resize(&mut self, size: ViewSize) -> Result<(), NavigationError>;
    fn destroy(&mut self, view: ViewHandle);
}

type Bindings = Rc<RefCell<HashMap<ViewHandle, String>>>;

/// Registry of attached title listeners, keyed by view.
#[derive(Debug, Default, Clone)]
pub struct TitleListeners {
    bindings: Bindings,
}

impl TitleListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener on `view` that routes titles to `tab_id`. The
    /// listener stays attached until the returned guard is dropped.
    pub fn attach(&self, view: ViewHandle, tab_id: &str) -> TitleListener {
        let previous = self
            .bindings
            .borrow_mut()
            .insert(view, tab_id.to_string());
        debug_assert!(previous.is_none(), "title listener attached twice to {}", view);
        TitleListener {
            view,
            bindings: Rc::downgrade(&self.bindings),
        }
    }

    /// Tab that receives titles reported by `view`, if a listener is attached.
    pub fn bound_tab(&self, view: ViewHandle) -> Option<String> {
        self.bindings.borrow().get(&view).cloned()
    }

    pub fn attached_count(&self) -> usize {
        self.bindings.borrow().len()
    }
}

/// Guard for an attached title listener. Dropping it detaches the listener.
#[derive(Debug)]
pub struct TitleListener {
    view: ViewHandle,
    bindings: Weak<RefCell<HashMap<ViewHandle, String>>>,
}

impl TitleListener {
    pub fn view(&self) -> ViewHandle {
        self.view
    }
}

impl Drop for TitleListener {
    fn drop(&mut self) {
        if let Some(bindings) = self.bindings.upgrade() {
            bindings.borrow_mut().remove(&self.view);
        }
    }
}

/// Glue between the tab store, the address bar and the content views.
#[derive(Debug)]
pub struct NavigationBridge {
    views: HashMap<String, ViewHandle>,
    next_view: u64,
    listeners: TitleListeners,
    title_listener: Option<TitleListener>,
    size: ViewSize,
}

impl NavigationBridge {
    pub fn new(size: ViewSize) -> Self {
        Self {
            views: HashMap::new(),
            next_view: 1,
            listeners: TitleListeners::new(),
            title_listener: None,
            size,
        }
    }

    pub fn view_for(&self, tab_id: &str) -> Option<ViewHandle> {
        self.views.get(tab_id).copied()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn size(&self) -> ViewSize {
        self.size
    }

    pub fn listeners(&self) -> &TitleListeners {
        &self.listeners
    }

    /// View the live title listener is attached to.
    pub fn listening_view(&self) -> Option<ViewHandle> {
        self.title_listener.as_ref().map(TitleListener::view)
    }

    /// Store address-bar text verbatim on the active tab without loading it.
    pub fn set_address_text<S: TabManagerTrait>(
        &mut self,
        store: &mut S,
        text: &str,
    ) -> Result<(), TabError> {
        let tab_id = store.active_tab_id().to_string();
        store.update_tab_url(&tab_id, text)
    }

    /// Store `text` on the active tab and load its navigation target.
    ///
    /// A failed load releases the tab's view, so the next sync retries it.
    pub fn navigate<S: TabManagerTrait, H: ContentHost>(
        &mut self,
        store: &mut S,
        host: &mut H,
        text: &str,
    ) -> Result<(), BrowserError> {
        self.set_address_text(store, text)?;
        if !text.is_empty() {
            let tab_id = store.active_tab_id().to_string();
            if let Err(e) = self.load_tab(host, &tab_id, text) {
                self.reconcile(store, host, false)?;
                return Err(e.into());
            }
        }
        self.sync(store, host)
    }

    /// Reconcile content views and the title listener with the store.
    ///
    /// Must run after every store mutation.
    pub fn sync<S: TabManagerTrait, H: ContentHost>(
        &mut self,
        store: &S,
        host: &mut H,
    ) -> Result<(), BrowserError> {
        self.reconcile(store, host, true)
    }

    /// Apply a title notification reported by `view`.
    ///
    /// Returns `Ok(true)` when a tab title changed. Notifications from views
    /// without an attached listener, or without a usable title, are dropped.
    pub fn on_title_notification<S: TabManagerTrait>(
        &mut self,
        store: &mut S,
        view: ViewHandle,
        payload: &Value,
    ) -> Result<bool, TabError> {
        let Some(tab_id) = self.listeners.bound_tab(view) else {
            tracing::debug!(%view, "ignoring title from detached view");
            return Ok(false);
        };
        let Some(title) = title_from_payload(payload) else {
            tracing::debug!(%view, "title notification without a title");
            return Ok(false);
        };
        store.update_tab_title(&tab_id, &title)?;
        Ok(true)
    }

    pub fn resize<H: ContentHost>(
        &mut self,
        host: &mut H,
        width: u32,
        height: u32,
        chrome_offset: u32,
    ) -> Result<(), NavigationError> {
        self.size = ViewSize::for_window(width, height, chrome_offset);
        host.resize(self.size)
    }

    /// Release the title listener and every content view.
    pub fn teardown<H: ContentHost>(&mut self, host: &mut H) {
        self.title_listener = None;
        for (_, view) in self.views.drain() {
            host.destroy(view);
        }
    }

    fn reconcile<S: TabManagerTrait, H: ContentHost>(
        &mut self,
        store: &S,
        host: &mut H,
        load_missing: bool,
    ) -> Result<(), BrowserError> {
        let closed: Vec<String> = self
            .views
            .keys()
            .filter(|id| store.get_tab(id).is_none())
            .cloned()
            .collect();
        for tab_id in closed {
            tracing::debug!(tab = %tab_id, "destroying view of closed tab");
            self.release_view(host, &tab_id);
        }

        let active = match store.get_active_tab() {
            Ok(tab) => tab,
            Err(e) => {
                tracing::error!("tab store has no active tab");
                return Err(e.into());
            }
        };
        let tab_id = active.id.clone();
        let url = active.url.clone();

        let mut load_error = None;
        if load_missing && !url.is_empty() && self.view_for(&tab_id).is_none() {
            load_error = self.load_tab(host, &tab_id, &url).err();
        }

        let live_view = if url.is_empty() {
            None
        } else {
            self.view_for(&tab_id)
        };

        if self.listening_view() != live_view {
            // The old listener is detached before the new one attaches.
            self.title_listener = None;
            self.title_listener = live_view.map(|view| {
                tracing::debug!(%view, tab = %tab_id, "title listener attached");
                self.listeners.attach(view, &tab_id)
            });
        }

        host.show(live_view)?;
        match load_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Load `url` into the tab's view, creating the view first if needed.
    fn load_tab<H: ContentHost>(
        &mut self,
        host: &mut H,
        tab_id: &str,
        url: &str,
    ) -> Result<(), NavigationError> {
        let view = self.ensure_view(host, tab_id)?;
        let nav_target = navigation_target(url);
        tracing::info!(%view, url = %nav_target, "navigating");
        if let Err(e) = host.load(view, &nav_target) {
            tracing::warn!(%view, error = %e, "load failed, releasing view");
            self.release_view(host, tab_id);
            return Err(e);
        }
        Ok(())
    }

    fn release_view<H: ContentHost>(&mut self, host: &mut H, tab_id: &str) {
        if let Some(view) = self.views.remove(tab_id) {
            if self.listening_view() == Some(view) {
                self.title_listener = None;
            }
            host.destroy(view);
        }
    }

    fn ensure_view<H: ContentHost>(
        &mut self,
        host: &mut H,
        tab_id: &str,
    ) -> Result<ViewHandle, NavigationError> {
        if let Some(view) = self.view_for(tab_id) {
            return Ok(view);
        }
        let view = ViewHandle(self.next_view);
        self.next_view += 1;
        host.create_view(view, self.size)?;
        self.views.insert(tab_id.to_string(), view);
        Ok(view)
    }
}

impl Drop for NavigationBridge {
    fn drop(&mut self) {
        self.title_listener = None;
        if !self.views.is_empty() {
            tracing::debug!(views = self.views.len(), "bridge dropped before teardown");
        }
    }
}
