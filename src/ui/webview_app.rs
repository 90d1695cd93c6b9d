//! WebView-based browser shell using `wry` + `tao`.
//!
//! Layout:
//! - one chrome webview (tab strip + address bar) across the top,
//!   `chrome.offset` units tall;
//! - one placeholder webview shown while the active tab has no url;
//! - one child webview per tab that has loaded something, stacked under the
//!   chrome, only the active one visible.
//!
//! Every wry callback just forwards a [`UserEvent`] through the event loop
//! proxy, so all state changes happen on the event loop.
//!
//! On Linux the webviews live in a `gtk::Fixed` packed into tao's default
//! vbox, which works under both X11 and Wayland. Other platforms attach them
//! as child windows.

use std::collections::HashMap;

use serde_json::Value;
use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::window::{Window, WindowBuilder};
use wry::{Rect, WebView, WebViewBuilder};

use crate::app::App;
use crate::logging;
use crate::services::navigation_bridge::{ContentHost, ViewHandle, ViewSize};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::NavigationError;

#[derive(Debug)]
enum UserEvent {
    /// Raw IPC message from the chrome webview.
    Chrome(String),
    /// Title notification from a content view.
    Title { view: ViewHandle, payload: Value },
}

const CHROME_HTML: &str = r#"<!DOCTYPE html><html><head><meta charset="UTF-8"><style>
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Helvetica,Arial,sans-serif;background:#1c2128;color:#e6edf3;height:100vh;overflow:hidden;user-select:none}
#strip{display:flex;align-items:flex-end;height:52px;padding:8px 8px 0;gap:4px;overflow-x:auto}
.tab{display:flex;align-items:center;gap:8px;max-width:220px;min-width:90px;height:40px;padding:0 10px;border-radius:8px 8px 0 0;background:#161b22;color:#7d8590;cursor:default}
.tab.active{background:#0d1117;color:#e6edf3}
.tab .label{flex:1;overflow:hidden;white-space:nowrap;text-overflow:ellipsis;font-size:13px}
.tab .close{border:0;background:none;color:inherit;font-size:14px;cursor:pointer}
#new{border:0;background:none;color:#7d8590;font-size:20px;width:32px;height:40px;cursor:pointer}
#bar{height:48px;padding:8px;background:#0d1117}
#address{width:100%;height:32px;padding:0 12px;border:1px solid #30363d;border-radius:6px;background:#161b22;color:#e6edf3;font-size:14px;outline:none}
#address:focus{border-color:#1f6feb}
</style></head><body>
<div id="strip"></div>
<div id="bar"><input id="address" type="text" spellcheck="false" placeholder="Enter address"></div>
<script>
(function(){
  function send(msg){ if(window.ipc) window.ipc.postMessage(JSON.stringify(msg)); }
  var strip=document.getElementById('strip');
  var address=document.getElementById('address');
  window.__mb_render=function(state){
    strip.innerHTML='';
    state.tabs.forEach(function(t){
      var el=document.createElement('div');
      el.className='tab'+(t.active?' active':'');
      var label=document.createElement('span');
      label.className='label';
      label.textContent=t.title;
      label.title=t.url;
      var close=document.createElement('button');
      close.className='close';
      close.textContent='×';
      close.addEventListener('click',function(e){ e.stopPropagation(); send({cmd:'close_tab',id:t.id}); });
      el.addEventListener('click',function(){ send({cmd:'select_tab',id:t.id}); });
      el.appendChild(label);
      el.appendChild(close);
      strip.appendChild(el);
    });
    var add=document.createElement('button');
    add.id='new';
    add.textContent='+';
    add.addEventListener('click',function(){ send({cmd:'new_tab'}); });
    strip.appendChild(add);
    if(document.activeElement!==address||address.dataset.tab!==state.activeId){
      address.value=state.addressText;
    }
    address.dataset.tab=state.activeId;
  };
  address.addEventListener('input',function(){ send({cmd:'address_input',url:address.value}); });
  address.addEventListener('keydown',function(e){
    if(e.key==='Enter'){ send({cmd:'navigate',url:address.value.trim()}); address.blur(); }
  });
  send({cmd:'ui_ready'});
})();
</script></body></html>"#;

const PLACEHOLDER_HTML: &str = r#"<!DOCTYPE html><html><head><meta charset="UTF-8"><style>
body{margin:0;height:100vh;display:flex;align-items:center;justify-content:center;background:#0d1117;color:#484f58;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Helvetica,Arial,sans-serif;font-size:28px;user-select:none}
</style></head><body>Type an address to get started</body></html>"#;

/// Injected into every content view. Reports `document.title` in the
/// `{detail: {title}}` shape; the engine's own title callback covers the
/// `{title}` shape.
const TITLE_REPORTER_JS: &str = r#"
(function(){
  var last=null;
  function report(){
    var t=document.title;
    if(!t||t===last||!window.ipc) return;
    last=t;
    window.ipc.postMessage(JSON.stringify({type:'page-title-updated',detail:{title:t}}));
  }
  document.addEventListener('DOMContentLoaded',report);
  new MutationObserver(report).observe(document,{subtree:true,childList:true,characterData:true});
})();
"#;

fn chrome_bounds(width: u32, chrome_offset: u32) -> Rect {
    Rect {
        position: wry::dpi::LogicalPosition::new(0, 0).into(),
        size: wry::dpi::LogicalSize::new(width, chrome_offset).into(),
    }
}

fn content_bounds(size: ViewSize, chrome_offset: u32) -> Rect {
    Rect {
        position: wry::dpi::LogicalPosition::new(0, chrome_offset as i32).into(),
        size: wry::dpi::LogicalSize::new(size.width, size.height).into(),
    }
}

/// The window plus whatever container child webviews are attached to.
struct Surface {
    #[cfg(target_os = "linux")]
    fixed: gtk::Fixed,
    window: Window,
}

impl Surface {
    fn new(window: Window) -> Result<Self, Box<dyn std::error::Error>> {
        #[cfg(target_os = "linux")]
        {
            use gtk::prelude::*;
            use tao::platform::unix::WindowExtUnix;

            let vbox = window
                .default_vbox()
                .ok_or("window has no GTK container")?;
            let fixed = gtk::Fixed::new();
            vbox.pack_start(&fixed, true, true, 0);
            vbox.show_all();
            Ok(Self { fixed, window })
        }

        #[cfg(not(target_os = "linux"))]
        Ok(Self { window })
    }

    fn build<'a>(&'a self, builder: WebViewBuilder<'a>) -> wry::Result<WebView> {
        #[cfg(target_os = "linux")]
        {
            use wry::WebViewBuilderExtUnix;
            builder.build_gtk(&self.fixed)
        }

        #[cfg(not(target_os = "linux"))]
        builder.build_as_child(&self.window)
    }
}

/// [`ContentHost`] backed by wry child webviews.
struct WryHost {
    views: HashMap<ViewHandle, WebView>,
    placeholder: WebView,
    proxy: EventLoopProxy<UserEvent>,
    chrome_offset: u32,
    devtools: bool,
    // Declared last so every webview is dropped before the window.
    surface: Surface,
}

impl WryHost {
    fn new(
        surface: Surface,
        proxy: EventLoopProxy<UserEvent>,
        size: ViewSize,
        chrome_offset: u32,
        devtools: bool,
    ) -> wry::Result<Self> {
        let placeholder = surface.build(
            WebViewBuilder::new()
                .with_html(PLACEHOLDER_HTML)
                .with_bounds(content_bounds(size, chrome_offset)),
        )?;

        Ok(Self {
            views: HashMap::new(),
            placeholder,
            proxy,
            chrome_offset,
            devtools,
            surface,
        })
    }

    fn view(&self, view: ViewHandle) -> Result<&WebView, NavigationError> {
        self.views
            .get(&view)
            .ok_or_else(|| NavigationError::ViewUnavailable(view.to_string()))
    }
}

impl ContentHost for WryHost {
    fn create_view(&mut self, view: ViewHandle, size: ViewSize) -> Result<(), NavigationError> {
        let title_proxy = self.proxy.clone();
        let ipc_proxy = self.proxy.clone();

        let builder = WebViewBuilder::new()
            .with_bounds(content_bounds(size, self.chrome_offset))
            .with_visible(false)
            .with_devtools(self.devtools)
            .with_initialization_script(TITLE_REPORTER_JS)
            .with_document_title_changed_handler(move |title: String| {
                let payload = serde_json::json!({ "title": title });
                let _ = title_proxy.send_event(UserEvent::Title { view, payload });
            })
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                match serde_json::from_str::<Value>(request.body()) {
                    Ok(payload) => {
                        let _ = ipc_proxy.send_event(UserEvent::Title { view, payload });
                    }
                    Err(e) => tracing::debug!(%view, error = %e, "ignoring content ipc"),
                }
            });
        let webview = self
            .surface
            .build(builder)
            .map_err(|e| NavigationError::ViewUnavailable(format!("{}: {}", view, e)))?;

        tracing::debug!(%view, "content view created");
        self.views.insert(view, webview);
        Ok(())
    }

    fn load(&mut self, view: ViewHandle, target: &str) -> Result<(), NavigationError> {
        self.view(view)?
            .load_url(target)
            .map_err(|e| NavigationError::LoadFailed(format!("{}: {}", target, e)))
    }

    fn show(&mut self, view: Option<ViewHandle>) -> Result<(), NavigationError> {
        for (handle, webview) in &self.views {
            webview
                .set_visible(Some(*handle) == view)
                .map_err(|e| NavigationError::ViewUnavailable(format!("{}: {}", handle, e)))?;
        }
        self.placeholder
            .set_visible(view.is_none())
            .map_err(|e| NavigationError::ViewUnavailable(format!("placeholder: {}", e)))
    }

    fn resize(&mut self, size: ViewSize) -> Result<(), NavigationError> {
        let bounds = content_bounds(size, self.chrome_offset);
        for (handle, webview) in &self.views {
            webview
                .set_bounds(bounds)
                .map_err(|e| NavigationError::ViewUnavailable(format!("{}: {}", handle, e)))?;
        }
        self.placeholder
            .set_bounds(bounds)
            .map_err(|e| NavigationError::ViewUnavailable(format!("placeholder: {}", e)))
    }

    fn destroy(&mut self, view: ViewHandle) {
        if self.views.remove(&view).is_some() {
            tracing::debug!(%view, "content view destroyed");
        }
    }
}

fn render_chrome(chrome: &WebView, app: &App<WryHost>) {
    let strip = match app.tab_strip() {
        Ok(strip) => strip,
        Err(e) => {
            tracing::error!(error = %e, "cannot render tab strip");
            return;
        }
    };
    match serde_json::to_string(&strip) {
        Ok(json) => {
            let script = format!("if(window.__mb_render)window.__mb_render({})", json);
            if let Err(e) = chrome.evaluate_script(&script) {
                tracing::warn!(error = %e, "chrome render failed");
            }
        }
        Err(e) => tracing::error!(error = %e, "cannot serialize tab strip"),
    }
}

// ─── Main entry point ───

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings_engine = SettingsEngine::new(None);
    let load_result = settings_engine.load();
    let settings = settings_engine.get_settings().clone();

    logging::init(&settings.developer.log_filter);
    if let Err(e) = load_result {
        tracing::warn!(error = %e, "falling back to default settings");
    }

    let offset = settings.chrome.offset;
    let devtools = settings.developer.devtools;

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(&settings.window.title)
        .with_inner_size(LogicalSize::new(
            settings.window.width as f64,
            settings.window.height as f64,
        ))
        .build(&event_loop)?;

    let inner: LogicalSize<u32> = window.inner_size().to_logical(window.scale_factor());
    let surface = Surface::new(window)?;

    let chrome_proxy = proxy.clone();
    let chrome = surface.build(
        WebViewBuilder::new()
            .with_html(CHROME_HTML)
            .with_bounds(chrome_bounds(inner.width, offset))
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                let _ = chrome_proxy.send_event(UserEvent::Chrome(request.body().clone()));
            })
            .with_devtools(devtools),
    )?;

    let size = ViewSize::for_window(inner.width, inner.height, offset);
    let host = WryHost::new(surface, proxy, size, offset, devtools)?;
    let mut app = App::new(host, settings_engine);
    app.resize(inner.width, inner.height);
    app.startup()?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                app.shutdown();
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(physical),
                ..
            } => {
                let logical: LogicalSize<u32> =
                    physical.to_logical(app.host().surface.window.scale_factor());
                if let Err(e) = chrome.set_bounds(chrome_bounds(logical.width, offset)) {
                    tracing::warn!(error = %e, "resizing chrome failed");
                }
                app.resize(logical.width, logical.height);
            }

            Event::UserEvent(UserEvent::Chrome(message)) => {
                tracing::trace!(%message, "chrome ipc");
                if app.handle_ipc(&message) {
                    render_chrome(&chrome, &app);
                }
            }

            Event::UserEvent(UserEvent::Title { view, payload }) => {
                if app.handle_title_notification(view, &payload) {
                    render_chrome(&chrome, &app);
                }
            }

            _ => {}
        }
    })
}
