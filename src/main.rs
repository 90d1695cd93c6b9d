//! MiniBrowser — a minimal multi-tab web browser shell.
//!
//! Entry point: opens the browser window. When built without the `gui`
//! feature, walks through the tab store and navigation bridge on the console.

#[cfg(feature = "gui")]
fn main() {
    if let Err(e) = minibrowser::ui::webview_app::run() {
        eprintln!("MiniBrowser failed to start: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use minibrowser::app::App;
    use minibrowser::managers::tab_manager::TabManagerTrait;
    use minibrowser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
    use minibrowser::types::command::ChromeCommand;
    use serde_json::json;

    let mut settings_engine = SettingsEngine::new(None);
    let load_result = settings_engine.load();
    minibrowser::logging::init(&settings_engine.get_settings().developer.log_filter);
    if let Err(e) = load_result {
        tracing::warn!(error = %e, "falling back to default settings");
    }

    println!("MiniBrowser v{} — console mode", env!("CARGO_PKG_VERSION"));
    println!();

    let mut app = App::new(console::ConsoleHost, settings_engine);
    if let Err(e) = app.startup() {
        eprintln!("startup failed: {}", e);
        std::process::exit(1);
    }

    let commands = [
        r#"{"cmd":"navigate","url":"example.com"}"#,
        r#"{"cmd":"new_tab"}"#,
        r#"{"cmd":"address_input","url":"rust-lang.org"}"#,
        r#"{"cmd":"navigate","url":"https://rust-lang.org"}"#,
    ];
    for message in commands {
        println!("> {}", message);
        app.handle_ipc(message);
    }

    if let Some(view) = app.bridge.listening_view() {
        app.handle_title_notification(view, &json!({ "detail": { "title": "Rust" } }));
    }

    let first = app.tab_manager.get_all_tabs()[0].id.clone();
    for command in [
        ChromeCommand::SelectTab { id: first.clone() },
        ChromeCommand::CloseTab { id: first },
    ] {
        if let Err(e) = app.handle_command(command) {
            tracing::warn!(error = %e, "console command failed");
        }
    }

    match app.tab_strip() {
        Ok(strip) => {
            println!();
            for tab in &strip.tabs {
                let marker = if tab.active { "*" } else { " " };
                println!(" {} {} [{}]", marker, tab.title, tab.url);
            }
        }
        Err(e) => eprintln!("no tab strip: {}", e),
    }

    app.shutdown();
}

#[cfg(not(feature = "gui"))]
mod console {
    use minibrowser::services::navigation_bridge::{ContentHost, ViewHandle, ViewSize};
    use minibrowser::types::errors::NavigationError;

    /// Content host that only prints what a real engine would be asked to do.
    pub struct ConsoleHost;

    impl ContentHost for ConsoleHost {
        fn create_view(&mut self, view: ViewHandle, size: ViewSize) -> Result<(), NavigationError> {
            println!("  create {} ({}x{})", view, size.width, size.height);
            Ok(())
        }

        fn load(&mut self, view: ViewHandle, target: &str) -> Result<(), NavigationError> {
            println!("  load {} <- {}", view, target);
            Ok(())
        }

        fn show(&mut self, view: Option<ViewHandle>) -> Result<(), NavigationError> {
            match view {
                Some(view) => println!("  show {}", view),
                None => println!("  show placeholder"),
            }
            Ok(())
        }

        fn resize(&mut self, size: ViewSize) -> Result<(), NavigationError> {
            println!("  resize {}x{}", size.width, size.height);
            Ok(())
        }

        fn destroy(&mut self, view: ViewHandle) {
            println!("  destroy {}", view);
        }
    }
}
