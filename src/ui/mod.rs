//! MiniBrowser UI layer.
//!
//! Uses `wry` for the platform WebView (WebView2 on Windows, WebKitGTK on
//! Linux, WKWebView on macOS) and `tao` for the window and event loop. The
//! browser chrome itself is HTML/CSS/JS talking to Rust over wry IPC.

pub mod webview_app;
