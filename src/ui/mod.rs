//! Folio desktop preview.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! A bundled demo post is rendered inside the WebView. Its bridge script
//! forwards page events to the engine over wry IPC and applies the DOM
//! patches that come back.

pub mod webview_app;
