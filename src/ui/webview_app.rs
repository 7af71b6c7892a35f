//! Desktop preview window using `wry` + `tao`.
//!
//! Architecture:
//! - The demo page is served via the `folio://` custom protocol with its
//!   stylesheet and bridge script inlined.
//! - IPC from JS → Rust via `window.ipc.postMessage()`; each message is one
//!   bridge request line handled by [`crate::bridge::handle_line`].
//! - Replies and timer-fired patches go back through
//!   `window.__folio_receive(...)`.
//! - Settle timers are scheduled with `ControlFlow::WaitUntil` on the next
//!   pending deadline.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::Value;
use tao::event::{Event, StartCause, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::WindowBuilder;
use tracing::{debug, info, warn};
use wry::WebViewBuilder;

use crate::app::Site;
use crate::bridge::{handle_line, timer_event};
use crate::types::Millis;

#[derive(Debug)]
enum UserEvent {
    /// Deliver a bridge message to the page.
    Deliver(Value),
}

const PAGE_HTML: &str = include_str!("../../resources/site/index.html");
const SITE_CSS: &str = include_str!("../../resources/site/site.css");
const BRIDGE_JS: &str = include_str!("../../resources/site/bridge.js");

/// Demo page with the stylesheet and bridge script inlined.
fn page_html() -> String {
    PAGE_HTML
        .replace("/*FOLIO_CSS*/", SITE_CSS)
        .replace("/*FOLIO_BRIDGE*/", BRIDGE_JS)
}

fn elapsed_ms(epoch: Instant) -> Millis {
    Millis::try_from(epoch.elapsed().as_millis()).unwrap_or(Millis::MAX)
}

fn deliver_script(message: &Value) -> String {
    format!("window.__folio_receive && window.__folio_receive({});", message)
}

fn schedule(site: &Mutex<Site>, epoch: Instant) -> ControlFlow {
    match site.lock().ok().and_then(|s| s.next_deadline()) {
        Some(ms) => ControlFlow::WaitUntil(epoch + Duration::from_millis(ms)),
        None => ControlFlow::Wait,
    }
}

// ─── Main entry point ───

pub fn run(site: Site) -> Result<(), Box<dyn std::error::Error>> {
    let site = Arc::new(Mutex::new(site));
    let epoch = Instant::now();

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("Folio")
        .with_inner_size(tao::dpi::LogicalSize::new(1024.0, 768.0))
        .build(&event_loop)?;

    let ipc_site = site.clone();
    let builder = WebViewBuilder::new()
        .with_custom_protocol("folio".into(), move |_wv_id, _request| {
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(page_html().into_bytes().into())
                .unwrap_or_else(|_| wry::http::Response::new(Vec::new().into()))
        })
        .with_url("folio://localhost/")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            debug!(message = &body[..body.len().min(200)], "ipc");
            if let Some(reply) = handle_line(&ipc_site, body, elapsed_ms(epoch)) {
                let _ = proxy.send_event(UserEvent::Deliver(reply));
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .ok_or("window has no GTK container")?;
        builder.build_gtk(vbox)?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window)?;

    info!("preview window open");

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                if let Ok(mut s) = site.lock() {
                    s.unmount();
                }
                *control_flow = ControlFlow::Exit;
                return;
            }

            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                match timer_event(&site, elapsed_ms(epoch)) {
                    Ok(Some(message)) => {
                        let _ = webview.evaluate_script(&deliver_script(&message));
                    }
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "timer dispatch failed"),
                }
            }

            Event::UserEvent(UserEvent::Deliver(message)) => {
                let _ = webview.evaluate_script(&deliver_script(&message));
            }

            _ => {}
        }

        *control_flow = schedule(&site, epoch);
    });
}
