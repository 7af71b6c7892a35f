//! Tests for the bridge method dispatcher.
//!
//! Each test drives a `Site` through `handle_method` / `handle_line` with
//! JSON parameters, the way the stdin/stdout bridge and the preview IPC do.

use std::sync::Mutex;

use folio::app::Site;
use folio::bridge::{handle_line, handle_method, request_now, timer_event};
use folio::services::preference_store::MemoryStore;
use folio::types::errors::BridgeError;
use folio::types::settings::SiteSettings;
use serde_json::{json, Value};

fn site() -> Mutex<Site> {
    Mutex::new(Site::new(SiteSettings::default(), Box::new(MemoryStore::new())))
}

fn elements() -> Value {
    json!([
        {"id": "body", "tag": "body"},
        {"id": "site-header", "tag": "header", "parent": "body"},
        {"id": "menu-toggle", "tag": "button", "parent": "site-header", "focusable": true},
        {"id": "side-menu", "tag": "nav", "parent": "body"},
        {"id": "menu-close", "tag": "button", "parent": "side-menu", "focusable": true},
        {"id": "menu-link", "tag": "a", "parent": "side-menu", "focusable": true},
        {"id": "backdrop", "parent": "side-menu", "attributes": {"data-close": "true"}},
        {"id": "reading-progress", "parent": "body"},
        {"id": "reading-progress-bar", "parent": "reading-progress"},
        {"id": "post-content", "tag": "article", "parent": "body", "scroll_height": 5000.0}
    ])
}

fn mounted_site() -> Mutex<Site> {
    let s = site();
    handle_method(
        &s,
        "page.mount",
        &json!({
            "elements": elements(),
            "scroll_y": 0.0,
            "viewport_height": 1000.0,
            "prefers_dark": false,
            "local_time": "2025-07-02T12:00:00",
            "now": 0
        }),
        0,
    )
    .unwrap();
    s
}

fn has_patch(result: &Value, expected: Value) -> bool {
    result["patches"]
        .as_array()
        .map(|patches| patches.iter().any(|p| *p == expected))
        .unwrap_or(false)
}

#[test]
fn test_ping() {
    let s = site();
    let result = handle_method(&s, "ping", &json!({}), 0).unwrap();
    assert_eq!(result["pong"], json!(true));
    assert_eq!(result["version"], json!(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_mount_reports_and_returns_patches() {
    let s = site();
    let result = handle_method(
        &s,
        "page.mount",
        &json!({"elements": elements(), "scroll_y": 0.0, "viewport_height": 1000.0, "prefers_dark": true}),
        0,
    )
    .unwrap();

    assert_eq!(result["mounted"]["applied_mode"], json!("dark"));
    assert_eq!(result["mounted"]["header"], json!(true));
    assert_eq!(result["mounted"]["menu"], json!(true));
    assert!(has_patch(&result, json!({"op": "add_class", "id": "body", "class": "dark"})));
    assert!(has_patch(
        &result,
        json!({"op": "set_attribute", "id": "reading-progress-bar", "name": "aria-valuemax", "value": "100"})
    ));
    assert_eq!(result["next_deadline"], json!(1000));
}

#[test]
fn test_mount_requires_elements_and_metrics() {
    let s = site();
    let err = handle_method(&s, "page.mount", &json!({"scroll_y": 0.0, "viewport_height": 1.0}), 0)
        .unwrap_err();
    assert!(matches!(err, BridgeError::MissingParam("elements")));

    let err = handle_method(&s, "page.mount", &json!({"elements": [], "viewport_height": 1.0}), 0)
        .unwrap_err();
    assert!(matches!(err, BridgeError::MissingParam("scroll_y")));

    let err = handle_method(
        &s,
        "page.mount",
        &json!({"elements": [{"tag": "div"}], "scroll_y": 0.0, "viewport_height": 1.0}),
        0,
    )
    .unwrap_err();
    assert!(matches!(err, BridgeError::InvalidParam { name: "elements", .. }));

    let err = handle_method(
        &s,
        "page.mount",
        &json!({"elements": [], "scroll_y": 0.0, "viewport_height": 1.0, "local_time": "yesterday"}),
        0,
    )
    .unwrap_err();
    assert!(matches!(err, BridgeError::InvalidParam { name: "local_time", .. }));
}

#[test]
fn test_scroll_hides_header_and_sets_deadline() {
    let s = mounted_site();
    let result = handle_method(
        &s,
        "page.scroll",
        &json!({"scroll_y": 600.0, "viewport_height": 1000.0, "now": 2000}),
        0,
    )
    .unwrap();

    assert!(has_patch(
        &result,
        json!({"op": "add_class", "id": "site-header", "class": "header--hidden"})
    ));
    assert!(has_patch(
        &result,
        json!({"op": "set_style", "id": "reading-progress-bar", "property": "width", "value": "15.00%"})
    ));
    assert_eq!(result["next_deadline"], json!(2150));
}

#[test]
fn test_scroll_heights_update_article() {
    let s = mounted_site();
    let result = handle_method(
        &s,
        "page.scroll",
        &json!({"scroll_y": 500.0, "viewport_height": 1000.0, "heights": {"post-content": 2000.0}}),
        10,
    )
    .unwrap();
    assert!(has_patch(
        &result,
        json!({"op": "set_style", "id": "reading-progress-bar", "property": "width", "value": "50.00%"})
    ));
}

#[test]
fn test_scroll_rejects_non_numeric_height() {
    let s = mounted_site();
    let err = handle_method(
        &s,
        "page.scroll",
        &json!({"scroll_y": 1.0, "viewport_height": 1000.0, "heights": {"post-content": "tall"}}),
        10,
    )
    .unwrap_err();
    assert!(matches!(err, BridgeError::InvalidParam { name: "heights", .. }));
}

#[test]
fn test_timer_tick_uses_request_clock() {
    let s = mounted_site();
    handle_method(&s, "page.scroll", &json!({"scroll_y": 600.0, "viewport_height": 1000.0}), 100).unwrap();

    let early = handle_method(&s, "timer.tick", &json!({"now": 249}), 0).unwrap();
    assert_eq!(early["fired"], json!(false));

    let due = handle_method(&s, "timer.tick", &json!({"now": 250}), 0).unwrap();
    assert_eq!(due["fired"], json!(true));
    assert!(has_patch(
        &due,
        json!({"op": "remove_class", "id": "site-header", "class": "header--hidden"})
    ));
    assert_eq!(due["next_deadline"], json!(1100));
}

#[test]
fn test_menu_click_and_key_flow() {
    let s = mounted_site();
    let opened = handle_method(&s, "page.click", &json!({"target": "menu-toggle"}), 0).unwrap();
    assert_eq!(opened["handled"], json!(true));
    assert!(has_patch(&opened, json!({"op": "focus", "id": "menu-close"})));
    assert!(has_patch(&opened, json!({"op": "add_class", "id": "body", "class": "no-scroll"})));

    let wrapped = handle_method(
        &s,
        "page.key",
        &json!({"key": "Tab", "shift": true, "target": "menu-close"}),
        0,
    )
    .unwrap();
    assert_eq!(wrapped["prevent_default"], json!(true));
    assert!(has_patch(&wrapped, json!({"op": "focus", "id": "menu-link"})));

    let closed = handle_method(&s, "page.key", &json!({"key": "Escape"}), 0).unwrap();
    assert_eq!(closed["prevent_default"], json!(false));
    assert!(has_patch(
        &closed,
        json!({"op": "set_attribute", "id": "side-menu", "name": "aria-hidden", "value": "true"})
    ));
}

#[test]
fn test_backdrop_click_closes() {
    let s = mounted_site();
    handle_method(&s, "page.click", &json!({"target": "menu-toggle"}), 0).unwrap();
    let result = handle_method(&s, "page.click", &json!({"target": "backdrop"}), 0).unwrap();
    assert_eq!(result["handled"], json!(true));
}

#[test]
fn test_click_requires_target() {
    let s = mounted_site();
    let err = handle_method(&s, "page.click", &json!({}), 0).unwrap_err();
    assert!(matches!(err, BridgeError::MissingParam("target")));
}

#[test]
fn test_focus_then_open_restores_focus_on_close() {
    let s = mounted_site();
    handle_method(&s, "page.focus", &json!({"target": "menu-toggle"}), 0).unwrap();
    handle_method(&s, "page.click", &json!({"target": "menu-toggle"}), 0).unwrap();
    let closed = handle_method(&s, "page.click", &json!({"target": "menu-close"}), 0).unwrap();
    assert!(has_patch(&closed, json!({"op": "focus", "id": "menu-toggle"})));
}

#[test]
fn test_theme_methods() {
    let s = mounted_site();

    let got = handle_method(&s, "theme.get", &json!({}), 0).unwrap();
    assert_eq!(got["preference"], json!("auto"));
    assert_eq!(got["applied"], json!("light"));

    let toggled = handle_method(&s, "theme.toggle", &json!({}), 0).unwrap();
    assert_eq!(toggled["preference"], json!("dark"));
    assert_eq!(toggled["applied"], json!("dark"));
    assert!(has_patch(
        &toggled,
        json!({"op": "set_attribute", "id": "body", "name": "data-theme", "value": "dark"})
    ));

    let set = handle_method(&s, "theme.set", &json!({"preference": "auto"}), 0).unwrap();
    assert_eq!(set["applied"], json!("light"));

    let scheme = handle_method(&s, "system.scheme", &json!({"dark": true}), 0).unwrap();
    assert_eq!(scheme["applied"], json!("dark"));

    let err = handle_method(&s, "theme.set", &json!({"preference": "sepia"}), 0).unwrap_err();
    assert!(matches!(err, BridgeError::InvalidParam { name: "preference", .. }));

    let err = handle_method(&s, "system.scheme", &json!({}), 0).unwrap_err();
    assert!(matches!(err, BridgeError::MissingParam("dark")));
}

#[test]
fn test_settings_get() {
    let s = site();
    let result = handle_method(&s, "settings.get", &json!({}), 0).unwrap();
    assert_eq!(result["header"]["settle_ms"], json!(150));
    assert_eq!(result["menu"]["panel"], json!("side-menu"));
}

#[test]
fn test_unmount_then_events_are_quiet() {
    let s = mounted_site();
    let result = handle_method(&s, "page.unmount", &json!({}), 0).unwrap();
    assert_eq!(result["next_deadline"], Value::Null);

    let scrolled = handle_method(&s, "page.scroll", &json!({"scroll_y": 900.0, "viewport_height": 1000.0}), 10).unwrap();
    assert_eq!(scrolled["patches"], json!([]));
}

#[test]
fn test_page_dom_replaces_elements() {
    let s = mounted_site();
    handle_method(
        &s,
        "page.dom",
        &json!({"elements": [{"id": "body", "tag": "body"}]}),
        0,
    )
    .unwrap();
    let result = handle_method(&s, "page.click", &json!({"target": "menu-toggle"}), 0).unwrap();
    // The trigger is gone from the document, so the click is not on it.
    assert_eq!(result["handled"], json!(false));
}

#[test]
fn test_unknown_method() {
    let s = site();
    let err = handle_method(&s, "tab.open", &json!({}), 0).unwrap_err();
    assert_eq!(err.to_string(), "unknown method: tab.open");
}

#[test]
fn test_request_now_prefers_params() {
    assert_eq!(request_now(&json!({"now": 42}), 7), 42);
    assert_eq!(request_now(&json!({}), 7), 7);
    assert_eq!(request_now(&json!({"now": "soon"}), 7), 7);
}

#[test]
fn test_handle_line_envelopes() {
    let s = site();
    assert_eq!(handle_line(&s, "   ", 0), None);

    let ok = handle_line(&s, r#"{"id":3,"method":"ping"}"#, 0).unwrap();
    assert_eq!(ok["id"], json!(3));
    assert_eq!(ok["result"]["pong"], json!(true));

    let err = handle_line(&s, r#"{"id":"a","method":"nope","params":{}}"#, 0).unwrap();
    assert_eq!(err["id"], json!("a"));
    assert_eq!(err["error"], json!("unknown method: nope"));

    let bad = handle_line(&s, "{not json", 0).unwrap();
    assert_eq!(bad["id"], Value::Null);
    assert!(bad["error"].as_str().unwrap().starts_with("parse error"));
}

#[test]
fn test_timer_event_only_when_patches_result() {
    let s = mounted_site();
    assert_eq!(timer_event(&s, 10).unwrap(), None);

    handle_method(&s, "page.scroll", &json!({"scroll_y": 600.0, "viewport_height": 1000.0}), 100).unwrap();
    let event = timer_event(&s, 250).unwrap().unwrap();
    assert_eq!(event["event"], json!("patches"));
    assert!(has_patch(
        &event,
        json!({"op": "remove_class", "id": "site-header", "class": "header--hidden"})
    ));
    assert_eq!(event["next_deadline"], json!(1100));
}
