//! Bridge method handler.
//!
//! Translates host requests (`page.scroll`, `page.key`, `theme.toggle`, ...)
//! into [`Site`] calls. Every successful reply carries the DOM patches the
//! call produced and the next pending timer deadline, so a host can apply
//! the patches and schedule a `timer.tick`. Shared by the stdin/stdout bridge
//! server and the desktop preview's IPC handler.

use std::sync::Mutex;

use chrono::NaiveDateTime;
use serde_json::{json, Map, Value};
use tracing::trace;

use crate::app::{MountOptions, Site};
use crate::types::dom::{ElementId, ElementSnapshot};
use crate::types::errors::BridgeError;
use crate::types::menu::{Key, KeyEvent};
use crate::types::theme::ThemePreference;
use crate::types::Millis;

fn f64_param(params: &Value, name: &'static str) -> Result<f64, BridgeError> {
    let value = params
        .get(name)
        .and_then(Value::as_f64)
        .ok_or(BridgeError::MissingParam(name))?;
    if !value.is_finite() {
        return Err(BridgeError::InvalidParam {
            name,
            reason: "must be finite".to_string(),
        });
    }
    Ok(value)
}

fn bool_param(params: &Value, name: &'static str) -> Result<bool, BridgeError> {
    params
        .get(name)
        .and_then(Value::as_bool)
        .ok_or(BridgeError::MissingParam(name))
}

fn str_param<'a>(params: &'a Value, name: &'static str) -> Result<&'a str, BridgeError> {
    params
        .get(name)
        .and_then(Value::as_str)
        .ok_or(BridgeError::MissingParam(name))
}

fn target_param(params: &Value) -> Option<ElementId> {
    params
        .get("target")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(ElementId::from)
}

fn elements_param(params: &Value) -> Result<Vec<ElementSnapshot>, BridgeError> {
    let raw = params
        .get("elements")
        .cloned()
        .ok_or(BridgeError::MissingParam("elements"))?;
    serde_json::from_value(raw).map_err(|e| BridgeError::InvalidParam {
        name: "elements",
        reason: e.to_string(),
    })
}

fn local_time_param(params: &Value) -> Result<Option<NaiveDateTime>, BridgeError> {
    match params.get("local_time").and_then(Value::as_str) {
        Some(raw) => raw
            .parse::<NaiveDateTime>()
            .map(Some)
            .map_err(|e| BridgeError::InvalidParam {
                name: "local_time",
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Clock value for a request: the host's `now` if it sent one.
pub fn request_now(params: &Value, fallback: Millis) -> Millis {
    params.get("now").and_then(Value::as_u64).unwrap_or(fallback)
}

/// Wraps a method result with the drained patches and next deadline.
fn reply(site: &mut Site, extra: Value) -> Value {
    let mut body = match extra {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    body.insert("patches".to_string(), json!(site.drain_patches()));
    body.insert("next_deadline".to_string(), json!(site.next_deadline()));
    Value::Object(body)
}

/// Dispatch a bridge method call.
///
/// `clock` is the server's notion of "now" in milliseconds, used when the
/// request carries no `now` of its own.
pub fn handle_method(
    site: &Mutex<Site>,
    method: &str,
    params: &Value,
    clock: Millis,
) -> Result<Value, BridgeError> {
    let now = request_now(params, clock);
    trace!(method, now, "bridge request");

    let mut s = site
        .lock()
        .map_err(|e| BridgeError::Poisoned(e.to_string()))?;

    match method {
        "ping" => Ok(json!({"pong": true, "version": env!("CARGO_PKG_VERSION")})),

        // ─── Page lifecycle ───
        "page.mount" => {
            let elements = elements_param(params)?;
            let scroll_y = f64_param(params, "scroll_y")?;
            let viewport_height = f64_param(params, "viewport_height")?;
            let prefers_dark = params
                .get("prefers_dark")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let mut opts = MountOptions::new(scroll_y, viewport_height, prefers_dark, now);
            if let Some(local_time) = local_time_param(params)? {
                opts.local_time = local_time;
            }
            let report = s.mount(elements, opts);
            let report = serde_json::to_value(report).map_err(|e| BridgeError::InvalidParam {
                name: "report",
                reason: e.to_string(),
            })?;
            Ok(reply(&mut s, json!({ "mounted": report })))
        }
        "page.unmount" => {
            s.unmount();
            Ok(reply(&mut s, json!({"ok": true})))
        }
        "page.dom" => {
            let elements = elements_param(params)?;
            s.replace_elements(elements);
            Ok(reply(&mut s, json!({"ok": true})))
        }

        // ─── Page events ───
        "page.scroll" => {
            let scroll_y = f64_param(params, "scroll_y")?;
            let viewport_height = f64_param(params, "viewport_height")?;
            if let Some(heights) = params.get("heights").and_then(Value::as_object) {
                for (id, height) in heights {
                    let height = height.as_f64().filter(|h| h.is_finite()).ok_or_else(|| {
                        BridgeError::InvalidParam {
                            name: "heights",
                            reason: format!("height of '{}' is not a finite number", id),
                        }
                    })?;
                    s.set_scroll_height(&ElementId::new(id.as_str()), height);
                }
            }
            s.scroll(scroll_y, viewport_height, now);
            Ok(reply(&mut s, json!({})))
        }
        "page.key" => {
            let key = Key::from_dom(str_param(params, "key")?);
            let shift = params.get("shift").and_then(Value::as_bool).unwrap_or(false);
            let outcome = s.key(&KeyEvent::new(key, shift, target_param(params)));
            Ok(reply(&mut s, json!({"prevent_default": outcome.prevent_default})))
        }
        "page.click" => {
            let target = target_param(params).ok_or(BridgeError::MissingParam("target"))?;
            let handled = s.click(&target);
            Ok(reply(&mut s, json!({"handled": handled})))
        }
        "page.focus" => {
            s.focus(target_param(params));
            Ok(reply(&mut s, json!({})))
        }

        // ─── Theme ───
        "system.scheme" => {
            let dark = bool_param(params, "dark")?;
            let applied = s.system_scheme_changed(dark);
            Ok(reply(&mut s, json!({ "applied": applied })))
        }
        "theme.toggle" => {
            let applied = s.toggle_theme();
            let preference = s.theme_preference();
            Ok(reply(&mut s, json!({"preference": preference, "applied": applied})))
        }
        "theme.set" => {
            let preference: ThemePreference = str_param(params, "preference")?
                .parse()
                .map_err(|reason| BridgeError::InvalidParam {
                    name: "preference",
                    reason,
                })?;
            let applied = s.set_theme_preference(preference);
            Ok(reply(&mut s, json!({"preference": preference, "applied": applied})))
        }
        "theme.get" => {
            let preference = s.theme_preference();
            let applied = s.applied_mode();
            Ok(reply(&mut s, json!({"preference": preference, "applied": applied})))
        }

        // ─── Timers / settings ───
        "timer.tick" => {
            let fired = s.tick(now);
            Ok(reply(&mut s, json!({ "fired": fired })))
        }
        "settings.get" => {
            serde_json::to_value(s.settings()).map_err(|e| BridgeError::InvalidParam {
                name: "settings",
                reason: e.to_string(),
            })
        }

        other => Err(BridgeError::UnknownMethod(other.to_string())),
    }
}

/// Decodes one newline-delimited request and produces its response line.
///
/// Returns `None` for blank lines.
pub fn handle_line(site: &Mutex<Site>, line: &str, clock: Millis) -> Option<Value> {
    if line.trim().is_empty() {
        return None;
    }
    let req: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return Some(json!({"id": null, "error": format!("parse error: {}", e)})),
    };
    let id = req.get("id").cloned().unwrap_or(Value::Null);
    let method = req.get("method").and_then(Value::as_str).unwrap_or("");
    let params = req.get("params").cloned().unwrap_or_else(|| json!({}));

    Some(match handle_method(site, method, &params, clock) {
        Ok(result) => json!({"id": id, "result": result}),
        Err(err) => json!({"id": id, "error": err.to_string()}),
    })
}

/// Fires due timers and returns the unsolicited patch event, if any patch
/// resulted.
pub fn timer_event(site: &Mutex<Site>, now: Millis) -> Result<Option<Value>, BridgeError> {
    let mut s = site
        .lock()
        .map_err(|e| BridgeError::Poisoned(e.to_string()))?;
    s.tick(now);
    let patches = s.drain_patches();
    if patches.is_empty() {
        return Ok(None);
    }
    Ok(Some(json!({
        "event": "patches",
        "patches": patches,
        "next_deadline": s.next_deadline(),
    })))
}
