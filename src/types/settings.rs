use serde::{Deserialize, Serialize};

use super::dom::ElementId;

/// Top-level engine settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SiteSettings {
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default)]
    pub header: HeaderSettings,
    #[serde(default)]
    pub progress: ProgressSettings,
    #[serde(default)]
    pub menu: MenuSettings,
    #[serde(default)]
    pub extras: ExtrasSettings,
}

/// Theme persistence and the root element carrying the visual-mode flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeSettings {
    pub storage_key: String,
    pub root: ElementId,
    pub dark_class: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            storage_key: "pref-theme".to_string(),
            root: ElementId::new("body"),
            dark_class: "dark".to_string(),
        }
    }
}

/// Scroll-linked header visibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeaderSettings {
    pub element: ElementId,
    pub hidden_class: String,
    /// Minimum per-event scroll delta (px) that counts as a direction change.
    pub hide_threshold_px: f64,
    /// Above this offset the header may hide; below it the header always shows.
    pub top_guard_px: f64,
    pub settle_ms: u64,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            element: ElementId::new("site-header"),
            hidden_class: "header--hidden".to_string(),
            hide_threshold_px: 6.0,
            top_guard_px: 24.0,
            settle_ms: 150,
        }
    }
}

/// Reading progress indicator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSettings {
    pub container: ElementId,
    pub bar: ElementId,
    pub article: ElementId,
    pub visible_class: String,
    pub settle_ms: u64,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            container: ElementId::new("reading-progress"),
            bar: ElementId::new("reading-progress-bar"),
            article: ElementId::new("post-content"),
            visible_class: "visible".to_string(),
            settle_ms: 1000,
        }
    }
}

/// Off-canvas navigation menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuSettings {
    pub toggle: ElementId,
    pub panel: ElementId,
    pub close_button: ElementId,
    /// Element receiving the scroll-lock class.
    pub body: ElementId,
    pub open_class: String,
    pub scroll_lock_class: String,
    /// Attribute marking backdrop/close elements (value must be `"true"`).
    pub close_attribute: String,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            toggle: ElementId::new("menu-toggle"),
            panel: ElementId::new("side-menu"),
            close_button: ElementId::new("menu-close"),
            body: ElementId::new("body"),
            open_class: "open".to_string(),
            scroll_lock_class: "no-scroll".to_string(),
            close_attribute: "data-close".to_string(),
        }
    }
}

/// Small page enhancements run once at mount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtrasSettings {
    pub code_labels: bool,
    pub year_progress: bool,
}

impl Default for ExtrasSettings {
    fn default() -> Self {
        Self {
            code_labels: true,
            year_progress: true,
        }
    }
}
