use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of an element in the host page (its DOM `id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One element as reported by the host page when it mounts.
///
/// Elements are listed in document order; `parent` must refer to an element
/// earlier in the list (or be absent for top-level nodes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub id: ElementId,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub parent: Option<ElementId>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Whether the element takes part in sequential keyboard navigation.
    #[serde(default)]
    pub focusable: bool,
    /// Full scrollable height of the element's content, in CSS pixels.
    #[serde(default)]
    pub scroll_height: f64,
}

fn default_tag() -> String {
    "div".to_string()
}

impl ElementSnapshot {
    pub fn new(id: impl Into<ElementId>, tag: &str) -> Self {
        Self {
            id: id.into(),
            tag: tag.to_string(),
            parent: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            focusable: false,
            scroll_height: 0.0,
        }
    }

    pub fn child_of(mut self, parent: impl Into<ElementId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }

    pub fn with_scroll_height(mut self, height: f64) -> Self {
        self.scroll_height = height;
        self
    }
}

/// A recorded DOM mutation, replayed by the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomPatch {
    AddClass { id: ElementId, class: String },
    RemoveClass { id: ElementId, class: String },
    SetAttribute { id: ElementId, name: String, value: String },
    SetStyle { id: ElementId, property: String, value: String },
    SetText { id: ElementId, text: String },
    Focus { id: ElementId },
}
