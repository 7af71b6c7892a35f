//! In-memory mirror of the host page.
//!
//! The host reports its relevant elements once at mount (and again whenever
//! its DOM changes), keeps scroll metrics and focus in sync through events,
//! and replays the [`DomPatch`] log the engine produces.

use std::collections::{BTreeMap, HashMap};

use super::Document;
use crate::types::dom::{DomPatch, ElementId, ElementSnapshot};

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: Option<String>,
    focusable: bool,
    scroll_height: f64,
}

impl From<ElementSnapshot> for Node {
    fn from(snap: ElementSnapshot) -> Self {
        let mut classes: Vec<String> = Vec::with_capacity(snap.classes.len());
        for class in snap.classes {
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
        Self {
            tag: snap.tag,
            parent: snap.parent,
            classes,
            attributes: snap.attributes,
            styles: BTreeMap::new(),
            text: None,
            focusable: snap.focusable,
            scroll_height: snap.scroll_height,
        }
    }
}

/// A [`Document`] that records every effective mutation.
#[derive(Debug, Clone, Default)]
pub struct VirtualDocument {
    order: Vec<ElementId>,
    nodes: HashMap<ElementId, Node>,
    active: Option<ElementId>,
    scroll_y: f64,
    viewport_height: f64,
    patches: Vec<DomPatch>,
}

impl VirtualDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from a snapshot listed in document order.
    pub fn from_snapshot(elements: Vec<ElementSnapshot>) -> Self {
        let mut doc = Self::new();
        doc.replace_elements(elements);
        doc
    }

    /// Replaces the element tree, keeping scroll metrics. Focus is kept only
    /// if the focused element survived.
    pub fn replace_elements(&mut self, elements: Vec<ElementSnapshot>) {
        self.order.clear();
        self.nodes.clear();
        for snap in elements {
            self.insert(snap);
        }
        if let Some(active) = &self.active {
            if !self.nodes.contains_key(active) {
                self.active = None;
            }
        }
    }

    /// Appends an element. A duplicate id replaces the earlier element in place.
    pub fn insert(&mut self, snap: ElementSnapshot) {
        let id = snap.id.clone();
        if !self.nodes.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.nodes.insert(id, Node::from(snap));
    }

    /// Disconnects an element and its whole subtree.
    pub fn remove(&mut self, id: &ElementId) {
        let doomed: Vec<ElementId> = self
            .order
            .iter()
            .filter(|candidate| self.is_within(candidate, id))
            .cloned()
            .collect();
        for gone in &doomed {
            self.nodes.remove(gone);
        }
        self.order.retain(|candidate| !doomed.contains(candidate));
        if let Some(active) = &self.active {
            if doomed.contains(active) {
                self.active = None;
            }
        }
    }

    /// Records scroll metrics reported by the host.
    pub fn set_scroll(&mut self, scroll_y: f64, viewport_height: f64) {
        self.scroll_y = scroll_y;
        self.viewport_height = viewport_height;
    }

    pub fn set_scroll_height(&mut self, id: &ElementId, height: f64) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.scroll_height = height;
        }
    }

    /// Records focus moved by the user. Produces no patch.
    pub fn sync_focus(&mut self, id: Option<ElementId>) {
        self.active = id.filter(|id| self.nodes.contains_key(id));
    }

    pub fn style(&self, id: &ElementId, property: &str) -> Option<String> {
        self.nodes.get(id)?.styles.get(property).cloned()
    }

    pub fn text(&self, id: &ElementId) -> Option<String> {
        self.nodes.get(id)?.text.clone()
    }

    pub fn classes(&self, id: &ElementId) -> Vec<String> {
        self.nodes.get(id).map(|n| n.classes.clone()).unwrap_or_default()
    }

    /// Patches recorded since the last drain.
    pub fn patches(&self) -> &[DomPatch] {
        &self.patches
    }

    pub fn drain_patches(&mut self) -> Vec<DomPatch> {
        std::mem::take(&mut self.patches)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Document for VirtualDocument {
    fn contains(&self, id: &ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    fn tag(&self, id: &ElementId) -> Option<String> {
        self.nodes.get(id).map(|n| n.tag.clone())
    }

    fn has_class(&self, id: &ElementId, class: &str) -> bool {
        self.nodes
            .get(id)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, id: &ElementId, class: &str) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.classes.iter().any(|c| c == class) {
            return;
        }
        node.classes.push(class.to_string());
        self.patches.push(DomPatch::AddClass {
            id: id.clone(),
            class: class.to_string(),
        });
    }

    fn remove_class(&mut self, id: &ElementId, class: &str) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let before = node.classes.len();
        node.classes.retain(|c| c != class);
        if node.classes.len() != before {
            self.patches.push(DomPatch::RemoveClass {
                id: id.clone(),
                class: class.to_string(),
            });
        }
    }

    fn attribute(&self, id: &ElementId, name: &str) -> Option<String> {
        self.nodes.get(id)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, id: &ElementId, name: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.attributes.get(name).map(String::as_str) == Some(value) {
            return;
        }
        node.attributes.insert(name.to_string(), value.to_string());
        self.patches.push(DomPatch::SetAttribute {
            id: id.clone(),
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn set_style(&mut self, id: &ElementId, property: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.styles.get(property).map(String::as_str) == Some(value) {
            return;
        }
        node.styles.insert(property.to_string(), value.to_string());
        self.patches.push(DomPatch::SetStyle {
            id: id.clone(),
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn set_text(&mut self, id: &ElementId, text: &str) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.text.as_deref() == Some(text) {
            return;
        }
        node.text = Some(text.to_string());
        self.patches.push(DomPatch::SetText {
            id: id.clone(),
            text: text.to_string(),
        });
    }

    fn active_element(&self) -> Option<ElementId> {
        self.active.clone()
    }

    fn focus(&mut self, id: &ElementId) -> bool {
        match self.nodes.get(id) {
            Some(node) if node.focusable => {
                self.active = Some(id.clone());
                self.patches.push(DomPatch::Focus { id: id.clone() });
                true
            }
            _ => false,
        }
    }

    fn is_within(&self, id: &ElementId, ancestor: &ElementId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        let mut current = Some(id.clone());
        // Bounded walk: a malformed snapshot may contain a parent cycle.
        let mut steps = 0;
        while let Some(cur) = current {
            if &cur == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.order.len() {
                return false;
            }
            current = self.nodes.get(&cur).and_then(|n| n.parent.clone());
        }
        false
    }

    fn descendants(&self, ancestor: &ElementId) -> Vec<ElementId> {
        if !self.nodes.contains_key(ancestor) {
            return Vec::new();
        }
        self.order
            .iter()
            .filter(|id| *id != ancestor && self.is_within(id, ancestor))
            .cloned()
            .collect()
    }

    fn focusable_descendants(&self, ancestor: &ElementId) -> Vec<ElementId> {
        self.descendants(ancestor)
            .into_iter()
            .filter(|id| self.nodes.get(id).map(|n| n.focusable).unwrap_or(false))
            .collect()
    }

    fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.order
            .iter()
            .filter(|id| self.has_class(id, class))
            .cloned()
            .collect()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_height(&self, id: &ElementId) -> Option<f64> {
        self.nodes.get(id).map(|n| n.scroll_height)
    }
}
