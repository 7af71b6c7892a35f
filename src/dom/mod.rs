//! The DOM contract consumed by the engine.
//!
//! Controllers never create elements. They look elements up by id, read
//! geometry and focus, and mutate classes, attributes, styles, text and focus.
//! Every mutator is a silent no-op when the target element is absent.

pub mod virtual_document;

pub use virtual_document::VirtualDocument;

use crate::types::dom::ElementId;

/// Read/write view of the host page.
pub trait Document {
    /// Whether the element is currently connected to the document.
    fn contains(&self, id: &ElementId) -> bool;
    fn tag(&self, id: &ElementId) -> Option<String>;

    fn has_class(&self, id: &ElementId, class: &str) -> bool;
    fn add_class(&mut self, id: &ElementId, class: &str);
    fn remove_class(&mut self, id: &ElementId, class: &str);

    fn attribute(&self, id: &ElementId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, id: &ElementId, name: &str, value: &str);
    fn set_style(&mut self, id: &ElementId, property: &str, value: &str);
    fn set_text(&mut self, id: &ElementId, text: &str);

    /// The focused element, `None` when focus rests on the document body.
    fn active_element(&self) -> Option<ElementId>;
    /// Moves focus. Returns `false` (and leaves focus alone) when the element
    /// is absent or cannot take focus.
    fn focus(&mut self, id: &ElementId) -> bool;

    /// True when `id` is in the document and is `ancestor` or sits anywhere
    /// below it.
    fn is_within(&self, id: &ElementId, ancestor: &ElementId) -> bool;
    /// Descendants of `ancestor` in document order (excluding itself).
    fn descendants(&self, ancestor: &ElementId) -> Vec<ElementId>;
    /// Keyboard-focusable descendants of `ancestor` in document order.
    fn focusable_descendants(&self, ancestor: &ElementId) -> Vec<ElementId>;
    fn elements_with_class(&self, class: &str) -> Vec<ElementId>;

    /// `window.scrollY`.
    fn scroll_y(&self) -> f64;
    /// `window.innerHeight`.
    fn viewport_height(&self) -> f64;
    /// `element.scrollHeight`, `None` when the element is absent.
    fn scroll_height(&self, id: &ElementId) -> Option<f64>;
}
