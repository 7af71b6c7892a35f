//! Off-Canvas Menu Controller.
//!
//! Two-state machine (`Closed`, `Open`) for the navigation panel. While open
//! it locks background scroll, exposes the open state through ARIA, and keeps
//! Tab/Shift+Tab cycling inside the panel. Closing restores focus to whatever
//! was focused before opening, if that element still exists.

use tracing::debug;

use crate::dom::Document;
use crate::managers::scroll_header::MenuStatus;
use crate::managers::Lifecycle;
use crate::types::dom::ElementId;
use crate::types::menu::{Key, KeyEvent, KeyOutcome, MenuState};
use crate::types::settings::MenuSettings;

/// Trait defining the off-canvas menu interface.
pub trait MenuControllerTrait {
    /// Starts listening. Returns `false` when the trigger or panel is missing.
    fn mount(&mut self, doc: &mut dyn Document) -> bool;
    /// `Closed -> Open`. Returns whether a transition happened.
    fn open(&mut self, doc: &mut dyn Document) -> bool;
    /// `Open -> Closed`. Returns whether a transition happened.
    fn close(&mut self, doc: &mut dyn Document) -> bool;
    fn toggle(&mut self, doc: &mut dyn Document) -> MenuState;
    fn on_key(&mut self, doc: &mut dyn Document, event: &KeyEvent) -> KeyOutcome;
    /// Handles a pointer click. Returns whether the click was consumed.
    fn on_click(&mut self, doc: &mut dyn Document, target: &ElementId) -> bool;
    fn state(&self) -> MenuState;
    /// Releases scroll lock if still open, then stops listening.
    fn teardown(&mut self, doc: &mut dyn Document);
}

pub struct OffCanvasMenuController {
    settings: MenuSettings,
    lifecycle: Lifecycle,
    state: MenuState,
    return_focus: Option<ElementId>,
    focusables: Vec<ElementId>,
}

impl OffCanvasMenuController {
    pub fn new(settings: MenuSettings) -> Self {
        Self {
            settings,
            lifecycle: Lifecycle::Unmounted,
            state: MenuState::Closed,
            return_focus: None,
            focusables: Vec::new(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Focusable panel descendants captured at the last open.
    pub fn focusables(&self) -> &[ElementId] {
        &self.focusables
    }

    pub fn return_focus(&self) -> Option<&ElementId> {
        self.return_focus.as_ref()
    }

    fn set_open_effects(&self, doc: &mut dyn Document, open: bool) {
        let s = &self.settings;
        if open {
            doc.add_class(&s.panel, &s.open_class);
            doc.add_class(&s.toggle, &s.open_class);
            doc.add_class(&s.body, &s.scroll_lock_class);
        } else {
            doc.remove_class(&s.panel, &s.open_class);
            doc.remove_class(&s.toggle, &s.open_class);
            doc.remove_class(&s.body, &s.scroll_lock_class);
        }
        doc.set_attribute(&s.panel, "aria-hidden", if open { "false" } else { "true" });
        doc.set_attribute(&s.toggle, "aria-expanded", if open { "true" } else { "false" });
    }

    fn is_close_target(&self, doc: &dyn Document, target: &ElementId) -> bool {
        doc.is_within(target, &self.settings.close_button)
            || doc.attribute(target, &self.settings.close_attribute).as_deref() == Some("true")
    }

    /// Tab containment. `focused` is the element the keydown originated from.
    fn trap_tab(&self, doc: &mut dyn Document, focused: &ElementId, shift: bool) -> KeyOutcome {
        let (Some(first), Some(last)) = (self.focusables.first(), self.focusables.last()) else {
            return KeyOutcome::DEFAULT;
        };
        let wrap_to = if shift && focused == first {
            last
        } else if !shift && focused == last {
            first
        } else {
            return KeyOutcome::DEFAULT;
        };
        let wrap_to = wrap_to.clone();
        doc.focus(&wrap_to);
        KeyOutcome::PREVENTED
    }
}

impl MenuStatus for OffCanvasMenuController {
    fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }
}

impl MenuControllerTrait for OffCanvasMenuController {
    fn mount(&mut self, doc: &mut dyn Document) -> bool {
        if self.lifecycle != Lifecycle::Unmounted {
            return self.lifecycle.is_active();
        }
        if !doc.contains(&self.settings.toggle) || !doc.contains(&self.settings.panel) {
            debug!("menu trigger or panel missing, menu inert");
            self.lifecycle = Lifecycle::Inert;
            return false;
        }
        self.lifecycle = Lifecycle::Active;
        self.set_open_effects(doc, false);
        true
    }

    fn open(&mut self, doc: &mut dyn Document) -> bool {
        if !self.lifecycle.is_active() || self.state == MenuState::Open {
            return false;
        }
        self.return_focus = doc.active_element();
        self.set_open_effects(doc, true);
        self.focusables = doc.focusable_descendants(&self.settings.panel);
        if let Some(first) = self.focusables.first().cloned() {
            doc.focus(&first);
        }
        self.state = MenuState::Open;
        debug!(focusables = self.focusables.len(), "menu opened");
        true
    }

    fn close(&mut self, doc: &mut dyn Document) -> bool {
        if !self.lifecycle.is_active() || self.state == MenuState::Closed {
            return false;
        }
        self.set_open_effects(doc, false);
        self.focusables.clear();
        self.state = MenuState::Closed;
        if let Some(target) = self.return_focus.take() {
            if doc.contains(&target) {
                doc.focus(&target);
            }
        }
        debug!("menu closed");
        true
    }

    fn toggle(&mut self, doc: &mut dyn Document) -> MenuState {
        match self.state {
            MenuState::Closed => self.open(doc),
            MenuState::Open => self.close(doc),
        };
        self.state
    }

    fn on_key(&mut self, doc: &mut dyn Document, event: &KeyEvent) -> KeyOutcome {
        if !self.lifecycle.is_active() || self.state != MenuState::Open {
            return KeyOutcome::DEFAULT;
        }
        match event.key {
            Key::Escape => {
                self.close(doc);
                KeyOutcome::DEFAULT
            }
            Key::Tab => {
                let Some(focused) = event.target.clone().or_else(|| doc.active_element()) else {
                    return KeyOutcome::DEFAULT;
                };
                if !doc.is_within(&focused, &self.settings.panel) {
                    return KeyOutcome::DEFAULT;
                }
                self.trap_tab(doc, &focused, event.shift)
            }
            Key::Other(_) => KeyOutcome::DEFAULT,
        }
    }

    fn on_click(&mut self, doc: &mut dyn Document, target: &ElementId) -> bool {
        if !self.lifecycle.is_active() {
            return false;
        }
        if doc.is_within(target, &self.settings.toggle) {
            self.toggle(doc);
            return true;
        }
        if self.state == MenuState::Open && self.is_close_target(doc, target) {
            return self.close(doc);
        }
        false
    }

    fn state(&self) -> MenuState {
        self.state
    }

    fn teardown(&mut self, doc: &mut dyn Document) {
        if self.lifecycle.is_active() && self.state == MenuState::Open {
            self.set_open_effects(doc, false);
            self.state = MenuState::Closed;
        }
        self.focusables.clear();
        self.return_focus = None;
        self.lifecycle = Lifecycle::TornDown;
    }
}
