//! Scroll Header Controller.
//!
//! Hides the site header while the reader scrolls down and shows it again on
//! scroll-up, near the top of the page, while the menu is open, and once
//! scrolling settles.

use tracing::{debug, trace};

use crate::dom::Document;
use crate::managers::settle_timer::SettleTimer;
use crate::managers::Lifecycle;
use crate::types::settings::HeaderSettings;
use crate::types::Millis;

/// Read-only view of the off-canvas menu, the only state the header consults.
pub trait MenuStatus {
    fn is_open(&self) -> bool;
}

impl MenuStatus for bool {
    fn is_open(&self) -> bool {
        *self
    }
}

/// Trait defining the scroll header interface.
pub trait HeaderControllerTrait {
    /// Starts listening. Returns `false` when the header element is missing,
    /// in which case every later call is a no-op.
    fn mount(&mut self, doc: &dyn Document) -> bool;
    fn on_scroll(&mut self, doc: &mut dyn Document, menu: &dyn MenuStatus, now: Millis);
    fn force_visible(&mut self, doc: &mut dyn Document);
    /// Fires the settle timer if due. Returns whether it fired.
    fn tick(&mut self, doc: &mut dyn Document, now: Millis) -> bool;
    fn next_deadline(&self) -> Option<Millis>;
    fn is_hidden(&self) -> bool;
    fn teardown(&mut self);
}

pub struct ScrollHeaderController {
    settings: HeaderSettings,
    lifecycle: Lifecycle,
    last_y: f64,
    hidden: bool,
    settle: SettleTimer,
}

impl ScrollHeaderController {
    pub fn new(settings: HeaderSettings) -> Self {
        let settle = SettleTimer::new(settings.settle_ms);
        Self {
            settings,
            lifecycle: Lifecycle::Unmounted,
            last_y: 0.0,
            hidden: false,
            settle,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn last_y(&self) -> f64 {
        self.last_y
    }

    fn set_hidden(&mut self, doc: &mut dyn Document, hidden: bool) {
        if hidden == self.hidden {
            return;
        }
        self.hidden = hidden;
        let header = &self.settings.element;
        if hidden {
            doc.add_class(header, &self.settings.hidden_class);
        } else {
            doc.remove_class(header, &self.settings.hidden_class);
        }
        trace!(hidden, "header visibility changed");
    }
}

impl HeaderControllerTrait for ScrollHeaderController {
    fn mount(&mut self, doc: &dyn Document) -> bool {
        if self.lifecycle != Lifecycle::Unmounted {
            return self.lifecycle.is_active();
        }
        if !doc.contains(&self.settings.element) {
            debug!(element = %self.settings.element, "header element missing, scroll header inert");
            self.lifecycle = Lifecycle::Inert;
            return false;
        }
        self.last_y = doc.scroll_y();
        self.hidden = doc.has_class(&self.settings.element, &self.settings.hidden_class);
        self.lifecycle = Lifecycle::Active;
        true
    }

    fn on_scroll(&mut self, doc: &mut dyn Document, menu: &dyn MenuStatus, now: Millis) {
        if !self.lifecycle.is_active() {
            return;
        }
        let y = doc.scroll_y();
        let delta = y - self.last_y;
        self.last_y = y;

        let threshold = self.settings.hide_threshold_px;
        let guard = self.settings.top_guard_px;
        if menu.is_open() {
            self.set_hidden(doc, false);
        } else if delta > threshold && y > guard {
            self.set_hidden(doc, true);
        } else if delta < -threshold || y < guard {
            self.set_hidden(doc, false);
        }

        self.settle.arm(now);
    }

    fn force_visible(&mut self, doc: &mut dyn Document) {
        if !self.lifecycle.is_active() {
            return;
        }
        self.set_hidden(doc, false);
    }

    fn tick(&mut self, doc: &mut dyn Document, now: Millis) -> bool {
        if !self.lifecycle.is_active() || !self.settle.poll(now) {
            return false;
        }
        self.set_hidden(doc, false);
        true
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.settle.deadline()
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn teardown(&mut self) {
        self.settle.cancel();
        self.lifecycle = Lifecycle::TornDown;
    }
}
