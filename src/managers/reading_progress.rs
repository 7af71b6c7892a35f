//! Reading Progress Controller.
//!
//! Tracks how far the reader has scrolled through the article body and drives
//! a progress bar that is shown while scrolling and fades out at rest.

use tracing::{debug, trace};

use crate::dom::Document;
use crate::managers::settle_timer::SettleTimer;
use crate::managers::Lifecycle;
use crate::types::settings::ProgressSettings;
use crate::types::Millis;

/// Percentage of the scroll track covered, always within `[0, 100]`.
///
/// A track that is empty, negative or not a number yields 0.
pub fn track_percentage(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let track = scroll_height - viewport_height;
    if !(track > 0.0) || track.is_infinite() {
        return 0.0;
    }
    let percent = scroll_y / track * 100.0;
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

/// Trait defining the reading progress interface.
pub trait ProgressControllerTrait {
    /// Starts listening and performs the initial measurement. Returns `false`
    /// when the article, container or bar is missing.
    fn mount(&mut self, doc: &mut dyn Document, now: Millis) -> bool;
    fn on_scroll(&mut self, doc: &mut dyn Document, now: Millis);
    fn tick(&mut self, doc: &mut dyn Document, now: Millis) -> bool;
    fn next_deadline(&self) -> Option<Millis>;
    fn percentage(&self) -> f64;
    fn is_visible(&self) -> bool;
    fn teardown(&mut self);
}

pub struct ReadingProgressController {
    settings: ProgressSettings,
    lifecycle: Lifecycle,
    percentage: f64,
    visible: bool,
    settle: SettleTimer,
}

impl ReadingProgressController {
    pub fn new(settings: ProgressSettings) -> Self {
        let settle = SettleTimer::new(settings.settle_ms);
        Self {
            settings,
            lifecycle: Lifecycle::Unmounted,
            percentage: 0.0,
            visible: false,
            settle,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn update(&mut self, doc: &mut dyn Document, now: Millis) {
        let height = doc
            .scroll_height(&self.settings.article)
            .unwrap_or_default();
        self.percentage = track_percentage(doc.scroll_y(), height, doc.viewport_height());

        let bar = &self.settings.bar;
        doc.set_style(bar, "width", &format!("{:.2}%", self.percentage));
        doc.set_attribute(bar, "aria-valuenow", &format!("{:.0}", self.percentage.round()));

        if !self.visible {
            doc.add_class(&self.settings.container, &self.settings.visible_class);
            self.visible = true;
        }
        self.settle.arm(now);
        trace!(percentage = self.percentage, "reading progress updated");
    }
}

impl ProgressControllerTrait for ReadingProgressController {
    fn mount(&mut self, doc: &mut dyn Document, now: Millis) -> bool {
        if self.lifecycle != Lifecycle::Unmounted {
            return self.lifecycle.is_active();
        }
        let required = [
            &self.settings.article,
            &self.settings.container,
            &self.settings.bar,
        ];
        if let Some(missing) = required.iter().find(|id| !doc.contains(id)) {
            debug!(element = %missing, "reading progress element missing, controller inert");
            self.lifecycle = Lifecycle::Inert;
            return false;
        }

        let bar = self.settings.bar.clone();
        doc.set_attribute(&bar, "aria-valuemin", "0");
        doc.set_attribute(&bar, "aria-valuemax", "100");
        self.visible = doc.has_class(&self.settings.container, &self.settings.visible_class);
        self.lifecycle = Lifecycle::Active;
        self.update(doc, now);
        true
    }

    fn on_scroll(&mut self, doc: &mut dyn Document, now: Millis) {
        if self.lifecycle.is_active() {
            self.update(doc, now);
        }
    }

    fn tick(&mut self, doc: &mut dyn Document, now: Millis) -> bool {
        if !self.lifecycle.is_active() || !self.settle.poll(now) {
            return false;
        }
        doc.remove_class(&self.settings.container, &self.settings.visible_class);
        self.visible = false;
        true
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.settle.deadline()
    }

    fn percentage(&self) -> f64 {
        self.percentage
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn teardown(&mut self) {
        self.settle.cancel();
        self.lifecycle = Lifecycle::TornDown;
    }
}
