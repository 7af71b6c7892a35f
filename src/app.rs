//! Site: the mounted page and every controller running against it.
//!
//! Owns the document mirror and the four controllers, routes host events to
//! them, and enforces the one cross-controller rule: while the menu is open
//! the header stays visible.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::dom::{Document, VirtualDocument};
use crate::managers::off_canvas_menu::{MenuControllerTrait, OffCanvasMenuController};
use crate::managers::reading_progress::{ProgressControllerTrait, ReadingProgressController};
use crate::managers::scroll_header::{HeaderControllerTrait, ScrollHeaderController};
use crate::services::code_labels::label_code_blocks;
use crate::services::preference_store::PreferenceStore;
use crate::services::theme_controller::{ThemeControllerTrait, ThemePreferenceController};
use crate::services::year_progress::render_year_progress;
use crate::types::dom::{DomPatch, ElementId, ElementSnapshot};
use crate::types::menu::{KeyEvent, KeyOutcome, MenuState};
use crate::types::settings::SiteSettings;
use crate::types::theme::{AppliedMode, ThemePreference};
use crate::types::Millis;

/// Host facts needed at mount time.
#[derive(Debug, Clone)]
pub struct MountOptions {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub system_prefers_dark: bool,
    pub now: Millis,
    /// Wall-clock time for the year progress widget.
    pub local_time: NaiveDateTime,
}

impl MountOptions {
    pub fn new(scroll_y: f64, viewport_height: f64, system_prefers_dark: bool, now: Millis) -> Self {
        Self {
            scroll_y,
            viewport_height,
            system_prefers_dark,
            now,
            local_time: chrono::Local::now().naive_local(),
        }
    }
}

/// Which controllers found their elements at mount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MountReport {
    pub applied_mode: AppliedMode,
    pub header: bool,
    pub progress: bool,
    pub menu: bool,
    pub labelled_blocks: usize,
    pub year_percentage: Option<f64>,
}

pub struct Site {
    settings: SiteSettings,
    doc: VirtualDocument,
    theme: ThemePreferenceController<Box<dyn PreferenceStore>>,
    header: ScrollHeaderController,
    progress: ReadingProgressController,
    menu: OffCanvasMenuController,
    mounted: bool,
}

impl Site {
    pub fn new(settings: SiteSettings, store: Box<dyn PreferenceStore>) -> Self {
        Self {
            theme: ThemePreferenceController::new(settings.theme.clone(), store),
            header: ScrollHeaderController::new(settings.header.clone()),
            progress: ReadingProgressController::new(settings.progress.clone()),
            menu: OffCanvasMenuController::new(settings.menu.clone()),
            doc: VirtualDocument::new(),
            settings,
            mounted: false,
        }
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    pub fn document(&self) -> &VirtualDocument {
        &self.doc
    }

    pub fn theme(&self) -> &ThemePreferenceController<Box<dyn PreferenceStore>> {
        &self.theme
    }

    pub fn header(&self) -> &ScrollHeaderController {
        &self.header
    }

    pub fn progress(&self) -> &ReadingProgressController {
        &self.progress
    }

    pub fn menu(&self) -> &OffCanvasMenuController {
        &self.menu
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mounts every controller against a fresh element snapshot. Mounting an
    /// already mounted site tears the old controllers down first.
    pub fn mount(&mut self, elements: Vec<ElementSnapshot>, opts: MountOptions) -> MountReport {
        if self.mounted {
            self.unmount();
        }
        self.header = ScrollHeaderController::new(self.settings.header.clone());
        self.progress = ReadingProgressController::new(self.settings.progress.clone());
        self.menu = OffCanvasMenuController::new(self.settings.menu.clone());

        self.doc.replace_elements(elements);
        self.doc.set_scroll(opts.scroll_y, opts.viewport_height);

        let applied_mode = self.theme.initialize(&mut self.doc, opts.system_prefers_dark);
        let header = self.header.mount(&self.doc);
        let progress = self.progress.mount(&mut self.doc, opts.now);
        let menu = self.menu.mount(&mut self.doc);

        let labelled_blocks = if self.settings.extras.code_labels {
            label_code_blocks(&mut self.doc).len()
        } else {
            0
        };
        let year_percentage = if self.settings.extras.year_progress {
            render_year_progress(&mut self.doc, opts.local_time)
        } else {
            None
        };

        self.mounted = true;
        let report = MountReport {
            applied_mode,
            header,
            progress,
            menu,
            labelled_blocks,
            year_percentage,
        };
        info!(?report, elements = self.doc.len(), "site mounted");
        report
    }

    /// Removes all listeners and cancels pending timers.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.theme.teardown();
        self.header.teardown();
        self.progress.teardown();
        self.menu.teardown(&mut self.doc);
        self.mounted = false;
        debug!("site unmounted");
    }

    /// Replaces the element snapshot after the host DOM changed.
    pub fn replace_elements(&mut self, elements: Vec<ElementSnapshot>) {
        if !self.mounted {
            return;
        }
        self.doc.replace_elements(elements);
    }

    pub fn set_scroll_height(&mut self, id: &ElementId, height: f64) {
        self.doc.set_scroll_height(id, height);
    }

    pub fn scroll(&mut self, scroll_y: f64, viewport_height: f64, now: Millis) {
        if !self.mounted {
            return;
        }
        self.doc.set_scroll(scroll_y, viewport_height);
        self.header.on_scroll(&mut self.doc, &self.menu, now);
        self.progress.on_scroll(&mut self.doc, now);
    }

    pub fn key(&mut self, event: &KeyEvent) -> KeyOutcome {
        if !self.mounted {
            return KeyOutcome::DEFAULT;
        }
        if let Some(target) = &event.target {
            if self.doc.contains(target) {
                self.doc.sync_focus(Some(target.clone()));
            }
        }
        let before = self.menu.state();
        let outcome = self.menu.on_key(&mut self.doc, event);
        self.after_menu_event(before);
        outcome
    }

    pub fn click(&mut self, target: &ElementId) -> bool {
        if !self.mounted {
            return false;
        }
        let before = self.menu.state();
        let handled = self.menu.on_click(&mut self.doc, target);
        self.after_menu_event(before);
        handled
    }

    /// Focus moved in the host page.
    pub fn focus(&mut self, target: Option<ElementId>) {
        if !self.mounted {
            return;
        }
        self.doc.sync_focus(target);
    }

    pub fn open_menu(&mut self) -> bool {
        let before = self.menu.state();
        let opened = self.menu.open(&mut self.doc);
        self.after_menu_event(before);
        opened
    }

    pub fn close_menu(&mut self) -> bool {
        let before = self.menu.state();
        let closed = self.menu.close(&mut self.doc);
        self.after_menu_event(before);
        closed
    }

    pub fn toggle_theme(&mut self) -> AppliedMode {
        self.theme.toggle(&mut self.doc)
    }

    pub fn set_theme_preference(&mut self, preference: ThemePreference) -> AppliedMode {
        self.theme.set_preference(&mut self.doc, preference)
    }

    pub fn theme_preference(&self) -> ThemePreference {
        self.theme.preference()
    }

    pub fn applied_mode(&self) -> AppliedMode {
        self.theme.applied_mode()
    }

    pub fn system_scheme_changed(&mut self, prefers_dark: bool) -> Option<AppliedMode> {
        self.theme.on_system_change(&mut self.doc, prefers_dark)
    }

    /// Fires every settle timer that is due. Returns whether any fired.
    pub fn tick(&mut self, now: Millis) -> bool {
        let header = self.header.tick(&mut self.doc, now);
        let progress = self.progress.tick(&mut self.doc, now);
        header || progress
    }

    /// Earliest pending settle deadline across controllers.
    pub fn next_deadline(&self) -> Option<Millis> {
        [self.header.next_deadline(), self.progress.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    pub fn drain_patches(&mut self) -> Vec<DomPatch> {
        self.doc.drain_patches()
    }

    fn after_menu_event(&mut self, before: MenuState) {
        if before == MenuState::Closed && self.menu.state() == MenuState::Open {
            self.header.force_visible(&mut self.doc);
        }
    }
}
