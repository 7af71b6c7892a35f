//! Theme Preference Controller: owns the `auto|light|dark` preference, persists
//! it, and resolves it against the system color scheme.
//!
//! [`ThemePreferenceController::apply`] is the only code that writes the
//! visual-mode flag on the document root.

use tracing::{debug, warn};

use crate::dom::Document;
use crate::managers::Lifecycle;
use crate::services::preference_store::PreferenceStore;
use crate::types::settings::ThemeSettings;
use crate::types::theme::{AppliedMode, ThemePreference};

/// Trait defining the theme controller interface.
pub trait ThemeControllerTrait {
    /// Reads the stored preference, applies the resolved mode and subscribes
    /// to system color-scheme changes.
    fn initialize(&mut self, doc: &mut dyn Document, system_prefers_dark: bool) -> AppliedMode;
    /// Flips the applied mode and pins the result as an explicit preference.
    fn toggle(&mut self, doc: &mut dyn Document) -> AppliedMode;
    fn set_preference(&mut self, doc: &mut dyn Document, preference: ThemePreference) -> AppliedMode;
    /// System signal callback. Returns the new mode when it was re-applied.
    fn on_system_change(&mut self, doc: &mut dyn Document, prefers_dark: bool) -> Option<AppliedMode>;
    fn preference(&self) -> ThemePreference;
    fn applied_mode(&self) -> AppliedMode;
    fn teardown(&mut self);
}

pub struct ThemePreferenceController<S: PreferenceStore> {
    settings: ThemeSettings,
    store: S,
    preference: ThemePreference,
    system_prefers_dark: bool,
    applied: AppliedMode,
    lifecycle: Lifecycle,
}

impl<S: PreferenceStore> ThemePreferenceController<S> {
    pub fn new(settings: ThemeSettings, store: S) -> Self {
        Self {
            settings,
            store,
            preference: ThemePreference::Auto,
            system_prefers_dark: false,
            applied: AppliedMode::Light,
            lifecycle: Lifecycle::Unmounted,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Writes the visual-mode flag on the document root.
    pub fn apply(&mut self, doc: &mut dyn Document, mode: AppliedMode) {
        let root = &self.settings.root;
        match mode {
            AppliedMode::Dark => doc.add_class(root, &self.settings.dark_class),
            AppliedMode::Light => doc.remove_class(root, &self.settings.dark_class),
        }
        doc.set_attribute(root, "data-theme", mode.as_str());
        self.applied = mode;
    }

    fn load_preference(&self) -> ThemePreference {
        match self.store.get(&self.settings.storage_key) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring stored theme preference");
                ThemePreference::Auto
            }),
            Ok(None) => ThemePreference::Auto,
            Err(e) => {
                warn!(error = %e, "theme preference unreadable, using auto");
                ThemePreference::Auto
            }
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self
            .store
            .set(&self.settings.storage_key, self.preference.as_str())
        {
            warn!(error = %e, preference = %self.preference, "theme preference kept for this session only");
        }
    }

    fn reapply(&mut self, doc: &mut dyn Document) -> AppliedMode {
        let mode = self.preference.resolve(self.system_prefers_dark);
        self.apply(doc, mode);
        mode
    }
}

impl<S: PreferenceStore> ThemeControllerTrait for ThemePreferenceController<S> {
    fn initialize(&mut self, doc: &mut dyn Document, system_prefers_dark: bool) -> AppliedMode {
        self.preference = self.load_preference();
        self.system_prefers_dark = system_prefers_dark;
        self.lifecycle = Lifecycle::Active;
        let mode = self.reapply(doc);
        debug!(preference = %self.preference, applied = %mode, "theme initialized");
        mode
    }

    fn toggle(&mut self, doc: &mut dyn Document) -> AppliedMode {
        if !self.lifecycle.is_active() {
            return self.applied;
        }
        self.preference = self.applied.flipped().as_preference();
        self.persist();
        self.reapply(doc)
    }

    fn set_preference(&mut self, doc: &mut dyn Document, preference: ThemePreference) -> AppliedMode {
        if !self.lifecycle.is_active() {
            return self.applied;
        }
        self.preference = preference;
        self.persist();
        self.reapply(doc)
    }

    fn on_system_change(&mut self, doc: &mut dyn Document, prefers_dark: bool) -> Option<AppliedMode> {
        if !self.lifecycle.is_active() {
            return None;
        }
        self.system_prefers_dark = prefers_dark;
        if self.preference != ThemePreference::Auto {
            return None;
        }
        Some(self.reapply(doc))
    }

    fn preference(&self) -> ThemePreference {
        self.preference
    }

    fn applied_mode(&self) -> AppliedMode {
        self.applied
    }

    fn teardown(&mut self) {
        if self.lifecycle.is_active() {
            debug!("theme controller torn down");
        }
        self.lifecycle = Lifecycle::TornDown;
    }
}
