// Folio services
// Services own the non-scroll concerns: theme preference, its storage, settings, and page extras.

pub mod code_labels;
pub mod preference_store;
pub mod settings_engine;
pub mod theme_controller;
pub mod year_progress;
