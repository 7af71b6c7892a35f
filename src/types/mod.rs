// Folio shared type definitions
// Each submodule defines plain data used across the engine.

pub mod dom;
pub mod errors;
pub mod menu;
pub mod settings;
pub mod theme;

/// Milliseconds on the host's monotonic clock.
pub type Millis = u64;
