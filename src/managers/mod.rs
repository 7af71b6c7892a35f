// Folio scroll and menu managers
// Managers own the event-driven state machines: settle timers, scroll header, reading progress, off-canvas menu.

pub mod off_canvas_menu;
pub mod reading_progress;
pub mod scroll_header;
pub mod settle_timer;

/// Mount lifecycle shared by every controller.
///
/// Only `Active` controllers react to events. `Inert` means a required element
/// was missing at mount; `TornDown` means listeners were removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Unmounted,
    Inert,
    Active,
    TornDown,
}

impl Lifecycle {
    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }
}
