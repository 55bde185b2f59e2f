//! Quest Display Collaborator
//!
//! The UI boundary: the manager tells the display which slot to re-render
//! after a quest is created and after every progress report. Rendering
//! itself lives outside this crate.

/// Receiver for slot re-render notifications.
pub trait QuestDisplay {
    /// Re-render the display for one quest slot.
    fn update_quest(&mut self, slot: usize);
}

/// Display sink for sessions that run headless (tests, simulations).
#[derive(Debug, Default)]
pub struct NoDisplay;

impl QuestDisplay for NoDisplay {
    fn update_quest(&mut self, _slot: usize) {}
}
