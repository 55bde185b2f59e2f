//! Quest Capability Contract
//!
//! The trait every quest variant implements, plus the wiring a variant
//! receives when it is seated in a slot: its identity, its slot index, and
//! the handle it uses to report progress back to the manager.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::kinds::{PlaceableUnitType, QuestKind};

// ============================================================================
// Quest Identity
// ============================================================================

/// Unique identity of one quest instance. Slot numbers are reused; ids are
/// not, which is what lets the manager tell a live progress report from a
/// stale one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestId(Uuid);

impl QuestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Progress Reporting
// ============================================================================

/// A quest's notice that its own progress state just changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressReport {
    pub slot: usize,
    pub quest: QuestId,
}

/// Handle a quest uses to notify the manager of progress.
///
/// Cloned into every quest at construction; the manager keeps the paired
/// end and drains queued reports after delivering each event. The handle is
/// a relation only — the manager owns the quest, never the other way
/// around.
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter {
    queue: Rc<RefCell<VecDeque<ProgressReport>>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a progress report for the manager to process.
    pub fn report(&self, slot: usize, quest: QuestId) {
        self.queue.borrow_mut().push_back(ProgressReport { slot, quest });
    }

    pub(crate) fn take(&self) -> Option<ProgressReport> {
        self.queue.borrow_mut().pop_front()
    }

    pub(crate) fn clear(&self) {
        self.queue.borrow_mut().clear();
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

// ============================================================================
// Slot Assignment
// ============================================================================

/// Construction-time wiring shared by every quest variant: the slot the
/// quest lives in (immutable for its lifetime), its instance id, the report
/// handle, and when it was handed out.
#[derive(Debug, Clone)]
pub struct QuestAssignment {
    pub slot: usize,
    pub id: QuestId,
    pub reporter: ProgressReporter,
    pub started_at: DateTime<Utc>,
}

impl QuestAssignment {
    pub fn new(slot: usize, id: QuestId, reporter: ProgressReporter) -> Self {
        Self {
            slot,
            id,
            reporter,
            started_at: Utc::now(),
        }
    }

    /// Self-report a progress change on this quest.
    pub fn report(&self) {
        self.reporter.report(self.slot, self.id);
    }
}

// ============================================================================
// Capability Contract
// ============================================================================

/// Contract every quest variant implements.
///
/// Event methods default to no-ops so a variant only overrides the events
/// it actually tracks; delivery is unconditional and a quest that doesn't
/// care simply ignores the call. A variant whose progress state changes
/// must report through its [`QuestAssignment`] so the manager can re-check
/// completion.
pub trait Quest {
    fn kind(&self) -> QuestKind;
    fn id(&self) -> QuestId;

    /// Slot this quest occupies. Set once at construction.
    fn slot(&self) -> usize;

    fn started_at(&self) -> DateTime<Utc>;

    /// The player's army defeated an enemy party.
    fn killed_an_enemy_party(&mut self) {}

    /// The player picked up an item.
    fn collected_an_item(&mut self) {}

    /// The player placed a unit.
    fn placed_a_unit(&mut self, _unit: PlaceableUnitType) {}

    fn is_complete(&self) -> bool;

    /// Current and goal counts, for the display layer.
    fn progress(&self) -> (u32, u32);

    /// Player-facing objective text.
    fn description(&self) -> String;
}
