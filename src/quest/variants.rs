//! Quest Variants
//!
//! The concrete quest types behind the capability contract. Each one tracks
//! a single counter toward a goal, ignores events it doesn't care about,
//! and reports through its assignment whenever its own state changes.

use chrono::{DateTime, Utc};

use super::contract::{Quest, QuestAssignment, QuestId};
use super::kinds::{PlaceableUnitType, QuestKind};

// ============================================================================
// Kill Enemy Parties
// ============================================================================

/// Defeat a number of enemy parties.
pub struct KillEnemyPartyQuest {
    assignment: QuestAssignment,
    killed: u32,
    goal: u32,
}

impl KillEnemyPartyQuest {
    pub fn new(assignment: QuestAssignment, goal: u32) -> Self {
        Self {
            assignment,
            killed: 0,
            goal,
        }
    }
}

impl Quest for KillEnemyPartyQuest {
    fn kind(&self) -> QuestKind {
        QuestKind::KillEnemies
    }

    fn id(&self) -> QuestId {
        self.assignment.id
    }

    fn slot(&self) -> usize {
        self.assignment.slot
    }

    fn started_at(&self) -> DateTime<Utc> {
        self.assignment.started_at
    }

    fn killed_an_enemy_party(&mut self) {
        if self.killed >= self.goal {
            return;
        }
        self.killed += 1;
        self.assignment.report();
    }

    fn is_complete(&self) -> bool {
        self.killed >= self.goal
    }

    fn progress(&self) -> (u32, u32) {
        (self.killed, self.goal)
    }

    fn description(&self) -> String {
        format!("Defeat {} enemy parties", self.goal)
    }
}

// ============================================================================
// Collect Items
// ============================================================================

/// Pick up a number of items.
pub struct CollectItemQuest {
    assignment: QuestAssignment,
    collected: u32,
    goal: u32,
}

impl CollectItemQuest {
    pub fn new(assignment: QuestAssignment, goal: u32) -> Self {
        Self {
            assignment,
            collected: 0,
            goal,
        }
    }
}

impl Quest for CollectItemQuest {
    fn kind(&self) -> QuestKind {
        QuestKind::CollectItems
    }

    fn id(&self) -> QuestId {
        self.assignment.id
    }

    fn slot(&self) -> usize {
        self.assignment.slot
    }

    fn started_at(&self) -> DateTime<Utc> {
        self.assignment.started_at
    }

    fn collected_an_item(&mut self) {
        if self.collected >= self.goal {
            return;
        }
        self.collected += 1;
        self.assignment.report();
    }

    fn is_complete(&self) -> bool {
        self.collected >= self.goal
    }

    fn progress(&self) -> (u32, u32) {
        (self.collected, self.goal)
    }

    fn description(&self) -> String {
        format!("Collect {} items", self.goal)
    }
}

// ============================================================================
// Place Units
// ============================================================================

/// Place a number of units of one specific type. Placements of any other
/// unit type don't count.
pub struct PlaceUnitQuest {
    assignment: QuestAssignment,
    unit: PlaceableUnitType,
    placed: u32,
    goal: u32,
}

impl PlaceUnitQuest {
    pub fn new(assignment: QuestAssignment, unit: PlaceableUnitType, goal: u32) -> Self {
        Self {
            assignment,
            unit,
            placed: 0,
            goal,
        }
    }

    pub fn unit(&self) -> PlaceableUnitType {
        self.unit
    }
}

impl Quest for PlaceUnitQuest {
    fn kind(&self) -> QuestKind {
        match self.unit {
            PlaceableUnitType::Wizard => QuestKind::PlaceWizards,
            PlaceableUnitType::Archer => QuestKind::PlaceArchers,
            PlaceableUnitType::Warrior => QuestKind::PlaceWarriors,
        }
    }

    fn id(&self) -> QuestId {
        self.assignment.id
    }

    fn slot(&self) -> usize {
        self.assignment.slot
    }

    fn started_at(&self) -> DateTime<Utc> {
        self.assignment.started_at
    }

    fn placed_a_unit(&mut self, unit: PlaceableUnitType) {
        if unit != self.unit || self.placed >= self.goal {
            return;
        }
        self.placed += 1;
        self.assignment.report();
    }

    fn is_complete(&self) -> bool {
        self.placed >= self.goal
    }

    fn progress(&self) -> (u32, u32) {
        (self.placed, self.goal)
    }

    fn description(&self) -> String {
        format!("Place {} {}s", self.goal, self.unit.as_str())
    }
}
