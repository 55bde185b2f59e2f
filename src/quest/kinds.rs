//! Quest Kind Tags
//!
//! The closed set of quest types a session can hand out, plus the unit
//! types that placement quests track.

use serde::{Deserialize, Serialize};

/// Unit types a player can place on the battlefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceableUnitType {
    Wizard,
    Archer,
    Warrior,
}

impl PlaceableUnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceableUnitType::Wizard => "wizard",
            PlaceableUnitType::Archer => "archer",
            PlaceableUnitType::Warrior => "warrior",
        }
    }
}

/// Quest type tags supported by the slot manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    /// Defeat X enemy parties
    KillEnemies,
    /// Pick up X items
    CollectItems,
    /// Place X wizards
    PlaceWizards,
    /// Place X archers
    PlaceArchers,
    /// Place X warriors
    PlaceWarriors,
}

impl QuestKind {
    /// Every known quest kind, in display order.
    pub const ALL: [QuestKind; 5] = [
        QuestKind::KillEnemies,
        QuestKind::CollectItems,
        QuestKind::PlaceWizards,
        QuestKind::PlaceArchers,
        QuestKind::PlaceWarriors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestKind::KillEnemies => "kill_enemies",
            QuestKind::CollectItems => "collect_items",
            QuestKind::PlaceWizards => "place_wizards",
            QuestKind::PlaceArchers => "place_archers",
            QuestKind::PlaceWarriors => "place_warriors",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kill_enemies" | "kill" => Some(QuestKind::KillEnemies),
            "collect_items" | "collect" => Some(QuestKind::CollectItems),
            "place_wizards" => Some(QuestKind::PlaceWizards),
            "place_archers" => Some(QuestKind::PlaceArchers),
            "place_warriors" => Some(QuestKind::PlaceWarriors),
            _ => None,
        }
    }

    /// Unit type associated with the placement quest tags.
    pub fn placed_unit(&self) -> Option<PlaceableUnitType> {
        match self {
            QuestKind::PlaceWizards => Some(PlaceableUnitType::Wizard),
            QuestKind::PlaceArchers => Some(PlaceableUnitType::Archer),
            QuestKind::PlaceWarriors => Some(PlaceableUnitType::Warrior),
            _ => None,
        }
    }
}
