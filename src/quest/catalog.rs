//! Quest Catalog
//!
//! The quest-type registry: one blueprint per quest kind, loadable from
//! TOML. The catalog is also the dispatch table that turns a kind tag into
//! a concrete quest instance.

use std::collections::HashMap;
use std::path::Path;

use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::{info, warn};

use super::contract::{ProgressReporter, Quest, QuestAssignment, QuestId};
use super::kinds::{PlaceableUnitType, QuestKind};
use super::variants::{CollectItemQuest, KillEnemyPartyQuest, PlaceUnitQuest};

// ============================================================================
// Raw Blueprint (direct from TOML)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalogFile {
    #[serde(default)]
    pub quest: Vec<RawBlueprint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBlueprint {
    pub kind: String,
    #[serde(default = "default_goal")]
    pub goal: u32,
}

fn default_goal() -> u32 {
    1
}

// ============================================================================
// Resolved Blueprint
// ============================================================================

/// Resolved construction parameters for one quest kind.
#[derive(Debug, Clone, Copy)]
pub struct QuestBlueprint {
    pub kind: QuestKind,
    /// Event count a fresh quest of this kind must reach.
    pub goal: u32,
}

impl QuestBlueprint {
    pub fn from_raw(raw: &RawBlueprint) -> Option<Self> {
        let kind = QuestKind::from_str(&raw.kind)?;
        Some(Self { kind, goal: raw.goal })
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Registry of quest blueprints, keyed by kind.
pub struct QuestCatalog {
    blueprints: HashMap<QuestKind, QuestBlueprint>,
}

impl QuestCatalog {
    pub fn new() -> Self {
        Self {
            blueprints: HashMap::new(),
        }
    }

    /// The built-in catalog: every known kind with its default goal.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.insert(QuestBlueprint { kind: QuestKind::KillEnemies, goal: 3 });
        catalog.insert(QuestBlueprint { kind: QuestKind::CollectItems, goal: 5 });
        catalog.insert(QuestBlueprint { kind: QuestKind::PlaceWizards, goal: 2 });
        catalog.insert(QuestBlueprint { kind: QuestKind::PlaceArchers, goal: 2 });
        catalog.insert(QuestBlueprint { kind: QuestKind::PlaceWarriors, goal: 2 });
        catalog
    }

    pub fn insert(&mut self, blueprint: QuestBlueprint) {
        if self.blueprints.contains_key(&blueprint.kind) {
            warn!(
                "Duplicate quest blueprint for '{}', overwriting",
                blueprint.kind.as_str()
            );
        }
        self.blueprints.insert(blueprint.kind, blueprint);
    }

    /// Parse a catalog from TOML. Entries with an unrecognized kind are
    /// skipped with a diagnostic; they never fail the load.
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let raw: RawCatalogFile = toml::from_str(content)
            .map_err(|e| format!("Failed to parse quest catalog: {}", e))?;

        let mut catalog = Self::new();
        for entry in &raw.quest {
            match QuestBlueprint::from_raw(entry) {
                Some(blueprint) => catalog.insert(blueprint),
                None => warn!("Unrecognized quest kind '{}', skipping", entry.kind),
            }
        }

        info!("Loaded {} quest blueprints", catalog.len());
        Ok(catalog)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn get(&self, kind: QuestKind) -> Option<&QuestBlueprint> {
        self.blueprints.get(&kind)
    }

    pub fn contains(&self, kind: QuestKind) -> bool {
        self.blueprints.contains_key(&kind)
    }

    pub fn kinds(&self) -> Vec<QuestKind> {
        self.blueprints.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Pick a registered kind uniformly at random.
    pub fn random_kind(&self) -> Option<QuestKind> {
        let kinds = self.kinds();
        kinds.choose(&mut rand::thread_rng()).copied()
    }

    /// Construct a quest of the given kind for a slot. Pure dispatch: no
    /// slot is touched here. Returns `None` with a diagnostic when the kind
    /// has no registered blueprint.
    pub fn construct(
        &self,
        kind: QuestKind,
        slot: usize,
        id: QuestId,
        reporter: ProgressReporter,
    ) -> Option<Box<dyn Quest>> {
        let Some(blueprint) = self.blueprints.get(&kind) else {
            warn!("No quest blueprint registered for '{}'", kind.as_str());
            return None;
        };

        let assignment = QuestAssignment::new(slot, id, reporter);
        let quest: Box<dyn Quest> = match kind {
            QuestKind::KillEnemies => {
                Box::new(KillEnemyPartyQuest::new(assignment, blueprint.goal))
            }
            QuestKind::CollectItems => {
                Box::new(CollectItemQuest::new(assignment, blueprint.goal))
            }
            QuestKind::PlaceWizards => Box::new(PlaceUnitQuest::new(
                assignment,
                PlaceableUnitType::Wizard,
                blueprint.goal,
            )),
            QuestKind::PlaceArchers => Box::new(PlaceUnitQuest::new(
                assignment,
                PlaceableUnitType::Archer,
                blueprint.goal,
            )),
            QuestKind::PlaceWarriors => Box::new(PlaceUnitQuest::new(
                assignment,
                PlaceableUnitType::Warrior,
                blueprint.goal,
            )),
        };

        Some(quest)
    }
}

impl Default for QuestCatalog {
    fn default() -> Self {
        Self::new()
    }
}
