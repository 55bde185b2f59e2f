//! Quest System Module
//!
//! Fixed-capacity quest slots for a session: the manager assigns new quests
//! to free slots, fans gameplay events out to every active quest, and trades
//! completed quests for rewards. Kinds are data-driven through a TOML-backed
//! catalog; quest behavior is polymorphic behind the capability contract.

pub mod catalog;
pub mod contract;
pub mod display;
pub mod kinds;
pub mod manager;
pub mod variants;

pub use catalog::{QuestBlueprint, QuestCatalog};
pub use contract::{ProgressReport, ProgressReporter, Quest, QuestAssignment, QuestId};
pub use display::{NoDisplay, QuestDisplay};
pub use kinds::{PlaceableUnitType, QuestKind};
pub use manager::{CompletedQuest, MAX_QUESTS, QuestSlotManager};
pub use variants::{CollectItemQuest, KillEnemyPartyQuest, PlaceUnitQuest};
