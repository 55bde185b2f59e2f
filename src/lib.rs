//! Quest slot management for a single-player game session.
//!
//! A session owns a fixed number of quest slots. New quests are assigned to
//! the lowest free slot, gameplay events (enemy party killed, item
//! collected, unit placed) are fanned out to every active quest, and a quest
//! that reports completion is removed from its slot in exchange for a
//! randomly generated reward item.
//!
//! The core is [`QuestSlotManager`]. Quest behavior is polymorphic behind
//! the [`Quest`] trait, quest kinds are data-driven through [`QuestCatalog`],
//! and the UI, reward generator, and inventory are collaborators consumed
//! through the [`QuestDisplay`], [`ItemSource`], and [`Inventory`] traits.

pub mod item;
pub mod quest;

pub use item::{Bag, DropTable, Inventory, Item, ItemSource, ItemType};
pub use quest::{
    CollectItemQuest, CompletedQuest, KillEnemyPartyQuest, MAX_QUESTS, NoDisplay,
    PlaceUnitQuest, PlaceableUnitType, ProgressReporter, Quest, QuestBlueprint, QuestCatalog,
    QuestDisplay, QuestId, QuestKind, QuestSlotManager,
};
