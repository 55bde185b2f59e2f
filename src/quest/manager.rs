//! Quest Slot Manager
//!
//! Fixed-capacity slot registry for a session's active quests. Routes
//! gameplay events to every quest, re-checks completion when a quest
//! reports progress, and swaps a finished quest for a reward.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::item::{Inventory, ItemSource};

use super::catalog::QuestCatalog;
use super::contract::{ProgressReporter, Quest, QuestId};
use super::display::QuestDisplay;
use super::kinds::{PlaceableUnitType, QuestKind};

/// The maximum number of quests a session can hold at once.
pub const MAX_QUESTS: usize = 3;

/// Session log entry for one finished quest.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompletedQuest {
    pub kind: QuestKind,
    #[serde(skip)]
    pub id: QuestId,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Owns the session's quest slots and routes events to them.
///
/// Single-threaded: the game's update loop is the sole caller, so slots are
/// plain owned state and event delivery is ordinary call order.
pub struct QuestSlotManager {
    /// Slot index -> active quest. Pre-allocated, never resized.
    slots: Vec<Option<Box<dyn Quest>>>,
    catalog: QuestCatalog,
    /// Manager end of the queue quests self-report through.
    reporter: ProgressReporter,
    display: Box<dyn QuestDisplay>,
    items: Box<dyn ItemSource>,
    inventory: Box<dyn Inventory>,
    completed: Vec<CompletedQuest>,
}

impl QuestSlotManager {
    pub fn new(
        catalog: QuestCatalog,
        display: Box<dyn QuestDisplay>,
        items: Box<dyn ItemSource>,
        inventory: Box<dyn Inventory>,
    ) -> Self {
        Self::with_capacity(MAX_QUESTS, catalog, display, items, inventory)
    }

    pub fn with_capacity(
        capacity: usize,
        catalog: QuestCatalog,
        display: Box<dyn QuestDisplay>,
        items: Box<dyn ItemSource>,
        inventory: Box<dyn Inventory>,
    ) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            catalog,
            reporter: ProgressReporter::new(),
            display,
            items,
            inventory,
            completed: Vec::new(),
        }
    }

    /// Reset every slot to empty and drop any queued progress reports.
    /// Discards in-progress quests; only call mid-session for a full reset.
    pub fn initialize(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.reporter.clear();
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether at least one slot is free.
    pub fn can_accept_quests(&self) -> bool {
        self.next_open_slot().is_some()
    }

    /// The lowest-indexed empty slot, or `None` when full.
    pub fn next_open_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    /// The quest in a slot. Slot must be in `[0, capacity)`; an
    /// out-of-range index is a caller error and panics.
    pub fn quest(&self, slot: usize) -> Option<&dyn Quest> {
        self.slots[slot].as_deref()
    }

    /// Quests finished this session, oldest first.
    pub fn completed_quests(&self) -> &[CompletedQuest] {
        &self.completed
    }

    // ========================================================================
    // Event Fan-Out
    // ========================================================================

    /// The player's army defeated an enemy party.
    pub fn killed_an_enemy_party(&mut self) {
        self.broadcast(|quest| quest.killed_an_enemy_party());
    }

    /// The player picked up an item.
    pub fn collected_an_item(&mut self) {
        self.broadcast(|quest| quest.collected_an_item());
    }

    /// The player placed a unit of the given type.
    pub fn placed_a_unit(&mut self, unit: PlaceableUnitType) {
        self.broadcast(move |quest| quest.placed_a_unit(unit));
    }

    /// Deliver one event to every active quest in slot order. Reports are
    /// drained after each delivery, so a quest that completes frees its
    /// slot before the next quest is visited; slots are addressed by index,
    /// so clearing one mid-iteration never shifts the rest.
    fn broadcast(&mut self, mut deliver: impl FnMut(&mut dyn Quest)) {
        for slot in 0..self.slots.len() {
            if let Some(quest) = self.slots[slot].as_deref_mut() {
                deliver(quest);
            }
            self.drain_progress_reports();
        }
    }

    fn drain_progress_reports(&mut self) {
        while let Some(report) = self.reporter.take() {
            self.quest_gained_progress(report.slot, report.quest);
        }
    }

    // ========================================================================
    // Completion Protocol
    // ========================================================================

    /// Process a quest's self-reported progress change.
    ///
    /// Honored only while the slot still holds the reporting instance;
    /// duplicate or out-of-order reports are ignored, so a quest is cleared
    /// and rewarded at most once. On completion the slot is reclaimed and
    /// one randomly generated item goes to the inventory. The display is
    /// refreshed for the slot either way.
    pub fn quest_gained_progress(&mut self, slot: usize, id: QuestId) {
        let complete = match self.slots[slot].as_deref() {
            Some(quest) if quest.id() == id => quest.is_complete(),
            _ => {
                debug!("Stale progress report for slot {}, ignoring", slot);
                return;
            }
        };

        if complete {
            if let Some(quest) = self.slots[slot].take() {
                info!(
                    "Quest '{}' in slot {} complete, granting reward",
                    quest.kind().as_str(),
                    slot
                );
                let reward = self.items.generate_random_item();
                self.inventory.add_item(reward);
                self.completed.push(CompletedQuest {
                    kind: quest.kind(),
                    id: quest.id(),
                    started_at: quest.started_at(),
                    completed_at: Utc::now(),
                });
            }
        }

        self.display.update_quest(slot);
    }

    // ========================================================================
    // Quest Creation
    // ========================================================================

    /// Construct a quest of the given kind for a slot, without touching the
    /// registry. `None` (plus a diagnostic) when the kind has no blueprint.
    pub fn construct_quest(&self, kind: QuestKind, slot: usize) -> Option<Box<dyn Quest>> {
        self.catalog
            .construct(kind, slot, QuestId::new(), self.reporter.clone())
    }

    /// Add a new quest of the given kind to the first open slot.
    ///
    /// A full registry silently drops the request; that's the expected
    /// steady state, not an error. A kind without a blueprint leaves the
    /// slot empty and notifies nothing.
    pub fn add_new_quest(&mut self, kind: QuestKind) {
        let Some(slot) = self.next_open_slot() else {
            debug!(
                "All {} quest slots taken, dropping '{}' request",
                self.capacity(),
                kind.as_str()
            );
            return;
        };

        let Some(quest) = self.construct_quest(kind, slot) else {
            return;
        };

        self.slots[slot] = Some(quest);
        self.display.update_quest(slot);
    }

    /// Add a quest of a uniformly random registered kind. Debug/testing
    /// convenience; production flows pass an explicit kind to
    /// [`add_new_quest`](Self::add_new_quest).
    pub fn add_random_quest(&mut self) {
        let Some(kind) = self.catalog.random_kind() else {
            debug!("Quest catalog is empty, cannot pick a random quest");
            return;
        };
        self.add_new_quest(kind);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::item::{Item, ItemType};
    use crate::quest::catalog::QuestBlueprint;

    struct RecordingDisplay {
        updates: Rc<RefCell<Vec<usize>>>,
    }

    impl QuestDisplay for RecordingDisplay {
        fn update_quest(&mut self, slot: usize) {
            self.updates.borrow_mut().push(slot);
        }
    }

    struct RecordingInventory {
        items: Rc<RefCell<Vec<Item>>>,
    }

    impl Inventory for RecordingInventory {
        fn add_item(&mut self, item: Item) {
            self.items.borrow_mut().push(item);
        }
    }

    struct FixedItemSource;

    impl ItemSource for FixedItemSource {
        fn generate_random_item(&mut self) -> Item {
            Item::new(ItemType::Emerald, 1)
        }
    }

    struct Harness {
        manager: QuestSlotManager,
        updates: Rc<RefCell<Vec<usize>>>,
        rewards: Rc<RefCell<Vec<Item>>>,
    }

    fn harness_with(catalog: QuestCatalog) -> Harness {
        let updates = Rc::new(RefCell::new(Vec::new()));
        let rewards = Rc::new(RefCell::new(Vec::new()));
        let manager = QuestSlotManager::new(
            catalog,
            Box::new(RecordingDisplay { updates: Rc::clone(&updates) }),
            Box::new(FixedItemSource),
            Box::new(RecordingInventory { items: Rc::clone(&rewards) }),
        );
        Harness { manager, updates, rewards }
    }

    /// Catalog with goals pinned so the scenarios below are deterministic.
    fn harness() -> Harness {
        let mut catalog = QuestCatalog::new();
        catalog.insert(QuestBlueprint { kind: QuestKind::KillEnemies, goal: 3 });
        catalog.insert(QuestBlueprint { kind: QuestKind::CollectItems, goal: 1 });
        catalog.insert(QuestBlueprint { kind: QuestKind::PlaceWizards, goal: 2 });
        catalog.insert(QuestBlueprint { kind: QuestKind::PlaceArchers, goal: 2 });
        catalog.insert(QuestBlueprint { kind: QuestKind::PlaceWarriors, goal: 2 });
        harness_with(catalog)
    }

    #[test]
    fn test_quests_fill_slots_in_index_order() {
        let mut h = harness();
        assert_eq!(h.manager.capacity(), MAX_QUESTS);
        assert!(h.manager.quest(0).is_none());
        assert!(h.manager.quest(1).is_none());
        assert!(h.manager.quest(2).is_none());

        h.manager.add_new_quest(QuestKind::KillEnemies);
        assert_eq!(h.manager.quest(0).unwrap().kind(), QuestKind::KillEnemies);
        assert!(h.manager.can_accept_quests());

        h.manager.add_new_quest(QuestKind::CollectItems);
        assert_eq!(h.manager.quest(1).unwrap().kind(), QuestKind::CollectItems);
        assert!(h.manager.can_accept_quests());

        h.manager.add_new_quest(QuestKind::PlaceWizards);
        assert_eq!(h.manager.quest(2).unwrap().kind(), QuestKind::PlaceWizards);
        assert!(!h.manager.can_accept_quests());
        assert_eq!(h.manager.next_open_slot(), None);

        // Full registry: the request is dropped without any other change
        h.manager.add_new_quest(QuestKind::PlaceWarriors);
        assert_eq!(h.manager.active_count(), 3);
        assert_eq!(h.manager.quest(2).unwrap().kind(), QuestKind::PlaceWizards);
        assert_eq!(h.updates.borrow().len(), 3);
    }

    #[test]
    fn test_next_open_slot_prefers_lowest_index() {
        let mut h = harness();
        assert_eq!(h.manager.next_open_slot(), Some(0));

        h.manager.add_new_quest(QuestKind::KillEnemies);
        h.manager.add_new_quest(QuestKind::CollectItems);
        h.manager.add_new_quest(QuestKind::PlaceWizards);

        // Completing the slot-1 quest frees the middle slot
        h.manager.collected_an_item();
        assert!(h.manager.quest(1).is_none());
        assert_eq!(h.manager.next_open_slot(), Some(1));

        h.manager.add_new_quest(QuestKind::PlaceArchers);
        assert_eq!(h.manager.quest(1).unwrap().kind(), QuestKind::PlaceArchers);
    }

    #[test]
    fn test_broadcast_with_no_quests_is_a_noop() {
        let mut h = harness();
        h.manager.killed_an_enemy_party();
        h.manager.collected_an_item();
        h.manager.placed_a_unit(PlaceableUnitType::Warrior);

        assert_eq!(h.manager.active_count(), 0);
        assert!(h.updates.borrow().is_empty());
        assert!(h.rewards.borrow().is_empty());
    }

    #[test]
    fn test_placement_broadcast_reaches_every_active_quest() {
        let mut h = harness();
        h.manager.add_new_quest(QuestKind::KillEnemies);
        h.manager.add_new_quest(QuestKind::PlaceWarriors);

        h.manager.placed_a_unit(PlaceableUnitType::Warrior);
        // The kill quest received the event and ignored it
        assert_eq!(h.manager.quest(0).unwrap().progress(), (0, 3));
        assert_eq!(h.manager.quest(1).unwrap().progress(), (1, 2));
        assert!(h.rewards.borrow().is_empty());

        h.manager.placed_a_unit(PlaceableUnitType::Warrior);
        assert!(h.manager.quest(1).is_none());
        assert_eq!(h.rewards.borrow().len(), 1);
        assert_eq!(h.manager.quest(0).unwrap().progress(), (0, 3));
    }

    #[test]
    fn test_wrong_unit_type_does_not_progress_placement_quest() {
        let mut h = harness();
        h.manager.add_new_quest(QuestKind::PlaceWarriors);
        h.updates.borrow_mut().clear();

        h.manager.placed_a_unit(PlaceableUnitType::Wizard);
        assert_eq!(h.manager.quest(0).unwrap().progress(), (0, 2));
        assert!(h.updates.borrow().is_empty());
    }

    #[test]
    fn test_collect_quest_completion_grants_one_reward() {
        let mut h = harness();
        h.manager.add_new_quest(QuestKind::KillEnemies);
        h.manager.add_new_quest(QuestKind::CollectItems);
        h.updates.borrow_mut().clear();

        h.manager.collected_an_item();

        assert!(h.manager.quest(1).is_none());
        assert_eq!(h.rewards.borrow().len(), 1);
        assert_eq!(h.rewards.borrow()[0].item_type, ItemType::Emerald);
        // Exactly one display refresh, for the completed slot
        assert_eq!(*h.updates.borrow(), vec![1]);
        assert!(h.manager.can_accept_quests());
    }

    #[test]
    fn test_progress_without_completion_still_updates_display() {
        let mut h = harness();
        h.manager.add_new_quest(QuestKind::KillEnemies);
        h.updates.borrow_mut().clear();

        h.manager.killed_an_enemy_party();

        assert_eq!(h.manager.quest(0).unwrap().progress(), (1, 3));
        assert_eq!(*h.updates.borrow(), vec![0]);
        assert!(h.rewards.borrow().is_empty());
    }

    #[test]
    fn test_one_event_reaches_quests_behind_a_cleared_slot() {
        let mut h = harness();
        // Two collect quests, both one item from done
        h.manager.add_new_quest(QuestKind::CollectItems);
        h.manager.add_new_quest(QuestKind::CollectItems);

        // Slot 0 completes and is cleared mid-broadcast; slot 1 must still
        // receive the same event
        h.manager.collected_an_item();

        assert!(h.manager.quest(0).is_none());
        assert!(h.manager.quest(1).is_none());
        assert_eq!(h.rewards.borrow().len(), 2);
    }

    #[test]
    fn test_unregistered_kind_occupies_nothing() {
        let mut catalog = QuestCatalog::new();
        catalog.insert(QuestBlueprint { kind: QuestKind::KillEnemies, goal: 3 });
        let mut h = harness_with(catalog);

        h.manager.add_new_quest(QuestKind::CollectItems);

        assert_eq!(h.manager.active_count(), 0);
        assert!(h.manager.can_accept_quests());
        assert!(h.updates.borrow().is_empty());

        assert!(h.manager.construct_quest(QuestKind::CollectItems, 0).is_none());
    }

    #[test]
    fn test_stale_progress_reports_are_ignored() {
        let mut h = harness();
        h.manager.add_new_quest(QuestKind::CollectItems);
        let old_id = h.manager.quest(0).unwrap().id();

        h.manager.collected_an_item();
        assert!(h.manager.quest(0).is_none());
        assert_eq!(h.rewards.borrow().len(), 1);
        h.updates.borrow_mut().clear();

        // Duplicate report for the cleared slot: no double reward, no render
        h.manager.quest_gained_progress(0, old_id);
        assert_eq!(h.rewards.borrow().len(), 1);
        assert!(h.updates.borrow().is_empty());

        // The slot gets reused; the old id must not touch the new tenant
        h.manager.add_new_quest(QuestKind::PlaceWarriors);
        h.updates.borrow_mut().clear();
        h.manager.quest_gained_progress(0, old_id);
        assert_eq!(h.manager.quest(0).unwrap().kind(), QuestKind::PlaceWarriors);
        assert_eq!(h.rewards.borrow().len(), 1);
        assert!(h.updates.borrow().is_empty());
    }

    #[test]
    fn test_initialize_discards_all_quests() {
        let mut h = harness();
        h.manager.add_new_quest(QuestKind::KillEnemies);
        h.manager.add_new_quest(QuestKind::CollectItems);

        h.manager.initialize();

        assert_eq!(h.manager.active_count(), 0);
        assert!(h.manager.can_accept_quests());
        for slot in 0..h.manager.capacity() {
            assert!(h.manager.quest(slot).is_none());
        }

        // Idempotent
        h.manager.initialize();
        assert_eq!(h.manager.active_count(), 0);
    }

    #[test]
    fn test_add_random_quest_draws_from_the_catalog() {
        let mut catalog = QuestCatalog::new();
        catalog.insert(QuestBlueprint { kind: QuestKind::KillEnemies, goal: 3 });
        let mut h = harness_with(catalog);

        h.manager.add_random_quest();
        assert_eq!(h.manager.quest(0).unwrap().kind(), QuestKind::KillEnemies);

        // Empty catalog: nothing to pick, nothing changes
        let mut empty = harness_with(QuestCatalog::new());
        empty.manager.add_random_quest();
        assert_eq!(empty.manager.active_count(), 0);
    }

    #[test]
    fn test_completed_quests_are_logged() {
        let mut h = harness();
        h.manager.add_new_quest(QuestKind::CollectItems);
        let id = h.manager.quest(0).unwrap().id();

        h.manager.collected_an_item();

        let log = h.manager.completed_quests();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].kind, QuestKind::CollectItems);
        assert_eq!(log[0].id, id);
        assert!(log[0].started_at <= log[0].completed_at);
    }

    #[test]
    fn test_custom_capacity() {
        let updates = Rc::new(RefCell::new(Vec::new()));
        let rewards = Rc::new(RefCell::new(Vec::new()));
        let mut manager = QuestSlotManager::with_capacity(
            1,
            QuestCatalog::standard(),
            Box::new(RecordingDisplay { updates: Rc::clone(&updates) }),
            Box::new(FixedItemSource),
            Box::new(RecordingInventory { items: Rc::clone(&rewards) }),
        );

        assert_eq!(manager.capacity(), 1);
        manager.add_new_quest(QuestKind::KillEnemies);
        assert!(!manager.can_accept_quests());

        manager.add_new_quest(QuestKind::CollectItems);
        assert_eq!(manager.active_count(), 1);
        assert_eq!(manager.quest(0).unwrap().kind(), QuestKind::KillEnemies);
    }
}
