use rand::Rng;
use serde::Serialize;
use tracing::debug;

// ============================================================================
// Item Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    HealthPotion,
    ManaPotion,
    Gold,
    Emerald,
}

impl ItemType {
    pub fn name(&self) -> &'static str {
        match self {
            ItemType::HealthPotion => "Health Potion",
            ItemType::ManaPotion => "Mana Potion",
            ItemType::Gold => "Gold",
            ItemType::Emerald => "Emerald",
        }
    }

    pub fn max_stack(&self) -> i32 {
        match self {
            ItemType::HealthPotion => 10,
            ItemType::ManaPotion => 10,
            ItemType::Gold => 9999,
            ItemType::Emerald => 99,
        }
    }
}

/// A stack of one item type, as granted by quest rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    pub item_type: ItemType,
    pub quantity: i32,
}

impl Item {
    pub fn new(item_type: ItemType, quantity: i32) -> Self {
        Self { item_type, quantity }
    }
}

// ============================================================================
// Collaborator Contracts
// ============================================================================

/// Source of randomly generated reward items.
pub trait ItemSource {
    fn generate_random_item(&mut self) -> Item;
}

/// Receiving side of a reward grant.
pub trait Inventory {
    fn add_item(&mut self, item: Item);
}

// ============================================================================
// Reward Rolls
// ============================================================================

/// Default reward generator. Rolls rarer items first and falls back to a
/// small pile of gold.
#[derive(Debug, Default)]
pub struct DropTable;

impl ItemSource for DropTable {
    fn generate_random_item(&mut self) -> Item {
        let mut rng = rand::thread_rng();

        // 10% emerald
        if rng.gen_range(0..100) < 10 {
            return Item::new(ItemType::Emerald, 1);
        }

        // 25% each for the potions
        if rng.gen_range(0..100) < 25 {
            return Item::new(ItemType::HealthPotion, 1);
        }
        if rng.gen_range(0..100) < 25 {
            return Item::new(ItemType::ManaPotion, 1);
        }

        // Otherwise gold (5-15)
        Item::new(ItemType::Gold, rng.gen_range(5..=15))
    }
}

// ============================================================================
// Bag
// ============================================================================

pub const BAG_SIZE: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct ItemStack {
    pub item_type: ItemType,
    pub quantity: i32,
}

impl ItemStack {
    pub fn new(item_type: ItemType, quantity: i32) -> Self {
        Self { item_type, quantity }
    }
}

/// Default player inventory. Gold is stored separately; everything else
/// stacks into a fixed number of bag slots.
#[derive(Debug, Clone)]
pub struct Bag {
    pub slots: Vec<Option<ItemStack>>,
    pub gold: i32,
}

impl Bag {
    pub fn new() -> Self {
        Self {
            slots: vec![None; BAG_SIZE],
            gold: 0,
        }
    }

    /// Try to stow an item. Returns the quantity that couldn't fit.
    pub fn stow(&mut self, item: Item) -> i32 {
        // Gold goes to the separate counter
        if item.item_type == ItemType::Gold {
            self.gold += item.quantity;
            return 0;
        }

        let max_stack = item.item_type.max_stack();
        let mut quantity = item.quantity;

        // First, top up existing stacks
        for slot in &mut self.slots {
            if quantity <= 0 {
                break;
            }
            if let Some(stack) = slot {
                if stack.item_type == item.item_type {
                    let can_add = max_stack - stack.quantity;
                    if can_add > 0 {
                        let add = quantity.min(can_add);
                        stack.quantity += add;
                        quantity -= add;
                    }
                }
            }
        }

        // Then, open new stacks in empty slots
        for slot in &mut self.slots {
            if quantity <= 0 {
                break;
            }
            if slot.is_none() {
                let add = quantity.min(max_stack);
                *slot = Some(ItemStack::new(item.item_type, add));
                quantity -= add;
            }
        }

        quantity
    }

    /// Total quantity of one item type across all stacks.
    pub fn count_of(&self, item_type: ItemType) -> i32 {
        if item_type == ItemType::Gold {
            return self.gold;
        }
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.item_type == item_type)
            .map(|stack| stack.quantity)
            .sum()
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory for Bag {
    fn add_item(&mut self, item: Item) {
        let leftover = self.stow(item);
        if leftover > 0 {
            debug!(
                "Bag full, dropped {} x{}",
                item.item_type.name(),
                leftover
            );
        }
    }
}
