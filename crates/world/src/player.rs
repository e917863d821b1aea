//! Player posture and inventory.
//!
//! The inventory owns the item stacks providers write into, and carries the
//! dirty flag that tells the host to save and resync it.

use serde::{Deserialize, Serialize};
use tetherstone_core::{BlockPos, ItemStack};

/// Number of main inventory slots (hotbar included).
pub const INVENTORY_SIZE: usize = 36;

/// Number of hotbar slots at the start of the main inventory.
pub const HOTBAR_SIZE: usize = 9;

/// Hand holding the item being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Hand {
    /// Main hand (selected hotbar slot).
    #[default]
    Main,
    /// Offhand slot.
    Off,
}

/// Player inventory: main slots, an offhand slot and the selected hotbar slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInventory {
    slots: Vec<Option<ItemStack>>,
    offhand: Option<ItemStack>,
    selected: usize,
    #[serde(skip)]
    dirty: bool,
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerInventory {
    /// Create a new empty inventory.
    pub fn new() -> Self {
        Self {
            slots: vec![None; INVENTORY_SIZE],
            offhand: None,
            selected: 0,
            dirty: false,
        }
    }

    /// Get an item stack from a slot.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)?.as_ref()
    }

    /// Set an item stack in a slot.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = stack;
                true
            }
            None => false,
        }
    }

    /// Try to add an item stack, merging first and then filling empty slots.
    /// Returns the remainder that didn't fit.
    pub fn add_item(&mut self, mut stack: ItemStack) -> Option<ItemStack> {
        for existing in self.slots.iter_mut().flatten() {
            existing.merge_from(&mut stack);
            if stack.count == 0 {
                return None;
            }
        }

        for slot in &mut self.slots {
            if slot.is_none() {
                let take = stack.count.min(stack.max_stack_size());
                let mut placed = stack.clone();
                placed.count = take;
                stack.count -= take;
                *slot = Some(placed);
                if stack.count == 0 {
                    return None;
                }
            }
        }

        Some(stack)
    }

    /// Currently selected hotbar slot.
    pub fn selected_slot(&self) -> usize {
        self.selected
    }

    /// Select a hotbar slot. Returns false if out of range.
    pub fn select(&mut self, slot: usize) -> bool {
        if slot >= HOTBAR_SIZE {
            return false;
        }
        self.selected = slot;
        true
    }

    /// Stack held in `hand`.
    pub fn held(&self, hand: Hand) -> Option<&ItemStack> {
        match hand {
            Hand::Main => self.get(self.selected),
            Hand::Off => self.offhand.as_ref(),
        }
    }

    /// Mutable stack held in `hand`.
    pub fn held_mut(&mut self, hand: Hand) -> Option<&mut ItemStack> {
        match hand {
            Hand::Main => self.slots.get_mut(self.selected)?.as_mut(),
            Hand::Off => self.offhand.as_mut(),
        }
    }

    /// Replace the offhand stack.
    pub fn set_offhand(&mut self, stack: Option<ItemStack>) {
        self.offhand = stack;
    }

    /// Iterate occupied slots (main slots in order, then offhand).
    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter().chain(std::iter::once(&self.offhand)).flatten()
    }

    /// Flag the inventory as changed so the host persists and resyncs it.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether the inventory has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning whether it was set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// The acting agent of an interaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    /// Block the player stands on.
    pub position: BlockPos,
    /// Whether the player is sneaking.
    pub sneaking: bool,
    /// Held and stored items.
    pub inventory: PlayerInventory,
}

impl Player {
    /// Player at `position` with an empty inventory.
    pub fn new(position: BlockPos) -> Self {
        Self {
            position,
            sneaking: false,
            inventory: PlayerInventory::new(),
        }
    }
}
