//! Item stacks and their persistent data.

use crate::components::ComponentMap;
use serde::{Deserialize, Serialize};

/// Item kind identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Provider bound to a block entity exposing an item inventory
    ItemProvider,
    /// Provider bound to a block entity exposing a fluid tank
    FluidProvider,
    /// A placeable block
    Block(u16), // BlockId
    /// Generic item
    Item(u16),
}

impl ItemKind {
    /// Whether this kind can be bound to a block face.
    pub fn is_provider(self) -> bool {
        matches!(self, ItemKind::ItemProvider | ItemKind::FluidProvider)
    }

    /// Registry-style name for logs and scripts.
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::ItemProvider => "item_provider",
            ItemKind::FluidProvider => "fluid_provider",
            ItemKind::Block(_) => "block",
            ItemKind::Item(_) => "item",
        }
    }
}

/// An item stack in inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Kind of item
    pub item: ItemKind,
    /// Quantity in stack
    pub count: u32,
    /// Persistent per-stack data (saved and replicated with the stack)
    #[serde(default)]
    pub data: ComponentMap,
}

impl ItemStack {
    /// Create a new item stack with empty data
    pub fn new(item: ItemKind, count: u32) -> Self {
        Self {
            item,
            count,
            data: ComponentMap::new(),
        }
    }

    /// Maximum stack size for this item kind
    pub fn max_stack_size(&self) -> u32 {
        match self.item {
            ItemKind::ItemProvider | ItemKind::FluidProvider => 1, // Providers don't stack
            ItemKind::Block(_) => 64,
            ItemKind::Item(_) => 64,
        }
    }

    /// Check if this stack can accept more items
    pub fn can_add(&self, count: u32) -> bool {
        self.count + count <= self.max_stack_size()
    }

    /// Whether `other` could be merged into this stack (same kind, same data).
    pub fn is_stackable_with(&self, other: &ItemStack) -> bool {
        self.item == other.item && self.data == other.data && self.max_stack_size() > 1
    }

    /// Merge as much of `other` as fits, returning how many items moved.
    pub fn merge_from(&mut self, other: &mut ItemStack) -> u32 {
        if !self.is_stackable_with(other) {
            return 0;
        }
        let space = self.max_stack_size().saturating_sub(self.count);
        let moved = space.min(other.count);
        self.count += moved;
        other.count -= moved;
        moved
    }
}
