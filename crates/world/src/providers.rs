//! Concrete provider items.

use crate::block_entity::BlockEntity;
use crate::provider::Provider;
use tetherstone_core::{Facing, ItemKind};

/// Provider bound to a face exposing an item inventory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemProvider;

impl Provider for ItemProvider {
    fn kind(&self) -> ItemKind {
        ItemKind::ItemProvider
    }

    fn is_valid_target(&self, entity: &BlockEntity, side: Facing) -> bool {
        entity.exposes_items(side)
    }

    fn description(&self) -> &str {
        "Supplies items from the inventory it is bound to. Sneak-use on a container to bind, sneak-use in the air to clear."
    }
}

/// Provider bound to a face exposing a fluid tank.
#[derive(Debug, Clone, Copy, Default)]
pub struct FluidProvider;

impl Provider for FluidProvider {
    fn kind(&self) -> ItemKind {
        ItemKind::FluidProvider
    }

    fn is_valid_target(&self, entity: &BlockEntity, side: Facing) -> bool {
        entity.exposes_fluids(side)
    }

    fn description(&self) -> &str {
        "Supplies fluids from the tank it is bound to. Sneak-use on a tank to bind, sneak-use in the air to clear."
    }
}

/// Provider implementation for an item kind, if it is one.
pub fn provider_for(kind: ItemKind) -> Option<&'static dyn Provider> {
    match kind {
        ItemKind::ItemProvider => Some(&ItemProvider),
        ItemKind::FluidProvider => Some(&FluidProvider),
        ItemKind::Block(_) | ItemKind::Item(_) => None,
    }
}
