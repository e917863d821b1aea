//! Resolving bound providers back to the block entities they point at.
//!
//! Consumers (builders, crafters) hold providers in an inventory and pull
//! from whatever they are bound to. A binding only resolves while it is in
//! the consumer's dimension, within reach, and the bound face still accepts
//! the provider.

use crate::block_entity::BlockEntity;
use crate::level::Level;
use crate::player::PlayerInventory;
use crate::providers::provider_for;
use crate::settings::ProviderSettings;
use tetherstone_core::{Binding, BlockPos, Facing, ItemStack};
use tracing::debug;

/// A binding that currently points at a live, accepted block entity.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTarget<'a> {
    /// Bound block position.
    pub position: BlockPos,
    /// Bound face.
    pub side: Facing,
    /// Block entity currently at `position`.
    pub entity: &'a BlockEntity,
}

/// Resolve the block entity `stack` is bound to, as seen from `origin`.
pub fn resolve_target<'a>(
    stack: &ItemStack,
    level: &'a Level,
    origin: BlockPos,
    settings: &ProviderSettings,
) -> Option<ResolvedTarget<'a>> {
    let provider = provider_for(stack.item)?;

    let target = match Binding::read(&stack.data) {
        Ok(Binding::Bound(target)) => target,
        Ok(Binding::Unbound) => return None,
        Err(err) => {
            debug!(item = stack.item.name(), %err, "ignoring malformed binding");
            return None;
        }
    };

    if target.dimension != level.dimension() {
        debug!(
            bound = %target.dimension,
            level = %level.dimension(),
            "provider bound in another dimension"
        );
        return None;
    }

    if target.position.distance_squared(origin) > settings.max_radius_squared() {
        debug!(pos = %target.position, %origin, "provider target out of range");
        return None;
    }

    let entity = level.block_entity(target.position)?;
    if !provider.is_valid_target(entity, target.side) {
        debug!(
            pos = %target.position,
            kind = entity.kind_name(),
            "provider target no longer accepted"
        );
        return None;
    }

    Some(ResolvedTarget {
        position: target.position,
        side: target.side,
        entity,
    })
}

/// Resolve every provider in `inventory`, in slot order.
pub fn resolve_all<'a>(
    inventory: &PlayerInventory,
    level: &'a Level,
    origin: BlockPos,
    settings: &ProviderSettings,
) -> Vec<ResolvedTarget<'a>> {
    inventory
        .iter()
        .filter(|stack| stack.item.is_provider())
        .filter_map(|stack| resolve_target(stack, level, origin, settings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Authority;
    use tetherstone_core::binding::SIDE_KEY;
    use tetherstone_core::{BindTarget, DimensionId, ItemKind};

    fn bound(kind: ItemKind, pos: BlockPos, side: Facing, dimension: DimensionId) -> ItemStack {
        let mut stack = ItemStack::new(kind, 1);
        Binding::Bound(BindTarget::new(dimension, pos, side)).write(&mut stack.data);
        stack
    }

    fn level_with_chest(pos: BlockPos) -> Level {
        let mut level = Level::new(DimensionId::OVERWORLD, Authority::Authoritative);
        level.place(pos, BlockEntity::from_kind("chest").unwrap());
        level
    }

    #[test]
    fn resolves_live_target_in_range() {
        let pos = BlockPos::new(10, 64, -5);
        let level = level_with_chest(pos);
        let stack = bound(ItemKind::ItemProvider, pos, Facing::Up, DimensionId::OVERWORLD);

        let resolved = resolve_target(&stack, &level, BlockPos::new(0, 64, 0), &ProviderSettings::default())
            .expect("resolves");
        assert_eq!(resolved.position, pos);
        assert_eq!(resolved.side, Facing::Up);
        assert_eq!(resolved.entity.kind_name(), "chest");
    }

    #[test]
    fn other_dimension_does_not_resolve() {
        let pos = BlockPos::new(1, 64, 1);
        let level = level_with_chest(pos);
        let stack = bound(ItemKind::ItemProvider, pos, Facing::Up, DimensionId::NETHER);
        assert!(resolve_target(&stack, &level, pos, &ProviderSettings::default()).is_none());
    }

    #[test]
    fn radius_is_inclusive() {
        let pos = BlockPos::new(64, 0, 0);
        let level = level_with_chest(pos);
        let stack = bound(ItemKind::ItemProvider, pos, Facing::Up, DimensionId::OVERWORLD);
        let settings = ProviderSettings::default();

        assert!(resolve_target(&stack, &level, BlockPos::new(0, 0, 0), &settings).is_some());
        assert!(resolve_target(&stack, &level, BlockPos::new(-1, 0, 0), &settings).is_none());
    }

    #[test]
    fn removed_or_replaced_target_does_not_resolve() {
        let pos = BlockPos::new(2, 64, 2);
        let mut level = level_with_chest(pos);
        let stack = bound(ItemKind::ItemProvider, pos, Facing::Up, DimensionId::OVERWORLD);
        let settings = ProviderSettings::default();

        level.place(pos, BlockEntity::from_kind("tank").unwrap());
        assert!(resolve_target(&stack, &level, pos, &settings).is_none());

        level.remove(pos);
        assert!(resolve_target(&stack, &level, pos, &settings).is_none());
    }

    #[test]
    fn malformed_binding_does_not_resolve() {
        let pos = BlockPos::new(2, 64, 2);
        let level = level_with_chest(pos);
        let mut stack = bound(ItemKind::ItemProvider, pos, Facing::Up, DimensionId::OVERWORLD);
        stack.data.set_byte(SIDE_KEY, 200);
        assert!(resolve_target(&stack, &level, pos, &ProviderSettings::default()).is_none());
    }

    #[test]
    fn resolve_all_skips_unbound_and_non_providers() {
        let pos = BlockPos::new(3, 64, 3);
        let mut level = level_with_chest(pos);
        let tank_pos = BlockPos::new(4, 64, 3);
        level.place(tank_pos, BlockEntity::from_kind("tank").unwrap());

        let mut inventory = PlayerInventory::new();
        inventory.set(0, Some(ItemStack::new(ItemKind::Block(1), 64)));
        inventory.set(1, Some(ItemStack::new(ItemKind::ItemProvider, 1)));
        inventory.set(2, Some(bound(ItemKind::ItemProvider, pos, Facing::East, DimensionId::OVERWORLD)));
        inventory.set(5, Some(bound(ItemKind::FluidProvider, tank_pos, Facing::Up, DimensionId::OVERWORLD)));

        let resolved = resolve_all(&inventory, &level, pos, &ProviderSettings::default());
        let kinds: Vec<_> = resolved.iter().map(|r| r.entity.kind_name()).collect();
        assert_eq!(kinds, vec!["chest", "tank"]);
    }
}
