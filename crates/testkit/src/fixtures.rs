//! Small ready-made scenes for provider tests.

use tetherstone_core::{BlockPos, DimensionId, ItemKind, ItemStack};
use tetherstone_world::{Authority, BlockEntity, Level, Player};

/// Position of the chest in [`provider_scene`].
pub const SCENE_CHEST: BlockPos = BlockPos::new(10, 64, -5);
/// Position of the tank in [`provider_scene`].
pub const SCENE_TANK: BlockPos = BlockPos::new(12, 64, -5);
/// Position of the sign in [`provider_scene`].
pub const SCENE_SIGN: BlockPos = BlockPos::new(14, 64, -5);

/// An overworld level with a chest, a tank and a sign, plus a player holding
/// an unbound item provider in the selected hotbar slot.
pub fn provider_scene(authority: Authority) -> (Level, Player) {
    let mut level = Level::new(DimensionId::OVERWORLD, authority);
    level.place(SCENE_CHEST, block_entity("chest"));
    level.place(SCENE_TANK, block_entity("tank"));
    level.place(SCENE_SIGN, block_entity("sign"));

    (level, player_holding(ItemKind::ItemProvider))
}

/// A player at the origin holding one `kind` in the selected hotbar slot.
pub fn player_holding(kind: ItemKind) -> Player {
    let mut player = Player::new(BlockPos::new(0, 64, 0));
    player.inventory.set(0, Some(ItemStack::new(kind, 1)));
    player
}

fn block_entity(kind: &str) -> BlockEntity {
    match BlockEntity::from_kind(kind) {
        Some(entity) => entity,
        None => panic!("fixture uses unknown block entity kind {kind}"),
    }
}
