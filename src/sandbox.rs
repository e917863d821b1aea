//! Headless world the interaction scripts drive: one level per visited
//! dimension and a single player.

use std::collections::BTreeMap;

use tetherstone_core::{BlockPos, DimensionId, Facing, ItemKind, ItemStack};
use tetherstone_world::{
    provider_for, resolve_all, Authority, BlockEntity, Hand, InteractionResult, Level, Player,
    ProviderSettings, UseItem, UseOnBlock,
};
use tracing::{debug, info};

use crate::commands::CommandContext;

pub struct Sandbox {
    levels: BTreeMap<DimensionId, Level>,
    dimension: DimensionId,
    authority: Authority,
    player: Player,
    settings: ProviderSettings,
}

impl Sandbox {
    pub fn new(authority: Authority, settings: ProviderSettings) -> Self {
        let dimension = DimensionId::OVERWORLD;
        let mut levels = BTreeMap::new();
        levels.insert(dimension, Level::new(dimension, authority));
        Self {
            levels,
            dimension,
            authority,
            player: Player::new(BlockPos::new(0, 64, 0)),
            settings,
        }
    }

    pub fn dimension(&self) -> DimensionId {
        self.dimension
    }

    pub fn level(&self) -> Option<&Level> {
        self.levels.get(&self.dimension)
    }

    /// Stack in the main hand, if it is a provider.
    pub fn held_provider(&self) -> Option<&ItemStack> {
        self.player
            .inventory
            .held(Hand::Main)
            .filter(|stack| stack.item.is_provider())
    }

    fn level_mut(&mut self) -> &mut Level {
        let (dimension, authority) = (self.dimension, self.authority);
        self.levels
            .entry(dimension)
            .or_insert_with(|| Level::new(dimension, authority))
    }
}

impl CommandContext for Sandbox {
    fn place_block_entity(&mut self, pos: BlockPos, entity: BlockEntity) -> Option<&'static str> {
        let old = self.level_mut().place(pos, entity);
        old.map(|entity| entity.kind_name())
    }

    fn clear_block_entity(&mut self, pos: BlockPos) -> bool {
        self.level_mut().remove(pos).is_some()
    }

    fn give_item(&mut self, item: ItemKind) -> bool {
        self.player
            .inventory
            .add_item(ItemStack::new(item, 1))
            .is_none()
    }

    fn select_slot(&mut self, slot: usize) -> bool {
        self.player.inventory.select(slot)
    }

    fn set_sneaking(&mut self, sneaking: bool) {
        self.player.sneaking = sneaking;
    }

    fn set_authority(&mut self, authority: Authority) {
        self.authority = authority;
        for level in self.levels.values_mut() {
            level.set_authority(authority);
        }
    }

    fn set_dimension(&mut self, dimension: DimensionId) {
        self.dimension = dimension;
        self.level_mut();
        debug!(%dimension, "player changed dimension");
    }

    fn use_on_block(&mut self, pos: BlockPos, side: Facing) -> Option<InteractionResult> {
        let item = self.held_provider()?.item;
        let provider = provider_for(item)?;

        self.level_mut();
        let level = self.levels.get(&self.dimension)?;
        let ctx = UseOnBlock::in_level(level, pos, side, Hand::Main);
        let result = provider.use_on_block(&ctx, &mut self.player);
        debug!(item = item.name(), %pos, %side, ?result, "use on block");
        Some(result)
    }

    fn use_item(&mut self) -> Option<InteractionResult> {
        let item = self.held_provider()?.item;
        let provider = provider_for(item)?;

        self.level_mut();
        let level = self.levels.get(&self.dimension)?;
        let ctx = UseItem::in_level(level, Hand::Main);
        let result = provider.use_item(&ctx, &mut self.player);
        debug!(item = item.name(), ?result, "use item");
        Some(result)
    }

    fn take_inventory_dirty(&mut self) -> bool {
        let dirty = self.player.inventory.take_dirty();
        if dirty {
            info!(
                slot = self.player.inventory.selected_slot(),
                "inventory changed, persisting"
            );
        }
        dirty
    }

    fn tooltip(&self) -> Option<Vec<String>> {
        let stack = self.held_provider()?;
        let provider = provider_for(stack.item)?;
        let mut lines = vec![stack.item.name().to_string()];
        provider.append_tooltip(stack, &mut lines, &self.settings);
        Some(lines)
    }

    fn resolve(&self, origin: BlockPos) -> Vec<String> {
        let Some(level) = self.level() else {
            return Vec::new();
        };
        resolve_all(&self.player.inventory, level, origin, &self.settings)
            .into_iter()
            .map(|target| {
                let mut line = format!(
                    "{} at {} via {}",
                    target.entity.kind_name(),
                    target.position,
                    target.side
                );
                if let Some(summary) = target.entity.face_summary(target.side) {
                    line.push_str(&format!(" ({summary})"));
                }
                line
            })
            .collect()
    }
}
