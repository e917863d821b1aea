//! Provider items: items bound to a block face by sneak-using them on it.
//!
//! Binding protocol:
//! - sneak + use on a block entity the provider accepts: bind to that face
//! - sneak + use in the air: clear the binding
//!
//! Both callbacks fire on every side of a client/server split, but only the
//! authoritative side writes the item. A use on an accepted target reports
//! [`InteractionResult::Success`] even when nothing was written (not sneaking,
//! or observer side), which keeps the host from running its default block
//! interaction. Air use without sneaking passes through to the host.

use crate::block_entity::BlockEntity;
use crate::level::{Authority, Level};
use crate::player::{Hand, Player};
use crate::settings::ProviderSettings;
use crate::tooltip::{target_line, wrap_text};
use tetherstone_core::binding::{self, BindingError};
use tetherstone_core::{
    BindTarget, Binding, BlockPos, DimensionId, Facing, ItemKind, ItemStack,
};
use tracing::debug;

/// Outcome reported back to the host's input dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionResult {
    /// The interaction was consumed.
    Success,
    /// Not handled; the host may fall back to its default behavior.
    Pass,
}

impl InteractionResult {
    /// True if the interaction was consumed.
    pub fn is_success(self) -> bool {
        matches!(self, InteractionResult::Success)
    }
}

/// A use of the held item on a block face.
#[derive(Debug, Clone, Copy)]
pub struct UseOnBlock<'a> {
    /// Side the interaction runs on.
    pub authority: Authority,
    /// Dimension of the clicked block.
    pub dimension: DimensionId,
    /// Clicked block.
    pub pos: BlockPos,
    /// Clicked face.
    pub side: Facing,
    /// Hand holding the provider.
    pub hand: Hand,
    /// Block entity found at `pos`, if any.
    pub target: Option<&'a BlockEntity>,
}

impl<'a> UseOnBlock<'a> {
    /// Build the context from a level lookup.
    pub fn in_level(level: &'a Level, pos: BlockPos, side: Facing, hand: Hand) -> Self {
        Self {
            authority: level.authority(),
            dimension: level.dimension(),
            pos,
            side,
            hand,
            target: level.block_entity(pos),
        }
    }
}

/// A use of the held item not aimed at any block.
#[derive(Debug, Clone, Copy)]
pub struct UseItem {
    /// Side the interaction runs on.
    pub authority: Authority,
    /// Hand holding the provider.
    pub hand: Hand,
}

impl UseItem {
    /// Build the context from the level's authority.
    pub fn in_level(level: &Level, hand: Hand) -> Self {
        Self {
            authority: level.authority(),
            hand,
        }
    }
}

/// An item that can be bound to a block face.
pub trait Provider {
    /// Item kind this provider handles.
    fn kind(&self) -> ItemKind;

    /// Whether `entity`, viewed from `side`, is something this provider can
    /// be bound to.
    fn is_valid_target(&self, entity: &BlockEntity, side: Facing) -> bool;

    /// Item-specific tooltip text.
    fn description(&self) -> &str;

    /// Bind `stack` to `target`, replacing any previous binding. Returns
    /// false without touching the stack if `entity` is not a valid target.
    fn bind(&self, stack: &mut ItemStack, target: BindTarget, entity: &BlockEntity) -> bool {
        if !self.is_valid_target(entity, target.side) {
            return false;
        }
        Binding::Bound(target).write(&mut stack.data);
        debug!(
            item = self.kind().name(),
            dimension = %target.dimension,
            pos = %target.position,
            side = %target.side,
            "provider bound"
        );
        true
    }

    /// Clear the binding. A no-op on an unbound stack.
    fn unbind(&self, stack: &mut ItemStack) {
        Binding::Unbound.write(&mut stack.data);
        debug!(item = self.kind().name(), "provider unbound");
    }

    /// Host callback: the held provider was used on a block face.
    fn use_on_block(&self, ctx: &UseOnBlock<'_>, player: &mut Player) -> InteractionResult {
        let Some(entity) = ctx.target else {
            return InteractionResult::Pass;
        };
        if !self.is_valid_target(entity, ctx.side) {
            return InteractionResult::Pass;
        }

        if player.sneaking && ctx.authority.is_authoritative() {
            let target = BindTarget::new(ctx.dimension, ctx.pos, ctx.side);
            let bound = match player.inventory.held_mut(ctx.hand) {
                Some(stack) if stack.item == self.kind() => self.bind(stack, target, entity),
                _ => false,
            };
            if bound {
                player.inventory.mark_dirty();
            }
        }
        InteractionResult::Success
    }

    /// Host callback: the held provider was used without aiming at a block.
    fn use_item(&self, ctx: &UseItem, player: &mut Player) -> InteractionResult {
        if !player.sneaking {
            return InteractionResult::Pass;
        }

        if ctx.authority.is_authoritative() {
            let unbound = match player.inventory.held_mut(ctx.hand) {
                Some(stack) if stack.item == self.kind() => {
                    self.unbind(stack);
                    true
                }
                _ => false,
            };
            if unbound {
                player.inventory.mark_dirty();
            }
        }
        InteractionResult::Success
    }

    /// Append this provider's tooltip lines for `stack`.
    fn append_tooltip(
        &self,
        stack: &ItemStack,
        tooltip: &mut Vec<String>,
        settings: &ProviderSettings,
    ) {
        tooltip.extend(wrap_text(self.description(), settings.max_tooltip_width));
        if let Ok(pos) = position(stack) {
            tooltip.push(target_line(pos));
        }
    }
}

/// True iff the stack carries a complete binding.
pub fn is_bound(stack: &ItemStack) -> bool {
    binding::is_bound(&stack.data)
}

/// Dimension the stack is bound in.
pub fn dimension(stack: &ItemStack) -> Result<DimensionId, BindingError> {
    binding::bound_dimension(&stack.data)
}

/// Position the stack is bound to.
pub fn position(stack: &ItemStack) -> Result<BlockPos, BindingError> {
    binding::bound_position(&stack.data)
}

/// Face the stack is bound to.
pub fn side(stack: &ItemStack) -> Result<Facing, BindingError> {
    binding::bound_side(&stack.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts anything except signs, from any side.
    struct AnyContainer;

    impl Provider for AnyContainer {
        fn kind(&self) -> ItemKind {
            ItemKind::ItemProvider
        }

        fn is_valid_target(&self, entity: &BlockEntity, _side: Facing) -> bool {
            !matches!(entity, BlockEntity::Sign(_))
        }

        fn description(&self) -> &str {
            "Test provider."
        }
    }

    fn holding_provider(sneaking: bool) -> Player {
        let mut player = Player::new(BlockPos::new(0, 64, 0));
        player.sneaking = sneaking;
        player
            .inventory
            .set(0, Some(ItemStack::new(ItemKind::ItemProvider, 1)));
        player
    }

    fn held(player: &Player) -> &ItemStack {
        player.inventory.held(Hand::Main).expect("holding provider")
    }

    fn chest() -> BlockEntity {
        BlockEntity::from_kind("chest").unwrap()
    }

    fn use_on(target: Option<&BlockEntity>, authority: Authority) -> UseOnBlock<'_> {
        UseOnBlock {
            authority,
            dimension: DimensionId::OVERWORLD,
            pos: BlockPos::new(10, 64, -5),
            side: Facing::Up,
            hand: Hand::Main,
            target,
        }
    }

    #[test]
    fn sneak_use_on_valid_target_binds() {
        let chest = chest();
        let mut player = holding_provider(true);
        let result = AnyContainer.use_on_block(&use_on(Some(&chest), Authority::Authoritative), &mut player);

        assert_eq!(result, InteractionResult::Success);
        let stack = held(&player);
        assert!(is_bound(stack));
        assert_eq!(dimension(stack), Ok(DimensionId::OVERWORLD));
        assert_eq!(position(stack), Ok(BlockPos::new(10, 64, -5)));
        assert_eq!(side(stack), Ok(Facing::Up));
        assert!(player.inventory.is_dirty());
    }

    #[test]
    fn valid_target_without_sneaking_is_handled_but_not_bound() {
        let chest = chest();
        let mut player = holding_provider(false);
        let result = AnyContainer.use_on_block(&use_on(Some(&chest), Authority::Authoritative), &mut player);

        assert_eq!(result, InteractionResult::Success);
        assert!(!is_bound(held(&player)));
        assert!(!player.inventory.is_dirty());
    }

    #[test]
    fn observer_never_binds() {
        let chest = chest();
        let mut player = holding_provider(true);
        let result = AnyContainer.use_on_block(&use_on(Some(&chest), Authority::Observer), &mut player);

        assert_eq!(result, InteractionResult::Success);
        assert!(!is_bound(held(&player)));
        assert!(!player.inventory.is_dirty());
    }

    #[test]
    fn missing_or_invalid_target_passes() {
        let sign = BlockEntity::from_kind("sign").unwrap();
        let mut player = holding_provider(true);

        let result = AnyContainer.use_on_block(&use_on(None, Authority::Authoritative), &mut player);
        assert_eq!(result, InteractionResult::Pass);

        let result = AnyContainer.use_on_block(&use_on(Some(&sign), Authority::Authoritative), &mut player);
        assert_eq!(result, InteractionResult::Pass);
        assert!(!is_bound(held(&player)));
    }

    #[test]
    fn rebinding_overwrites_previous_target() {
        let chest = chest();
        let mut player = holding_provider(true);
        AnyContainer.use_on_block(&use_on(Some(&chest), Authority::Authoritative), &mut player);

        let mut ctx = use_on(Some(&chest), Authority::Authoritative);
        ctx.pos = BlockPos::new(-3, 12, 7);
        ctx.side = Facing::West;
        ctx.dimension = DimensionId::NETHER;
        AnyContainer.use_on_block(&ctx, &mut player);

        let stack = held(&player);
        assert_eq!(position(stack), Ok(BlockPos::new(-3, 12, 7)));
        assert_eq!(side(stack), Ok(Facing::West));
        assert_eq!(dimension(stack), Ok(DimensionId::NETHER));
    }

    #[test]
    fn sneak_use_item_unbinds() {
        let chest = chest();
        let mut player = holding_provider(true);
        AnyContainer.use_on_block(&use_on(Some(&chest), Authority::Authoritative), &mut player);
        player.inventory.take_dirty();

        let ctx = UseItem {
            authority: Authority::Authoritative,
            hand: Hand::Main,
        };
        assert_eq!(AnyContainer.use_item(&ctx, &mut player), InteractionResult::Success);
        assert!(!is_bound(held(&player)));
        assert!(held(&player).data.is_empty());
        assert!(player.inventory.is_dirty());

        // Already unbound: still handled, still unbound.
        assert_eq!(AnyContainer.use_item(&ctx, &mut player), InteractionResult::Success);
        assert!(held(&player).data.is_empty());
    }

    #[test]
    fn use_item_without_sneaking_passes() {
        let chest = chest();
        let mut player = holding_provider(true);
        AnyContainer.use_on_block(&use_on(Some(&chest), Authority::Authoritative), &mut player);
        player.sneaking = false;

        let ctx = UseItem {
            authority: Authority::Authoritative,
            hand: Hand::Main,
        };
        assert_eq!(AnyContainer.use_item(&ctx, &mut player), InteractionResult::Pass);
        assert!(is_bound(held(&player)));
    }

    #[test]
    fn observer_use_item_is_handled_without_unbinding() {
        let chest = chest();
        let mut player = holding_provider(true);
        AnyContainer.use_on_block(&use_on(Some(&chest), Authority::Authoritative), &mut player);
        player.inventory.take_dirty();

        let ctx = UseItem {
            authority: Authority::Observer,
            hand: Hand::Main,
        };
        assert_eq!(AnyContainer.use_item(&ctx, &mut player), InteractionResult::Success);
        assert!(is_bound(held(&player)));
        assert!(!player.inventory.is_dirty());
    }

    #[test]
    fn use_item_with_other_item_in_hand_leaves_inventory_clean() {
        let mut player = holding_provider(true);
        player
            .inventory
            .set(0, Some(ItemStack::new(ItemKind::FluidProvider, 1)));
        let ctx = UseItem {
            authority: Authority::Authoritative,
            hand: Hand::Main,
        };
        assert_eq!(AnyContainer.use_item(&ctx, &mut player), InteractionResult::Success);
        assert!(!player.inventory.is_dirty());

        let ctx = UseItem {
            authority: Authority::Authoritative,
            hand: Hand::Off,
        };
        assert_eq!(AnyContainer.use_item(&ctx, &mut player), InteractionResult::Success);
        assert!(!player.inventory.is_dirty());
    }

    #[test]
    fn tooltip_lists_target_only_when_bound() {
        let settings = ProviderSettings::default();
        let mut stack = ItemStack::new(ItemKind::ItemProvider, 1);

        let mut lines = Vec::new();
        AnyContainer.append_tooltip(&stack, &mut lines, &settings);
        assert_eq!(lines, vec!["Test provider."]);

        let target = BindTarget::new(DimensionId::OVERWORLD, BlockPos::new(1, 2, 3), Facing::North);
        assert!(AnyContainer.bind(&mut stack, target, &chest()));
        let mut lines = Vec::new();
        AnyContainer.append_tooltip(&stack, &mut lines, &settings);
        assert_eq!(lines, vec!["Test provider.", "Target: 1, 2, 3"]);
    }

    #[test]
    fn bind_rejects_invalid_target() {
        let mut stack = ItemStack::new(ItemKind::ItemProvider, 1);
        let target = BindTarget::new(DimensionId::OVERWORLD, BlockPos::new(1, 2, 3), Facing::North);
        let sign = BlockEntity::from_kind("sign").unwrap();
        assert!(!AnyContainer.bind(&mut stack, target, &sign));
        assert!(stack.data.is_empty());
    }
}
