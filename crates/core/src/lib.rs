#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod binding;
mod block_pos;
mod components;
mod dimension;
mod facing;
pub mod item;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use binding::{BindTarget, Binding, BindingError};
pub use block_pos::BlockPos;
pub use components::{ComponentKind, ComponentMap, ComponentValue};
pub use dimension::DimensionId;
pub use facing::Facing;
pub use item::{ItemKind, ItemStack};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks, saturating at the last representable tick.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0.saturating_add(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_saturates_at_the_last_tick() {
        assert_eq!(SimTick::ZERO.advance(3), SimTick(3));
        assert_eq!(SimTick(u64::MAX - 1).advance(5), SimTick(u64::MAX));
        assert_eq!(SimTick(u64::MAX).advance(1), SimTick(u64::MAX));
    }
}
