//! Block-face bindings stored in an item's persistent data.
//!
//! A binding is three components written and cleared together:
//!
//! | key         | kind | contents                          |
//! |-------------|------|-----------------------------------|
//! | `dimension` | Int  | [`DimensionId`] of the bound block |
//! | `position`  | Long | packed [`BlockPos`]                |
//! | `side`      | Byte | [`Facing`] index (0..=5)           |
//!
//! [`Binding`] is the structured view. Raw blobs coming from disk or the
//! network may still be partial or carry a foreign side byte; [`Binding::read`]
//! reports those instead of guessing.

use crate::{BlockPos, ComponentKind, ComponentMap, DimensionId, Facing};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Component key holding the bound dimension.
pub const DIMENSION_KEY: &str = "dimension";
/// Component key holding the packed bound position.
pub const POSITION_KEY: &str = "position";
/// Component key holding the bound side index.
pub const SIDE_KEY: &str = "side";

/// Errors reading a binding out of a data blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A bound-only query was made on an unbound blob.
    #[error("item is not bound")]
    Unbound,
    /// Only some of the binding components are present.
    #[error("partial binding (dimension: {dimension}, position: {position}, side: {side})")]
    Partial {
        /// Whether `dimension` was present.
        dimension: bool,
        /// Whether `position` was present.
        position: bool,
        /// Whether `side` was present.
        side: bool,
    },
    /// The stored side byte does not name one of the six faces.
    #[error("side index {0} is out of range (expected 0..=5)")]
    InvalidSide(u8),
}

/// The block face an item is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindTarget {
    /// Dimension containing the bound block.
    pub dimension: DimensionId,
    /// Position of the bound block.
    pub position: BlockPos,
    /// Face of the block the item was used on.
    pub side: Facing,
}

impl BindTarget {
    /// Create a bind target.
    pub fn new(dimension: DimensionId, position: BlockPos, side: Facing) -> Self {
        Self {
            dimension,
            position,
            side,
        }
    }
}

/// Binding state of one item stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Binding {
    /// No binding components present.
    #[default]
    Unbound,
    /// All binding components present.
    Bound(BindTarget),
}

impl Binding {
    /// Decode the binding stored in `data`.
    pub fn read(data: &ComponentMap) -> Result<Self, BindingError> {
        let dimension = data.get_int(DIMENSION_KEY);
        let position = data.get_long(POSITION_KEY);
        let side = data.get_byte(SIDE_KEY);

        match (dimension, position, side) {
            (None, None, None) => Ok(Binding::Unbound),
            (Some(dimension), Some(position), Some(side)) => {
                let side = Facing::from_index(side).ok_or(BindingError::InvalidSide(side))?;
                Ok(Binding::Bound(BindTarget {
                    dimension: DimensionId(dimension),
                    position: BlockPos::unpack(position),
                    side,
                }))
            }
            (dimension, position, side) => Err(BindingError::Partial {
                dimension: dimension.is_some(),
                position: position.is_some(),
                side: side.is_some(),
            }),
        }
    }

    /// Store this binding in `data`, replacing whatever binding was there.
    ///
    /// `Unbound` removes all three components; `Bound` overwrites all three.
    pub fn write(&self, data: &mut ComponentMap) {
        match self {
            Binding::Unbound => {
                data.remove(DIMENSION_KEY);
                data.remove(POSITION_KEY);
                data.remove(SIDE_KEY);
            }
            Binding::Bound(target) => {
                data.set_int(DIMENSION_KEY, target.dimension.as_i32());
                data.set_long(POSITION_KEY, target.position.pack());
                data.set_byte(SIDE_KEY, target.side.index());
            }
        }
    }

    /// Bound target, if any.
    pub fn target(&self) -> Option<&BindTarget> {
        match self {
            Binding::Unbound => None,
            Binding::Bound(target) => Some(target),
        }
    }

    /// Whether this is [`Binding::Bound`].
    pub fn is_bound(&self) -> bool {
        matches!(self, Binding::Bound(_))
    }
}

/// True iff all three binding components are present with the right kinds.
pub fn is_bound(data: &ComponentMap) -> bool {
    data.has(DIMENSION_KEY, ComponentKind::Int)
        && data.has(POSITION_KEY, ComponentKind::Long)
        && data.has(SIDE_KEY, ComponentKind::Byte)
}

/// Dimension of the bound block.
pub fn bound_dimension(data: &ComponentMap) -> Result<DimensionId, BindingError> {
    ensure_bound(data)?;
    data.get_int(DIMENSION_KEY)
        .map(DimensionId)
        .ok_or(BindingError::Unbound)
}

/// Position of the bound block.
pub fn bound_position(data: &ComponentMap) -> Result<BlockPos, BindingError> {
    ensure_bound(data)?;
    data.get_long(POSITION_KEY)
        .map(BlockPos::unpack)
        .ok_or(BindingError::Unbound)
}

/// Face of the bound block.
pub fn bound_side(data: &ComponentMap) -> Result<Facing, BindingError> {
    ensure_bound(data)?;
    // Stored as an unsigned byte, so only the low 8 bits ever reach the table.
    let raw = data.get_byte(SIDE_KEY).ok_or(BindingError::Unbound)?;
    Facing::from_index(raw).ok_or(BindingError::InvalidSide(raw))
}

fn ensure_bound(data: &ComponentMap) -> Result<(), BindingError> {
    if is_bound(data) {
        Ok(())
    } else {
        Err(BindingError::Unbound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> BindTarget {
        BindTarget::new(DimensionId::OVERWORLD, BlockPos::new(10, 64, -5), Facing::Up)
    }

    #[test]
    fn empty_blob_is_unbound() {
        let data = ComponentMap::new();
        assert!(!is_bound(&data));
        assert_eq!(Binding::read(&data), Ok(Binding::Unbound));
        assert_eq!(bound_position(&data), Err(BindingError::Unbound));
    }

    #[test]
    fn write_then_read_is_exact() {
        let mut data = ComponentMap::new();
        Binding::Bound(target()).write(&mut data);

        assert!(is_bound(&data));
        assert_eq!(bound_dimension(&data), Ok(DimensionId::OVERWORLD));
        assert_eq!(bound_position(&data), Ok(BlockPos::new(10, 64, -5)));
        assert_eq!(bound_side(&data), Ok(Facing::Up));
        assert_eq!(Binding::read(&data), Ok(Binding::Bound(target())));
    }

    #[test]
    fn bound_overwrites_previous_target() {
        let mut data = ComponentMap::new();
        Binding::Bound(target()).write(&mut data);
        let other = BindTarget::new(DimensionId::NETHER, BlockPos::new(-1, 2, 3), Facing::West);
        Binding::Bound(other).write(&mut data);
        assert_eq!(Binding::read(&data), Ok(Binding::Bound(other)));
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn unbound_write_leaves_unrelated_components() {
        let mut data = ComponentMap::new();
        data.set_int("label", 9);
        Binding::Bound(target()).write(&mut data);
        Binding::Unbound.write(&mut data);
        Binding::Unbound.write(&mut data);

        assert!(!is_bound(&data));
        assert_eq!(data.len(), 1);
        assert_eq!(data.get_int("label"), Some(9));
    }

    #[test]
    fn partial_blob_is_never_bound() {
        let mut data = ComponentMap::new();
        data.set_int(DIMENSION_KEY, 0);
        data.set_long(POSITION_KEY, 0);

        assert!(!is_bound(&data));
        assert_eq!(
            Binding::read(&data),
            Err(BindingError::Partial {
                dimension: true,
                position: true,
                side: false,
            })
        );
    }

    #[test]
    fn wrong_kind_counts_as_absent() {
        let mut data = ComponentMap::new();
        data.set_long(DIMENSION_KEY, 0);
        data.set_long(POSITION_KEY, 0);
        data.set_byte(SIDE_KEY, 1);
        assert!(!is_bound(&data));
    }

    #[test]
    fn out_of_range_side_is_detected() {
        let mut data = ComponentMap::new();
        Binding::Bound(target()).write(&mut data);
        data.set_byte(SIDE_KEY, 200);

        assert!(is_bound(&data));
        assert_eq!(bound_side(&data), Err(BindingError::InvalidSide(200)));
        assert_eq!(Binding::read(&data), Err(BindingError::InvalidSide(200)));
    }
}
