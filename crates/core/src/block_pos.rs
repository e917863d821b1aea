//! Block coordinates and their packed 64-bit form.
//!
//! Packed layout (two's complement per field):
//! - bits 38..64: x (26 bits)
//! - bits 26..38: y (12 bits)
//! - bits 0..26: z (26 bits)

use serde::{Deserialize, Serialize};
use std::fmt;

const X_BITS: u32 = 26;
const Z_BITS: u32 = 26;
const Y_BITS: u32 = 64 - X_BITS - Z_BITS;
const Y_SHIFT: u32 = Z_BITS;
const X_SHIFT: u32 = Y_SHIFT + Y_BITS;
const X_MASK: i64 = (1 << X_BITS) - 1;
const Y_MASK: i64 = (1 << Y_BITS) - 1;
const Z_MASK: i64 = (1 << Z_BITS) - 1;

/// World-space block coordinate.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BlockPos {
    /// East/west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North/south axis.
    pub z: i32,
}

impl BlockPos {
    /// Smallest x/z that survives packing.
    pub const MIN_HORIZONTAL: i32 = -(1 << (X_BITS - 1));
    /// Largest x/z that survives packing.
    pub const MAX_HORIZONTAL: i32 = (1 << (X_BITS - 1)) - 1;
    /// Smallest y that survives packing.
    pub const MIN_Y: i32 = -(1 << (Y_BITS - 1));
    /// Largest y that survives packing.
    pub const MAX_Y: i32 = (1 << (Y_BITS - 1)) - 1;

    /// Create a block position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Whether `unpack(pack(self)) == self`.
    pub fn is_packable(self) -> bool {
        let horizontal = Self::MIN_HORIZONTAL..=Self::MAX_HORIZONTAL;
        horizontal.contains(&self.x)
            && horizontal.contains(&self.z)
            && (Self::MIN_Y..=Self::MAX_Y).contains(&self.y)
    }

    /// Pack into a single `i64`. Out-of-range coordinates are truncated to
    /// their low bits.
    pub fn pack(self) -> i64 {
        ((self.x as i64 & X_MASK) << X_SHIFT)
            | ((self.y as i64 & Y_MASK) << Y_SHIFT)
            | (self.z as i64 & Z_MASK)
    }

    /// Inverse of [`BlockPos::pack`]; every `i64` decodes to some position.
    pub fn unpack(packed: i64) -> Self {
        let x = (packed << (64 - X_SHIFT - X_BITS)) >> (64 - X_BITS);
        let y = (packed << (64 - Y_SHIFT - Y_BITS)) >> (64 - Y_BITS);
        let z = (packed << (64 - Z_BITS)) >> (64 - Z_BITS);
        Self::new(x as i32, y as i32, z as i32)
    }

    /// Squared euclidean distance, widened so it cannot overflow.
    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        let dz = self.z as i64 - other.z as i64;
        dx * dx + dy * dy + dz * dz
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
