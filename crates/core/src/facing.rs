//! Block faces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six axis-aligned faces of a block.
///
/// The discriminants are the persisted indices and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Facing {
    /// Negative Y.
    Down = 0,
    /// Positive Y.
    Up = 1,
    /// Negative Z.
    North = 2,
    /// Positive Z.
    South = 3,
    /// Negative X.
    West = 4,
    /// Positive X.
    East = 5,
}

impl Facing {
    /// All faces in index order.
    pub const ALL: [Facing; 6] = [
        Facing::Down,
        Facing::Up,
        Facing::North,
        Facing::South,
        Facing::West,
        Facing::East,
    ];

    /// Stable index (0..=5).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Look up a face by index. Anything outside 0..=5 is `None`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Facing::Down => "down",
            Facing::Up => "up",
            Facing::North => "north",
            Facing::South => "south",
            Facing::West => "west",
            Facing::East => "east",
        }
    }

    /// Parse a lowercase or uppercase face name.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|facing| facing.as_str().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
