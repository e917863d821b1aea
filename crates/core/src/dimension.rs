//! Dimension identifiers.
//!
//! Bindings persist the dimension of the bound block so a provider carried
//! into another dimension can tell its target is out of reach. Mods may
//! register arbitrary dimensions, so the identifier is an open `i32` space
//! with the vanilla ids as named constants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a world dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionId(pub i32);

impl DimensionId {
    /// The Overworld dimension.
    pub const OVERWORLD: Self = Self(0);
    /// The Nether dimension.
    pub const NETHER: Self = Self(-1);
    /// The End dimension.
    pub const END: Self = Self(1);

    /// Default (Overworld) dimension.
    pub const DEFAULT: Self = Self::OVERWORLD;

    /// Raw numeric id, as persisted.
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self.0 {
            0 => "overworld",
            -1 => "nether",
            1 => "end",
            _ => "custom",
        }
    }
}

impl Default for DimensionId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i32> for DimensionId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            "custom" => write!(f, "dim{}", self.0),
            name => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_id_is_stable() {
        assert_eq!(DimensionId::OVERWORLD.as_i32(), 0);
        assert_eq!(DimensionId::NETHER.as_i32(), -1);
        assert_eq!(DimensionId::END.as_i32(), 1);
        assert_eq!(DimensionId::default(), DimensionId::OVERWORLD);
    }

    #[test]
    fn custom_dimensions_display_their_id() {
        assert_eq!(DimensionId(7).to_string(), "dim7");
        assert_eq!(DimensionId::NETHER.to_string(), "nether");
    }
}
