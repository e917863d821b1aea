//! In-memory view of one dimension: its block entities and whether this
//! copy of the world is the authoritative one.

use crate::block_entity::BlockEntity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tetherstone_core::{BlockPos, DimensionId};

/// Which side of a client/server split a level instance lives on.
///
/// Interaction callbacks run on every side; only the authoritative side may
/// mutate persisted item data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authority {
    /// Canonical state; mutations persist and replicate.
    #[default]
    Authoritative,
    /// Local prediction/rendering copy; must not mutate.
    Observer,
}

impl Authority {
    /// True for the side whose writes persist.
    pub fn is_authoritative(self) -> bool {
        matches!(self, Authority::Authoritative)
    }

    /// Parse a side name (`authoritative`/`server` or `observer`/`client`/`remote`).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "authoritative" | "server" => Some(Authority::Authoritative),
            "observer" | "client" | "remote" => Some(Authority::Observer),
            _ => None,
        }
    }
}

/// Block entities of a single dimension, keyed by position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    dimension: DimensionId,
    authority: Authority,
    block_entities: BTreeMap<BlockPos, BlockEntity>,
}

impl Level {
    /// Empty level for `dimension` on the given side.
    pub fn new(dimension: DimensionId, authority: Authority) -> Self {
        Self {
            dimension,
            authority,
            block_entities: BTreeMap::new(),
        }
    }

    /// Dimension this level holds.
    pub fn dimension(&self) -> DimensionId {
        self.dimension
    }

    /// Side this level lives on.
    pub fn authority(&self) -> Authority {
        self.authority
    }

    /// Move the level to another side.
    pub fn set_authority(&mut self, authority: Authority) {
        self.authority = authority;
    }

    /// Place a block entity, returning whatever was there before.
    pub fn place(&mut self, pos: BlockPos, entity: BlockEntity) -> Option<BlockEntity> {
        self.block_entities.insert(pos, entity)
    }

    /// Remove the block entity at `pos`.
    pub fn remove(&mut self, pos: BlockPos) -> Option<BlockEntity> {
        self.block_entities.remove(&pos)
    }

    /// Look up the block entity at `pos`.
    pub fn block_entity(&self, pos: BlockPos) -> Option<&BlockEntity> {
        self.block_entities.get(&pos)
    }

    /// Iterate block entities in position order.
    pub fn block_entities(&self) -> impl Iterator<Item = (BlockPos, &BlockEntity)> {
        self.block_entities.iter().map(|(pos, entity)| (*pos, entity))
    }

    /// Number of placed block entities.
    pub fn len(&self) -> usize {
        self.block_entities.len()
    }

    /// True when no block entity is placed.
    pub fn is_empty(&self) -> bool {
        self.block_entities.is_empty()
    }
}
