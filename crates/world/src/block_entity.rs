//! Block entities that providers can be bound to.
//!
//! Each block entity advertises which faces expose an item inventory or a
//! fluid tank. Providers only accept a face that exposes what they move.

use serde::{Deserialize, Serialize};
use tetherstone_core::{Facing, ItemStack};

/// Number of slots in a single chest inventory (3 rows × 9 columns).
pub const CHEST_SLOT_COUNT: usize = 27;

/// Number of slots in a hopper inventory.
pub const HOPPER_SLOT_COUNT: usize = 5;

/// Default tank capacity in millibuckets.
pub const TANK_CAPACITY_MB: u32 = 16_000;

/// Persisted inventory state for a chest block entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChestState {
    /// Inventory slots, `None` when empty.
    pub slots: Vec<Option<ItemStack>>,
}

impl Default for ChestState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChestState {
    /// Empty chest with [`CHEST_SLOT_COUNT`] slots.
    pub fn new() -> Self {
        Self {
            slots: vec![None; CHEST_SLOT_COUNT],
        }
    }
}

/// Persisted inventory state for a hopper block entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopperState {
    /// Inventory slots, `None` when empty.
    pub slots: Vec<Option<ItemStack>>,
}

impl Default for HopperState {
    fn default() -> Self {
        Self {
            slots: vec![None; HOPPER_SLOT_COUNT],
        }
    }
}

/// Persisted state of a furnace. Each face reaches one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnaceState {
    /// Smelting input, reached from the top.
    pub input: Option<ItemStack>,
    /// Fuel, reached from the horizontal faces.
    pub fuel: Option<ItemStack>,
    /// Smelted output, reached from the bottom.
    pub output: Option<ItemStack>,
}

impl FurnaceState {
    /// Slot contents reached through `side`.
    pub fn slot(&self, side: Facing) -> Option<&ItemStack> {
        match FurnaceSlot::for_side(side) {
            FurnaceSlot::Input => self.input.as_ref(),
            FurnaceSlot::Fuel => self.fuel.as_ref(),
            FurnaceSlot::Output => self.output.as_ref(),
        }
    }
}

/// Fluids a tank can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FluidKind {
    /// Water.
    Water,
    /// Lava.
    Lava,
}

impl FluidKind {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            FluidKind::Water => "water",
            FluidKind::Lava => "lava",
        }
    }
}

/// Persisted state of a fluid tank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankState {
    /// Fluid currently stored, `None` when empty.
    pub fluid: Option<FluidKind>,
    /// Stored amount in millibuckets.
    pub amount_mb: u32,
    /// Maximum amount in millibuckets.
    pub capacity_mb: u32,
}

impl Default for TankState {
    fn default() -> Self {
        Self {
            fluid: None,
            amount_mb: 0,
            capacity_mb: TANK_CAPACITY_MB,
        }
    }
}

/// Sign text. Signs expose neither items nor fluids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignState {
    /// The four text lines.
    pub lines: [String; 4],
}

/// Furnace slot reached through a given face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FurnaceSlot {
    /// Smelting input.
    Input,
    /// Fuel.
    Fuel,
    /// Smelted output.
    Output,
}

impl FurnaceSlot {
    /// Slot reached through `side`.
    pub fn for_side(side: Facing) -> Self {
        match side {
            Facing::Up => FurnaceSlot::Input,
            Facing::Down => FurnaceSlot::Output,
            Facing::North | Facing::South | Facing::West | Facing::East => FurnaceSlot::Fuel,
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            FurnaceSlot::Input => "input",
            FurnaceSlot::Fuel => "fuel",
            FurnaceSlot::Output => "output",
        }
    }
}

/// A block entity placed in a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockEntity {
    /// Single chest.
    Chest(ChestState),
    /// Hopper.
    Hopper(HopperState),
    /// Furnace.
    Furnace(FurnaceState),
    /// Fluid tank.
    Tank(TankState),
    /// Sign.
    Sign(SignState),
}

impl BlockEntity {
    /// Build a default block entity from its kind name.
    pub fn from_kind(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "chest" => Some(BlockEntity::Chest(ChestState::new())),
            "hopper" => Some(BlockEntity::Hopper(HopperState::default())),
            "furnace" => Some(BlockEntity::Furnace(FurnaceState::default())),
            "tank" => Some(BlockEntity::Tank(TankState::default())),
            "sign" => Some(BlockEntity::Sign(SignState::default())),
            _ => None,
        }
    }

    /// Kind name, as used by [`BlockEntity::from_kind`].
    pub fn kind_name(&self) -> &'static str {
        match self {
            BlockEntity::Chest(_) => "chest",
            BlockEntity::Hopper(_) => "hopper",
            BlockEntity::Furnace(_) => "furnace",
            BlockEntity::Tank(_) => "tank",
            BlockEntity::Sign(_) => "sign",
        }
    }

    /// Number of item slots reachable through `side`, or `None` if the face
    /// exposes no item inventory.
    pub fn item_slots(&self, _side: Facing) -> Option<usize> {
        match self {
            BlockEntity::Chest(chest) => Some(chest.slots.len()),
            BlockEntity::Hopper(hopper) => Some(hopper.slots.len()),
            BlockEntity::Furnace(_) => Some(1),
            BlockEntity::Tank(_) | BlockEntity::Sign(_) => None,
        }
    }

    /// Whether `side` exposes an item inventory.
    pub fn exposes_items(&self, side: Facing) -> bool {
        self.item_slots(side).is_some()
    }

    /// Whether `side` exposes a fluid tank.
    pub fn exposes_fluids(&self, _side: Facing) -> bool {
        matches!(self, BlockEntity::Tank(_))
    }

    /// Short description of what a provider bound to `side` reaches, or
    /// `None` if the face exposes nothing.
    pub fn face_summary(&self, side: Facing) -> Option<String> {
        match self {
            BlockEntity::Chest(ChestState { slots }) | BlockEntity::Hopper(HopperState { slots }) => {
                let used = slots.iter().flatten().count();
                Some(format!("{used}/{} slots used", slots.len()))
            }
            BlockEntity::Furnace(furnace) => {
                let count = furnace.slot(side).map_or(0, |stack| stack.count);
                Some(format!("{} slot, {count} items", FurnaceSlot::for_side(side).as_str()))
            }
            BlockEntity::Tank(tank) => {
                let fluid = tank.fluid.map_or("empty", FluidKind::as_str);
                Some(format!("{fluid} {}/{} mB", tank.amount_mb, tank.capacity_mb))
            }
            BlockEntity::Sign(_) => None,
        }
    }
}
