use serde::{Deserialize, Serialize};

/// Default tooltip wrap width, in characters.
pub const DEFAULT_TOOLTIP_WIDTH: usize = 40;

/// Default reach of a bound provider, in blocks.
pub const DEFAULT_PROVIDER_RADIUS: u32 = 64;

/// Tunables for provider items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Tooltip lines are wrapped to this many characters.
    pub max_tooltip_width: usize,
    /// A consumer only reaches a bound block within this distance.
    pub max_provider_radius: u32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            max_tooltip_width: DEFAULT_TOOLTIP_WIDTH,
            max_provider_radius: DEFAULT_PROVIDER_RADIUS,
        }
    }
}

impl ProviderSettings {
    /// Radius squared, for comparing against [`tetherstone_core::BlockPos::distance_squared`].
    pub fn max_radius_squared(&self) -> i64 {
        let r = self.max_provider_radius as i64;
        r * r
    }
}
