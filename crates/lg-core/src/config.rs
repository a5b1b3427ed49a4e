//! Run-level configuration shared by the map, router and world.

use crate::{CoreError, CoreResult, MapSize};

/// Tunables for one logistics run.
///
/// With the `serde` feature enabled this deserializes from JSON; missing
/// fields fall back to [`Default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogisticsConfig {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Priority assigned to construction requests created when a building is
    /// placed.  Lower values are served first.
    pub construction_priority: i32,
    /// Number of ticks `World::run` advances.
    pub total_ticks: u64,
    /// Emit a progress summary every N ticks (0 = never).
    pub log_every_ticks: u64,
}

impl Default for LogisticsConfig {
    fn default() -> Self {
        Self {
            width:                 16,
            height:                16,
            construction_priority: 1,
            total_ticks:           100,
            log_every_ticks:       10,
        }
    }
}

impl LogisticsConfig {
    pub fn map_size(&self) -> MapSize {
        MapSize::new(self.width, self.height)
    }

    /// Reject configurations no map can be built from.
    pub fn validate(&self) -> CoreResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::Config(format!(
                "map size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(CoreError::Config(format!(
                "map size {}x{} exceeds the signed tile coordinate range",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
