//! The water meter.

use serde::{Deserialize, Serialize};

/// Level at which the island is lost.
pub const MAX_WATER_LEVEL: u8 = 10;

/// Flood cards drawn per turn, indexed by water level.
pub const FLOOD_RATES: [u8; MAX_WATER_LEVEL as usize + 1] = [2, 3, 3, 4, 4, 5, 5, 6, 6, 6, 6];

/// Non-decreasing water level in `0..=MAX_WATER_LEVEL`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterMeter {
    level: u8,
}

impl WaterMeter {
    /// Meter at `level`, clamped to the maximum.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(MAX_WATER_LEVEL),
        }
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Flood cards to draw at the end of a turn.
    #[must_use]
    pub fn flood_rate(&self) -> u8 {
        FLOOD_RATES[self.level as usize]
    }

    #[must_use]
    pub fn is_max(&self) -> bool {
        self.level >= MAX_WATER_LEVEL
    }

    /// Raise the level by one. Returns true once the maximum is reached.
    pub fn increase_level(&mut self) -> bool {
        if self.level < MAX_WATER_LEVEL {
            self.level += 1;
        }
        self.is_max()
    }
}
