//! Game configuration.
//!
//! Hosts build a `GameConfig` (or deserialize one) and hand it to
//! `GameEngine::new`. Everything here is a house-rule knob; the geometry of
//! the board and the flood-rate table are rules constants and live with the
//! board and the water meter.

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};
use crate::board::TileId;
use crate::cards::MAX_WATER_LEVEL;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the engine RNG (roles, tiles, shuffles).
    pub seed: u64,

    /// Players required before the game can start.
    pub min_players: usize,

    /// Players allowed at the table.
    pub max_players: usize,

    /// Actions granted at the start of each turn.
    pub actions_per_turn: u8,

    /// Cards a player may hold once their discards are done.
    pub hand_limit: usize,

    /// Treasure cards drawn at the end of each turn.
    pub treasure_draws_per_turn: usize,

    /// Treasure cards dealt to each player at start.
    pub initial_hand_size: usize,

    /// Flood cards drawn while setting up the island.
    pub initial_flood_draws: usize,

    /// Water level the meter starts on.
    pub starting_water_level: u8,

    /// Longest accepted player name, in characters.
    pub max_name_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            min_players: 2,
            max_players: 4,
            actions_per_turn: 3,
            hand_limit: 5,
            treasure_draws_per_turn: 2,
            initial_hand_size: 2,
            initial_flood_draws: 6,
            starting_water_level: 0,
            max_name_len: 16,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of flood cards drawn during setup.
    #[must_use]
    pub fn with_initial_flood_draws(mut self, draws: usize) -> Self {
        self.initial_flood_draws = draws;
        self
    }

    /// Set the starting water level (difficulty).
    #[must_use]
    pub fn with_starting_water_level(mut self, level: u8) -> Self {
        self.starting_water_level = level;
        self
    }

    /// Set the longest accepted player name.
    #[must_use]
    pub fn with_max_name_len(mut self, len: usize) -> Self {
        self.max_name_len = len;
        self
    }

    /// Cards a hand can hold between the treasure draw and the discards.
    #[must_use]
    pub fn hand_hard_cap(&self) -> usize {
        self.hand_limit + self.treasure_draws_per_turn
    }

    /// Reject inconsistent settings.
    pub fn validate(&self) -> GameResult<()> {
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(GameError::param(format!(
                "player bounds {}..={} are inconsistent",
                self.min_players, self.max_players
            )));
        }
        if self.max_players > 4 {
            return Err(GameError::param("at most 4 players are supported"));
        }
        if self.actions_per_turn == 0 {
            return Err(GameError::param("actions_per_turn must be positive"));
        }
        if self.hand_limit == 0 {
            return Err(GameError::param("hand_limit must be positive"));
        }
        if self.starting_water_level >= MAX_WATER_LEVEL {
            return Err(GameError::param(format!(
                "starting water level must be below {}",
                MAX_WATER_LEVEL
            )));
        }
        if self.initial_flood_draws > TileId::COUNT {
            return Err(GameError::param(format!(
                "at most {} initial flood draws",
                TileId::COUNT
            )));
        }
        if self.max_name_len == 0 {
            return Err(GameError::param("max_name_len must be positive"));
        }
        Ok(())
    }
}
