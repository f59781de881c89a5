//! # island-engine
//!
//! Rules engine for a cooperative board game where two to four adventurers
//! collect four artefacts from a sinking island and escape by helicopter.
//!
//! ## Design Principles
//!
//! 1. **Single Owner**: `GameEngine` owns all state. Callers issue commands
//!    and read state back; nothing else mutates the game.
//!
//! 2. **Validate, Then Mutate**: A command that returns an error leaves the
//!    engine exactly as it was.
//!
//! 3. **Deterministic**: One seeded `GameRng` drives roles, the board layout
//!    and every shuffle, so a seed replays a game.
//!
//! ## Architecture
//!
//! - **Explicit Modes**: Multi-step interactions (picking a zone, discarding,
//!   escaping a sinking zone) are `GameMode` variants, never hidden flags.
//!
//! - **Persistent Data Structures**: Board, players and hands use `im-rs`, so
//!   `GameEngine::view` is cheap enough to call after every command.
//!
//! ## Modules
//!
//! - `core`: Players and roles, RNG, configuration, errors
//! - `board`: Tiles, zones and the 5×5 grid
//! - `cards`: Treasure cards, decks, water meter
//! - `rules`: The engine, its modes, turn flow and views

pub mod board;
pub mod cards;
pub mod core;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ErrorKind, GameConfig, GameError, GameResult, GameRng, LossReason, Player, PlayerId, Role,
};

pub use crate::board::{Artefact, Board, Coord, TileId, Zone, ZoneRole, ZoneState, BOARD_SIZE};

pub use crate::cards::{Deck, TreasureCard, WaterMeter, MAX_WATER_LEVEL};

pub use crate::rules::{
    CardPlay, GameEngine, GameMode, GameOutcome, GameView, PossibleAction, TurnEvent, TurnOutcome,
    TurnReport,
};
