//! Core engine types: players and roles, RNG, configuration, errors.
//!
//! These are the building blocks the board, the decks and the rules engine
//! share. None of them know about turn flow.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use error::{ErrorKind, GameError, GameResult, LossReason};
pub use player::{Player, PlayerId, Role};
pub use rng::GameRng;
