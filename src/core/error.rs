//! Error taxonomy shared by every engine operation.
//!
//! Recoverable errors (`InvalidState`, `InvalidParameter`, `ZoneInaccessible`,
//! `CapacityExceeded`) leave the engine untouched so the caller can retry.
//! `GameOver` and `GameWon` are returned by mutating calls once the game has
//! finished. `ResourceExhausted` on a deck draw means the card bookkeeping is
//! broken.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;
use crate::board::{Artefact, Coord};

/// Why the team lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum LossReason {
    #[error("water level has reached maximum")]
    WaterLevelMaximum,
    #[error("the helicopter landing site has sunk")]
    HelicopterSiteSunk,
    #[error("you have lost the artefact!")]
    ArtefactLost(Artefact),
    #[error("you have lost the player!")]
    PlayerLost(PlayerId),
}

/// Coarse classification of a [`GameError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidState,
    InvalidParameter,
    ZoneInaccessible,
    ResourceExhausted,
    CapacityExceeded,
    GameOver,
    GameWon,
}

/// Errors returned by board, deck, player and engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Action attempted in the wrong phase or mode.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Illegal target, card or argument.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The targeted zone has sunk.
    #[error("zone {0} is inaccessible")]
    ZoneInaccessible(Coord),

    /// A pool ran dry (deck, roles, tiles).
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Too many players, or a hand past its hard cap.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),

    /// The game has been lost.
    #[error("game over: {0}")]
    GameOver(LossReason),

    /// The game has been won.
    #[error("the team has escaped the island")]
    GameWon,
}

impl GameError {
    pub(crate) fn state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub(crate) fn param(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Self::ZoneInaccessible(_) => ErrorKind::ZoneInaccessible,
            Self::ResourceExhausted(_) => ErrorKind::ResourceExhausted,
            Self::CapacityExceeded(_) => ErrorKind::CapacityExceeded,
            Self::GameOver(_) => ErrorKind::GameOver,
            Self::GameWon => ErrorKind::GameWon,
        }
    }

    /// True when the engine state is unchanged and the call may be retried.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidState
                | ErrorKind::InvalidParameter
                | ErrorKind::ZoneInaccessible
                | ErrorKind::CapacityExceeded
        )
    }

    /// True for the end-of-game errors.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind(), ErrorKind::GameOver | ErrorKind::GameWon)
    }
}

pub type GameResult<T> = Result<T, GameError>;
