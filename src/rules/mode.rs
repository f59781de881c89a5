//! Engine modes and the values the engine hands back to its caller.
//!
//! Exactly one `GameMode` is active at a time. Sub-modes carry the context
//! of the pending choice (who is choosing, who is being moved, who is flying
//! along) and always fall back to `Playing` once that choice resolves.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Coord;
use crate::core::{LossReason, PlayerId};

/// Small list of players; a table never has more than four.
pub type PlayerList = SmallVec<[PlayerId; 4]>;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost(LossReason),
}

/// Current engine mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Players are joining.
    SettingUp,

    /// Waiting for the next command.
    Playing,

    /// `actor` picks where `mover` goes. Differ only for the Navigator.
    ChoosingMoveTarget { actor: PlayerId, mover: PlayerId },

    ChoosingShoreUpTarget { player: PlayerId },

    PilotChoosingFlyTarget { player: PlayerId },

    /// `player` is playing Sandbags.
    ChoosingShoreUpWithCardTarget { player: PlayerId },

    /// `player` is playing a Helicopter Lift; `passengers` fly along and
    /// include `player`.
    ChoosingFlyWithCardTarget { player: PlayerId, passengers: PlayerList },

    /// `player` holds more cards than the hand limit.
    Discarding { player: PlayerId },

    /// Players on zones that just sank must swim off before the turn ends.
    PlayersRunningFromInaccessibleZone {
        stranded: PlayerList,
        choosing: Option<PlayerId>,
    },

    /// Terminal; every mutating call is refused.
    Finished(GameOutcome),
}

impl GameMode {
    /// Sub-modes the chooser may back out of.
    #[must_use]
    pub fn is_cancellable(&self) -> bool {
        matches!(
            self,
            GameMode::ChoosingMoveTarget { .. }
                | GameMode::ChoosingShoreUpTarget { .. }
                | GameMode::PilotChoosingFlyTarget { .. }
                | GameMode::ChoosingShoreUpWithCardTarget { .. }
                | GameMode::ChoosingFlyWithCardTarget { .. }
        )
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, GameMode::Finished(_))
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::SettingUp => "setting up",
            GameMode::Playing => "playing",
            GameMode::ChoosingMoveTarget { .. } => "choosing a move target",
            GameMode::ChoosingShoreUpTarget { .. } => "choosing a shore-up target",
            GameMode::PilotChoosingFlyTarget { .. } => "choosing a flight target",
            GameMode::ChoosingShoreUpWithCardTarget { .. } => "choosing a sandbag target",
            GameMode::ChoosingFlyWithCardTarget { .. } => "choosing a helicopter lift target",
            GameMode::Discarding { .. } => "discarding",
            GameMode::PlayersRunningFromInaccessibleZone { .. } => "players escaping a sunken zone",
            GameMode::Finished(_) => "finished",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a player may do right now. Used to grey out controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PossibleAction {
    Move,
    ShoreUp,
    Fly,
    Navigate,
    GiveCard,
    ClaimArtefact,
    UseActionCard,
    ChooseZone,
    ChoosePlayer,
    Cancel,
    Discard,
    Escape,
    EndTurn,
}

/// Result of playing an action card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardPlay {
    /// Pick one of these zones to finish playing the card.
    ChooseZone(Vec<Coord>),
    /// Helicopter Lift off the island: the game is won.
    LiftedOff,
}
