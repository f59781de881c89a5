//! Read-only snapshot for presentation layers.
//!
//! `GameView` copies everything a display needs. The board, players and
//! artefact set are `im` collections, so taking a view is cheap and the view
//! can be sent to another thread while the engine keeps running.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::engine::GameEngine;
use super::mode::GameMode;
use crate::board::{Artefact, Board, Coord, TileId};
use crate::core::{Player, PlayerId};

/// Public state of a game at one instant.
///
/// Draw piles are hidden; only their sizes are shown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub mode: GameMode,
    pub board: Board,
    pub players: Vector<Player>,
    pub current_player: Option<PlayerId>,
    pub actions_remaining: u8,
    pub turn_number: u32,
    pub water_level: u8,
    pub flood_rate: u8,
    pub claimed_artefacts: OrdSet<Artefact>,
    pub treasure_draw_pile: usize,
    pub treasure_discard_pile: usize,
    pub flood_draw_pile: usize,
    pub flood_discard_pile: Vec<TileId>,
    pub choosable_zones: Vec<Coord>,
}

impl GameEngine {
    /// Snapshot of the public game state.
    #[must_use]
    pub fn view(&self) -> GameView {
        GameView {
            mode: self.mode.clone(),
            board: self.board.clone(),
            players: self.players.clone(),
            current_player: self.player_for_the_turn().map(Player::id),
            actions_remaining: self.current_player_actions(),
            turn_number: self.turn.number,
            water_level: self.water.level(),
            flood_rate: self.water.flood_rate(),
            claimed_artefacts: self.claimed.clone(),
            treasure_draw_pile: self.treasure_deck.draw_len(),
            treasure_discard_pile: self.treasure_deck.discard_len(),
            flood_draw_pile: self.flood_deck.draw_len(),
            flood_discard_pile: self.flood_deck.discard_pile().to_vec(),
            choosable_zones: self.choice_targets.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    #[test]
    fn test_view_before_start() {
        let engine = GameEngine::new(GameConfig::new()).unwrap();
        let view = engine.view();
        assert_eq!(view.mode, GameMode::SettingUp);
        assert_eq!(view.current_player, None);
        assert_eq!(view.flood_rate, 2);
        assert_eq!(view.treasure_draw_pile, 25);
    }

    #[test]
    fn test_view_is_detached() {
        let mut engine = GameEngine::new(GameConfig::new().with_initial_flood_draws(0)).unwrap();
        engine.add_player("A").unwrap();
        engine.add_player("B").unwrap();
        engine.start_game().unwrap();

        let view = engine.view();
        let before = view.clone();
        engine.end_turn().unwrap();

        assert_eq!(view, before);
        assert_eq!(view.turn_number, 1);
    }

    #[test]
    fn test_view_serializes() {
        let mut engine = GameEngine::new(GameConfig::new()).unwrap();
        engine.add_player("A").unwrap();
        engine.add_player("B").unwrap();
        engine.start_game().unwrap();

        let json = serde_json::to_string(&engine.view()).unwrap();
        let back: GameView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, engine.view());
    }
}
