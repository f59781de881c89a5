//! End of turn: treasure draw, flooding, loss checks, stranding, escapes,
//! and handing the turn on.
//!
//! ## Turn sequence
//!
//! 1. The acting player's remaining actions are forfeited.
//! 2. Two treasure cards are drawn. A Water Rise raises the water and goes
//!    to the discard pile; the meter reaching its maximum loses at once.
//! 3. A hand over the limit stops here in `Discarding`; the next
//!    `end_turn` after the discards resumes at step 4.
//! 4. As many flood cards as the water level dictates are drawn.
//! 5. Loss checks: helicopter pad, unclaimed artefacts, trapped players.
//! 6. Players left on sunken zones must escape before the turn completes.
//! 7. Win check, then the next player gets a fresh set of actions.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::engine::{GameEngine, TurnContext};
use super::mode::{GameMode, GameOutcome, PlayerList};
use super::movement;
use crate::board::{Artefact, Coord, TileId, ZoneState};
use crate::cards::TreasureCard;
use crate::core::{GameError, GameResult, LossReason, PlayerId};

/// Something that happened while a turn was ending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    TreasureDrawn { player: PlayerId, card: TreasureCard },
    WaterRose { level: u8 },
    ZoneFlooded { coord: Coord, tile: TileId },
    ZoneSunk { coord: Coord, tile: TileId },
    PlayerStranded { player: PlayerId },
}

/// Where the game stands once `end_turn` or an escape returns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The turn passed; this player acts next.
    NextPlayer(PlayerId),
    /// This player must discard; call `end_turn` again afterwards.
    MustDiscard(PlayerId),
    /// These players must escape before the turn can complete.
    PlayersStranded(Vec<PlayerId>),
    Won,
    Lost(LossReason),
}

/// Events and outcome of one `end_turn` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub events: Vec<TurnEvent>,
    pub outcome: TurnOutcome,
}

impl TurnReport {
    /// True if a Water Rise card was drawn.
    #[must_use]
    pub fn water_rose(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TurnEvent::WaterRose { .. }))
    }

    /// Zones that sank during this call.
    pub fn sunk_zones(&self) -> impl Iterator<Item = Coord> + '_ {
        self.events.iter().filter_map(|e| match e {
            TurnEvent::ZoneSunk { coord, .. } => Some(*coord),
            _ => None,
        })
    }
}

impl GameEngine {
    /// Finish the acting player's turn.
    ///
    /// Wins and losses are reported in the outcome; after one, every
    /// mutating call fails with `GameWon` or `GameOver`. An `Err` from a
    /// deck draw means the card bookkeeping is broken.
    pub fn end_turn(&mut self) -> GameResult<TurnReport> {
        self.ensure_started()?;
        if let GameMode::Discarding { player } = self.mode {
            return Err(GameError::state(format!(
                "{} must discard down to {} cards first",
                player, self.config.hand_limit
            )));
        }
        if self.mode != GameMode::Playing {
            return Err(GameError::state(format!("cannot end the turn while {}", self.mode)));
        }

        let current = self.current_id();
        let mut events = Vec::new();

        if !self.turn.treasure_drawn {
            self.turn.treasure_drawn = true;
            self.turn.engineer_bonus = false;
            self.player_at_mut(current)?.reset_actions(0);

            for _ in 0..self.config.treasure_draws_per_turn {
                let card = self.draw_treasure()?;
                if card == TreasureCard::WaterRise {
                    self.treasure_deck.discard(card);
                    let maxed = self.water.increase_level();
                    let level = self.water.level();
                    events.push(TurnEvent::WaterRose { level });
                    info!(level, "water rose");
                    if maxed {
                        return Ok(self.lose(events, LossReason::WaterLevelMaximum));
                    }
                } else {
                    let cap = self.config.hand_hard_cap();
                    self.player_at_mut(current)?.take_card(card, cap)?;
                    events.push(TurnEvent::TreasureDrawn { player: current, card });
                }
            }
        }

        if self.player(current)?.hand_size() > self.config.hand_limit {
            self.set_mode(GameMode::Discarding { player: current }, Vec::new());
            debug!(player = %current, "must discard before flooding");
            return Ok(TurnReport {
                events,
                outcome: TurnOutcome::MustDiscard(current),
            });
        }

        self.draw_floods(&mut events)?;

        if let Some(reason) = self.check_losses() {
            return Ok(self.lose(events, reason));
        }

        let stranded = match self.stranded_players() {
            Ok(stranded) => stranded,
            Err(reason) => return Ok(self.lose(events, reason)),
        };
        if !stranded.is_empty() {
            events.extend(stranded.iter().map(|&player| TurnEvent::PlayerStranded { player }));
            self.set_mode(
                GameMode::PlayersRunningFromInaccessibleZone {
                    stranded: stranded.clone(),
                    choosing: None,
                },
                Vec::new(),
            );
            info!(count = stranded.len(), "players stranded");
            return Ok(TurnReport {
                events,
                outcome: TurnOutcome::PlayersStranded(stranded.to_vec()),
            });
        }

        let outcome = self.complete_turn();
        Ok(TurnReport { events, outcome })
    }

    fn draw_treasure(&mut self) -> GameResult<TreasureCard> {
        self.treasure_deck.draw(&mut self.rng).map_err(|err| {
            error!(%err, "treasure deck ran dry");
            err
        })
    }

    fn draw_floods(&mut self, events: &mut Vec<TurnEvent>) -> GameResult<()> {
        for _ in 0..self.water.flood_rate() {
            let tile = self.flood_deck.draw(&mut self.rng).map_err(|err| {
                error!(%err, "flood deck ran dry");
                err
            })?;
            self.flood_deck.discard(tile);

            let Some(coord) = self.board.zone_of_tile(tile) else {
                warn!(%tile, "flood card for a tile not on the board");
                continue;
            };
            let zone = self.board.zone_at_mut(coord)?;
            let before = zone.state();
            match (before, zone.flood()) {
                (ZoneState::Normal, ZoneState::Flooded) => {
                    events.push(TurnEvent::ZoneFlooded { coord, tile });
                    debug!(%tile, %coord, "zone flooded");
                }
                (ZoneState::Flooded, ZoneState::Inaccessible) => {
                    events.push(TurnEvent::ZoneSunk { coord, tile });
                    info!(%tile, %coord, "zone sank");
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// First loss condition that holds, checked pad first, then artefacts.
    fn check_losses(&self) -> Option<LossReason> {
        let pad = self.board.helicopter_pad();
        if !self.board.zone(pad).map_or(false, |z| z.is_accessible()) {
            return Some(LossReason::HelicopterSiteSunk);
        }
        Artefact::ALL
            .into_iter()
            .find(|a| !self.claimed.contains(a) && self.board.artefact_sunk(*a))
            .map(LossReason::ArtefactLost)
    }

    /// Players standing on sunken zones. Fails with the first player who has
    /// nowhere to go.
    fn stranded_players(&self) -> Result<PlayerList, LossReason> {
        let mut stranded = PlayerList::new();
        for player in &self.players {
            let Some(at) = player.zone() else { continue };
            if self.board.zone(at).map_or(true, |z| z.is_accessible()) {
                continue;
            }
            if movement::escape_targets(&self.board, player.role(), at).is_empty() {
                return Err(LossReason::PlayerLost(player.id()));
            }
            stranded.push(player.id());
        }
        Ok(stranded)
    }

    /// Pick which stranded player escapes next; returns where they can go.
    pub fn select_stranded_player(&mut self, player: PlayerId) -> GameResult<Vec<Coord>> {
        self.ensure_started()?;
        let GameMode::PlayersRunningFromInaccessibleZone { ref stranded, .. } = self.mode else {
            return Err(GameError::state(format!("nobody is stranded while {}", self.mode)));
        };
        if !stranded.contains(&player) {
            return Err(GameError::param(format!("{} is not stranded", player)));
        }

        let targets = self.escape_targets(player)?;
        if let GameMode::PlayersRunningFromInaccessibleZone { choosing, .. } = &mut self.mode {
            *choosing = Some(player);
        }
        self.choice_targets = targets.clone();
        Ok(targets)
    }

    /// Zones a player on a sunken zone may swim to.
    pub fn escape_targets(&self, player: PlayerId) -> GameResult<Vec<Coord>> {
        let at = self.player_zone(player)?;
        Ok(movement::escape_targets(&self.board, self.player(player)?.role(), at))
    }

    /// Move a stranded player off their sunken zone.
    ///
    /// Once the last one is safe the interrupted turn completes.
    pub fn escape(&mut self, player: PlayerId, to: Coord) -> GameResult<TurnOutcome> {
        self.ensure_started()?;
        let GameMode::PlayersRunningFromInaccessibleZone { ref stranded, .. } = self.mode else {
            return Err(GameError::state(format!("nobody is stranded while {}", self.mode)));
        };
        if !stranded.contains(&player) {
            return Err(GameError::param(format!("{} is not stranded", player)));
        }
        self.check_target(&self.escape_targets(player)?, to)?;

        self.relocate(player, to)?;
        debug!(%player, %to, "escaped");

        let mut remaining = Vec::new();
        if let GameMode::PlayersRunningFromInaccessibleZone { stranded, choosing } =
            &mut self.mode
        {
            stranded.retain(|p| *p != player);
            *choosing = None;
            remaining = stranded.to_vec();
        }
        self.choice_targets.clear();

        if remaining.is_empty() {
            Ok(self.complete_turn())
        } else {
            Ok(TurnOutcome::PlayersStranded(remaining))
        }
    }

    /// All four artefacts claimed, everyone on the pad, a Helicopter Lift
    /// in some hand.
    pub(crate) fn win_conditions_met(&self) -> bool {
        let pad = self.board.helicopter_pad();
        self.claimed.len() == Artefact::ALL.len()
            && self.board.zone(pad).map_or(false, |z| z.is_accessible())
            && self.players.iter().all(|p| p.zone() == Some(pad))
            && self
                .players
                .iter()
                .any(|p| p.holds(TreasureCard::HelicopterLift))
    }

    fn complete_turn(&mut self) -> TurnOutcome {
        if self.win_conditions_met() {
            self.finish(GameOutcome::Won);
            info!(turn = self.turn.number, "game won");
            return TurnOutcome::Won;
        }

        let next = (self.turn.current + 1) % self.players.len().max(1);
        self.turn = TurnContext {
            current: next,
            number: self.turn.number + 1,
            ..TurnContext::default()
        };
        let actions = self.config.actions_per_turn;
        if let Some(player) = self.players.get_mut(next) {
            player.reset_actions(actions);
        }
        self.back_to_playing();

        let id = self.current_id();
        debug!(player = %id, turn = self.turn.number, "next turn");
        TurnOutcome::NextPlayer(id)
    }

    fn lose(&mut self, events: Vec<TurnEvent>, reason: LossReason) -> TurnReport {
        warn!(%reason, "game lost");
        self.finish(GameOutcome::Lost(reason));
        TurnReport {
            events,
            outcome: TurnOutcome::Lost(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::cards::Deck;
    use crate::core::{ErrorKind, GameConfig, Role};

    fn engine() -> GameEngine {
        let mut tiles = TileId::ALL.iter().copied();
        let layout: Vec<_> = Board::coords()
            .map(|c| if c == Board::center() { None } else { tiles.next() })
            .collect();
        let board = Board::from_layout(&layout).unwrap();
        let config = GameConfig::new().with_initial_flood_draws(0);
        let mut engine = GameEngine::with_board(config, board).unwrap();
        engine.add_player_with_role("A", Role::Engineer).unwrap();
        engine.add_player_with_role("B", Role::Messenger).unwrap();
        engine.start_game().unwrap();
        engine
    }

    fn quiet_floods(engine: &mut GameEngine, tiles: Vec<TileId>) {
        *engine.flood_deck_mut() = Deck::with_piles(tiles, Vec::new());
    }

    #[test]
    fn test_end_turn_passes_to_next_player() {
        let mut engine = engine();
        *engine.treasure_deck_mut() = Deck::with_piles(
            vec![TreasureCard::Sandbags, TreasureCard::HelicopterLift],
            Vec::new(),
        );
        quiet_floods(&mut engine, vec![TileId::Watchtower, TileId::MistyMarsh]);

        let report = engine.end_turn().unwrap();
        assert_eq!(report.outcome, TurnOutcome::NextPlayer(PlayerId::new(1)));
        assert!(!report.water_rose());
        assert_eq!(engine.player(PlayerId::new(0)).unwrap().hand_size(), 4);
        assert_eq!(engine.current_player_actions(), 3);
        assert_eq!(engine.turn_number(), 2);
        assert!(engine.board().zone(Coord::new(3, 4)).unwrap().is_flooded());
    }

    #[test]
    fn test_water_rise_is_discarded() {
        let mut engine = engine();
        *engine.treasure_deck_mut() = Deck::with_piles(
            vec![TreasureCard::Sandbags, TreasureCard::WaterRise],
            Vec::new(),
        );
        quiet_floods(
            &mut engine,
            vec![TileId::Watchtower, TileId::MistyMarsh, TileId::Observatory],
        );

        let report = engine.end_turn().unwrap();
        assert!(report.water_rose());
        assert_eq!(engine.water_meter().level(), 1);
        assert_eq!(engine.treasure_deck().discard_pile(), &[TreasureCard::WaterRise]);
        // Level 1 floods three zones
        assert_eq!(engine.flood_deck().discard_len(), 3);
    }

    #[test]
    fn test_end_turn_refused_while_discarding() {
        let mut engine = engine();
        *engine.treasure_deck_mut() = Deck::with_piles(
            vec![TreasureCard::Sandbags, TreasureCard::Sandbags],
            Vec::new(),
        );
        let fire = TreasureCard::Treasure(Artefact::CrystalOfFire);
        engine.player_mut(PlayerId::new(0)).unwrap().take_card(fire, 7).unwrap();
        engine.player_mut(PlayerId::new(0)).unwrap().take_card(fire, 7).unwrap();

        let report = engine.end_turn().unwrap();
        assert_eq!(report.outcome, TurnOutcome::MustDiscard(PlayerId::new(0)));
        assert_eq!(engine.end_turn().unwrap_err().kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_select_stranded_player_outside_escape() {
        let mut engine = engine();
        let err = engine.select_stranded_player(PlayerId::new(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        let err = engine.escape(PlayerId::new(0), Coord::new(0, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_sunk_zones_iterator() {
        let report = TurnReport {
            events: vec![
                TurnEvent::WaterRose { level: 2 },
                TurnEvent::ZoneSunk { coord: Coord::new(1, 1), tile: TileId::CoralPalace },
            ],
            outcome: TurnOutcome::NextPlayer(PlayerId::new(0)),
        };
        assert_eq!(report.sunk_zones().collect::<Vec<_>>(), vec![Coord::new(1, 1)]);
    }
}
