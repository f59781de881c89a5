//! Player commands.
//!
//! Action-point commands (`move_player`, `shore_up`, `fly`, `navigate`,
//! `give_card`, `claim_artefact`) belong to the acting player and cost one
//! action, save for the Engineer's second shore-up. Action cards cost
//! nothing and may be played by anyone while the engine is `Playing`, or by
//! the player who is discarding.
//!
//! Each targeted command can be issued directly, or in two steps: a
//! `begin_*` call enters the matching choosing mode and returns the legal
//! zones, then `choose_zone` finishes it or `cancel_choice` backs out.

use tracing::{debug, info};

use super::engine::GameEngine;
use super::mode::{CardPlay, GameMode, GameOutcome, PlayerList, PossibleAction};
use super::movement;
use super::turn::TurnOutcome;
use crate::board::{Artefact, Coord, ZoneRole};
use crate::cards::{TreasureCard, CARDS_TO_CLAIM};
use crate::core::{GameError, GameResult, PlayerId, Role};

impl GameEngine {
    // === Movement ===

    /// Move to a legal zone for one action.
    pub fn move_player(&mut self, player: PlayerId, to: Coord) -> GameResult<()> {
        let pending = matches!(
            self.mode,
            GameMode::ChoosingMoveTarget { actor, mover } if actor == player && mover == player
        );
        self.ensure_turn_action(player, "move", pending)?;
        self.ensure_actions_left(player)?;

        let from = self.player_zone(player)?;
        let role = self.player(player)?.role();
        self.check_target(&movement::move_targets(&self.board, role, from), to)?;

        self.relocate(player, to)?;
        self.spend(player)?;
        debug!(%player, %from, %to, "moved");
        Ok(())
    }

    /// Legal move targets for a player.
    pub fn move_targets(&self, player: PlayerId) -> GameResult<Vec<Coord>> {
        let from = self.player_zone(player)?;
        Ok(movement::move_targets(&self.board, self.player(player)?.role(), from))
    }

    /// Pilot flight to any accessible zone, once per turn.
    pub fn fly(&mut self, player: PlayerId, to: Coord) -> GameResult<()> {
        let pending = matches!(
            self.mode,
            GameMode::PilotChoosingFlyTarget { player: p } if p == player
        );
        self.ensure_turn_action(player, "fly", pending)?;
        self.ensure_can_fly(player)?;

        let from = self.player_zone(player)?;
        self.check_target(&movement::fly_targets(&self.board, from), to)?;

        self.relocate(player, to)?;
        self.spend(player)?;
        self.turn.pilot_flown = true;
        debug!(%player, %from, %to, "flew");
        Ok(())
    }

    fn ensure_can_fly(&self, player: PlayerId) -> GameResult<()> {
        if self.player(player)?.role() != Role::Pilot {
            return Err(GameError::param("only the Pilot can fly"));
        }
        if self.turn.pilot_flown {
            return Err(GameError::state("the Pilot has already flown this turn"));
        }
        self.ensure_actions_left(player)
    }

    /// Navigator moves another player up to two zones.
    pub fn navigate(&mut self, navigator: PlayerId, other: PlayerId, to: Coord) -> GameResult<()> {
        let pending = matches!(
            self.mode,
            GameMode::ChoosingMoveTarget { actor, mover } if actor == navigator && mover == other
        );
        self.ensure_turn_action(navigator, "navigate", pending)?;
        let targets = self.navigate_targets(navigator, other)?;
        self.check_target(&targets, to)?;

        self.relocate(other, to)?;
        self.spend(navigator)?;
        debug!(%navigator, moved = %other, %to, "navigated");
        Ok(())
    }

    fn navigate_targets(&self, navigator: PlayerId, other: PlayerId) -> GameResult<Vec<Coord>> {
        if self.player(navigator)?.role() != Role::Navigator {
            return Err(GameError::param("only the Navigator can move other players"));
        }
        if navigator == other {
            return Err(GameError::param("the Navigator moves other players, not themself"));
        }
        self.ensure_actions_left(navigator)?;
        let from = self.player_zone(other)?;
        Ok(movement::navigate_targets(&self.board, self.player(other)?.role(), from))
    }

    // === Shoring up ===

    /// Shore up a flooded zone next to or under the player.
    ///
    /// The Engineer's first shore-up of an action leaves a free second one
    /// available until any other command is issued.
    pub fn shore_up(&mut self, player: PlayerId, at: Coord) -> GameResult<()> {
        let pending = matches!(
            self.mode,
            GameMode::ChoosingShoreUpTarget { player: p } if p == player
        );
        self.ensure_turn_action(player, "shore up", pending)?;
        let role = self.player(player)?.role();
        let free = role == Role::Engineer && self.turn.engineer_bonus;
        if !free {
            self.ensure_actions_left(player)?;
        }

        let from = self.player_zone(player)?;
        self.check_target(&movement::shore_up_targets(&self.board, role, from), at)?;

        self.board.zone_at_mut(at)?.shore_up()?;
        if free {
            self.turn.engineer_bonus = false;
            self.back_to_playing();
        } else {
            self.spend(player)?;
            self.turn.engineer_bonus = role == Role::Engineer;
        }
        debug!(%player, %at, free, "shored up");
        Ok(())
    }

    /// Flooded zones the player may shore up.
    pub fn shore_up_targets(&self, player: PlayerId) -> GameResult<Vec<Coord>> {
        let from = self.player_zone(player)?;
        Ok(movement::shore_up_targets(&self.board, self.player(player)?.role(), from))
    }

    // === Cards ===

    /// Hand a treasure card to another player.
    ///
    /// Both must share a zone unless the giver is the Messenger. A receiver
    /// pushed past the hand limit must discard before play continues.
    pub fn give_card(
        &mut self,
        from: PlayerId,
        to: PlayerId,
        card: TreasureCard,
    ) -> GameResult<()> {
        self.ensure_turn_action(from, "give a card", false)?;
        self.ensure_actions_left(from)?;
        if from == to {
            return Err(GameError::param("cannot give a card to yourself"));
        }
        if !card.is_treasure() {
            return Err(GameError::param(format!("{} cannot be given", card)));
        }

        let giver = self.player(from)?;
        let receiver = self.player(to)?;
        if !giver.holds(card) {
            return Err(GameError::param(format!("{} does not hold {}", from, card)));
        }
        if giver.role() != Role::Messenger && giver.zone() != receiver.zone() {
            return Err(GameError::param(format!("{} and {} are not on the same zone", from, to)));
        }
        if receiver.hand_size() >= self.config.hand_hard_cap() {
            return Err(GameError::CapacityExceeded(format!("{}'s hand is full", to)));
        }

        let cap = self.config.hand_hard_cap();
        let card = self.player_at_mut(from)?.remove_card(card)?;
        self.player_at_mut(to)?.take_card(card, cap)?;
        self.spend(from)?;
        debug!(%from, %to, %card, "gave card");
        Ok(())
    }

    /// Trade four matching treasure cards for the artefact of the zone the
    /// player stands on.
    pub fn claim_artefact(&mut self, player: PlayerId) -> GameResult<Artefact> {
        self.ensure_turn_action(player, "claim an artefact", false)?;
        self.ensure_actions_left(player)?;
        let artefact = self.claimable_artefact(player)?;

        let card = TreasureCard::Treasure(artefact);
        for _ in 0..CARDS_TO_CLAIM {
            let removed = self.player_at_mut(player)?.remove_card(card)?;
            self.treasure_deck.discard(removed);
        }
        self.player_at_mut(player)?.add_artefact(artefact);
        self.claimed.insert(artefact);
        self.spend(player)?;

        info!(%player, %artefact, "artefact claimed");
        Ok(artefact)
    }

    fn claimable_artefact(&self, player: PlayerId) -> GameResult<Artefact> {
        let at = self.player_zone(player)?;
        let ZoneRole::ArtefactAssociated(artefact) = self.board.zone_at(at.x, at.y)?.role() else {
            return Err(GameError::param(format!("no artefact can be claimed on {}", at)));
        };
        if self.claimed.contains(&artefact) {
            return Err(GameError::param(format!("{} has already been claimed", artefact)));
        }
        let held = self.player(player)?.count_of(TreasureCard::Treasure(artefact));
        if held < CARDS_TO_CLAIM {
            return Err(GameError::param(format!(
                "{} needs {} {} cards, holds {}",
                player, CARDS_TO_CLAIM, artefact, held
            )));
        }
        Ok(artefact)
    }

    /// Start playing Sandbags or Helicopter Lift.
    ///
    /// Lifting off while every win condition holds ends the game at once.
    pub fn use_action_card(
        &mut self,
        player: PlayerId,
        card: TreasureCard,
    ) -> GameResult<CardPlay> {
        self.ensure_started()?;
        let allowed = match self.mode {
            GameMode::Playing => true,
            GameMode::Discarding { player: p } => p == player,
            _ => false,
        };
        if !allowed {
            return Err(GameError::state(format!("cannot play a card while {}", self.mode)));
        }
        if !card.is_action_card() {
            return Err(GameError::param(format!("{} is not an action card", card)));
        }
        if !self.player(player)?.holds(card) {
            return Err(GameError::param(format!("{} does not hold {}", player, card)));
        }

        if card == TreasureCard::Sandbags {
            let targets = movement::sandbag_targets(&self.board);
            if targets.is_empty() {
                return Err(GameError::state("no flooded zone to shore up"));
            }
            self.set_mode(GameMode::ChoosingShoreUpWithCardTarget { player }, targets.clone());
            return Ok(CardPlay::ChooseZone(targets));
        }

        if self.win_conditions_met() {
            self.discard_from_hand(player, card)?;
            self.finish(GameOutcome::Won);
            info!(%player, "lifted off the island");
            return Ok(CardPlay::LiftedOff);
        }

        let from = self.player_zone(player)?;
        let targets = movement::fly_targets(&self.board, from);
        if targets.is_empty() {
            return Err(GameError::state("nowhere to fly to"));
        }
        let mut passengers = PlayerList::new();
        passengers.push(player);
        self.set_mode(
            GameMode::ChoosingFlyWithCardTarget { player, passengers },
            targets.clone(),
        );
        Ok(CardPlay::ChooseZone(targets))
    }

    /// Finish a Sandbags play.
    pub fn shore_up_with_card(&mut self, at: Coord) -> GameResult<()> {
        self.ensure_started()?;
        let GameMode::ChoosingShoreUpWithCardTarget { player } = self.mode else {
            return Err(GameError::state(format!("no sandbag play pending while {}", self.mode)));
        };
        self.check_target(&self.choice_targets, at)?;

        self.board.zone_at_mut(at)?.shore_up()?;
        self.discard_from_hand(player, TreasureCard::Sandbags)?;
        self.back_to_playing();
        debug!(%player, %at, "sandbagged");
        Ok(())
    }

    /// Add a co-located player to a pending Helicopter Lift.
    pub fn choose_player_to_fly_with(&mut self, passenger: PlayerId) -> GameResult<()> {
        self.ensure_started()?;
        let GameMode::ChoosingFlyWithCardTarget { player, ref passengers } = self.mode else {
            return Err(GameError::state(format!("no helicopter lift pending while {}", self.mode)));
        };
        if passengers.contains(&passenger) {
            return Err(GameError::param(format!("{} is already on board", passenger)));
        }
        if self.player(passenger)?.zone() != self.player(player)?.zone() {
            return Err(GameError::param(format!("{} is not on the pilot's zone", passenger)));
        }

        if let GameMode::ChoosingFlyWithCardTarget { passengers, .. } = &mut self.mode {
            passengers.push(passenger);
        }
        Ok(())
    }

    /// Finish a Helicopter Lift play, flying every passenger to `to`.
    pub fn fly_with_card(&mut self, to: Coord) -> GameResult<()> {
        self.ensure_started()?;
        let GameMode::ChoosingFlyWithCardTarget { player, ref passengers } = self.mode else {
            return Err(GameError::state(format!("no helicopter lift pending while {}", self.mode)));
        };
        self.check_target(&self.choice_targets, to)?;

        let passengers = passengers.clone();
        for &passenger in &passengers {
            self.relocate(passenger, to)?;
        }
        self.discard_from_hand(player, TreasureCard::HelicopterLift)?;
        self.back_to_playing();
        debug!(%player, %to, passengers = passengers.len(), "helicopter lift");
        Ok(())
    }

    /// Drop a card while over the hand limit.
    pub fn discard_card(&mut self, player: PlayerId, card: TreasureCard) -> GameResult<()> {
        self.ensure_started()?;
        let GameMode::Discarding { player: discarding } = self.mode else {
            return Err(GameError::state(format!("cannot discard while {}", self.mode)));
        };
        if player != discarding {
            return Err(GameError::state(format!("{} must discard, not {}", discarding, player)));
        }

        self.discard_from_hand(player, card)?;
        self.back_to_playing();
        debug!(%player, %card, "discarded");
        Ok(())
    }

    // === Two-step choices ===

    /// Enter `ChoosingMoveTarget` and return the legal zones.
    pub fn begin_move(&mut self, player: PlayerId) -> GameResult<Vec<Coord>> {
        self.ensure_turn_action(player, "move", false)?;
        self.ensure_actions_left(player)?;
        let targets = self.move_targets(player)?;
        self.begin_choice(
            GameMode::ChoosingMoveTarget { actor: player, mover: player },
            targets,
            "no zone to move to",
        )
    }

    /// Enter `ChoosingShoreUpTarget` and return the legal zones.
    pub fn begin_shore_up(&mut self, player: PlayerId) -> GameResult<Vec<Coord>> {
        self.ensure_turn_action(player, "shore up", false)?;
        let free = self.player(player)?.role() == Role::Engineer && self.turn.engineer_bonus;
        if !free {
            self.ensure_actions_left(player)?;
        }
        let targets = self.shore_up_targets(player)?;
        self.begin_choice(
            GameMode::ChoosingShoreUpTarget { player },
            targets,
            "no flooded zone within reach",
        )
    }

    /// Enter `PilotChoosingFlyTarget` and return the legal zones.
    pub fn begin_fly(&mut self, player: PlayerId) -> GameResult<Vec<Coord>> {
        self.ensure_turn_action(player, "fly", false)?;
        self.ensure_can_fly(player)?;
        let targets = movement::fly_targets(&self.board, self.player_zone(player)?);
        self.begin_choice(
            GameMode::PilotChoosingFlyTarget { player },
            targets,
            "nowhere to fly to",
        )
    }

    /// Enter `ChoosingMoveTarget` for the Navigator moving `other`.
    pub fn begin_navigate(
        &mut self,
        navigator: PlayerId,
        other: PlayerId,
    ) -> GameResult<Vec<Coord>> {
        self.ensure_turn_action(navigator, "navigate", false)?;
        let targets = self.navigate_targets(navigator, other)?;
        self.begin_choice(
            GameMode::ChoosingMoveTarget { actor: navigator, mover: other },
            targets,
            "that player cannot be moved anywhere",
        )
    }

    fn begin_choice(
        &mut self,
        mode: GameMode,
        targets: Vec<Coord>,
        empty: &str,
    ) -> GameResult<Vec<Coord>> {
        if targets.is_empty() {
            return Err(GameError::state(empty));
        }
        self.set_mode(mode, targets.clone());
        Ok(targets)
    }

    /// Resolve the pending zone choice.
    ///
    /// Returns the turn outcome when the choice was the last escape that
    /// let the turn finish.
    pub fn choose_zone(&mut self, at: Coord) -> GameResult<Option<TurnOutcome>> {
        self.ensure_started()?;
        match self.mode.clone() {
            GameMode::ChoosingMoveTarget { actor, mover } if actor == mover => {
                self.move_player(actor, at)?;
            }
            GameMode::ChoosingMoveTarget { actor, mover } => self.navigate(actor, mover, at)?,
            GameMode::ChoosingShoreUpTarget { player } => self.shore_up(player, at)?,
            GameMode::PilotChoosingFlyTarget { player } => self.fly(player, at)?,
            GameMode::ChoosingShoreUpWithCardTarget { .. } => self.shore_up_with_card(at)?,
            GameMode::ChoosingFlyWithCardTarget { .. } => self.fly_with_card(at)?,
            GameMode::PlayersRunningFromInaccessibleZone { choosing: Some(player), .. } => {
                return self.escape(player, at).map(Some);
            }
            mode => return Err(GameError::state(format!("no zone choice pending while {}", mode))),
        }
        Ok(None)
    }

    /// Back out of a pending choice without spending anything.
    pub fn cancel_choice(&mut self) -> GameResult<()> {
        self.ensure_started()?;
        if !self.mode.is_cancellable() {
            return Err(GameError::state(format!("nothing to cancel while {}", self.mode)));
        }
        self.back_to_playing();
        Ok(())
    }

    // === Legality queries ===

    /// Zones offered by the pending choice; empty when none is pending.
    #[must_use]
    pub fn zones_possible_for_choosing(&self) -> &[Coord] {
        &self.choice_targets
    }

    /// Players that may be picked right now: co-located passengers for a
    /// Helicopter Lift, or stranded players waiting to escape.
    #[must_use]
    pub fn players_to_choose(&self) -> Vec<PlayerId> {
        match &self.mode {
            GameMode::ChoosingFlyWithCardTarget { player, passengers } => {
                let Ok(at) = self.player_zone(*player) else {
                    return Vec::new();
                };
                self.board
                    .zone(at)
                    .map(|z| {
                        z.occupants()
                            .iter()
                            .copied()
                            .filter(|p| !passengers.contains(p))
                            .collect()
                    })
                    .unwrap_or_default()
            }
            GameMode::PlayersRunningFromInaccessibleZone { stranded, choosing: None } => {
                stranded.to_vec()
            }
            _ => Vec::new(),
        }
    }

    /// Commands `player` may issue in the current mode.
    #[must_use]
    pub fn possible_actions_for_player(&self, player: PlayerId) -> Vec<PossibleAction> {
        let Ok(me) = self.player(player) else {
            return Vec::new();
        };
        let mut out = Vec::new();

        match &self.mode {
            GameMode::SettingUp | GameMode::Finished(_) => {}
            GameMode::Playing => {
                if me.hand().iter().any(|c| c.is_action_card()) {
                    out.push(PossibleAction::UseActionCard);
                }
                if player != self.current_id() {
                    return out;
                }
                let acting = me.actions_remaining() > 0;
                if acting && self.move_targets(player).map_or(false, |t| !t.is_empty()) {
                    out.push(PossibleAction::Move);
                }
                let free_shore = me.role() == Role::Engineer && self.turn.engineer_bonus;
                let can_shore = self.shore_up_targets(player).map_or(false, |t| !t.is_empty());
                if (acting || free_shore) && can_shore {
                    out.push(PossibleAction::ShoreUp);
                }
                if acting && me.role() == Role::Pilot && !self.turn.pilot_flown {
                    out.push(PossibleAction::Fly);
                }
                if acting && me.role() == Role::Navigator && self.players.len() > 1 {
                    out.push(PossibleAction::Navigate);
                }
                if acting && me.hand().iter().any(|c| c.is_treasure()) {
                    out.push(PossibleAction::GiveCard);
                }
                if acting && self.claimable_artefact(player).is_ok() {
                    out.push(PossibleAction::ClaimArtefact);
                }
                out.push(PossibleAction::EndTurn);
            }
            GameMode::ChoosingMoveTarget { actor: p, .. }
            | GameMode::ChoosingShoreUpTarget { player: p }
            | GameMode::PilotChoosingFlyTarget { player: p }
            | GameMode::ChoosingShoreUpWithCardTarget { player: p } => {
                if *p == player {
                    out.extend([PossibleAction::ChooseZone, PossibleAction::Cancel]);
                }
            }
            GameMode::ChoosingFlyWithCardTarget { player: p, .. } => {
                if *p == player {
                    if !self.players_to_choose().is_empty() {
                        out.push(PossibleAction::ChoosePlayer);
                    }
                    out.extend([PossibleAction::ChooseZone, PossibleAction::Cancel]);
                }
            }
            GameMode::Discarding { player: p } => {
                if *p == player {
                    out.push(PossibleAction::Discard);
                    if me.hand().iter().any(|c| c.is_action_card()) {
                        out.push(PossibleAction::UseActionCard);
                    }
                }
            }
            GameMode::PlayersRunningFromInaccessibleZone { stranded, choosing } => {
                if stranded.contains(&player) {
                    out.push(PossibleAction::Escape);
                    if *choosing == Some(player) {
                        out.push(PossibleAction::ChooseZone);
                    }
                }
            }
        }

        out
    }

    /// Spend one of the acting player's actions and close any pending choice.
    fn spend(&mut self, player: PlayerId) -> GameResult<()> {
        self.player_at_mut(player)?.spend_action()?;
        self.turn.engineer_bonus = false;
        self.back_to_playing();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, TileId};
    use crate::core::{ErrorKind, GameConfig};

    /// Tiles laid out in catalogue order; the Engineer starts on Bronze Gate
    /// at (1, 0), the Explorer on Copper Gate at (0, 1) and the Pilot on
    /// Fools' Landing at (4, 1).
    fn engine(roles: &[Role]) -> GameEngine {
        let mut tiles = TileId::ALL.iter().copied();
        let layout: Vec<_> = Board::coords()
            .map(|c| if c == Board::center() { None } else { tiles.next() })
            .collect();
        let board = Board::from_layout(&layout).unwrap();
        let config = GameConfig::new().with_initial_flood_draws(0);
        let mut engine = GameEngine::with_board(config, board).unwrap();
        for (i, &role) in roles.iter().enumerate() {
            engine.add_player_with_role(&format!("P{}", i), role).unwrap();
        }
        engine.start_game().unwrap();
        engine
    }

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    #[test]
    fn test_move_spends_an_action() {
        let mut engine = engine(&[Role::Engineer, Role::Pilot]);
        engine.move_player(p(0), Coord::new(1, 1)).unwrap();

        assert_eq!(engine.player(p(0)).unwrap().zone(), Some(Coord::new(1, 1)));
        assert_eq!(engine.current_player_actions(), 2);
        assert!(engine.board().zone(Coord::new(1, 1)).unwrap().has_occupant(p(0)));
        assert!(!engine.board().zone(Coord::new(1, 0)).unwrap().has_occupant(p(0)));
    }

    #[test]
    fn test_move_errors_leave_state_alone() {
        let mut engine = engine(&[Role::Engineer, Role::Pilot]);
        let before = engine.view();

        let err = engine.move_player(p(0), Coord::new(3, 3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        let err = engine.move_player(p(1), Coord::new(1, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        assert_eq!(engine.view(), before);
    }

    #[test]
    fn test_move_onto_sunk_zone() {
        let mut engine = engine(&[Role::Engineer, Role::Pilot]);
        engine.place_player(p(0), Coord::new(2, 1)).unwrap();
        let err = engine.move_player(p(0), Board::center()).unwrap_err();
        assert_eq!(err, GameError::ZoneInaccessible(Board::center()));
    }

    #[test]
    fn test_no_actions_left() {
        let mut engine = engine(&[Role::Engineer, Role::Pilot]);
        engine.move_player(p(0), Coord::new(1, 1)).unwrap();
        engine.move_player(p(0), Coord::new(1, 0)).unwrap();
        engine.move_player(p(0), Coord::new(1, 1)).unwrap();

        let err = engine.move_player(p(0), Coord::new(1, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_engineer_shores_up_twice_for_one_action() {
        let mut engine = engine(&[Role::Engineer, Role::Pilot]);
        engine.board_mut().zone_mut(Coord::new(0, 0)).unwrap().flood();
        engine.board_mut().zone_mut(Coord::new(2, 0)).unwrap().flood();

        engine.shore_up(p(0), Coord::new(0, 0)).unwrap();
        engine.shore_up(p(0), Coord::new(2, 0)).unwrap();

        assert_eq!(engine.current_player_actions(), 2);
        assert!(engine.board().zone(Coord::new(2, 0)).unwrap().is_normal());
    }

    #[test]
    fn test_engineer_bonus_lost_after_other_action() {
        let mut engine = engine(&[Role::Engineer, Role::Pilot]);
        engine.board_mut().zone_mut(Coord::new(1, 0)).unwrap().flood();
        engine.board_mut().zone_mut(Coord::new(1, 2)).unwrap().flood();

        engine.shore_up(p(0), Coord::new(1, 0)).unwrap();
        engine.move_player(p(0), Coord::new(1, 1)).unwrap();
        engine.shore_up(p(0), Coord::new(1, 2)).unwrap();

        assert_eq!(engine.current_player_actions(), 0);
    }

    #[test]
    fn test_shore_up_dry_zone_rejected() {
        let mut engine = engine(&[Role::Explorer, Role::Pilot]);
        let err = engine.shore_up(p(0), Coord::new(0, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn test_two_step_move_and_cancel() {
        let mut engine = engine(&[Role::Engineer, Role::Pilot]);
        let targets = engine.begin_move(p(0)).unwrap();
        assert!(targets.contains(&Coord::new(1, 1)));
        assert_eq!(engine.zones_possible_for_choosing(), targets.as_slice());

        engine.cancel_choice().unwrap();
        assert_eq!(*engine.mode(), GameMode::Playing);
        assert_eq!(engine.current_player_actions(), 3);

        engine.begin_move(p(0)).unwrap();
        assert_eq!(engine.choose_zone(Coord::new(1, 1)).unwrap(), None);
        assert_eq!(*engine.mode(), GameMode::Playing);
        assert!(engine.zones_possible_for_choosing().is_empty());
        assert_eq!(engine.current_player_actions(), 2);
    }

    #[test]
    fn test_choose_zone_without_choice() {
        let mut engine = engine(&[Role::Engineer, Role::Pilot]);
        let err = engine.choose_zone(Coord::new(1, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(engine.cancel_choice().unwrap_err().kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_possible_actions() {
        let engine = engine(&[Role::Pilot, Role::Engineer]);
        let actions = engine.possible_actions_for_player(p(0));
        assert!(actions.contains(&PossibleAction::Move));
        assert!(actions.contains(&PossibleAction::Fly));
        assert!(actions.contains(&PossibleAction::EndTurn));
        assert!(!actions.contains(&PossibleAction::Navigate));

        let waiting = engine.possible_actions_for_player(p(1));
        assert!(!waiting.contains(&PossibleAction::Move));
        assert!(!waiting.contains(&PossibleAction::EndTurn));
    }
}
