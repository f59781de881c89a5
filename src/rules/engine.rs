//! The game engine: single owner of all game state.
//!
//! `GameEngine` holds the board, both decks, the water meter, the players
//! and the current [`GameMode`]. Every operation validates first and mutates
//! second, so a returned error never leaves partial changes behind.
//!
//! Player commands live in `actions`, the end-of-turn sequence and escapes
//! in `turn`, and the read-only snapshot in `view`.
//!
//! ## Usage
//!
//! ```
//! use island_engine::core::GameConfig;
//! use island_engine::rules::{GameEngine, GameMode};
//!
//! let mut engine = GameEngine::new(GameConfig::new().with_seed(7)).unwrap();
//! engine.add_player("Ada").unwrap();
//! engine.add_player("Brendan").unwrap();
//! engine.start_game().unwrap();
//!
//! assert_eq!(*engine.mode(), GameMode::Playing);
//! assert_eq!(engine.current_player_actions(), 3);
//! ```

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::mode::{GameMode, GameOutcome};
use crate::board::{Artefact, Board, Coord, TileId, Zone};
use crate::cards::{Deck, TreasureCard, WaterMeter, WATER_RISE_CARDS};
use crate::core::{GameConfig, GameError, GameResult, GameRng, Player, PlayerId, Role};

/// Per-turn bookkeeping, reset when the turn passes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TurnContext {
    /// Index into `players` of whoever is acting.
    pub(crate) current: usize,
    /// 1-based turn counter.
    pub(crate) number: u32,
    pub(crate) treasure_drawn: bool,
    pub(crate) pilot_flown: bool,
    /// Engineer may shore up once more without spending an action.
    pub(crate) engineer_bonus: bool,
}

/// The rules engine.
#[derive(Clone, Debug)]
pub struct GameEngine {
    pub(crate) config: GameConfig,
    pub(crate) rng: GameRng,
    pub(crate) board: Board,
    pub(crate) treasure_deck: Deck<TreasureCard>,
    pub(crate) flood_deck: Deck<TileId>,
    pub(crate) water: WaterMeter,
    pub(crate) players: Vector<Player>,
    pub(crate) available_roles: Vec<Role>,
    pub(crate) mode: GameMode,
    pub(crate) turn: TurnContext,
    pub(crate) claimed: OrdSet<Artefact>,
    /// Zones offered by the pending choice, if any.
    pub(crate) choice_targets: Vec<Coord>,
}

impl GameEngine {
    /// Create an engine on a freshly generated island.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let mut rng = GameRng::new(config.seed);
        let board = Board::generate(&mut rng)?;
        Ok(Self::assemble(config, rng, board))
    }

    /// Create an engine on a prepared island.
    pub fn with_board(config: GameConfig, board: Board) -> GameResult<Self> {
        config.validate()?;
        let rng = GameRng::new(config.seed);
        Ok(Self::assemble(config, rng, board))
    }

    fn assemble(config: GameConfig, mut rng: GameRng, board: Board) -> Self {
        let flood_cards = board.zones().filter_map(Zone::tile).collect();
        let flood_deck = Deck::new(flood_cards, &mut rng);
        let treasure_deck = Deck::new(TreasureCard::starting_set(), &mut rng);
        let water = WaterMeter::new(config.starting_water_level);

        debug!(seed = config.seed, "engine created");

        Self {
            config,
            rng,
            board,
            treasure_deck,
            flood_deck,
            water,
            players: Vector::new(),
            available_roles: Role::ALL.to_vec(),
            mode: GameMode::SettingUp,
            turn: TurnContext::default(),
            claimed: OrdSet::new(),
            choice_targets: Vec::new(),
        }
    }

    // === Setup ===

    /// Seat a player with a random role from the remaining pool.
    pub fn add_player(&mut self, name: &str) -> GameResult<PlayerId> {
        self.check_can_seat(name)?;
        let role = self
            .rng
            .take_random(&mut self.available_roles)
            .ok_or_else(|| GameError::ResourceExhausted("no roles left to hand out".into()))?;
        Ok(self.seat(name, role))
    }

    /// Seat a player with a chosen role.
    pub fn add_player_with_role(&mut self, name: &str, role: Role) -> GameResult<PlayerId> {
        self.check_can_seat(name)?;
        let pos = self
            .available_roles
            .iter()
            .position(|&r| r == role)
            .ok_or_else(|| GameError::param(format!("role {} is already taken", role)))?;
        self.available_roles.remove(pos);
        Ok(self.seat(name, role))
    }

    fn check_can_seat(&self, name: &str) -> GameResult<()> {
        if self.mode != GameMode::SettingUp {
            return Err(GameError::state("players can only join before the game starts"));
        }
        if self.players.len() >= self.config.max_players {
            return Err(GameError::CapacityExceeded(format!(
                "the table is full ({} players)",
                self.config.max_players
            )));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::param("player name is empty"));
        }
        if name.chars().count() > self.config.max_name_len {
            return Err(GameError::param(format!(
                "player name is longer than {} characters",
                self.config.max_name_len
            )));
        }
        Ok(())
    }

    fn seat(&mut self, name: &str, role: Role) -> PlayerId {
        // Bounded by max_players <= 4
        let id = PlayerId::new(self.players.len() as u8);
        self.players.push_back(Player::new(id, name.trim(), role));
        info!(player = %id, %role, "player joined");
        id
    }

    /// Place players, deal hands, seed the Water Rise cards and flood the
    /// island. Moves the engine into `Playing`.
    pub fn start_game(&mut self) -> GameResult<()> {
        if self.mode != GameMode::SettingUp {
            return Err(GameError::state("the game has already started"));
        }
        if self.players.len() < self.config.min_players {
            return Err(GameError::state(format!(
                "need at least {} players, have {}",
                self.config.min_players,
                self.players.len()
            )));
        }

        let mut starts = Vec::with_capacity(self.players.len());
        for player in &self.players {
            let coord = self.board.start_zone(player.role()).ok_or_else(|| {
                GameError::state(format!("no start tile for the {}", player.role()))
            })?;
            if !self.board.zone(coord).map_or(false, Zone::is_accessible) {
                return Err(GameError::ZoneInaccessible(coord));
            }
            starts.push((player.id(), coord));
        }

        for (id, coord) in starts {
            self.board.zone_at_mut(coord)?.add_occupant(id)?;
            self.player_at_mut(id)?.set_zone(Some(coord));
        }

        let cap = self.config.hand_hard_cap();
        for _ in 0..self.config.initial_hand_size {
            for idx in 0..self.players.len() {
                let card = self.treasure_deck.draw(&mut self.rng)?;
                if let Some(player) = self.players.get_mut(idx) {
                    player.take_card(card, cap)?;
                }
            }
        }
        self.treasure_deck.add_and_shuffle(
            std::iter::repeat(TreasureCard::WaterRise).take(WATER_RISE_CARDS),
            &mut self.rng,
        );

        for _ in 0..self.config.initial_flood_draws {
            let tile = self.flood_deck.draw(&mut self.rng)?;
            if let Some(coord) = self.board.zone_of_tile(tile) {
                self.board.zone_at_mut(coord)?.flood();
            }
            self.flood_deck.discard(tile);
        }

        self.turn = TurnContext {
            number: 1,
            ..TurnContext::default()
        };
        let actions = self.config.actions_per_turn;
        if let Some(first) = self.players.get_mut(0) {
            first.reset_actions(actions);
        }
        self.mode = GameMode::Playing;

        info!(players = self.players.len(), "game started");
        Ok(())
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> &GameMode {
        &self.mode
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Zone at `(x, y)`.
    pub fn zone(&self, x: usize, y: usize) -> GameResult<&Zone> {
        self.board.zone_at(x, y)
    }

    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> GameResult<&Player> {
        self.players
            .get(id.index())
            .ok_or_else(|| GameError::param(format!("unknown player {}", id)))
    }

    /// Whoever is acting, once the game has started.
    #[must_use]
    pub fn player_for_the_turn(&self) -> Option<&Player> {
        match self.mode {
            GameMode::SettingUp => None,
            _ => self.players.get(self.turn.current),
        }
    }

    /// Actions left to the acting player.
    #[must_use]
    pub fn current_player_actions(&self) -> u8 {
        self.player_for_the_turn()
            .map_or(0, Player::actions_remaining)
    }

    #[must_use]
    pub fn water_meter(&self) -> &WaterMeter {
        &self.water
    }

    #[must_use]
    pub fn treasure_deck(&self) -> &Deck<TreasureCard> {
        &self.treasure_deck
    }

    #[must_use]
    pub fn flood_deck(&self) -> &Deck<TileId> {
        &self.flood_deck
    }

    #[must_use]
    pub fn claimed_artefacts(&self) -> &OrdSet<Artefact> {
        &self.claimed
    }

    /// 1-based turn counter, 0 before the game starts.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn.number
    }

    /// Win or loss once the game has finished.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.mode {
            GameMode::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    // === Scenario setup ===
    //
    // Direct access for hosts and tests that need a specific position.
    // Callers are responsible for keeping occupants and player zones in sync;
    // `place_player` does that for them.

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn treasure_deck_mut(&mut self) -> &mut Deck<TreasureCard> {
        &mut self.treasure_deck
    }

    pub fn flood_deck_mut(&mut self) -> &mut Deck<TileId> {
        &mut self.flood_deck
    }

    pub fn water_meter_mut(&mut self) -> &mut WaterMeter {
        &mut self.water
    }

    pub fn player_mut(&mut self, id: PlayerId) -> GameResult<&mut Player> {
        self.player_at_mut(id)
    }

    /// Move a player to `coord` without spending anything.
    pub fn place_player(&mut self, id: PlayerId, coord: Coord) -> GameResult<()> {
        self.relocate(id, coord)
    }

    /// Mark `artefact` as already claimed by `id`.
    pub fn grant_artefact(&mut self, id: PlayerId, artefact: Artefact) -> GameResult<()> {
        self.player_at_mut(id)?.add_artefact(artefact);
        self.claimed.insert(artefact);
        Ok(())
    }

    // === Internal helpers ===

    pub(crate) fn player_at_mut(&mut self, id: PlayerId) -> GameResult<&mut Player> {
        self.players
            .get_mut(id.index())
            .ok_or_else(|| GameError::param(format!("unknown player {}", id)))
    }

    /// Move a card from a hand onto the treasure discard pile.
    pub(crate) fn discard_from_hand(&mut self, id: PlayerId, card: TreasureCard) -> GameResult<()> {
        let player = self
            .players
            .get_mut(id.index())
            .ok_or_else(|| GameError::param(format!("unknown player {}", id)))?;
        player.discard_card(card, &mut self.treasure_deck)
    }

    pub(crate) fn current_id(&self) -> PlayerId {
        self.players
            .get(self.turn.current)
            .map_or(PlayerId::new(0), Player::id)
    }

    /// Zone of a placed player.
    pub(crate) fn player_zone(&self, id: PlayerId) -> GameResult<Coord> {
        self.player(id)?
            .zone()
            .ok_or_else(|| GameError::state(format!("{} is not on the board", id)))
    }

    /// Refuse everything once finished, and everything but setup before
    /// the game starts.
    pub(crate) fn ensure_started(&self) -> GameResult<()> {
        match self.mode {
            GameMode::SettingUp => Err(GameError::state("the game has not started")),
            GameMode::Finished(GameOutcome::Won) => Err(GameError::GameWon),
            GameMode::Finished(GameOutcome::Lost(reason)) => Err(GameError::GameOver(reason)),
            _ => Ok(()),
        }
    }

    /// Checks shared by every action-point command: right mode, right
    /// player, actions left.
    ///
    /// `pending` is true when the current mode is the choice this command
    /// resolves.
    pub(crate) fn ensure_turn_action(
        &self,
        player: PlayerId,
        action: &str,
        pending: bool,
    ) -> GameResult<()> {
        self.ensure_started()?;
        if self.mode != GameMode::Playing && !pending {
            return Err(GameError::state(format!("cannot {} while {}", action, self.mode)));
        }
        let current = self.current_id();
        if player != current {
            return Err(GameError::state(format!("it is {}'s turn, not {}'s", current, player)));
        }
        Ok(())
    }

    pub(crate) fn ensure_actions_left(&self, player: PlayerId) -> GameResult<()> {
        if self.player(player)?.actions_remaining() == 0 {
            return Err(GameError::state(format!("{} has no actions left", player)));
        }
        Ok(())
    }

    /// Accept `to` only if it is in `targets`, explaining why not otherwise.
    pub(crate) fn check_target(&self, targets: &[Coord], to: Coord) -> GameResult<()> {
        if targets.contains(&to) {
            return Ok(());
        }
        match self.board.zone(to) {
            None => Err(GameError::param(format!("{} is off the board", to))),
            Some(zone) if !zone.is_accessible() => Err(GameError::ZoneInaccessible(to)),
            Some(_) => Err(GameError::param(format!("{} is not a legal target", to))),
        }
    }

    /// Move a player between zones, keeping occupants in sync.
    pub(crate) fn relocate(&mut self, id: PlayerId, to: Coord) -> GameResult<()> {
        let from = self.player(id)?.zone();
        let target = self
            .board
            .zone(to)
            .ok_or_else(|| GameError::param(format!("{} is off the board", to)))?;
        if !target.is_accessible() {
            return Err(GameError::ZoneInaccessible(to));
        }
        if from == Some(to) {
            return Err(GameError::param(format!("{} is already on {}", id, to)));
        }

        if let Some(from) = from {
            self.board.zone_at_mut(from)?.remove_occupant(id)?;
        }
        self.board.zone_at_mut(to)?.add_occupant(id)?;
        self.player_at_mut(id)?.set_zone(Some(to));
        Ok(())
    }

    pub(crate) fn set_mode(&mut self, mode: GameMode, targets: Vec<Coord>) {
        debug!(from = %self.mode, to = %mode, "mode change");
        self.mode = mode;
        self.choice_targets = targets;
    }

    /// Leave a resolved choice. Anyone over the hand limit must discard
    /// before play continues.
    pub(crate) fn back_to_playing(&mut self) {
        let limit = self.config.hand_limit;
        let mode = match self.players.iter().find(|p| p.hand_size() > limit) {
            Some(player) => GameMode::Discarding { player: player.id() },
            None => GameMode::Playing,
        };
        self.set_mode(mode, Vec::new());
    }

    pub(crate) fn finish(&mut self, outcome: GameOutcome) {
        self.set_mode(GameMode::Finished(outcome), Vec::new());
    }
}
