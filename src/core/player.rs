//! Players, their identity and their roles.
//!
//! ## PlayerId
//!
//! Sequential identifier handed out by the engine when a player joins.
//!
//! ## Role
//!
//! Each player gets one of six roles. The role decides the start gate,
//! whether movement uses the 4- or 8-neighbourhood, and the special ability.
//!
//! ## Player
//!
//! Position, action budget, hand and collected artefacts. Hands and artefact
//! sets use `im` collections so cloning a player for a view is cheap.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};
use crate::board::{Artefact, Coord, TileId};
use crate::cards::{Deck, TreasureCard};

/// Player identifier, 0-based in join order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Adventurer role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Swims through flooded and sunken zones.
    Diver,
    /// Shores up two zones for one action.
    Engineer,
    /// Moves and shores up diagonally.
    Explorer,
    /// Gives treasure cards to anyone, anywhere.
    Messenger,
    /// Moves other players up to two zones.
    Navigator,
    /// Flies to any zone once per turn.
    Pilot,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Diver,
        Role::Engineer,
        Role::Explorer,
        Role::Messenger,
        Role::Navigator,
        Role::Pilot,
    ];

    /// Tile this role starts the game on.
    #[must_use]
    pub const fn start_tile(self) -> TileId {
        match self {
            Role::Diver => TileId::IronGate,
            Role::Engineer => TileId::BronzeGate,
            Role::Explorer => TileId::CopperGate,
            Role::Messenger => TileId::SilverGate,
            Role::Navigator => TileId::GoldGate,
            Role::Pilot => TileId::FoolsLanding,
        }
    }

    /// Explorer uses the 8-neighbourhood for moving and shoring up.
    #[must_use]
    pub const fn moves_diagonally(self) -> bool {
        matches!(self, Role::Explorer)
    }

    /// Diver may end a move on a flooded zone.
    #[must_use]
    pub const fn enters_flooded(self) -> bool {
        matches!(self, Role::Diver)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Diver => "Diver",
            Role::Engineer => "Engineer",
            Role::Explorer => "Explorer",
            Role::Messenger => "Messenger",
            Role::Navigator => "Navigator",
            Role::Pilot => "Pilot",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    role: Role,
    zone: Option<Coord>,
    actions_remaining: u8,
    hand: Vector<TreasureCard>,
    artefacts: OrdSet<Artefact>,
}

impl Player {
    /// Create an unplaced player with an empty hand.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            zone: None,
            actions_remaining: 0,
            hand: Vector::new(),
            artefacts: OrdSet::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Zone the player stands on, `None` before the game starts.
    #[must_use]
    pub fn zone(&self) -> Option<Coord> {
        self.zone
    }

    pub(crate) fn set_zone(&mut self, zone: Option<Coord>) {
        self.zone = zone;
    }

    // === Actions ===

    #[must_use]
    pub fn actions_remaining(&self) -> u8 {
        self.actions_remaining
    }

    pub fn reset_actions(&mut self, actions: u8) {
        self.actions_remaining = actions;
    }

    /// Consume one action.
    pub fn spend_action(&mut self) -> GameResult<()> {
        if self.actions_remaining == 0 {
            return Err(GameError::state(format!("{} has no actions left", self.name)));
        }
        self.actions_remaining -= 1;
        Ok(())
    }

    // === Hand ===

    #[must_use]
    pub fn hand(&self) -> &Vector<TreasureCard> {
        &self.hand
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn holds(&self, card: TreasureCard) -> bool {
        self.hand.contains(&card)
    }

    /// Number of cards of exactly this kind in hand.
    #[must_use]
    pub fn count_of(&self, card: TreasureCard) -> usize {
        self.hand.iter().filter(|&&c| c == card).count()
    }

    /// Add a card to the hand.
    ///
    /// `hard_cap` is the most cards a hand may ever hold, discard window
    /// included.
    pub fn take_card(&mut self, card: TreasureCard, hard_cap: usize) -> GameResult<()> {
        if self.hand.len() >= hard_cap {
            return Err(GameError::CapacityExceeded(format!(
                "{} already holds {} cards",
                self.name,
                self.hand.len()
            )));
        }
        self.hand.push_back(card);
        Ok(())
    }

    /// Remove one card of this kind from the hand.
    pub fn remove_card(&mut self, card: TreasureCard) -> GameResult<TreasureCard> {
        let pos = self
            .hand
            .index_of(&card)
            .ok_or_else(|| GameError::param(format!("{} does not hold {}", self.name, card)))?;
        Ok(self.hand.remove(pos))
    }

    /// Remove a card from the hand onto the deck's discard pile.
    pub fn discard_card(
        &mut self,
        card: TreasureCard,
        deck: &mut Deck<TreasureCard>,
    ) -> GameResult<()> {
        let card = self.remove_card(card)?;
        deck.discard(card);
        Ok(())
    }

    // === Artefacts ===

    /// Record a collected artefact. Adding twice is a no-op.
    pub fn add_artefact(&mut self, artefact: Artefact) {
        self.artefacts.insert(artefact);
    }

    #[must_use]
    pub fn artefacts(&self) -> &OrdSet<Artefact> {
        &self.artefacts
    }

    #[must_use]
    pub fn has_artefact(&self, artefact: Artefact) -> bool {
        self.artefacts.contains(&artefact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire() -> TreasureCard {
        TreasureCard::Treasure(Artefact::CrystalOfFire)
    }

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
        assert!(p0 < p1);
    }

    #[test]
    fn test_role_start_tiles_are_distinct() {
        let mut tiles: Vec<_> = Role::ALL.iter().map(|r| r.start_tile()).collect();
        tiles.sort();
        tiles.dedup();
        assert_eq!(tiles.len(), Role::ALL.len());
    }

    #[test]
    fn test_role_abilities() {
        assert!(Role::Explorer.moves_diagonally());
        assert!(!Role::Pilot.moves_diagonally());
        assert!(Role::Diver.enters_flooded());
        assert!(!Role::Engineer.enters_flooded());
    }

    #[test]
    fn test_spend_actions() {
        let mut player = Player::new(PlayerId::new(0), "Ada", Role::Pilot);
        assert!(player.spend_action().is_err());

        player.reset_actions(2);
        assert!(player.spend_action().is_ok());
        assert!(player.spend_action().is_ok());
        assert_eq!(player.actions_remaining(), 0);

        let err = player.spend_action().unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
    }

    #[test]
    fn test_hand_cap() {
        let mut player = Player::new(PlayerId::new(0), "Ada", Role::Pilot);
        player.take_card(fire(), 2).unwrap();
        player.take_card(TreasureCard::Sandbags, 2).unwrap();

        let err = player.take_card(fire(), 2).unwrap_err();
        assert!(matches!(err, GameError::CapacityExceeded(_)));
        assert_eq!(player.hand_size(), 2);
    }

    #[test]
    fn test_remove_and_discard() {
        let mut deck = Deck::with_piles(Vec::new(), Vec::new());
        let mut player = Player::new(PlayerId::new(0), "Ada", Role::Diver);
        player.take_card(fire(), 7).unwrap();
        player.take_card(fire(), 7).unwrap();

        assert_eq!(player.count_of(fire()), 2);
        player.discard_card(fire(), &mut deck).unwrap();
        assert_eq!(player.count_of(fire()), 1);
        assert_eq!(deck.discard_pile(), &[fire()]);

        let err = player.remove_card(TreasureCard::HelicopterLift).unwrap_err();
        assert!(matches!(err, GameError::InvalidParameter(_)));
    }

    #[test]
    fn test_add_artefact_is_idempotent() {
        let mut player = Player::new(PlayerId::new(0), "Ada", Role::Diver);
        player.add_artefact(Artefact::EarthStone);
        player.add_artefact(Artefact::EarthStone);

        assert_eq!(player.artefacts().len(), 1);
        assert!(player.has_artefact(Artefact::EarthStone));
    }
}
