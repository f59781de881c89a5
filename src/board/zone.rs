//! A single board cell.
//!
//! A zone has a position, a flood state, the tile it holds (if any), a role
//! fixed at construction and the set of players standing on it.
//!
//! Flooding is one-way without help: `Normal -> Flooded -> Inaccessible`.
//! Shoring up reverses only the first step.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::tile::{TileId, ZoneRole};
use crate::core::{GameError, GameResult, PlayerId};

/// Board coordinate, `(0, 0)` at the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    fn deltas(self, other: Coord) -> (usize, usize) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }

    /// Orthogonal neighbour (4-neighbourhood).
    #[must_use]
    pub fn is_adjacent(self, other: Coord) -> bool {
        matches!(self.deltas(other), (1, 0) | (0, 1))
    }

    /// Diagonal neighbour.
    #[must_use]
    pub fn is_diagonal(self, other: Coord) -> bool {
        self.deltas(other) == (1, 1)
    }

    /// Neighbour in the 4- or 8-neighbourhood.
    #[must_use]
    pub fn is_neighbour(self, other: Coord, diagonal: bool) -> bool {
        self.is_adjacent(other) || (diagonal && self.is_diagonal(other))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Flood state of a zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneState {
    #[default]
    Normal,
    Flooded,
    Inaccessible,
}

/// One board cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    coord: Coord,
    state: ZoneState,
    tile: Option<TileId>,
    role: ZoneRole,
    occupants: OrdSet<PlayerId>,
}

impl Zone {
    /// Create a dry zone holding `tile`.
    #[must_use]
    pub fn new(coord: Coord, tile: TileId) -> Self {
        Self {
            coord,
            state: ZoneState::Normal,
            tile: Some(tile),
            role: tile.role(),
            occupants: OrdSet::new(),
        }
    }

    /// Create a zone with no tile that is already under water.
    #[must_use]
    pub fn sunk(coord: Coord) -> Self {
        Self {
            coord,
            state: ZoneState::Inaccessible,
            tile: None,
            role: ZoneRole::Casual,
            occupants: OrdSet::new(),
        }
    }

    #[must_use]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[must_use]
    pub fn state(&self) -> ZoneState {
        self.state
    }

    #[must_use]
    pub fn tile(&self) -> Option<TileId> {
        self.tile
    }

    #[must_use]
    pub fn role(&self) -> ZoneRole {
        self.role
    }

    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.state != ZoneState::Inaccessible
    }

    #[must_use]
    pub fn is_flooded(&self) -> bool {
        self.state == ZoneState::Flooded
    }

    #[must_use]
    pub fn is_normal(&self) -> bool {
        self.state == ZoneState::Normal
    }

    /// Advance the flood state one step and return the new state.
    ///
    /// Flooding an inaccessible zone leaves it inaccessible.
    pub fn flood(&mut self) -> ZoneState {
        self.state = match self.state {
            ZoneState::Normal => ZoneState::Flooded,
            ZoneState::Flooded | ZoneState::Inaccessible => ZoneState::Inaccessible,
        };
        self.state
    }

    /// Bring a flooded zone back to normal.
    pub fn shore_up(&mut self) -> GameResult<()> {
        match self.state {
            ZoneState::Flooded => {
                self.state = ZoneState::Normal;
                Ok(())
            }
            ZoneState::Inaccessible => Err(GameError::ZoneInaccessible(self.coord)),
            ZoneState::Normal => Err(GameError::param(format!(
                "zone {} is not flooded",
                self.coord
            ))),
        }
    }

    // === Occupants ===

    #[must_use]
    pub fn occupants(&self) -> &OrdSet<PlayerId> {
        &self.occupants
    }

    #[must_use]
    pub fn has_occupant(&self, player: PlayerId) -> bool {
        self.occupants.contains(&player)
    }

    /// Put a player on this zone.
    pub fn add_occupant(&mut self, player: PlayerId) -> GameResult<()> {
        if !self.is_accessible() {
            return Err(GameError::ZoneInaccessible(self.coord));
        }
        if self.occupants.contains(&player) {
            return Err(GameError::param(format!(
                "{} is already on zone {}",
                player, self.coord
            )));
        }
        self.occupants.insert(player);
        Ok(())
    }

    /// Take a player off this zone. Works on sunk zones too.
    pub fn remove_occupant(&mut self, player: PlayerId) -> GameResult<()> {
        self.occupants
            .remove(&player)
            .map(|_| ())
            .ok_or_else(|| GameError::param(format!("{} is not on zone {}", player, self.coord)))
    }

    /// Orthogonal neighbour of `other`.
    #[must_use]
    pub fn is_adjacent(&self, other: &Zone) -> bool {
        self.coord.is_adjacent(other.coord)
    }

    /// Diagonal neighbour of `other`.
    #[must_use]
    pub fn is_diagonal(&self, other: &Zone) -> bool {
        self.coord.is_diagonal(other.coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Artefact, TileId};

    fn zone() -> Zone {
        Zone::new(Coord::new(1, 1), TileId::Observatory)
    }

    #[test]
    fn test_flood_progression() {
        let mut z = zone();
        assert_eq!(z.flood(), ZoneState::Flooded);
        assert_eq!(z.flood(), ZoneState::Inaccessible);
        assert_eq!(z.flood(), ZoneState::Inaccessible);
        assert!(!z.is_accessible());
    }

    #[test]
    fn test_shore_up() {
        let mut z = zone();

        let err = z.shore_up().unwrap_err();
        assert!(matches!(err, GameError::InvalidParameter(_)));

        z.flood();
        z.shore_up().unwrap();
        assert!(z.is_normal());

        z.flood();
        z.flood();
        let err = z.shore_up().unwrap_err();
        assert_eq!(err, GameError::ZoneInaccessible(Coord::new(1, 1)));
    }

    #[test]
    fn test_occupants() {
        let mut z = zone();
        let p = PlayerId::new(0);

        z.add_occupant(p).unwrap();
        assert!(z.has_occupant(p));
        assert!(matches!(z.add_occupant(p), Err(GameError::InvalidParameter(_))));

        z.remove_occupant(p).unwrap();
        assert!(matches!(z.remove_occupant(p), Err(GameError::InvalidParameter(_))));
    }

    #[test]
    fn test_no_entry_when_sunk() {
        let mut z = zone();
        z.add_occupant(PlayerId::new(0)).unwrap();
        z.flood();
        z.flood();

        // Stranded occupant stays until rescued
        assert!(z.has_occupant(PlayerId::new(0)));
        assert_eq!(
            z.add_occupant(PlayerId::new(1)),
            Err(GameError::ZoneInaccessible(Coord::new(1, 1)))
        );
        z.remove_occupant(PlayerId::new(0)).unwrap();
    }

    #[test]
    fn test_role_from_tile() {
        let z = Zone::new(Coord::new(0, 0), TileId::CoralPalace);
        assert_eq!(z.role(), ZoneRole::ArtefactAssociated(Artefact::OceansChalice));

        let s = Zone::sunk(Coord::new(2, 2));
        assert_eq!(s.tile(), None);
        assert_eq!(s.state(), ZoneState::Inaccessible);
    }

    #[test]
    fn test_geometry() {
        let c = Coord::new(1, 1);
        assert!(c.is_adjacent(Coord::new(1, 0)));
        assert!(c.is_adjacent(Coord::new(2, 1)));
        assert!(!c.is_adjacent(Coord::new(0, 0)));
        assert!(c.is_diagonal(Coord::new(0, 0)));
        assert!(!c.is_diagonal(Coord::new(1, 2)));
        assert!(!c.is_adjacent(c));
        assert!(c.is_neighbour(Coord::new(2, 2), true));
        assert!(!c.is_neighbour(Coord::new(2, 2), false));
        assert!(!c.is_neighbour(Coord::new(3, 1), true));
    }
}
