//! The island board: a fixed 5×5 grid of zones.
//!
//! 24 tiles fill every cell except the centre, which starts sunk and holds no
//! tile. Zones are stored row-major in an `im::Vector` so cloning the board
//! for a view is O(1); a tile → coordinate index answers flood-card lookups.
//!
//! ## Usage
//!
//! ```
//! use island_engine::board::{Board, TileId, ZoneRole};
//! use island_engine::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let board = Board::generate(&mut rng).unwrap();
//!
//! let pad = board.helicopter_pad();
//! assert_eq!(board.zone(pad).unwrap().role(), ZoneRole::Helicopter);
//! assert!(board.zone_of_tile(TileId::Watchtower).is_some());
//! ```

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::tile::{Artefact, TileId, ZoneRole};
use super::zone::{Coord, Zone};
use crate::core::{GameError, GameResult, GameRng, Role};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 5;

/// Neighbour list; at most 8 entries.
pub type Neighbours = SmallVec<[Coord; 8]>;

/// Fixed-size grid of zones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    zones: Vector<Zone>,
    tile_index: FxHashMap<TileId, Coord>,
}

impl Board {
    /// The cell forced under water at setup.
    #[must_use]
    pub const fn center() -> Coord {
        Coord::new(BOARD_SIZE / 2, BOARD_SIZE / 2)
    }

    /// Build a board with the 24 tiles randomly spread over the grid.
    pub fn generate(rng: &mut GameRng) -> GameResult<Self> {
        let mut pool = TileId::ALL.to_vec();
        let mut layout = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);

        for coord in Self::coords() {
            if coord == Self::center() {
                layout.push(None);
                continue;
            }
            let tile = rng
                .take_random(&mut pool)
                .ok_or_else(|| GameError::ResourceExhausted("all 24 tiles assigned".into()))?;
            layout.push(Some(tile));
        }

        Self::from_layout(&layout)
    }

    /// Build a board from an explicit row-major layout.
    ///
    /// `None` cells start inaccessible. Every tile must appear exactly once.
    pub fn from_layout(layout: &[Option<TileId>]) -> GameResult<Self> {
        if layout.len() != BOARD_SIZE * BOARD_SIZE {
            return Err(GameError::param(format!(
                "layout has {} cells, expected {}",
                layout.len(),
                BOARD_SIZE * BOARD_SIZE
            )));
        }

        let mut zones = Vector::new();
        let mut tile_index = FxHashMap::default();

        for (coord, tile) in Self::coords().zip(layout.iter().copied()) {
            match tile {
                Some(tile) => {
                    if tile_index.insert(tile, coord).is_some() {
                        return Err(GameError::param(format!("tile {} placed twice", tile)));
                    }
                    zones.push_back(Zone::new(coord, tile));
                }
                None => zones.push_back(Zone::sunk(coord)),
            }
        }

        if tile_index.len() != TileId::COUNT {
            return Err(GameError::param(format!(
                "layout places {} tiles, expected {}",
                tile_index.len(),
                TileId::COUNT
            )));
        }

        Ok(Self { zones, tile_index })
    }

    /// All coordinates in row-major order.
    pub fn coords() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord::new(x, y)))
    }

    #[must_use]
    pub fn contains(coord: Coord) -> bool {
        coord.x < BOARD_SIZE && coord.y < BOARD_SIZE
    }

    fn offset(coord: Coord) -> Option<usize> {
        Self::contains(coord).then(|| coord.y * BOARD_SIZE + coord.x)
    }

    // === Zone access ===

    #[must_use]
    pub fn zone(&self, coord: Coord) -> Option<&Zone> {
        self.zones.get(Self::offset(coord)?)
    }

    pub fn zone_mut(&mut self, coord: Coord) -> Option<&mut Zone> {
        let offset = Self::offset(coord)?;
        self.zones.get_mut(offset)
    }

    /// Zone at `(x, y)`, failing off the board.
    pub fn zone_at(&self, x: usize, y: usize) -> GameResult<&Zone> {
        let coord = Coord::new(x, y);
        self.zone(coord)
            .ok_or_else(|| GameError::param(format!("{} is off the board", coord)))
    }

    pub(crate) fn zone_at_mut(&mut self, coord: Coord) -> GameResult<&mut Zone> {
        self.zone_mut(coord)
            .ok_or_else(|| GameError::param(format!("{} is off the board", coord)))
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    /// Coordinate of the zone holding `tile`.
    #[must_use]
    pub fn zone_of_tile(&self, tile: TileId) -> Option<Coord> {
        self.tile_index.get(&tile).copied()
    }

    // === Special zones ===

    /// Coordinate of Fools' Landing.
    ///
    /// Boards without the pad are a construction bug; the centre is returned
    /// so that callers see an inaccessible pad.
    #[must_use]
    pub fn helicopter_pad(&self) -> Coord {
        self.zones
            .iter()
            .find(|z| z.role() == ZoneRole::Helicopter)
            .map_or(Self::center(), Zone::coord)
    }

    /// Where a player of `role` starts.
    #[must_use]
    pub fn start_zone(&self, role: Role) -> Option<Coord> {
        self.zone_of_tile(role.start_tile())
    }

    /// The zones `artefact` can be claimed on.
    #[must_use]
    pub fn artefact_zones(&self, artefact: Artefact) -> SmallVec<[Coord; 2]> {
        artefact
            .tiles()
            .iter()
            .filter_map(|&tile| self.zone_of_tile(tile))
            .collect()
    }

    /// True once every zone of `artefact` has sunk.
    #[must_use]
    pub fn artefact_sunk(&self, artefact: Artefact) -> bool {
        self.artefact_zones(artefact)
            .iter()
            .all(|&c| self.zone(c).map_or(true, |z| !z.is_accessible()))
    }

    /// On-board neighbours of `coord` in the 4- or 8-neighbourhood.
    #[must_use]
    pub fn neighbours(&self, coord: Coord, diagonal: bool) -> Neighbours {
        let xs = coord.x.saturating_sub(1)..=(coord.x + 1).min(BOARD_SIZE - 1);
        let ys = coord.y.saturating_sub(1)..=(coord.y + 1).min(BOARD_SIZE - 1);

        ys.flat_map(|y| xs.clone().map(move |x| Coord::new(x, y)))
            .filter(|&c| coord.is_neighbour(c, diagonal))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ZoneState;

    fn ordered_layout() -> Vec<Option<TileId>> {
        let mut tiles = TileId::ALL.iter().copied();
        Board::coords()
            .map(|c| if c == Board::center() { None } else { tiles.next() })
            .collect()
    }

    #[test]
    fn test_generate_places_every_tile_once() {
        let mut rng = GameRng::new(42);
        let board = Board::generate(&mut rng).unwrap();

        for tile in TileId::ALL {
            assert!(board.zone_of_tile(tile).is_some(), "{} missing", tile);
        }
        let center = board.zone(Board::center()).unwrap();
        assert_eq!(center.tile(), None);
        assert_eq!(center.state(), ZoneState::Inaccessible);
        assert_eq!(board.zones().filter(|z| z.tile().is_some()).count(), 24);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = Board::generate(&mut GameRng::new(9)).unwrap();
        let b = Board::generate(&mut GameRng::new(9)).unwrap();
        let c = Board::generate(&mut GameRng::new(10)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_from_layout_rejects_duplicates() {
        let mut layout = ordered_layout();
        layout[1] = layout[0];
        assert!(matches!(
            Board::from_layout(&layout),
            Err(GameError::InvalidParameter(_))
        ));
        assert!(Board::from_layout(&layout[..3]).is_err());

        let mut missing = ordered_layout();
        missing[0] = None;
        assert!(matches!(
            Board::from_layout(&missing),
            Err(GameError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_tile_lookup() {
        let board = Board::from_layout(&ordered_layout()).unwrap();
        assert_eq!(board.zone_of_tile(TileId::BreakersBridge), Some(Coord::new(0, 0)));
        assert_eq!(board.zone_of_tile(TileId::BronzeGate), Some(Coord::new(1, 0)));
        assert_eq!(
            board.zone(board.helicopter_pad()).unwrap().tile(),
            Some(TileId::FoolsLanding)
        );
        assert_eq!(
            board.start_zone(Role::Engineer),
            board.zone_of_tile(TileId::BronzeGate)
        );
        assert_eq!(board.artefact_zones(Artefact::EarthStone).len(), 2);
    }

    #[test]
    fn test_zone_at_bounds() {
        let board = Board::from_layout(&ordered_layout()).unwrap();
        assert!(board.zone_at(4, 4).is_ok());
        assert!(matches!(board.zone_at(5, 0), Err(GameError::InvalidParameter(_))));
    }

    #[test]
    fn test_neighbours() {
        let board = Board::from_layout(&ordered_layout()).unwrap();

        assert_eq!(board.neighbours(Coord::new(0, 0), false).len(), 2);
        assert_eq!(board.neighbours(Coord::new(0, 0), true).len(), 3);
        assert_eq!(board.neighbours(Coord::new(1, 1), false).len(), 4);
        assert_eq!(board.neighbours(Coord::new(1, 1), true).len(), 8);
        assert!(board.neighbours(Coord::new(1, 1), true).contains(&Coord::new(0, 0)));
        assert!(!board.neighbours(Coord::new(1, 1), false).contains(&Coord::new(0, 0)));

        // Far corner and edges clip to the board
        let corner = board.neighbours(Coord::new(4, 4), true);
        assert_eq!(
            corner.as_slice(),
            &[Coord::new(3, 3), Coord::new(4, 3), Coord::new(3, 4)]
        );
        assert_eq!(board.neighbours(Coord::new(4, 2), false).len(), 3);
        assert_eq!(board.neighbours(Coord::new(2, 4), true).len(), 5);
    }

    #[test]
    fn test_artefact_sunk() {
        let mut board = Board::from_layout(&ordered_layout()).unwrap();
        let zones = board.artefact_zones(Artefact::CrystalOfFire);

        board.zone_mut(zones[0]).unwrap().flood();
        board.zone_mut(zones[0]).unwrap().flood();
        assert!(!board.artefact_sunk(Artefact::CrystalOfFire));

        board.zone_mut(zones[1]).unwrap().flood();
        board.zone_mut(zones[1]).unwrap().flood();
        assert!(board.artefact_sunk(Artefact::CrystalOfFire));
    }
}
