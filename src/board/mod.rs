//! The island: tile identities, zones and the 5×5 board.
//!
//! ## Key Types
//!
//! - `TileId`: One of the 24 unique island tiles
//! - `Artefact`: The four treasures, each tied to two tiles
//! - `Zone`: A board cell with flood state and occupants
//! - `Board`: The grid, with tile lookup and neighbourhoods

pub mod grid;
pub mod tile;
pub mod zone;

pub use grid::{Board, Neighbours, BOARD_SIZE};
pub use tile::{Artefact, TileId, ZoneRole};
pub use zone::{Coord, Zone, ZoneState};
