//! Cards, decks and the water meter.
//!
//! ## Key Types
//!
//! - `TreasureCard`: Treasure, action and Water Rise cards
//! - `Deck<T>`: Draw/discard pile pair with reshuffle-on-empty
//! - `WaterMeter`: Level → flood rate lookup
//!
//! The flood deck is a `Deck<TileId>`: each drawn card names the zone that
//! floods next.

pub mod card;
pub mod deck;
pub mod water;

pub use card::{
    TreasureCard, CARDS_TO_CLAIM, HELICOPTER_LIFT_CARDS, SANDBAGS_CARDS,
    TREASURE_CARDS_PER_ARTEFACT, WATER_RISE_CARDS,
};
pub use deck::Deck;
pub use water::{WaterMeter, FLOOD_RATES, MAX_WATER_LEVEL};
