//! The rules engine.
//!
//! ## Key Types
//!
//! - `GameEngine`: Owns all game state and exposes every command and query
//! - `GameMode`: The engine's current mode, including pending choices
//! - `TurnReport`: Events and outcome of ending a turn
//! - `GameView`: Cloneable public snapshot for displays
//!
//! Target legality lives in `movement` as pure functions over the board.

mod actions;
pub mod engine;
pub mod mode;
pub mod movement;
pub mod turn;
pub mod view;

pub use engine::GameEngine;
pub use mode::{CardPlay, GameMode, GameOutcome, PlayerList, PossibleAction};
pub use turn::{TurnEvent, TurnOutcome, TurnReport};
pub use view::GameView;
