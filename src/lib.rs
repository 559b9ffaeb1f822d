//! Move selection for Hex on a 7×7 board.
//!
//! [`player::SearchPlayer`] answers a position and the opponent's last move
//! with a cell to play: fixed opening replies and bridge defence first, then
//! an exhaustive minimax scored by each side's n-completion value (the fewest
//! stones still needed to join its two edges).

pub mod config;
pub mod error;
pub mod hex;
pub mod player;
pub mod tourny;

pub use config::EngineConfig;
pub use error::{BoardError, ConfigError};
pub use hex::{HexBoard, HexCoord, Stone, BOARD_SIZE};
pub use player::{Decision, Player, Rule, SearchPlayer};
