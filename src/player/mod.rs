use crate::hex::{HexBoard, HexCoord};

pub mod completion;
pub mod minimax;
pub mod random;
pub mod search;

pub use search::{Decision, Rule, SearchPlayer};

/// Anything that can answer a position with a move.
///
/// `last` is the opponent's most recent move, `None` at the start of a game.
/// Returning `None` means the player has nothing to play.
pub trait Player {
    fn make_move(&mut self, board: &HexBoard, last: Option<HexCoord>) -> Option<HexCoord>;

    fn ident(&self) -> String;
}
