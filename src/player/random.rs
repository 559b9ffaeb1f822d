use super::Player;
use crate::hex::{HexBoard, HexCoord};

/// Baseline opponent; picks a pseudo-random empty cell, the same one for the
/// same board every time.
#[derive(Default)]
pub struct RandomPlayer();

impl Player for RandomPlayer {
    fn make_move(&mut self, board: &HexBoard, _last: Option<HexCoord>) -> Option<HexCoord> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return None;
        }

        let i = (9087901 + board.stone_count() * 7919) % moves.len();
        Some(moves[i])
    }

    fn ident(&self) -> String {
        "random".to_string()
    }
}
