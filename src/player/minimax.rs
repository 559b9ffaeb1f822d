use super::completion::completion_from;
use crate::hex::{HexBoard, HexCoord, Stone};

/// Lower is better for the engine.
pub type Score = i32;

/// Exhaustive fixed-depth minimax from the engine's point of view.
///
/// The engine minimizes, its opponent maximizes. Every node is expanded and
/// nothing is cached, so the visit count for a given board and depth is
/// always the same.
pub struct Minimax {
    ai: Stone,
    nodes: u64,
}

impl Minimax {
    pub fn new(ai: Stone) -> Self {
        Minimax { ai, nodes: 0 }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Score `board` with `to_move` about to play and `depth` plies left.
    ///
    /// Moves are applied to `board` in place and undone before returning, so
    /// the board comes back unchanged.
    pub fn search(
        &mut self,
        board: &mut HexBoard,
        to_move: Stone,
        depth: usize,
        opponent_turn: bool,
        ai_last: Option<HexCoord>,
        opp_last: Option<HexCoord>,
    ) -> Score {
        self.nodes += 1;

        if depth == 0 || board.is_full() {
            return self.evaluate(board, ai_last, opp_last);
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            return self.evaluate(board, ai_last, opp_last);
        }

        if opponent_turn {
            let mut value = Score::MIN;

            for m in moves {
                board.set(m, Some(to_move));
                let node_val = self.search(board, !to_move, depth - 1, false, ai_last, Some(m));
                board.set(m, None);

                value = value.max(node_val);
            }

            value
        } else {
            let mut value = Score::MAX;

            for m in moves {
                board.set(m, Some(to_move));
                let node_val = self.search(board, !to_move, depth - 1, true, Some(m), opp_last);
                board.set(m, None);

                value = value.min(node_val);
            }

            value
        }
    }

    /// Leaf value: the engine's n-completion minus its opponent's.
    ///
    /// Both are measured edge to edge over every stone on the board; the last
    /// moves only choose which starting cells are scanned first.
    pub fn evaluate(
        &self,
        board: &HexBoard,
        ai_last: Option<HexCoord>,
        opp_last: Option<HexCoord>,
    ) -> Score {
        let ai_n = completion_from(board, self.ai, ai_last);
        let opp_n = completion_from(board, !self.ai, opp_last);

        ai_n - opp_n
    }
}
