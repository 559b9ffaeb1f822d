use super::minimax::{Minimax, Score};
use super::Player;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::hex::{HexBoard, HexCoord, Stone};

/// Which rule produced a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Engine moves first and takes the center.
    Opening,
    /// Engine's first stone, opponent opened away from the center.
    Centering,
    /// Opponent played into a bridge carrier; take an open endpoint.
    HoldBridge,
    /// Full minimax over every legal move.
    Search,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub mv: HexCoord,
    pub rule: Rule,
    /// Minimax value of the chosen move, when the search ran.
    pub score: Option<Score>,
    pub nodes: u64,
}

impl Decision {
    fn shortcut(mv: HexCoord, rule: Rule) -> Self {
        Decision {
            mv,
            rule,
            score: None,
            nodes: 0,
        }
    }
}

/// The engine: opening and bridge shortcuts in front of a minimax search.
#[derive(Debug)]
pub struct SearchPlayer {
    config: EngineConfig,
    last_seen: Option<HexCoord>,
}

impl SearchPlayer {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(SearchPlayer {
            config,
            last_seen: None,
        })
    }

    /// A fresh engine with the same settings playing `stone`.
    pub fn for_stone(&self, stone: Stone) -> SearchPlayer {
        SearchPlayer {
            config: EngineConfig {
                stone,
                ..self.config.clone()
            },
            last_seen: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The opponent move passed to the most recent decision.
    pub fn last_seen(&self) -> Option<HexCoord> {
        self.last_seen
    }

    /// Pick a cell to play. `None` means the board has no empty cell left.
    pub fn choose_move(&mut self, board: &HexBoard, last: Option<HexCoord>) -> Option<HexCoord> {
        self.choose_move_with_stats(board, last).map(|d| d.mv)
    }

    pub fn choose_move_with_stats(
        &mut self,
        board: &HexBoard,
        last: Option<HexCoord>,
    ) -> Option<Decision> {
        self.last_seen = last;
        let round = board.stones(self.config.stone).len() + 1;

        let decision = self
            .opening_move(board, last)
            .or_else(|| self.bridge_move(board, last))
            .or_else(|| self.search_move(board, last));

        match &decision {
            Some(d) if self.config.verbose => match d.rule {
                Rule::HoldBridge => println!("Round #{} | AI Holds Bridge at: {}", round, d.mv),
                _ => println!("Round #{} | AI Move: {}", round, d.mv),
            },
            Some(_) => {}
            None => eprintln!("Error in choose_move() : no legal moves"),
        }

        decision
    }

    fn opening_move(&self, board: &HexBoard, last: Option<HexCoord>) -> Option<Decision> {
        let center = HexCoord::center();
        if !board.is_empty(center) {
            return None;
        }

        match last {
            None => Some(Decision::shortcut(center, Rule::Opening)),
            Some(l) if l != center && board.stones(self.config.stone).is_empty() => {
                Some(Decision::shortcut(center, Rule::Centering))
            }
            Some(_) => None,
        }
    }

    fn bridge_move(&self, board: &HexBoard, last: Option<HexCoord>) -> Option<Decision> {
        if !self.config.hold_bridges {
            return None;
        }

        let last = last?;

        last.carried_bridges()
            .flat_map(|b| b.endpoints())
            .find(|&e| board.is_empty(e))
            .map(|e| Decision::shortcut(e, Rule::HoldBridge))
    }

    fn search_move(&self, board: &HexBoard, last: Option<HexCoord>) -> Option<Decision> {
        let ai = self.config.stone;
        let mut scratch = *board;
        let mut searcher = Minimax::new(ai);

        let mut best: Option<(Score, HexCoord)> = None;

        for m in board.legal_moves() {
            scratch.set(m, Some(ai));
            let score = searcher.search(&mut scratch, !ai, self.config.depth - 1, true, Some(m), last);
            scratch.set(m, None);

            // strict, so the earliest move keeps a tie
            if best.map_or(true, |(s, _)| score < s) {
                best = Some((score, m));
            }
        }

        let (score, mv) = best?;

        if self.config.verbose {
            println!("Processed {} nodes, value {}", searcher.nodes(), score);
        }

        Some(Decision {
            mv,
            rule: Rule::Search,
            score: Some(score),
            nodes: searcher.nodes(),
        })
    }
}

impl Player for SearchPlayer {
    fn make_move(&mut self, board: &HexBoard, last: Option<HexCoord>) -> Option<HexCoord> {
        self.choose_move(board, last)
    }

    fn ident(&self) -> String {
        format!("minimax-d{}", self.config.depth)
    }
}
