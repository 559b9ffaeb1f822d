use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::hex::{HexBoard, HexCoord, Stone, BOARD_SIZE};
use crate::player::{Player, SearchPlayer};

use rustc_hash::FxHashMap;

pub type PlayerConstructor<'a> = &'a dyn Fn(Stone) -> Box<dyn Player>;

pub fn default_player<T>(_stone: Stone) -> Box<dyn Player>
where
    T: Player + Default + 'static,
{
    Box::new(T::default())
}

/// Constructor for engines built from `config`, validated once up front. The
/// configured stone is replaced by the colour each game assigns.
pub fn search_player(config: EngineConfig) -> Result<impl Fn(Stone) -> Box<dyn Player>, ConfigError> {
    let template = SearchPlayer::new(config)?;
    Ok(move |stone: Stone| Box::new(template.for_stone(stone)) as Box<dyn Player>)
}

/// How one game went.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub board: HexBoard,
    pub moves: Vec<HexCoord>,
    pub winner: Stone,
    /// The loser returned no move or an occupied cell.
    pub forfeit: bool,
}

/// Play one game, `cons_w` as White (moving first) against `cons_b`.
pub fn play_game(cons_w: PlayerConstructor, cons_b: PlayerConstructor) -> GameRecord {
    let mut players = [cons_w(Stone::White), cons_b(Stone::Black)];

    let mut board = HexBoard::new();
    let mut moves = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
    let mut last = None;
    let mut turn = Stone::White;

    loop {
        let player = &mut players[(turn.code() - 1) as usize];
        let placed = player
            .make_move(&board, last)
            .map(|m| board.place(m, turn).map(|_| m));

        let m = match placed {
            Some(Ok(m)) => m,
            Some(Err(e)) => {
                println!("{} ({}) forfeits: {}", player.ident(), turn, e);
                return GameRecord {
                    board,
                    moves,
                    winner: !turn,
                    forfeit: true,
                };
            }
            None => {
                println!("{} ({}) forfeits: no move", player.ident(), turn);
                return GameRecord {
                    board,
                    moves,
                    winner: !turn,
                    forfeit: true,
                };
            }
        };

        moves.push(m);
        last = Some(m);

        // a full hex board always has a winner
        if let Some(w) = board.winner() {
            return GameRecord {
                board,
                moves,
                winner: w,
                forfeit: false,
            };
        }

        turn = !turn;
    }
}

/// Score of one game as (a, b), `a` playing White.
pub fn run_game(cons_a: PlayerConstructor, cons_b: PlayerConstructor) -> (f32, f32) {
    match play_game(cons_a, cons_b).winner {
        Stone::White => (1.0, 0.0),
        Stone::Black => (0.0, 1.0),
    }
}

/// Play `rounds` games, swapping colours each game, and move both Elo
/// ratings toward the observed score.
pub fn run_match(
    cons_a: PlayerConstructor,
    cons_b: PlayerConstructor,
    elos: &mut FxHashMap<String, f32>,
    rounds: usize,
) {
    let ident_a = cons_a(Stone::White).ident();
    let ident_b = cons_b(Stone::White).ident();

    let elo_a = *elos.entry(ident_a.clone()).or_insert(1000.0);
    let elo_b = *elos.entry(ident_b.clone()).or_insert(1000.0);

    let q_a = 10.0f32.powf(elo_a / 400.0);
    let q_b = 10.0f32.powf(elo_b / 400.0);

    let e_a = q_a / (q_a + q_b); // expected result for player a
    let e_b = 1.0 - e_a;

    let mut s_a = 0.0;
    let mut s_b = 0.0;

    for round in 0..rounds {
        let round_score = if round % 2 == 0 {
            run_game(cons_a, cons_b)
        } else {
            let (b, a) = run_game(cons_b, cons_a);
            (a, b)
        };
        s_a += round_score.0 / (rounds as f32);
        s_b += round_score.1 / (rounds as f32);
    }

    let k = 32.0; // reasonable choice, lower changes ratings more slower

    if let Some(elo) = elos.get_mut(&ident_a) {
        *elo += k * (s_a - e_a);
    }
    if let Some(elo) = elos.get_mut(&ident_b) {
        *elo += k * (s_b - e_b);
    }
}
