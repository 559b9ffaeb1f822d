use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rustc_hash::FxHashMap;

use hexmind::config::DEFAULT_DEPTH;
use hexmind::player::random::RandomPlayer;
use hexmind::tourny::{default_player, play_game, run_match, search_player, PlayerConstructor};
use hexmind::{BoardError, EngineConfig, HexBoard, HexCoord, SearchPlayer, Stone};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pick a move for a position read from a file ("-" for stdin)
    Choose {
        #[arg(short, long)]
        board: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Side::White)]
        stone: Side,

        /// Opponent's last move as "x,y"; "-1,-1" or absent means none
        #[arg(short, long, allow_hyphen_values = true)]
        last: Option<String>,

        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: usize,

        #[arg(long, action = clap::ArgAction::SetTrue)]
        no_bridges: bool,

        #[arg(short, long, action = clap::ArgAction::SetTrue)]
        verbose: bool,
    },

    /// Play one game and show the final board
    Play {
        #[arg(long, value_enum, default_value_t = Kind::Minimax)]
        white: Kind,

        #[arg(long, value_enum, default_value_t = Kind::Random)]
        black: Kind,

        #[arg(short, long, default_value_t = 2)]
        depth: usize,

        #[arg(long, action = clap::ArgAction::SetTrue)]
        no_bridges: bool,
    },

    /// Round robin between the built-in players, reporting Elo
    Tourny {
        #[arg(short, long, default_value_t = 4)]
        rounds: usize,

        #[arg(short, long, default_value_t = 2)]
        depth: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Stone {
    fn from(side: Side) -> Stone {
        match side {
            Side::White => Stone::White,
            Side::Black => Stone::Black,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Minimax,
    Random,
}

fn parse_last(s: &str) -> Result<Option<HexCoord>> {
    let (x, y) = s
        .split_once(',')
        .with_context(|| format!("expected \"x,y\", got \"{}\"", s))?;
    let x: i32 = x.trim().parse().with_context(|| format!("bad x in \"{}\"", s))?;
    let y: i32 = y.trim().parse().with_context(|| format!("bad y in \"{}\"", s))?;

    if (x, y) == (-1, -1) {
        return Ok(None);
    }

    match HexCoord::checked(x, y) {
        Some(c) => Ok(Some(c)),
        None => Err(BoardError::OffBoard { x, y }.into()),
    }
}

fn read_board(path: &Path) -> Result<HexBoard> {
    let text = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("reading board from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading board from {}", path.display()))?
    };

    Ok(text.parse::<HexBoard>()?)
}

fn choose(config: EngineConfig, board: &HexBoard, last: Option<HexCoord>) -> Result<()> {
    let mut player = SearchPlayer::new(config)?;

    match player.choose_move_with_stats(board, last) {
        Some(d) => {
            println!("{} {}", d.mv.x(), d.mv.y());
            if player.config().verbose {
                println!("rule {:?}, score {:?}, {} nodes", d.rule, d.score, d.nodes);
            }
            Ok(())
        }
        None => bail!("no legal moves: the board is full"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Choose {
            board,
            stone,
            last,
            depth,
            no_bridges,
            verbose,
        } => {
            let config = EngineConfig::new(stone.into())
                .with_depth(depth)
                .with_hold_bridges(!no_bridges)
                .with_verbose(verbose);
            let last = last.as_deref().map(parse_last).transpose()?.flatten();

            choose(config, &read_board(&board)?, last)
        }
        Command::Play {
            white,
            black,
            depth,
            no_bridges,
        } => {
            let config = EngineConfig::default()
                .with_depth(depth)
                .with_hold_bridges(!no_bridges);
            let engine = search_player(config)?;
            let random = default_player::<RandomPlayer>;

            let cons_w: PlayerConstructor = match white {
                Kind::Minimax => &engine,
                Kind::Random => &random,
            };
            let cons_b: PlayerConstructor = match black {
                Kind::Minimax => &engine,
                Kind::Random => &random,
            };

            let record = play_game(cons_w, cons_b);

            println!("{}", record.board);
            println!(
                "{} wins after {} moves{}",
                record.winner,
                record.moves.len(),
                if record.forfeit { " by forfeit" } else { "" }
            );
            Ok(())
        }
        Command::Tourny { rounds, depth } => {
            let shallow = search_player(EngineConfig::default().with_depth(1))?;
            let deep = search_player(EngineConfig::default().with_depth(depth))?;
            let random = default_player::<RandomPlayer>;

            let mut entrants: Vec<PlayerConstructor> = Vec::new();
            entrants.push(&random);
            entrants.push(&shallow);
            if depth != 1 {
                entrants.push(&deep);
            }

            let mut elos = FxHashMap::default();

            for (i, &a) in entrants.iter().enumerate() {
                for &b in entrants.iter().skip(i + 1) {
                    run_match(a, b, &mut elos, rounds);
                }
            }

            let mut table: Vec<_> = elos.into_iter().collect();
            table.sort_by(|a, b| b.1.total_cmp(&a.1));

            for (ident, elo) in table {
                println!("{:>12} {:7.1}", ident, elo);
            }
            Ok(())
        }
    }
}
