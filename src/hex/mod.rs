use std::fmt;
use std::ops::Not;
use std::str::FromStr;

use crate::error::BoardError;

mod grid;

pub use grid::{Bridge, CellSet, HexCoord, BOARD_SIZE, HEXDIR};

/// A placed stone. White joins the top and bottom rows, Black the left and
/// right columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stone {
    White,
    Black,
}

impl Not for Stone {
    type Output = Stone;

    fn not(self) -> Stone {
        match self {
            Stone::White => Stone::Black,
            Stone::Black => Stone::White,
        }
    }
}

impl From<Stone> for char {
    fn from(x: Stone) -> char {
        match x {
            Stone::White => 'W',
            Stone::Black => 'B',
        }
    }
}

impl Stone {
    pub fn code(&self) -> u8 {
        match self {
            Stone::White => 1,
            Stone::Black => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Stone> {
        match code {
            1 => Some(Stone::White),
            2 => Some(Stone::Black),
            _ => None,
        }
    }

    /// Position of `c` along this player's direction of travel.
    pub fn lane(&self, c: HexCoord) -> usize {
        match self {
            Stone::White => c.y(),
            Stone::Black => c.x(),
        }
    }

    /// The `i`th cell of this player's starting edge.
    pub fn start_cell(&self, i: usize) -> HexCoord {
        let i = i as i8;
        match self {
            Stone::White => HexCoord::new(i, 0),
            Stone::Black => HexCoord::new(0, i),
        }
    }

    /// The `i`th cell of the edge this player is heading for.
    pub fn far_cell(&self, i: usize) -> HexCoord {
        let i = i as i8;
        let far = (BOARD_SIZE - 1) as i8;
        match self {
            Stone::White => HexCoord::new(i, far),
            Stone::Black => HexCoord::new(far, i),
        }
    }

    pub fn on_far_edge(&self, c: HexCoord) -> bool {
        self.lane(c) == BOARD_SIZE - 1
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::White => write!(f, "white"),
            Stone::Black => write!(f, "black"),
        }
    }
}

type Cells = [[Option<Stone>; BOARD_SIZE]; BOARD_SIZE];

/// Occupancy of the whole board, indexed `[y][x]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HexBoard {
    cells: Cells,
}

impl HexBoard {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_codes(codes: &[[u8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, BoardError> {
        let mut board = HexBoard::new();

        for (y, row) in codes.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let at = HexCoord::new(x as i8, y as i8);
                board.cells[y][x] = match code {
                    0 => None,
                    c => Some(Stone::from_code(c).ok_or(BoardError::BadCode { code: c, at })?),
                };
            }
        }

        Ok(board)
    }

    pub fn get(&self, c: HexCoord) -> Option<Stone> {
        self.cells[c.y()][c.x()]
    }

    pub fn is_empty(&self, c: HexCoord) -> bool {
        self.get(c).is_none()
    }

    /// Overwrite a cell without checks; the search uses this to apply and
    /// undo its own moves.
    pub fn set(&mut self, c: HexCoord, cell: Option<Stone>) {
        self.cells[c.y()][c.x()] = cell;
    }

    pub fn place(&mut self, c: HexCoord, stone: Stone) -> Result<(), BoardError> {
        if !self.is_empty(c) {
            return Err(BoardError::Occupied(c));
        }

        self.set(c, Some(stone));
        Ok(())
    }

    pub fn has_empty(&self) -> bool {
        self.cells.iter().flatten().any(|c| c.is_none())
    }

    pub fn is_full(&self) -> bool {
        !self.has_empty()
    }

    /// Every empty cell in row-major order. Search tie-breaking depends on
    /// this order.
    pub fn legal_moves(&self) -> Vec<HexCoord> {
        self.cells_where(|c| c.is_none())
    }

    /// Every cell held by `stone`, in row-major order.
    pub fn stones(&self, stone: Stone) -> Vec<HexCoord> {
        self.cells_where(|c| c == Some(stone))
    }

    /// Past moves for a raw player code, as a host would ask for them.
    pub fn past_moves_for_code(&self, code: u8) -> Option<Vec<HexCoord>> {
        match Stone::from_code(code) {
            Some(stone) => Some(self.stones(stone)),
            None => {
                eprintln!("Error in past_moves_for_code() : invalid player code {}", code);
                None
            }
        }
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    fn cells_where(&self, pred: impl Fn(Option<Stone>) -> bool) -> Vec<HexCoord> {
        let mut res = Vec::new();

        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                if pred(self.cells[y][x]) {
                    res.push(HexCoord::new(x as i8, y as i8));
                }
            }
        }

        res
    }

    /// Whether `stone` has an unbroken chain between its two edges.
    pub fn connects(&self, stone: Stone) -> bool {
        let mut to_check: Vec<HexCoord> = (0..BOARD_SIZE)
            .map(|i| stone.start_cell(i))
            .filter(|&c| self.get(c) == Some(stone))
            .collect();
        let mut visited = CellSet::new();
        for &c in &to_check {
            visited.insert(c);
        }

        while let Some(cur) = to_check.pop() {
            if stone.on_far_edge(cur) {
                return true;
            }

            for nb in cur.neighbors() {
                if self.get(nb) == Some(stone) && visited.insert(nb) {
                    to_check.push(nb);
                }
            }
        }

        false
    }

    pub fn winner(&self) -> Option<Stone> {
        [Stone::White, Stone::Black]
            .into_iter()
            .find(|&s| self.connects(s))
    }

    pub fn disp(&self) -> String {
        // display as a sheared monospace rhombus
        let mut res = String::new();

        for (y, row) in self.cells.iter().enumerate() {
            for _ in 0..y {
                res.push(' ');
            }

            for cell in row {
                res.push(cell.map(char::from).unwrap_or('.'));
                res.push(' ');
            }

            res.push('\n');
        }

        res
    }
}

impl fmt::Display for HexBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.disp())
    }
}

impl FromStr for HexBoard {
    type Err = BoardError;

    /// Parse rows of `.`/`0`, `W`/`1` and `B`/`2`; whitespace is ignored and
    /// blank lines are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().filter(|l| !l.trim().is_empty()).collect();

        if rows.len() != BOARD_SIZE {
            return Err(BoardError::RowCount {
                found: rows.len(),
                expected: BOARD_SIZE,
            });
        }

        let mut board = HexBoard::new();

        for (y, line) in rows.into_iter().enumerate() {
            let row = line
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .map(|ch| match ch.to_ascii_uppercase() {
                    '.' | '0' => Ok(None),
                    'W' | '1' => Ok(Some(Stone::White)),
                    'B' | '2' => Ok(Some(Stone::Black)),
                    _ => Err(BoardError::BadChar { ch, row: y }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            if row.len() != BOARD_SIZE {
                return Err(BoardError::RowLength {
                    row: y,
                    found: row.len(),
                    expected: BOARD_SIZE,
                });
            }

            board.cells[y].copy_from_slice(&row);
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> HexBoard {
        s.parse().unwrap()
    }

    #[test]
    fn legal_moves_are_the_empty_cells() {
        let board = parse(
            "W . . . . . .
             . B . . . . .
             . . . . . . .
             . . . W . . .
             . . . . . . .
             . . . . . B .
             . . . . . . W",
        );

        let moves = board.legal_moves();
        assert_eq!(moves.len(), 49 - 5);
        assert!(moves.iter().all(|&m| board.is_empty(m)));
        assert_eq!(moves[0], HexCoord::new(1, 0));

        let mut seen = CellSet::new();
        assert!(moves.iter().all(|&m| seen.insert(m)));
    }

    #[test]
    fn legal_moves_are_row_major() {
        let moves = HexBoard::new().legal_moves();
        assert_eq!(moves[0], HexCoord::new(0, 0));
        assert_eq!(moves[1], HexCoord::new(1, 0));
        assert_eq!(moves[7], HexCoord::new(0, 1));
    }

    #[test]
    fn full_board_has_no_moves() {
        let mut board = HexBoard::new();
        for (i, c) in HexBoard::new().legal_moves().into_iter().enumerate() {
            let s = if i % 2 == 0 { Stone::White } else { Stone::Black };
            board.place(c, s).unwrap();
        }

        assert!(board.is_full());
        assert!(board.legal_moves().is_empty());
        assert!(board.winner().is_some());
    }

    #[test]
    fn place_rejects_occupied() {
        let mut board = HexBoard::new();
        board.place(HexCoord::center(), Stone::White).unwrap();
        assert_eq!(
            board.place(HexCoord::center(), Stone::Black),
            Err(BoardError::Occupied(HexCoord::center()))
        );
    }

    #[test]
    fn past_moves_by_code() {
        let board = parse(
            "W . . . . . .
             . B . . . . .
             . . . . . . .
             . . . W . . .
             . . . . . . .
             . . . . . . .
             . . . . . . .",
        );

        assert_eq!(
            board.past_moves_for_code(1),
            Some(vec![HexCoord::new(0, 0), HexCoord::new(3, 3)])
        );
        assert_eq!(board.past_moves_for_code(2), Some(vec![HexCoord::new(1, 1)]));
        assert_eq!(board.past_moves_for_code(3), None);
        assert_eq!(board.past_moves_for_code(0), None);
    }

    #[test]
    fn from_codes_matches_parse() {
        let mut codes = [[0u8; BOARD_SIZE]; BOARD_SIZE];
        codes[3][3] = 2;
        codes[0][6] = 1;

        let board = HexBoard::from_codes(&codes).unwrap();
        assert_eq!(board.get(HexCoord::new(3, 3)), Some(Stone::Black));
        assert_eq!(board.get(HexCoord::new(6, 0)), Some(Stone::White));

        codes[1][2] = 9;
        assert_eq!(
            HexBoard::from_codes(&codes),
            Err(BoardError::BadCode {
                code: 9,
                at: HexCoord::new(2, 1)
            })
        );
    }

    #[test]
    fn parse_reports_bad_input() {
        assert!(matches!(
            ". . .".parse::<HexBoard>(),
            Err(BoardError::RowCount { found: 1, .. })
        ));

        let text = "0000000\n0000000\n000x000\n0000000\n0000000\n0000000\n0000000";
        assert_eq!(
            text.parse::<HexBoard>(),
            Err(BoardError::BadChar { ch: 'x', row: 2 })
        );
    }

    #[test]
    fn display_round_trips() {
        let board = parse(
            "W . . . . . .
             . B . . . . .
             . . . . . . .
             . . . W . . .
             . . . . . . .
             . . . . . . .
             . . . . . . B",
        );

        assert_eq!(board.to_string().parse::<HexBoard>().unwrap(), board);
    }

    #[test]
    fn white_wins_top_to_bottom() {
        let board = parse(
            ". . W . . . .
             . W . . . . .
             . W . . . . .
             W . . . . . .
             W . . . . . .
             W . . . . . .
             W . . . . . .",
        );

        assert!(board.connects(Stone::White));
        assert!(!board.connects(Stone::Black));
        assert_eq!(board.winner(), Some(Stone::White));
    }

    #[test]
    fn black_wins_left_to_right() {
        let board = parse(
            ". . . . . . .
             . . . . . . .
             . . . . . . .
             B B B B B B B
             . . . . . . .
             . . . . . . .
             . . . . . . .",
        );

        assert_eq!(board.winner(), Some(Stone::Black));
    }

    #[test]
    fn broken_chain_does_not_win() {
        // row 2 is empty, so the column never reaches the bottom edge
        let board = parse(
            ". W . . . . .
             . W . . . . .
             . . . . . . .
             . W . . . . .
             . W . . . . .
             . W . . . . .
             . W . . . . .",
        );

        assert_eq!(board.winner(), None);
    }
}
