use std::fmt;
use std::ops::Add;

pub const BOARD_SIZE: usize = 7;

// a CellSet packs the whole board into one word
const _: () = assert!(BOARD_SIZE * BOARD_SIZE <= 64);

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct HexCoord(i8, i8);

impl Add for HexCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        HexCoord(self.0 + other.0, self.1 + other.1)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

// consecutive entries (cyclically) are themselves neighbors of each other
pub const HEXDIR: [HexCoord; 6] = [
    HexCoord(1, -1),
    HexCoord(1, 0),
    HexCoord(0, 1),
    HexCoord(-1, 1),
    HexCoord(-1, 0),
    HexCoord(0, -1),
];

/// Two cells two steps apart joined through a pair of carrier cells.
///
/// Holding both `from` and `to` connects them as long as the opponent cannot
/// take both carriers, so a path may treat the pair as a single step while
/// the carriers are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bridge {
    pub from: HexCoord,
    pub to: HexCoord,
    pub carriers: (HexCoord, HexCoord),
}

impl Bridge {
    pub fn endpoints(&self) -> [HexCoord; 2] {
        [self.from, self.to]
    }
}

impl HexCoord {
    pub const fn new(x: i8, y: i8) -> Self {
        HexCoord(x, y)
    }

    /// Build an on-board coordinate from raw host input.
    ///
    /// Anything off the board, including the `(-1, -1)` "no previous move"
    /// marker, maps to `None`.
    pub fn checked(x: i32, y: i32) -> Option<Self> {
        let n = BOARD_SIZE as i32;
        if (0..n).contains(&x) && (0..n).contains(&y) {
            Some(HexCoord(x as i8, y as i8))
        } else {
            None
        }
    }

    pub fn center() -> Self {
        let mid = (BOARD_SIZE / 2) as i8;
        HexCoord(mid, mid)
    }

    pub fn x(&self) -> usize {
        self.0 as usize
    }

    pub fn y(&self) -> usize {
        self.1 as usize
    }

    pub fn on_board(&self) -> bool {
        let n = BOARD_SIZE as i8;
        (0..n).contains(&self.0) && (0..n).contains(&self.1)
    }

    /// Row-major position of the cell.
    pub fn index(&self) -> usize {
        self.y() * BOARD_SIZE + self.x()
    }

    pub fn from_index(i: usize) -> Self {
        HexCoord((i % BOARD_SIZE) as i8, (i / BOARD_SIZE) as i8)
    }

    pub fn neighbors(&self) -> impl Iterator<Item = Self> {
        let origin = *self;
        HEXDIR
            .iter()
            .map(move |&d| origin + d)
            .filter(|c| c.on_board())
    }

    /// Every bridge that has this cell as its `from` endpoint.
    pub fn bridges(&self) -> impl Iterator<Item = Bridge> {
        let origin = *self;
        (0..6).filter_map(move |k| {
            let a = origin + HEXDIR[k];
            let b = origin + HEXDIR[(k + 1) % 6];
            let to = a + HEXDIR[(k + 1) % 6];

            (a.on_board() && b.on_board() && to.on_board()).then_some(Bridge {
                from: origin,
                to,
                carriers: (a, b),
            })
        })
    }

    /// Every bridge that has this cell as one of its two carriers.
    pub fn carried_bridges(&self) -> impl Iterator<Item = Bridge> {
        let origin = *self;
        (0..6).filter_map(move |k| {
            let from = origin + HEXDIR[k];
            let other = origin + HEXDIR[(k + 1) % 6];
            let to = origin + HEXDIR[(k + 2) % 6];

            (from.on_board() && other.on_board() && to.on_board()).then_some(Bridge {
                from,
                to,
                carriers: (origin, other),
            })
        })
    }
}

/// Set of board cells, one bit per row-major index.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CellSet(u64);

impl CellSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert(&mut self, c: HexCoord) -> bool {
        let bit = 1u64 << c.index();
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    pub fn with(mut self, c: HexCoord) -> Self {
        self.insert(c);
        self
    }

    pub fn contains(&self, c: HexCoord) -> bool {
        self.0 & (1u64 << c.index()) != 0
    }
}
