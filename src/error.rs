use crate::hex::HexCoord;

/// Errors raised while building or editing a board from host input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid cell code {code} at {at}")]
    BadCode { code: u8, at: HexCoord },

    #[error("unexpected character '{ch}' in row {row}")]
    BadChar { ch: char, row: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("board has {found} rows, expected {expected}")]
    RowCount { found: usize, expected: usize },

    #[error("coordinate ({x}, {y}) is off the board")]
    OffBoard { x: i32, y: i32 },

    #[error("cell {0} is already occupied")]
    Occupied(HexCoord),
}

/// Errors that can occur when validating engine configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}
