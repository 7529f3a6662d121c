//! Error types for chessboard-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("Square {square} is outside a {rows}x{columns} board")]
    SquareOutOfBounds {
        square: String,
        rows: u16,
        columns: u16,
    },

    #[error("Grid position ({row}, {col}) is outside a {rows}x{columns} board")]
    GridOutOfBounds {
        row: usize,
        col: usize,
        rows: u16,
        columns: u16,
    },

    #[error("Invalid board dimensions {rows}x{columns} (need rows >= 1 and 1 <= columns <= 26)")]
    InvalidDimensions { rows: u16, columns: u16 },

    #[error("Invalid board width: {0}")]
    InvalidBoardWidth(f32),

    #[error("Invalid piece tag: {0:?}")]
    InvalidPiece(String),

    #[error("Premove chain for {piece} revisits {square}")]
    CyclicPremoveChain { piece: String, square: String },

    #[error("Malformed premove chain for {piece}: {reason}")]
    BrokenPremoveChain { piece: String, reason: String },

    #[error("Premoves are disabled for this board")]
    PremovesDisabled,

    #[error("FEN error: {0}")]
    Fen(String),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
