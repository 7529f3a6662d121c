//! The live position as the board sees it: which piece stands on which square.

use std::collections::BTreeMap;

use shakmaty::Board;

use super::types::{Piece, Square};
use crate::error::{Error, Result};

pub type Position = BTreeMap<Square, Piece>;

pub const START_BOARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Reads the piece placement field of a FEN string. The remaining fields, if
/// present, are ignored: the board only needs to know where pieces stand.
pub fn position_from_fen(fen: &str) -> Result<Position> {
    let placement = fen
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::Fen("empty FEN".to_string()))?;

    let board = Board::from_ascii_board_fen(placement.as_bytes())
        .map_err(|e| Error::Fen(format!("{}: {}", placement, e)))?;

    let mut position = Position::new();
    for square in board.occupied() {
        if let Some(piece) = board.piece_at(square) {
            position.insert(Square::from(square), Piece::from(piece));
        }
    }
    Ok(position)
}

pub fn starting_position() -> Position {
    position_from_fen(START_BOARD_FEN).unwrap_or_default()
}
