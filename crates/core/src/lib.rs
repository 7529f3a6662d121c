//! Chessboard Core Library
//!
//! Geometry and premove resolution for an interactive chessboard: square and
//! pixel coordinates, square colors and notation, premove chains, and arrow
//! layout. Everything here is a pure computation over plain data.

pub mod board;
pub mod config;
pub mod error;

pub use board::{
    Arrow, BoardDimensions, BoardOrientation, BoardState, BoardView, Coords, Piece, Premove,
    Square,
};
pub use config::BoardConfig;
pub use error::{Error, Result};
