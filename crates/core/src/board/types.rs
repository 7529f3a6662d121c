//! Plain data shared by every board component

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shakmaty::{Color, Role};

use crate::error::{Error, Result};

/// Files are single letters, so a board is at most 26 columns wide.
pub const MAX_COLUMNS: u16 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDimensions {
    pub rows: u16,
    pub columns: u16,
}

impl BoardDimensions {
    pub const STANDARD: BoardDimensions = BoardDimensions { rows: 8, columns: 8 };

    pub fn new(rows: u16, columns: u16) -> Result<Self> {
        let dims = Self { rows, columns };
        dims.validate()?;
        Ok(dims)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 || self.columns > MAX_COLUMNS {
            return Err(Error::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }

    pub fn contains(&self, square: Square) -> bool {
        u16::from(square.file) < self.columns && square.rank >= 1 && square.rank <= self.rows
    }

    /// Fails with `SquareOutOfBounds` unless the square lies on this board.
    pub fn check(&self, square: Square) -> Result<Square> {
        if self.contains(square) {
            Ok(square)
        } else {
            Err(Error::SquareOutOfBounds {
                square: square.to_string(),
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    /// File letters `a, b, c, ...` for every column.
    pub fn file_letters(&self) -> impl Iterator<Item = char> {
        (0..self.columns.min(MAX_COLUMNS) as u8).map(|i| (b'a' + i) as char)
    }

    pub fn square_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }
}

impl Default for BoardDimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Which side is drawn at the bottom of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardOrientation {
    #[default]
    White,
    Black,
}

impl BoardOrientation {
    pub fn flip(self) -> Self {
        match self {
            BoardOrientation::White => BoardOrientation::Black,
            BoardOrientation::Black => BoardOrientation::White,
        }
    }
}

impl From<Color> for BoardOrientation {
    fn from(color: Color) -> Self {
        match color {
            Color::White => BoardOrientation::White,
            Color::Black => BoardOrientation::Black,
        }
    }
}

/// Algebraic square name: a file letter followed by a 1-based rank.
///
/// Ranks are not limited to a single digit, so `c10` is a valid square on a
/// board with at least ten rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u16,
}

impl Square {
    /// `file` is zero-based (`a` = 0), `rank` is one-based.
    pub fn new(file: u8, rank: u16) -> Result<Self> {
        if u16::from(file) >= MAX_COLUMNS || rank == 0 {
            return Err(Error::InvalidSquare(format!("file {file}, rank {rank}")));
        }
        Ok(Self { file, rank })
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u16 {
        self.rank
    }

    pub fn file_char(&self) -> char {
        (b'a' + self.file) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSquare(s.to_string());

        let mut chars = s.chars();
        let file = chars.next().filter(|c| c.is_ascii_lowercase()).ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let rank: u16 = digits.parse().map_err(|_| invalid())?;

        Square::new(file as u8 - b'a', rank).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Square {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl From<shakmaty::Square> for Square {
    fn from(square: shakmaty::Square) -> Self {
        Square {
            file: u32::from(square.file()) as u8,
            rank: u32::from(square.rank()) as u16 + 1,
        }
    }
}

/// Pixel position relative to the board's own top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coords {
    pub x: f32,
    pub y: f32,
}

impl Coords {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Coords) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Coords {
        Coords::new(self.x + dx, self.y + dy)
    }
}

/// A piece as shown on the board, written as a two character tag like `wQ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    pub const fn new(color: Color, role: Role) -> Self {
        Self { color, role }
    }

    pub fn from_tag(tag: &str) -> Result<Self> {
        let invalid = || Error::InvalidPiece(tag.to_string());
        let bytes = tag.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }

        let color = match bytes[0] {
            b'w' => Color::White,
            b'b' => Color::Black,
            _ => return Err(invalid()),
        };
        let role = match bytes[1] {
            b'K' => Role::King,
            b'Q' => Role::Queen,
            b'R' => Role::Rook,
            b'B' => Role::Bishop,
            b'N' => Role::Knight,
            b'P' => Role::Pawn,
            _ => return Err(invalid()),
        };

        Ok(Piece { color, role })
    }

    pub fn tag(&self) -> String {
        let color = match self.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let role = match self.role {
            Role::King => 'K',
            Role::Queen => 'Q',
            Role::Rook => 'R',
            Role::Bishop => 'B',
            Role::Knight => 'N',
            Role::Pawn => 'P',
        };
        format!("{color}{role}")
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl FromStr for Piece {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Piece::from_tag(s)
    }
}

impl TryFrom<String> for Piece {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Piece::from_tag(&value)
    }
}

impl From<Piece> for String {
    fn from(piece: Piece) -> Self {
        piece.tag()
    }
}

impl From<shakmaty::Piece> for Piece {
    fn from(piece: shakmaty::Piece) -> Self {
        Piece {
            color: piece.color,
            role: piece.role,
        }
    }
}

/// A move entered before it is the player's turn. Its index is its position
/// in the submitted sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Premove {
    pub source: Square,
    pub target: Square,
    pub piece: Piece,
}

impl Premove {
    pub fn new(source: Square, target: Square, piece: Piece) -> Self {
        Self { source, target, piece }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrow {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Arrow {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to, color: None }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Arrows pointing at their own origin are never drawn.
    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }
}
