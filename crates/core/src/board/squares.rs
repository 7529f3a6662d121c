//! Square color, notation labels and board corners

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::coordinates::{check_grid, square_to_grid};
use super::types::{BoardDimensions, BoardOrientation, Square};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareColor {
    Light,
    Dark,
}

impl SquareColor {
    pub fn opposite(self) -> Self {
        match self {
            SquareColor::Light => SquareColor::Dark,
            SquareColor::Dark => SquareColor::Light,
        }
    }
}

/// Checkerboard parity, anchored so that `a1` is dark for every board size.
pub fn square_color(
    row: usize,
    col: usize,
    dims: BoardDimensions,
    orientation: BoardOrientation,
) -> Result<SquareColor> {
    check_grid(row, col, dims)?;
    let even = (row + col) % 2 == 0;
    let anchor = match orientation {
        BoardOrientation::White => dims.rows % 2 != 0,
        BoardOrientation::Black => dims.columns % 2 != 0,
    };
    Ok(if even == anchor {
        SquareColor::Dark
    } else {
        SquareColor::Light
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    /// Drawn in the tone of the opposite square color so it stays legible.
    pub tone: SquareColor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotationLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<Label>,
}

impl NotationLabel {
    pub fn is_empty(&self) -> bool {
        self.rank.is_none() && self.file.is_none()
    }
}

/// Rank numbers go down the leftmost column, file letters along the bottom
/// row; the bottom-left square carries both.
pub fn notation_label(
    row: usize,
    col: usize,
    dims: BoardDimensions,
    orientation: BoardOrientation,
) -> Result<NotationLabel> {
    let tone = square_color(row, col, dims, orientation)?.opposite();
    let rows = dims.rows as usize;
    let columns = dims.columns as usize;

    let rank = (col == 0).then(|| {
        let number = match orientation {
            BoardOrientation::White => rows - row,
            BoardOrientation::Black => row + 1,
        };
        Label {
            text: number.to_string(),
            tone,
        }
    });

    let file = if row == rows - 1 {
        let index = match orientation {
            BoardOrientation::White => col,
            BoardOrientation::Black => columns - 1 - col,
        };
        dims.file_letters().nth(index).map(|letter| Label {
            text: letter.to_string(),
            tone,
        })
    } else {
        None
    };

    Ok(NotationLabel { rank, file })
}

/// Where a label sits inside its square and how large it is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub font_size: f32,
    pub top: Option<f32>,
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    /// Caller overrides, passed through untouched.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub overrides: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotationStyle {
    pub rank: LabelStyle,
    pub file: LabelStyle,
}

pub fn notation_style(square_width: f32, overrides: &Map<String, Value>) -> NotationStyle {
    let font_size = square_width / 6.2;
    let inset = square_width / 48.0;

    NotationStyle {
        rank: LabelStyle {
            font_size,
            top: Some(0.0),
            left: Some(inset),
            right: None,
            bottom: None,
            overrides: overrides.clone(),
        },
        file: LabelStyle {
            font_size,
            top: None,
            left: None,
            right: Some(inset),
            bottom: Some(0.0),
            overrides: overrides.clone(),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// The visual corner a square occupies, if any. Used to round the board's
/// outer corners.
pub fn board_corner(
    square: Square,
    dims: BoardDimensions,
    orientation: BoardOrientation,
) -> Result<Option<BoardCorner>> {
    let (row, col) = square_to_grid(square, dims, orientation)?;
    let last_row = dims.rows as usize - 1;
    let last_col = dims.columns as usize - 1;

    let corner = match (row == 0, row == last_row, col == 0, col == last_col) {
        (true, _, true, _) => Some(BoardCorner::TopLeft),
        (true, _, _, true) => Some(BoardCorner::TopRight),
        (_, true, true, _) => Some(BoardCorner::BottomLeft),
        (_, true, _, true) => Some(BoardCorner::BottomRight),
        _ => None,
    };
    Ok(corner)
}
