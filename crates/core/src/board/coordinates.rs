//! Square, grid and pixel conversions.
//!
//! Grid positions are `(row, col)` with row 0 the topmost visual row and col 0
//! the leftmost visual column, whatever the orientation. Orientation is folded
//! into the square <-> grid formulas only.

use super::types::{BoardDimensions, BoardOrientation, Coords, Square};
use crate::error::{Error, Result};

pub fn check_board_width(board_width: f32) -> Result<f32> {
    if board_width.is_finite() && board_width > 0.0 {
        Ok(board_width)
    } else {
        Err(Error::InvalidBoardWidth(board_width))
    }
}

pub(crate) fn check_grid(row: usize, col: usize, dims: BoardDimensions) -> Result<()> {
    if row < dims.rows as usize && col < dims.columns as usize {
        Ok(())
    } else {
        Err(Error::GridOutOfBounds {
            row,
            col,
            rows: dims.rows,
            columns: dims.columns,
        })
    }
}

/// Board height for a given width; non-square boards keep square cells.
pub fn board_height(dims: BoardDimensions, board_width: f32) -> f32 {
    board_width * dims.rows as f32 / dims.columns as f32
}

/// Width and height of a single square in pixels.
pub fn square_size(dims: BoardDimensions, board_width: f32) -> (f32, f32) {
    let width = board_width / dims.columns as f32;
    let height = board_height(dims, board_width) / dims.rows as f32;
    (width, height)
}

pub fn square_to_grid(
    square: Square,
    dims: BoardDimensions,
    orientation: BoardOrientation,
) -> Result<(usize, usize)> {
    dims.check(square)?;

    let file = square.file() as usize;
    let rank = square.rank() as usize;
    let rows = dims.rows as usize;
    let columns = dims.columns as usize;

    Ok(match orientation {
        BoardOrientation::White => (rows - rank, file),
        BoardOrientation::Black => (rank - 1, columns - 1 - file),
    })
}

pub fn grid_to_square(
    row: usize,
    col: usize,
    dims: BoardDimensions,
    orientation: BoardOrientation,
) -> Result<Square> {
    check_grid(row, col, dims)?;

    let rows = dims.rows as usize;
    let columns = dims.columns as usize;

    let (file, rank) = match orientation {
        BoardOrientation::White => (col, rows - row),
        BoardOrientation::Black => (columns - 1 - col, row + 1),
    };
    Square::new(file as u8, rank as u16)
}

/// Top-left corner of the square.
pub fn square_to_pixel(
    square: Square,
    dims: BoardDimensions,
    orientation: BoardOrientation,
    board_width: f32,
) -> Result<Coords> {
    let board_width = check_board_width(board_width)?;
    let (row, col) = square_to_grid(square, dims, orientation)?;
    let (width, height) = square_size(dims, board_width);
    Ok(Coords::new(col as f32 * width, row as f32 * height))
}

/// Center of the square, where arrows start and end.
pub fn square_center(
    square: Square,
    dims: BoardDimensions,
    orientation: BoardOrientation,
    board_width: f32,
) -> Result<Coords> {
    let top_left = square_to_pixel(square, dims, orientation, board_width)?;
    let (width, height) = square_size(dims, board_width);
    Ok(top_left.offset(width / 2.0, height / 2.0))
}

/// Hit test a point in board coordinates. Points on or past the far edge are
/// outside the board.
pub fn pixel_to_grid(
    point: Coords,
    dims: BoardDimensions,
    board_width: f32,
) -> Option<(usize, usize)> {
    let board_width = check_board_width(board_width).ok()?;
    if point.x < 0.0 || point.y < 0.0 {
        return None;
    }

    let (width, height) = square_size(dims, board_width);
    let col = (point.x / width) as usize;
    let row = (point.y / height) as usize;

    if row < dims.rows as usize && col < dims.columns as usize {
        Some((row, col))
    } else {
        None
    }
}

/// Every cell in visual row-major order.
pub fn squares(
    dims: BoardDimensions,
    orientation: BoardOrientation,
) -> impl Iterator<Item = (usize, usize, Square)> {
    let rows = dims.rows as usize;
    let columns = dims.columns as usize;
    (0..rows).flat_map(move |row| {
        (0..columns).filter_map(move |col| {
            grid_to_square(row, col, dims, orientation)
                .ok()
                .map(|square| (row, col, square))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_white_orientation_corners() {
        let dims = BoardDimensions::STANDARD;
        let white = BoardOrientation::White;
        assert_eq!(square_to_grid(sq("a1"), dims, white).unwrap(), (7, 0));
        assert_eq!(square_to_grid(sq("h8"), dims, white).unwrap(), (0, 7));
        assert_eq!(square_to_grid(sq("a8"), dims, white).unwrap(), (0, 0));
        assert_eq!(grid_to_square(7, 7, dims, white).unwrap(), sq("h1"));
    }

    #[test]
    fn test_black_orientation_mirrors_both_axes() {
        let dims = BoardDimensions::STANDARD;
        let black = BoardOrientation::Black;
        assert_eq!(square_to_grid(sq("a1"), dims, black).unwrap(), (0, 7));
        assert_eq!(square_to_grid(sq("h8"), dims, black).unwrap(), (7, 0));
        assert_eq!(grid_to_square(0, 0, dims, black).unwrap(), sq("h1"));
    }

    #[test]
    fn test_non_square_board() {
        let dims = BoardDimensions::new(10, 6).unwrap();
        assert_eq!(square_to_grid(sq("a1"), dims, BoardOrientation::White).unwrap(), (9, 0));
        assert_eq!(square_to_grid(sq("f10"), dims, BoardOrientation::Black).unwrap(), (9, 0));

        assert_eq!(board_height(dims, 300.0), 500.0);
        assert_eq!(square_size(dims, 300.0), (50.0, 50.0));
        assert_eq!(
            square_to_pixel(sq("b2"), dims, BoardOrientation::White, 300.0).unwrap(),
            Coords::new(50.0, 400.0)
        );
    }

    #[test]
    fn test_pixel_and_center() {
        let dims = BoardDimensions::STANDARD;
        let top_left = square_to_pixel(sq("e4"), dims, BoardOrientation::White, 400.0).unwrap();
        assert_eq!(top_left, Coords::new(200.0, 200.0));

        let center = square_center(sq("e4"), dims, BoardOrientation::White, 400.0).unwrap();
        assert_eq!(center, Coords::new(225.0, 225.0));

        let flipped = square_to_pixel(sq("e4"), dims, BoardOrientation::Black, 400.0).unwrap();
        assert_eq!(flipped, Coords::new(150.0, 150.0));
    }

    #[test]
    fn test_malformed_input_is_reported() {
        let dims = BoardDimensions::STANDARD;
        assert!(matches!(
            square_to_grid(sq("i1"), dims, BoardOrientation::White),
            Err(Error::SquareOutOfBounds { .. })
        ));
        assert!(matches!(
            grid_to_square(8, 0, dims, BoardOrientation::White),
            Err(Error::GridOutOfBounds { row: 8, col: 0, .. })
        ));
        assert!(matches!(
            square_to_pixel(sq("a1"), dims, BoardOrientation::White, 0.0),
            Err(Error::InvalidBoardWidth(_))
        ));
        assert!(square_to_pixel(sq("a1"), dims, BoardOrientation::White, f32::NAN).is_err());
    }

    #[test]
    fn test_pixel_hit_test() {
        let dims = BoardDimensions::STANDARD;
        assert_eq!(pixel_to_grid(Coords::new(0.0, 0.0), dims, 400.0), Some((0, 0)));
        assert_eq!(pixel_to_grid(Coords::new(399.0, 201.0), dims, 400.0), Some((4, 7)));
        assert_eq!(pixel_to_grid(Coords::new(400.0, 10.0), dims, 400.0), None);
        assert_eq!(pixel_to_grid(Coords::new(-1.0, 10.0), dims, 400.0), None);
    }

    #[test]
    fn test_squares_iteration_order() {
        let dims = BoardDimensions::new(2, 3).unwrap();
        let names: Vec<String> = squares(dims, BoardOrientation::White)
            .map(|(_, _, square)| square.to_string())
            .collect();
        assert_eq!(names, ["a2", "b2", "c2", "a1", "b1", "c1"]);

        let flipped: Vec<String> = squares(dims, BoardOrientation::Black)
            .map(|(_, _, square)| square.to_string())
            .collect();
        assert_eq!(flipped, ["c1", "b1", "a1", "c2", "b2", "a2"]);
    }
}
