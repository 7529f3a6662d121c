//! Placement of the floating piece preview while a piece is dragged.

use serde::{Deserialize, Serialize};

use super::coordinates::{board_height, check_board_width};
use super::types::{BoardDimensions, Coords};
use crate::error::Result;

/// Pointer state for one frame of a drag. All positions are in the same
/// (page) coordinate frame as `board_origin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragPreviewInput {
    /// Current pointer position.
    pub pointer: Option<Coords>,
    /// Where the dragged element's top-left would be without snapping.
    pub source_offset: Option<Coords>,
    /// Top-left corner of the board on the page.
    pub board_origin: Coords,
    pub snap_to_cursor: bool,
    pub allow_drag_outside_board: bool,
}

/// Top-left corner at which to draw the preview, or `None` when the pointer
/// is not over the page.
pub fn drag_preview_origin(
    input: &DragPreviewInput,
    dims: BoardDimensions,
    board_width: f32,
) -> Result<Option<Coords>> {
    let board_width = check_board_width(board_width)?;
    let (Some(pointer), Some(source_offset)) = (input.pointer, input.source_offset) else {
        return Ok(None);
    };

    let half_square = board_width / dims.columns as f32 / 2.0;

    let mut origin = if input.snap_to_cursor {
        pointer.offset(-half_square, -half_square)
    } else {
        source_offset
    };

    if !input.allow_drag_outside_board {
        let left = input.board_origin.x - half_square;
        let top = input.board_origin.y - half_square;
        let right = input.board_origin.x + board_width - half_square;
        let bottom = input.board_origin.y + board_height(dims, board_width) - half_square;

        origin.x = origin.x.min(right).max(left);
        origin.y = origin.y.min(bottom).max(top);
    }

    Ok(Some(origin))
}
