//! Promotion prompt: which pieces to offer and where the dialog sits.

use serde::{Deserialize, Serialize};
use shakmaty::{Color, Role};

use super::coordinates::{check_board_width, square_center, square_size};
use super::types::{BoardDimensions, BoardOrientation, Coords, Piece, Square};
use crate::error::Result;

const PROMOTION_ROLES: [Role; 4] = [Role::Queen, Role::Rook, Role::Knight, Role::Bishop];

/// Pieces offered for a pawn arriving on `target`. Pawns reaching rank 1 are
/// black, all others white.
pub fn promotion_options(target: Square) -> [Piece; 4] {
    let color = if target.rank() == 1 {
        Color::Black
    } else {
        Color::White
    };
    PROMOTION_ROLES.map(|role| Piece::new(color, role))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionDialogVariant {
    /// Two by two grid centered on the target square.
    #[default]
    Default,
    /// Single column hanging from the target square.
    Vertical,
    /// Full-width banner across the board.
    Modal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogArrangement {
    Grid,
    Column,
    Row,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionDialogLayout {
    pub origin: Coords,
    pub arrangement: DialogArrangement,
    /// Only the modal variant has a fixed size; the others size to content.
    pub size: Option<(f32, f32)>,
    pub options: [Piece; 4],
}

pub fn promotion_dialog_layout(
    target: Option<Square>,
    variant: PromotionDialogVariant,
    dims: BoardDimensions,
    orientation: BoardOrientation,
    board_width: f32,
) -> Result<PromotionDialogLayout> {
    let board_width = check_board_width(board_width)?;
    let target = match target {
        Some(square) => square,
        None => Square::new(0, dims.rows)?,
    };
    let anchor = square_center(target, dims, orientation, board_width)?;
    let (square_width, _) = square_size(dims, board_width);

    let (origin, arrangement, size) = match variant {
        PromotionDialogVariant::Default => (
            anchor.offset(-square_width, -square_width),
            DialogArrangement::Grid,
            None,
        ),
        PromotionDialogVariant::Vertical => (
            anchor.offset(-board_width / 16.0, -board_width / 16.0),
            DialogArrangement::Column,
            None,
        ),
        PromotionDialogVariant::Modal => (
            Coords::new(0.0, 3.0 * square_width),
            DialogArrangement::Row,
            Some((board_width, board_width / 4.0)),
        ),
    };

    Ok(PromotionDialogLayout {
        origin,
        arrangement,
        size,
        options: promotion_options(target),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_options_order_and_color() {
        let white: Vec<String> = promotion_options(sq("e8")).iter().map(Piece::tag).collect();
        assert_eq!(white, ["wQ", "wR", "wN", "wB"]);

        let black: Vec<String> = promotion_options(sq("e1")).iter().map(Piece::tag).collect();
        assert_eq!(black, ["bQ", "bR", "bN", "bB"]);
    }

    #[test]
    fn test_default_dialog_is_centered_on_target() {
        let layout = promotion_dialog_layout(
            Some(sq("e8")),
            PromotionDialogVariant::Default,
            BoardDimensions::STANDARD,
            BoardOrientation::White,
            400.0,
        )
        .unwrap();
        assert_eq!(layout.origin, Coords::new(175.0, -25.0));
        assert_eq!(layout.arrangement, DialogArrangement::Grid);
        assert!(layout.size.is_none());
    }

    #[test]
    fn test_dialog_defaults_to_top_left_square() {
        let layout = promotion_dialog_layout(
            None,
            PromotionDialogVariant::Vertical,
            BoardDimensions::STANDARD,
            BoardOrientation::White,
            400.0,
        )
        .unwrap();
        assert_eq!(layout.origin, Coords::new(0.0, 0.0));
        assert_eq!(layout.arrangement, DialogArrangement::Column);
    }

    #[test]
    fn test_modal_spans_the_board() {
        let layout = promotion_dialog_layout(
            Some(sq("a1")),
            PromotionDialogVariant::Modal,
            BoardDimensions::STANDARD,
            BoardOrientation::Black,
            400.0,
        )
        .unwrap();
        assert_eq!(layout.origin, Coords::new(0.0, 150.0));
        assert_eq!(layout.size, Some((400.0, 100.0)));
        assert_eq!(layout.options[0].tag(), "bQ");
    }
}
