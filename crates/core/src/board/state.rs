//! Board state owned by the interaction layer.
//!
//! Every mutation validates its input before touching the state, so `view()`
//! always sees a consistent snapshot. Views are recomputed from scratch.

use serde::Serialize;
use tracing::debug;

use super::arrows::{arrow_layout, ArrowGeometry};
use super::coordinates::{board_height, check_board_width, square_size, square_to_pixel, squares};
use super::drag::{drag_preview_origin, DragPreviewInput};
use super::position::{position_from_fen, Position};
use super::premoves::{premove_squares, resolve_chains, resolve_display, DisplayedPiece};
use super::promotion::{promotion_dialog_layout, PromotionDialogLayout};
use super::render::{PieceRenderContext, PieceRenderer, PieceSet};
use super::squares::{
    board_corner, notation_label, notation_style, square_color, BoardCorner, NotationLabel,
    NotationStyle, SquareColor,
};
use super::types::{Arrow, BoardDimensions, BoardOrientation, Coords, Piece, Premove, Square};
use crate::config::BoardConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct BoardState {
    config: BoardConfig,
    position: Position,
    premoves: Vec<Premove>,
    arrows: Vec<Arrow>,
    draft_arrow: Option<Arrow>,
    pieces: PieceSet,
}

impl BoardState {
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;

        let mut state = Self {
            config,
            position: Position::new(),
            premoves: Vec::new(),
            arrows: Vec::new(),
            draft_arrow: None,
            pieces: PieceSet::new(),
        };
        if let Some(fen) = state.config.position.clone() {
            state.set_position_fen(&fen)?;
        }
        Ok(state)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn dimensions(&self) -> BoardDimensions {
        self.config.dimensions
    }

    pub fn orientation(&self) -> BoardOrientation {
        self.config.orientation
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn premoves(&self) -> &[Premove] {
        &self.premoves
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    pub fn draft_arrow(&self) -> Option<&Arrow> {
        self.draft_arrow.as_ref()
    }

    fn check_square(&self, square: Square) -> Result<Square> {
        self.config.dimensions.check(square)
    }

    /// Replacing the position confirms pending premoves, so they are dropped.
    pub fn set_position(&mut self, position: Position) -> Result<()> {
        for &square in position.keys() {
            self.check_square(square)?;
        }
        self.position = position;
        self.premoves.clear();
        Ok(())
    }

    pub fn set_position_fen(&mut self, fen: &str) -> Result<()> {
        let position = position_from_fen(fen)?;
        self.set_position(position)
    }

    /// Appends a premove. A premove that would close a loop in its piece's
    /// chain is rejected and the list is left unchanged, as is any premove on
    /// a board without premoves.
    pub fn push_premove(&mut self, premove: Premove) -> Result<()> {
        if !self.config.allow_premoves {
            return Err(Error::PremovesDisabled);
        }
        self.check_square(premove.source)?;
        self.check_square(premove.target)?;

        let mut candidate = self.premoves.clone();
        candidate.push(premove);
        resolve_chains(&candidate)?;

        self.premoves = candidate;
        Ok(())
    }

    pub fn clear_premoves(&mut self) {
        self.premoves.clear();
    }

    pub fn push_arrow(&mut self, arrow: Arrow) -> Result<()> {
        self.check_square(arrow.from)?;
        self.check_square(arrow.to)?;
        self.arrows.push(arrow);
        Ok(())
    }

    /// Sets or clears the arrow currently being drawn.
    pub fn set_draft_arrow(&mut self, arrow: Option<Arrow>) -> Result<()> {
        if let Some(arrow) = &arrow {
            self.check_square(arrow.from)?;
            self.check_square(arrow.to)?;
        }
        self.draft_arrow = arrow;
        Ok(())
    }

    /// Turns the draft into a committed arrow. Returns false when there was
    /// nothing worth keeping: no draft, a self-loop, or a duplicate.
    pub fn commit_draft_arrow(&mut self) -> bool {
        let Some(arrow) = self.draft_arrow.take() else {
            return false;
        };
        if arrow.is_degenerate()
            || self
                .arrows
                .iter()
                .any(|existing| existing.from == arrow.from && existing.to == arrow.to)
        {
            return false;
        }
        self.arrows.push(arrow);
        true
    }

    pub fn clear_arrows(&mut self) {
        self.arrows.clear();
        self.draft_arrow = None;
    }

    pub fn set_orientation(&mut self, orientation: BoardOrientation) {
        self.config.orientation = orientation;
    }

    pub fn flip_orientation(&mut self) {
        self.config.orientation = self.config.orientation.flip();
    }

    pub fn set_board_width(&mut self, board_width: f32) -> Result<()> {
        self.config.board_width = check_board_width(board_width)?;
        Ok(())
    }

    pub fn set_piece_renderer(&mut self, piece: Piece, renderer: PieceRenderer) {
        self.pieces.set(piece, renderer);
    }

    pub fn promotion_dialog(&self, target: Option<Square>) -> Result<PromotionDialogLayout> {
        promotion_dialog_layout(
            target,
            self.config.promotion_dialog,
            self.config.dimensions,
            self.config.orientation,
            self.config.board_width,
        )
    }

    /// Drag preview placement using this board's snapping and clamping settings.
    pub fn drag_preview(
        &self,
        pointer: Option<Coords>,
        source_offset: Option<Coords>,
        board_origin: Coords,
    ) -> Result<Option<Coords>> {
        let input = DragPreviewInput {
            pointer,
            source_offset,
            board_origin,
            snap_to_cursor: self.config.snap_to_cursor,
            allow_drag_outside_board: self.config.allow_drag_outside_board,
        };
        drag_preview_origin(&input, self.config.dimensions, self.config.board_width)
    }

    pub fn view(&self) -> Result<BoardView> {
        let dims = self.config.dimensions;
        let orientation = self.config.orientation;
        let board_width = check_board_width(self.config.board_width)?;
        let (square_width, square_height) = square_size(dims, board_width);

        let occupants =
            resolve_display(&self.position, &self.premoves, self.config.allow_premoves)?;
        let in_flight = if self.config.allow_premoves {
            premove_squares(&self.premoves)
        } else {
            Default::default()
        };

        let mut square_views = Vec::with_capacity(dims.square_count());
        for (row, col, square) in squares(dims, orientation) {
            let piece = occupants.get(&square).copied();
            let image = piece.map(|shown| {
                self.pieces.render(&PieceRenderContext {
                    piece: shown.piece(),
                    square: Some(square),
                    square_width,
                    is_dragging: false,
                    is_premoved: shown.is_premoved(),
                })
            });
            let notation = if self.config.show_notation {
                Some(notation_label(row, col, dims, orientation)?).filter(|label| !label.is_empty())
            } else {
                None
            };

            square_views.push(SquareView {
                square,
                row,
                col,
                origin: square_to_pixel(square, dims, orientation, board_width)?,
                color: square_color(row, col, dims, orientation)?,
                notation,
                has_premove: in_flight.contains(&square),
                corner: board_corner(square, dims, orientation)?,
                piece,
                image,
            });
        }

        let arrows = arrow_layout(
            &self.arrows,
            self.draft_arrow.as_ref(),
            dims,
            orientation,
            board_width,
            &self.config.arrow_color,
        )?;

        let pieces = occupants.len();
        debug!(
            board = %self.config.id,
            squares = square_views.len(),
            pieces,
            premoves = self.premoves.len(),
            arrows = arrows.len(),
            "recomputed board view"
        );

        Ok(BoardView {
            id: self.config.id.clone(),
            orientation,
            dimensions: dims,
            board_width,
            board_height: board_height(dims, board_width),
            square_width,
            square_height,
            notation_style: self
                .config
                .show_notation
                .then(|| notation_style(square_width, &self.config.notation_style)),
            squares: square_views,
            arrows,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquareView {
    pub square: Square,
    pub row: usize,
    pub col: usize,
    /// Top-left corner in board pixels.
    pub origin: Coords,
    pub color: SquareColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation: Option<NotationLabel>,
    pub has_premove: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner: Option<BoardCorner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub piece: Option<DisplayedPiece>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A complete snapshot for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub id: String,
    pub orientation: BoardOrientation,
    pub dimensions: BoardDimensions,
    pub board_width: f32,
    pub board_height: f32,
    pub square_width: f32,
    pub square_height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation_style: Option<NotationStyle>,
    pub squares: Vec<SquareView>,
    pub arrows: Vec<ArrowGeometry>,
}

impl BoardView {
    pub fn square(&self, square: Square) -> Option<&SquareView> {
        self.squares.iter().find(|view| view.square == square)
    }
}
