//! Board geometry, premove resolution and arrow layout

pub mod arrows;
pub mod coordinates;
pub mod drag;
pub mod position;
pub mod premoves;
pub mod promotion;
pub mod render;
pub mod squares;
pub mod state;
pub mod types;

pub use arrows::{arrow_layout, arrow_segment, ArrowGeometry, ArrowSegment};
pub use coordinates::{grid_to_square, square_center, square_to_grid, square_to_pixel};
pub use position::{position_from_fen, starting_position, Position};
pub use premoves::{
    occupancy_from_chains, resolve_chains, resolve_display, DisplayedPiece, PremoveChain,
    PremoveOccupant,
};
pub use promotion::{promotion_dialog_layout, promotion_options, PromotionDialogVariant};
pub use render::{PieceRenderer, PieceSet};
pub use squares::{notation_label, square_color, NotationLabel, SquareColor};
pub use state::{BoardState, BoardView, SquareView};
pub use types::{Arrow, BoardDimensions, BoardOrientation, Coords, Piece, Premove, Square};
