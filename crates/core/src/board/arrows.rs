//! Arrow geometry: where each drawn arrow starts and ends.
//!
//! Arrows run between square centers. The end is pulled back along the line
//! so the arrowhead does not cover the destination piece, and pulled back
//! further when several arrows converge on one square from different origins.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::coordinates::{square_center, square_size};
use super::types::{Arrow, BoardDimensions, BoardOrientation, Coords, Square};
use crate::error::Result;

const BASE_SHORTEN_DIVISOR: f32 = 5.0;
const COLLISION_SHORTEN_DIVISOR: f32 = 3.5;
const STROKE_DIVISOR: f32 = 5.5;
const ACTIVE_STROKE_SCALE: f32 = 0.9;
const COMMITTED_OPACITY: f32 = 0.65;
const ACTIVE_OPACITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowSegment {
    pub start: Coords,
    pub end: Coords,
    pub shorten_by: f32,
}

/// True when another arrow lands on the same square from somewhere else.
pub fn has_collision(from: Square, to: Square, others: &[Arrow]) -> bool {
    others.iter().any(|other| other.from != from && other.to == to)
}

/// Trimmed segment for one arrow, or `None` when the arrow starts and ends on
/// the same square.
pub fn arrow_segment(
    from: Square,
    to: Square,
    dims: BoardDimensions,
    orientation: BoardOrientation,
    board_width: f32,
    existing_arrows: &[Arrow],
    is_active_draw: bool,
) -> Result<Option<ArrowSegment>> {
    if from == to {
        return Ok(None);
    }

    let start = square_center(from, dims, orientation, board_width)?;
    let target = square_center(to, dims, orientation, board_width)?;
    let (square_width, _) = square_size(dims, board_width);

    let shorten_by = if !is_active_draw && has_collision(from, to, existing_arrows) {
        square_width / COLLISION_SHORTEN_DIVISOR
    } else {
        square_width / BASE_SHORTEN_DIVISOR
    };

    let dx = target.x - start.x;
    let dy = target.y - start.y;
    let length = dx.hypot(dy);
    let scale = (length - shorten_by) / length;

    Ok(Some(ArrowSegment {
        start,
        end: start.offset(dx * scale, dy * scale),
        shorten_by,
    }))
}

/// Everything the renderer needs to draw one arrow and its head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowGeometry {
    /// Stable per arrow; the in-progress arrow gets an `-active` suffix.
    pub key: String,
    /// Links the line to its arrowhead marker.
    pub marker_id: String,
    pub from: Square,
    pub to: Square,
    pub segment: ArrowSegment,
    pub color: String,
    pub opacity: f32,
    pub stroke_width: f32,
    pub active: bool,
}

/// Lays out the committed arrows followed by the one being drawn, if any.
pub fn arrow_layout(
    arrows: &[Arrow],
    new_arrow: Option<&Arrow>,
    dims: BoardDimensions,
    orientation: BoardOrientation,
    board_width: f32,
    default_color: &str,
) -> Result<Vec<ArrowGeometry>> {
    let (square_width, _) = square_size(dims, board_width);
    let mut layout = Vec::with_capacity(arrows.len() + 1);

    let candidates = arrows
        .iter()
        .map(|arrow| (arrow, false))
        .chain(new_arrow.map(|arrow| (arrow, true)));

    for (i, (arrow, active)) in candidates.enumerate() {
        let Some(segment) = arrow_segment(
            arrow.from,
            arrow.to,
            dims,
            orientation,
            board_width,
            arrows,
            active,
        )?
        else {
            debug!(square = %arrow.from, "skipping arrow that starts and ends on the same square");
            continue;
        };

        let stroke_width = if active {
            ACTIVE_STROKE_SCALE * square_width / STROKE_DIVISOR
        } else {
            square_width / STROKE_DIVISOR
        };

        layout.push(ArrowGeometry {
            key: format!(
                "{}-{}{}",
                arrow.from,
                arrow.to,
                if active { "-active" } else { "" }
            ),
            marker_id: format!("arrowhead-{}", i),
            from: arrow.from,
            to: arrow.to,
            segment,
            color: arrow
                .color
                .clone()
                .unwrap_or_else(|| default_color.to_string()),
            opacity: if active { ACTIVE_OPACITY } else { COMMITTED_OPACITY },
            stroke_width,
            active,
        });
    }

    Ok(layout)
}
