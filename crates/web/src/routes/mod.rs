use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::{Arc, MutexGuard, PoisonError};
use tracing::{info, warn};

use chessboard_core::board::promotion::PromotionDialogLayout;
use chessboard_core::{Arrow, BoardOrientation, BoardState, BoardView, Error, Premove, Square};

use crate::AppState;

/// Core errors surfaced to the client as JSON.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        warn!("Rejected request: {}", self.0);
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

type ViewResult = Result<Json<BoardView>, ApiError>;

fn lock(state: &AppState) -> MutexGuard<'_, BoardState> {
    state.board.lock().unwrap_or_else(PoisonError::into_inner)
}

fn respond(board: &BoardState) -> ViewResult {
    Ok(Json(board.view()?))
}

// ============================================================================
// QUERY / BODY TYPES
// ============================================================================

#[derive(Deserialize)]
pub struct PositionRequest {
    pub fen: String,
}

#[derive(Deserialize)]
pub struct OrientationRequest {
    pub orientation: BoardOrientation,
}

#[derive(Deserialize)]
pub struct WidthRequest {
    pub board_width: f32,
}

#[derive(Deserialize)]
pub struct PromotionQuery {
    pub square: Option<String>,
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn health() -> &'static str {
    "OK"
}

pub async fn board(State(state): State<Arc<AppState>>) -> ViewResult {
    respond(&lock(&state))
}

pub async fn set_position(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PositionRequest>,
) -> ViewResult {
    let mut board = lock(&state);
    board.set_position_fen(&req.fen)?;
    info!("Position set to {}", req.fen);
    respond(&board)
}

pub async fn push_premove(
    State(state): State<Arc<AppState>>,
    Json(premove): Json<Premove>,
) -> ViewResult {
    let mut board = lock(&state);
    board.push_premove(premove)?;
    info!(
        "Premove {} {}-{} queued ({} pending)",
        premove.piece,
        premove.source,
        premove.target,
        board.premoves().len()
    );
    respond(&board)
}

pub async fn clear_premoves(State(state): State<Arc<AppState>>) -> ViewResult {
    let mut board = lock(&state);
    board.clear_premoves();
    respond(&board)
}

pub async fn push_arrow(
    State(state): State<Arc<AppState>>,
    Json(arrow): Json<Arrow>,
) -> ViewResult {
    let mut board = lock(&state);
    board.push_arrow(arrow)?;
    respond(&board)
}

pub async fn clear_arrows(State(state): State<Arc<AppState>>) -> ViewResult {
    let mut board = lock(&state);
    board.clear_arrows();
    respond(&board)
}

pub async fn set_draft_arrow(
    State(state): State<Arc<AppState>>,
    Json(arrow): Json<Arrow>,
) -> ViewResult {
    let mut board = lock(&state);
    board.set_draft_arrow(Some(arrow))?;
    respond(&board)
}

pub async fn discard_draft_arrow(State(state): State<Arc<AppState>>) -> ViewResult {
    let mut board = lock(&state);
    board.set_draft_arrow(None)?;
    respond(&board)
}

pub async fn commit_draft_arrow(State(state): State<Arc<AppState>>) -> ViewResult {
    let mut board = lock(&state);
    if !board.commit_draft_arrow() {
        info!("Draft arrow discarded");
    }
    respond(&board)
}

pub async fn set_orientation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OrientationRequest>,
) -> ViewResult {
    let mut board = lock(&state);
    board.set_orientation(req.orientation);
    respond(&board)
}

pub async fn set_width(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WidthRequest>,
) -> ViewResult {
    let mut board = lock(&state);
    board.set_board_width(req.board_width)?;
    respond(&board)
}

pub async fn promotion_dialog(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PromotionQuery>,
) -> Result<Json<PromotionDialogLayout>, ApiError> {
    let target = params
        .square
        .as_deref()
        .map(str::parse::<Square>)
        .transpose()?;
    let board = lock(&state);
    Ok(Json(board.promotion_dialog(target)?))
}
