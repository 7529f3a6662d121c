//! HTTP interaction layer over a single chessboard.
//!
//! The server owns the board state; every mutating request applies its change
//! and answers with the freshly recomputed board view.

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;

use chessboard_core::BoardState;

pub mod config;
pub mod routes;

pub struct AppState {
    pub board: Mutex<BoardState>,
}

impl AppState {
    pub fn new(board: BoardState) -> Arc<Self> {
        Arc::new(Self {
            board: Mutex::new(board),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/board", get(routes::board))
        .route("/position", put(routes::set_position))
        .route(
            "/premoves",
            post(routes::push_premove).delete(routes::clear_premoves),
        )
        .route("/arrows", post(routes::push_arrow).delete(routes::clear_arrows))
        .route(
            "/arrows/draft",
            put(routes::set_draft_arrow).delete(routes::discard_draft_arrow),
        )
        .route("/arrows/draft/commit", post(routes::commit_draft_arrow))
        .route("/orientation", put(routes::set_orientation))
        .route("/width", put(routes::set_width))
        .route("/promotion", get(routes::promotion_dialog))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
