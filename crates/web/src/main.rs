use std::process;

use chessboard_core::BoardState;
use chessboard_web::{config::ServerConfig, router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let board = match BoardState::new(config.board) {
        Ok(board) => board,
        Err(e) => {
            tracing::error!("Invalid board configuration: {}", e);
            process::exit(1);
        }
    };

    let app = router(AppState::new(board));

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.addr, e);
            process::exit(1);
        }
    };

    tracing::info!("Board server running at http://{}", config.addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        process::exit(1);
    }
}
