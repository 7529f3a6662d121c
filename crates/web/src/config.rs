//! Server settings from the environment

use std::env;
use std::net::SocketAddr;

use chessboard_core::{BoardConfig, Result};

pub struct ServerConfig {
    pub addr: SocketAddr,
    pub board: BoardConfig,
}

impl ServerConfig {
    /// `CHESSBOARD_ADDR` sets the listen address, `CHESSBOARD_CONFIG` points
    /// at a JSON board configuration.
    pub fn from_env() -> Result<Self> {
        let addr = env::var("CHESSBOARD_ADDR")
            .ok()
            .and_then(|value| match value.parse() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!("Ignoring CHESSBOARD_ADDR {:?}: {}", value, e);
                    None
                }
            })
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

        let board = match env::var("CHESSBOARD_CONFIG") {
            Ok(path) => {
                tracing::info!("Loading board config from {}", path);
                BoardConfig::load(path)?
            }
            Err(_) => BoardConfig::default(),
        };

        Ok(Self { addr, board })
    }
}
