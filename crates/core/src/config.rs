//! Board configuration, read from JSON

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::board::coordinates::check_board_width;
use crate::board::promotion::PromotionDialogVariant;
use crate::board::types::{BoardDimensions, BoardOrientation};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub id: String,
    pub dimensions: BoardDimensions,
    pub orientation: BoardOrientation,
    pub board_width: f32,
    pub show_notation: bool,
    pub allow_premoves: bool,
    pub arrow_color: String,
    /// Merged into label styles as-is.
    pub notation_style: Map<String, Value>,
    pub promotion_dialog: PromotionDialogVariant,
    pub snap_to_cursor: bool,
    pub allow_drag_outside_board: bool,
    /// Initial position as FEN; an empty board when absent.
    pub position: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            id: "board".to_string(),
            dimensions: BoardDimensions::STANDARD,
            orientation: BoardOrientation::White,
            board_width: 560.0,
            show_notation: true,
            allow_premoves: false,
            arrow_color: "#ffaa00".to_string(),
            notation_style: Map::new(),
            promotion_dialog: PromotionDialogVariant::Default,
            snap_to_cursor: true,
            allow_drag_outside_board: true,
            position: None,
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.dimensions.validate()?;
        check_board_width(self.board_width)?;
        Ok(())
    }
}
