use serde::Deserialize;

use crate::board::{DEFAULT_BOARD_SIZE, validate_size};
use crate::types::GameError;

/// Session settings, passed from JavaScript as a plain object.
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub board_size: usize,
    /// Pixels between cells and around the grid.
    pub padding: u32,
    pub width: u32,
    pub height: u32,
    pub show_legal_moves: bool,
    /// How long flipped discs stay highlighted.
    pub highlight_millis: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            padding: 3,
            width: 600,
            height: 600,
            show_legal_moves: false,
            highlight_millis: 500,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        validate_size(self.board_size)
    }
}
