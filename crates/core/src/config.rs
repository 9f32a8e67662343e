//! Game configuration fixed at game start

use thiserror::Error;

use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_DROP_MS};

/// Smallest board side that still fits every shape in every orientation
pub const MIN_BOARD_SIDE: u16 = 4;

/// Largest board side; keeps anchor arithmetic comfortably inside `i32`
pub const MAX_BOARD_SIDE: u16 = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board width {0} is outside 4..=256")]
    Width(u16),
    #[error("board height {0} is outside 4..=256")]
    Height(u16),
    #[error("drop interval must be at least 1ms")]
    DropInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    /// Gravity interval in milliseconds
    pub drop_interval_ms: u32,
    /// Seed for the piece source
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            drop_interval_ms: DEFAULT_DROP_MS,
            seed: 1,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sides = MIN_BOARD_SIDE..=MAX_BOARD_SIDE;
        if !sides.contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !sides.contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::DropInterval);
        }
        Ok(())
    }
}
