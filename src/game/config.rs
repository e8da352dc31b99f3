//! Adapter configuration

use serde::{Deserialize, Serialize};

use crate::board::MAX_MOVES;
use crate::error::{EngineError, Result};

/// Settings for [`XiangqiGame`](super::XiangqiGame).
///
/// # Example
///
/// ```
/// use xiangqi::game::GameConfig;
///
/// let config = GameConfig::new()
///     .with_repetition_limit(4)
///     .with_draw_value(0.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length of the action mask and policy vectors
    pub action_size: usize,
    /// Occurrences of one position (same side to move) that draw the game
    pub repetition_limit: u32,
    /// Value reported for a drawn game
    pub draw_value: f32,
    /// Emit the left-right mirror from `symmetries`
    pub mirror_symmetry: bool,
}

impl GameConfig {
    /// Default configuration:
    /// - 112 actions (the mobility bound)
    /// - draw on the third repetition
    /// - draws valued at 1e-4
    /// - mirror symmetry on
    #[must_use]
    pub fn new() -> Self {
        Self {
            action_size: MAX_MOVES,
            repetition_limit: 3,
            draw_value: 1e-4,
            mirror_symmetry: true,
        }
    }

    #[must_use]
    pub fn with_action_size(mut self, action_size: usize) -> Self {
        self.action_size = action_size;
        self
    }

    #[must_use]
    pub fn with_repetition_limit(mut self, limit: u32) -> Self {
        self.repetition_limit = limit;
        self
    }

    #[must_use]
    pub fn with_draw_value(mut self, value: f32) -> Self {
        self.draw_value = value;
        self
    }

    #[must_use]
    pub fn with_mirror_symmetry(mut self, enabled: bool) -> Self {
        self.mirror_symmetry = enabled;
        self
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.action_size == 0 {
            return Err(EngineError::InvalidConfig("action_size must be at least 1".into()));
        }
        if self.repetition_limit < 2 {
            return Err(EngineError::InvalidConfig(format!(
                "repetition_limit must be at least 2, got {}",
                self.repetition_limit
            )));
        }
        if !self.draw_value.is_finite() {
            return Err(EngineError::InvalidConfig("draw_value must be finite".into()));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
