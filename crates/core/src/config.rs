//! Session configuration - field dimensions and gravity timing

use thiserror::Error;

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_SPEED_STEP_MS, FIELD_DEPTH, FIELD_HEIGHT, FIELD_WIDTH,
    MAX_FIELD_DIM,
};

/// Rejected configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("field {axis} must be between 1 and {max}, got {value}")]
    Dimension {
        axis: &'static str,
        value: usize,
        max: usize,
    },
    #[error("minimum drop interval must be at least 1ms")]
    ZeroMinDrop,
    #[error("minimum drop interval {min_ms}ms exceeds base interval {base_ms}ms")]
    MinAboveBase { min_ms: u32, base_ms: u32 },
}

/// Fixed rules for one session.
///
/// Dimensions never change once a grid is built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    /// Gravity interval at level 1
    pub base_drop_ms: u32,
    /// Interval reduction per level
    pub speed_step_ms: u32,
    /// Interval floor
    pub min_drop_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            depth: FIELD_DEPTH,
            base_drop_ms: BASE_DROP_MS,
            speed_step_ms: DROP_SPEED_STEP_MS,
            min_drop_ms: DROP_INTERVAL_MIN_MS,
        }
    }
}

impl GameConfig {
    pub fn with_dimensions(mut self, width: usize, height: usize, depth: usize) -> Self {
        self.width = width;
        self.height = height;
        self.depth = depth;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if value == 0 || value > MAX_FIELD_DIM {
                return Err(ConfigError::Dimension {
                    axis,
                    value,
                    max: MAX_FIELD_DIM,
                });
            }
        }
        if self.min_drop_ms == 0 {
            return Err(ConfigError::ZeroMinDrop);
        }
        if self.min_drop_ms > self.base_drop_ms {
            return Err(ConfigError::MinAboveBase {
                min_ms: self.min_drop_ms,
                base_ms: self.base_drop_ms,
            });
        }
        Ok(())
    }

    /// Gravity interval for a level: `max(min, base - (level - 1) * step)`.
    pub fn drop_interval_ms(&self, level: u32) -> u32 {
        let reduction = level.saturating_sub(1).saturating_mul(self.speed_step_ms);
        self.base_drop_ms
            .saturating_sub(reduction)
            .max(self.min_drop_ms)
    }
}
