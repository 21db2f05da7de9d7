//! Engine configuration
//!
//! Grid dimensions and pacing are configuration, not hardcoded behavior.
//! Values come from [`EngineConfig::default`] or from environment variables:
//!
//! - `BLOCKFALL_COLS`: grid width (default: 10)
//! - `BLOCKFALL_ROWS`: grid height (default: 20)
//! - `BLOCKFALL_INITIAL_SPEED_MS`: descent interval at level 1 (default: 800)
//! - `BLOCKFALL_MIN_SPEED_MS`: descent interval floor (default: 100)
//! - `BLOCKFALL_SPEED_DECAY`: per-level multiplier (default: 0.9)

use std::env;
use std::str::FromStr;

use crate::error::EngineError;
use crate::types::{
    DEFAULT_COLS, DEFAULT_ROWS, INITIAL_SPEED_MS, MAX_SHAPE_SIZE, MIN_SPEED_MS, SPEED_DECAY,
};

/// Largest supported grid width or height.
pub const MAX_DIMENSION: usize = 127;

/// Longest supported descent interval (one minute).
pub const MAX_SPEED_MS: f64 = 60_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub cols: usize,
    pub rows: usize,
    pub initial_speed_ms: f64,
    pub min_speed_ms: f64,
    pub speed_decay: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            initial_speed_ms: INITIAL_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            speed_decay: SPEED_DECAY,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl EngineConfig {
    /// Create from environment variables, falling back to defaults per field
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            cols: env_or("BLOCKFALL_COLS", d.cols),
            rows: env_or("BLOCKFALL_ROWS", d.rows),
            initial_speed_ms: env_or("BLOCKFALL_INITIAL_SPEED_MS", d.initial_speed_ms),
            min_speed_ms: env_or("BLOCKFALL_MIN_SPEED_MS", d.min_speed_ms),
            speed_decay: env_or("BLOCKFALL_SPEED_DECAY", d.speed_decay),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [("cols", self.cols), ("rows", self.rows)] {
            if !(MAX_SHAPE_SIZE..=MAX_DIMENSION).contains(&value) {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be within {}..={}, got {}",
                    name, MAX_SHAPE_SIZE, MAX_DIMENSION, value
                )));
            }
        }
        if !(self.min_speed_ms > 0.0 && self.min_speed_ms.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "min_speed_ms must be positive, got {}",
                self.min_speed_ms
            )));
        }
        if !(self.initial_speed_ms >= self.min_speed_ms && self.initial_speed_ms.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "initial_speed_ms ({}) must be at least min_speed_ms ({})",
                self.initial_speed_ms, self.min_speed_ms
            )));
        }
        if self.initial_speed_ms > MAX_SPEED_MS {
            return Err(EngineError::InvalidConfig(format!(
                "initial_speed_ms must be at most {}, got {}",
                MAX_SPEED_MS, self.initial_speed_ms
            )));
        }
        if !(self.speed_decay > 0.0 && self.speed_decay <= 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "speed_decay must be within (0, 1], got {}",
                self.speed_decay
            )));
        }
        Ok(())
    }
}
