//! Driver configuration

use anyhow::bail;

/// Slowest accepted time scale (1000x slower than real time).
pub const MIN_TIME_SCALE: f64 = 0.001;
/// Fastest accepted time scale.
pub const MAX_TIME_SCALE: f64 = 1000.0;

/// Driver configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    /// Append one JSON line per applied command here when set.
    pub log_path: Option<String>,
    /// Divides every descent interval; 2.0 runs the game twice as fast.
    pub time_scale: f64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            time_scale: 1.0,
        }
    }
}

impl DriverConfig {
    /// Create from environment variables
    ///
    /// - `BLOCKFALL_LOG_PATH`: transition log file (unset or blank disables it)
    /// - `BLOCKFALL_TIME_SCALE`: descent speed multiplier (default: 1.0)
    pub fn from_env() -> Self {
        use std::env;

        let log_path = env::var("BLOCKFALL_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let time_scale = env::var("BLOCKFALL_TIME_SCALE")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1.0);

        Self {
            log_path,
            time_scale,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(MIN_TIME_SCALE..=MAX_TIME_SCALE).contains(&self.time_scale) {
            bail!(
                "time_scale must be within {}..={}, got {}",
                MIN_TIME_SCALE,
                MAX_TIME_SCALE,
                self.time_scale
            );
        }
        Ok(())
    }
}
