//! Analytics Configuration
//!
//! All thresholds used by the analytics stages live here instead of being
//! hardcoded in the estimators. Every field has a default and can be
//! overridden independently from partial JSON.
//!
//! ## Usage
//!
//! ```rust
//! use fa_core::config::AnalyticsConfig;
//!
//! // Defaults (5-frame window, 24 fps, 15m/30m pass thresholds)
//! let config = AnalyticsConfig::default();
//!
//! // Partial override
//! let config = AnalyticsConfig::from_json(r#"{ "kinematics": { "frame_rate": 30.0 } }"#).unwrap();
//! assert_eq!(config.kinematics.window_size, 5);
//! ```
//!
//! ## Environment Variables
//!
//! - `FA_ANALYTICS_CONFIG_PATH`: path to a JSON config file

use serde::{Deserialize, Serialize};
use std::{env, fs};

use crate::error::{AnalyticsError, Result};

pub const CONFIG_PATH_ENV: &str = "FA_ANALYTICS_CONFIG_PATH";

/// Top-level analytics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub kinematics: KinematicsConfig,
    pub possession: PossessionConfig,
    pub passes: PassConfig,
    pub shots: ShotConfig,
    /// Derive ball speed from frame-to-frame displacement before shot
    /// detection. Speeds already present on ball records are kept.
    pub estimate_ball_speed: bool,
    /// The two team labels reported in the possession summary
    pub teams: (String, String),
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            kinematics: KinematicsConfig::default(),
            possession: PossessionConfig::default(),
            passes: PassConfig::default(),
            shots: ShotConfig::default(),
            estimate_ball_speed: false,
            teams: ("Team 1".to_string(), "Team 2".to_string()),
        }
    }
}

/// Sliding-window speed/distance parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicsConfig {
    /// Window size in frames
    pub window_size: usize,
    /// Video frame rate (frames per second)
    pub frame_rate: f32,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            frame_rate: 24.0,
        }
    }
}

/// Ball assignment parameters for the default proximity rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PossessionConfig {
    /// Maximum foot-to-ball distance in pixels for an assignment
    pub max_player_ball_distance: f32,
}

impl Default for PossessionConfig {
    fn default() -> Self {
        Self {
            max_player_ball_distance: 70.0,
        }
    }
}

/// Pass classification thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassConfig {
    /// Passes at or below this distance (m) are short
    pub short_pass_threshold: f32,
    /// Passes at or above this distance (m) are long
    pub long_pass_threshold: f32,
    /// Fraction of pitch width counted as a wide band on each touchline (0-0.5)
    pub wide_area_fraction: f32,
    /// Pitch (length, width) in meters
    pub field_dimensions: (f32, f32),
    /// Distance from either goal line that counts as the box (m)
    pub penalty_area_depth: f32,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            short_pass_threshold: 15.0,
            long_pass_threshold: 30.0,
            wide_area_fraction: 0.2,
            field_dimensions: (100.0, 64.0),
            penalty_area_depth: 16.5,
        }
    }
}

/// Shot detection threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    /// Ball speed (km/h) at or above which a frame counts as a shot
    pub shot_speed_threshold: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            shot_speed_threshold: 15.0,
        }
    }
}

impl AnalyticsConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `FA_ANALYTICS_CONFIG_PATH`, or defaults
    /// when the variable is unset or blank.
    pub fn from_env_or_default() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        tracing::info!(path, "loaded analytics config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let k = &self.kinematics;
        if k.window_size == 0 {
            return Err(invalid("kinematics.window_size must be >= 1"));
        }
        if k.frame_rate.is_nan() || k.frame_rate <= 0.0 {
            return Err(invalid("kinematics.frame_rate must be > 0"));
        }

        if negative_or_nan(self.possession.max_player_ball_distance) {
            return Err(invalid("possession.max_player_ball_distance must be >= 0"));
        }

        let p = &self.passes;
        if negative_or_nan(p.short_pass_threshold)
            || p.long_pass_threshold.is_nan()
            || p.short_pass_threshold > p.long_pass_threshold
        {
            return Err(invalid(
                "passes: require 0 <= short_pass_threshold <= long_pass_threshold",
            ));
        }
        if !(0.0..=0.5).contains(&p.wide_area_fraction) {
            return Err(invalid("passes.wide_area_fraction must be within [0, 0.5]"));
        }
        let (w, h) = p.field_dimensions;
        if w.is_nan() || h.is_nan() || w <= 0.0 || h <= 0.0 {
            return Err(invalid("passes.field_dimensions must be positive"));
        }
        if negative_or_nan(p.penalty_area_depth) {
            return Err(invalid("passes.penalty_area_depth must be >= 0"));
        }

        if negative_or_nan(self.shots.shot_speed_threshold) {
            return Err(invalid("shots.shot_speed_threshold must be >= 0"));
        }

        let (first, second) = &self.teams;
        if first.trim().is_empty() || second.trim().is_empty() {
            return Err(invalid("teams: both team labels must be non-empty"));
        }
        if first == second {
            return Err(invalid("teams: team labels must differ"));
        }

        Ok(())
    }
}

fn negative_or_nan(value: f32) -> bool {
    value.is_nan() || value < 0.0
}

fn invalid(msg: &str) -> AnalyticsError {
    AnalyticsError::InvalidConfig(msg.to_string())
}
