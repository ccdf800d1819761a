//! Simulation settings
//!
//! Persisted as JSON. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::HandPositions;

/// What to do when the throw sum is not divisible by the period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BallCountPolicy {
    /// Truncate the ball count and log a warning
    #[default]
    Truncate,
    /// Reject the pattern
    Strict,
}

impl BallCountPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BallCountPolicy::Truncate => "truncate",
            BallCountPolicy::Strict => "strict",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "truncate" => Some(BallCountPolicy::Truncate),
            "strict" => Some(BallCountPolicy::Strict),
            _ => None,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Seconds per beat
    pub beat_duration: f64,
    /// Seconds a ball idles in hand past its scheduled time before release
    pub throw_release_delay: f64,
    /// Host clock step (seconds)
    pub time_step: f64,

    // === Physics ===
    /// Downward acceleration
    pub gravity: f64,

    // === Geometry ===
    pub hands: HandPositions,

    // === Validation ===
    pub ball_count_policy: BallCountPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            beat_duration: BEAT_DURATION,
            throw_release_delay: THROW_RELEASE_DELAY,
            time_step: TIME_STEP,
            gravity: GRAVITY,
            hands: HandPositions::default(),
            ball_count_policy: BallCountPolicy::Truncate,
        }
    }
}

impl Settings {
    /// Check every field is usable by the simulation
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("beat_duration", self.beat_duration),
            ("time_step", self.time_step),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidSettings { field, value });
            }
        }

        let non_negative = [
            ("throw_release_delay", self.throw_release_delay),
            ("gravity", self.gravity),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidSettings { field, value });
            }
        }

        if !self.hands.right.is_finite() || !self.hands.left.is_finite() {
            return Err(SimError::InvalidSettings {
                field: "hands",
                value: f64::NAN,
            });
        }

        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
