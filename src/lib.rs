//! Siteswap juggling simulator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pattern interpretation, ball state machine, physics)
//! - `settings`: Simulation configuration, loadable from JSON
//! - `error`: Error taxonomy for pattern and settings validation

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::{BallCountPolicy, Settings};
pub use sim::{BallSnapshot, BallState, Hand, HandPositions, JuggleEvent, Juggler, Pattern};

/// Simulation configuration constants
pub mod consts {
    /// Seconds per beat
    pub const BEAT_DURATION: f64 = 0.5;
    /// Downward acceleration (m/s²)
    pub const GRAVITY: f64 = 9.8;
    /// Seconds a ball idles in hand past its scheduled time before release
    pub const THROW_RELEASE_DELAY: f64 = 0.25;
    /// Host clock step (seconds)
    pub const TIME_STEP: f64 = 0.02;
    /// Horizontal distance of each hand from the center line
    pub const HAND_OFFSET: f64 = 1.0;
}

/// Nearest beat index for a time, ties to even
///
/// Scheduled times pick up small floating-point error over many cycles;
/// anything within half a beat of a grid point maps back onto it.
#[inline]
pub fn beat_index(time: f64, beat_duration: f64) -> i64 {
    (time / beat_duration).round_ties_even() as i64
}
