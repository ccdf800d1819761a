//! Deterministic simulation module
//!
//! All juggling logic lives here. This module must be pure and deterministic:
//! - Explicit time parameter, no global clock
//! - Each ball updated independently of the others
//! - Stable iteration order (by ball ID)
//! - No rendering or platform dependencies

pub mod ball;
pub mod hand;
pub mod juggler;
pub mod pattern;

pub use ball::{Ball, BallState, Flight, JuggleEvent};
pub use hand::{Hand, HandPositions};
pub use juggler::{BallSnapshot, Juggler};
pub use pattern::Pattern;
