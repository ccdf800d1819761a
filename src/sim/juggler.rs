//! Juggling simulation state and fixed-step driver
//!
//! Owns every ball for the life of the simulation. The clock is explicit:
//! callers either step by the configured time step or pass a time directly.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallState, JuggleEvent};
use super::hand::Hand;
use super::pattern::Pattern;
use crate::error::{Result, SimError};
use crate::settings::Settings;

/// What a renderer needs to draw one ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub id: u32,
    pub position: DVec2,
    pub hand: Hand,
    pub state: BallState,
}

impl From<&Ball> for BallSnapshot {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            position: ball.pos,
            hand: ball.hand,
            state: ball.state,
        }
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Juggler {
    pattern: Pattern,
    settings: Settings,
    /// Balls in id order
    balls: Vec<Ball>,
    /// Current simulation time (seconds)
    time: f64,
    /// Fixed steps taken by `step`
    steps: u64,
}

impl Juggler {
    /// Create the simulation with all balls held and staggered one beat apart
    pub fn new(pattern: Pattern, settings: Settings) -> Result<Self> {
        if pattern.period() == 0 {
            return Err(SimError::EmptyPattern);
        }
        settings.validate()?;

        let balls = (0..pattern.num_balls())
            .map(|i| {
                Ball::new(
                    i as u32,
                    Hand::for_ball(i),
                    i as f64 * settings.beat_duration,
                    &settings,
                )
            })
            .collect();

        log::info!(
            "Juggling {}: period {}, {} balls",
            pattern,
            pattern.period(),
            pattern.num_balls()
        );

        Ok(Self {
            pattern,
            settings,
            balls,
            time: 0.0,
            steps: 0,
        })
    }

    /// Parse a siteswap string and create the simulation
    pub fn from_siteswap(input: &str, settings: Settings) -> Result<Self> {
        let pattern = Pattern::parse(input, settings.ball_count_policy)?;
        Self::new(pattern, settings)
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advance by one configured time step
    ///
    /// Time is `steps * time_step` rather than a running sum so it never drifts.
    pub fn step(&mut self) -> Vec<JuggleEvent> {
        self.steps += 1;
        let time = self.steps as f64 * self.settings.time_step;
        self.advance_to(time)
    }

    /// Advance every ball to `time`; events come back in ball id order
    ///
    /// An earlier time than the current one is ignored: no ball moves and no
    /// events are produced.
    pub fn advance_to(&mut self, time: f64) -> Vec<JuggleEvent> {
        if time < self.time {
            log::warn!("Clock moved backwards: {:.4} -> {:.4}, ignored", self.time, time);
            return Vec::new();
        }
        self.time = time;

        let pattern = &self.pattern;
        let settings = &self.settings;

        #[cfg(feature = "parallel")]
        let events: Vec<JuggleEvent> = {
            use rayon::prelude::*;
            self.balls
                .par_iter_mut()
                .filter_map(|ball| ball.update(time, pattern, settings))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let events: Vec<JuggleEvent> = self
            .balls
            .iter_mut()
            .filter_map(|ball| ball.update(time, pattern, settings))
            .collect();

        events
    }

    /// Current positions of all balls, in id order
    pub fn positions(&self) -> Vec<DVec2> {
        self.balls.iter().map(|b| b.pos).collect()
    }

    pub fn snapshots(&self) -> Vec<BallSnapshot> {
        self.balls.iter().map(BallSnapshot::from).collect()
    }

    /// (held, in flight) ball counts
    pub fn counts(&self) -> (usize, usize) {
        let held = self.balls.iter().filter(|b| b.state.is_held()).count();
        (held, self.balls.len() - held)
    }
}
