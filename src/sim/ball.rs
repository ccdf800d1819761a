//! Ball state machine and projectile physics
//!
//! A ball alternates between resting in a hand and flying along a parabola
//! to the hand its throw value selects. Each update depends only on the
//! ball's own fields, the pattern and the settings, never on other balls.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::hand::Hand;
use super::pattern::Pattern;
use crate::beat_index;
use crate::settings::Settings;

/// Parameters of one throw, fixed at release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Release time
    pub launch_time: f64,
    /// Always `throw_value * beat_duration`
    pub duration: f64,
    pub launch_pos: DVec2,
    pub vel: DVec2,
    pub destination: Hand,
    pub throw_value: u32,
}

impl Flight {
    /// Plan a throw that leaves `from` and lands exactly on `to` after `duration`
    ///
    /// Both hands sit on the baseline, so `0 = vy*T - g*T²/2` gives `vy = g*T/2`.
    pub fn plan(
        launch_time: f64,
        from: DVec2,
        to: DVec2,
        destination: Hand,
        throw_value: u32,
        duration: f64,
        gravity: f64,
    ) -> Self {
        let vx = (to.x - from.x) / duration;
        let vy = 0.5 * gravity * duration;
        Self {
            launch_time,
            duration,
            launch_pos: from,
            vel: DVec2::new(vx, vy),
            destination,
            throw_value,
        }
    }

    /// Exact catch time
    #[inline]
    pub fn catch_time(&self) -> f64 {
        self.launch_time + self.duration
    }

    /// Position `elapsed` seconds after release
    #[inline]
    pub fn position_at(&self, elapsed: f64, gravity: f64) -> DVec2 {
        self.launch_pos
            + DVec2::new(
                self.vel.x * elapsed,
                self.vel.y * elapsed - 0.5 * gravity * elapsed * elapsed,
            )
    }
}

/// Ball state - resting in a hand or flying
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    Held,
    InFlight(Flight),
}

impl BallState {
    pub fn is_held(&self) -> bool {
        matches!(self, BallState::Held)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, BallState::InFlight(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BallState::Held => "held",
            BallState::InFlight(_) => "in_flight",
        }
    }
}

/// Something that happened to a ball during an update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JuggleEvent {
    /// Ball released
    Throw {
        ball: u32,
        time: f64,
        from: Hand,
        to: Hand,
        value: u32,
    },
    /// Ball landed; `time` is the exact catch time, not the update time
    Catch { ball: u32, time: f64, hand: Hand },
    /// Ball kept in hand for a beat because its throw value was 0
    Hold { ball: u32, time: f64, hand: Hand },
}

impl JuggleEvent {
    pub fn ball(&self) -> u32 {
        match *self {
            JuggleEvent::Throw { ball, .. }
            | JuggleEvent::Catch { ball, .. }
            | JuggleEvent::Hold { ball, .. } => ball,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Holding hand while held, throwing hand while in flight
    pub hand: Hand,
    /// When the next throw is due by the pattern's cadence (release comes later by the delay)
    pub scheduled_throw_time: f64,
    pub state: BallState,
    pub pos: DVec2,
}

impl Ball {
    pub fn new(id: u32, hand: Hand, scheduled_throw_time: f64, settings: &Settings) -> Self {
        Self {
            id,
            hand,
            scheduled_throw_time,
            state: BallState::Held,
            pos: settings.hands.position(hand),
        }
    }

    /// Release time of the pending throw
    #[inline]
    pub fn release_time(&self, settings: &Settings) -> f64 {
        self.scheduled_throw_time + settings.throw_release_delay
    }

    /// Advance to `time` and return the resulting position
    pub fn advance(&mut self, time: f64, pattern: &Pattern, settings: &Settings) -> DVec2 {
        self.update(time, pattern, settings);
        self.pos
    }

    /// Advance to `time`, applying at most one state transition
    pub fn update(&mut self, time: f64, pattern: &Pattern, settings: &Settings) -> Option<JuggleEvent> {
        match self.state {
            BallState::Held => {
                if time >= self.release_time(settings) {
                    Some(self.throw(time, pattern, settings))
                } else {
                    self.pos = settings.hands.position(self.hand);
                    None
                }
            }
            BallState::InFlight(flight) => {
                let elapsed = time - flight.launch_time;
                if elapsed < flight.duration {
                    self.pos = flight.position_at(elapsed, settings.gravity);
                    None
                } else {
                    Some(self.catch(&flight, settings))
                }
            }
        }
    }

    /// Release the ball; the throw value comes from the scheduled beat, not the release time
    fn throw(&mut self, time: f64, pattern: &Pattern, settings: &Settings) -> JuggleEvent {
        let beat = beat_index(self.scheduled_throw_time, settings.beat_duration);
        let value = pattern.throw_at(beat);

        if value == 0 {
            // Empty-hand beat: nothing to fly, wait for the next one
            self.scheduled_throw_time += settings.beat_duration;
            self.pos = settings.hands.position(self.hand);
            log::debug!("Ball {} holds in {} at beat {}", self.id, self.hand.as_str(), beat);
            return JuggleEvent::Hold {
                ball: self.id,
                time,
                hand: self.hand,
            };
        }

        let from = self.hand;
        let to = from.destination(value);
        let duration = value as f64 * settings.beat_duration;
        let flight = Flight::plan(
            time,
            settings.hands.position(from),
            settings.hands.position(to),
            to,
            value,
            duration,
            settings.gravity,
        );

        self.pos = flight.launch_pos;
        self.state = BallState::InFlight(flight);
        log::debug!(
            "Ball {} thrown {} -> {} at {:.3} (value {}, flight {:.3})",
            self.id,
            from.as_str(),
            to.as_str(),
            time,
            value,
            duration
        );

        JuggleEvent::Throw {
            ball: self.id,
            time,
            from,
            to,
            value,
        }
    }

    /// Land the ball, snapping to the hand and rescheduling from the exact catch time
    fn catch(&mut self, flight: &Flight, settings: &Settings) -> JuggleEvent {
        let catch_time = flight.catch_time();
        self.hand = flight.destination;
        self.pos = settings.hands.position(self.hand);
        self.scheduled_throw_time = catch_time;
        self.state = BallState::Held;
        log::debug!("Ball {} caught in {} at {:.3}", self.id, self.hand.as_str(), catch_time);

        JuggleEvent::Catch {
            ball: self.id,
            time: catch_time,
            hand: self.hand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::BallCountPolicy;

    fn no_delay() -> Settings {
        Settings {
            throw_release_delay: 0.0,
            ..Default::default()
        }
    }

    fn pattern(s: &str) -> Pattern {
        Pattern::parse(s, BallCountPolicy::Strict).unwrap()
    }

    #[test]
    fn test_held_until_release() {
        let settings = Settings::default();
        let pattern = pattern("3");
        let mut ball = Ball::new(0, Hand::Right, 0.0, &settings);

        assert!(ball.update(0.2, &pattern, &settings).is_none());
        assert!(ball.state.is_held());
        assert_eq!(ball.pos, DVec2::new(1.0, 0.0));

        let event = ball.update(0.25, &pattern, &settings);
        assert!(matches!(
            event,
            Some(JuggleEvent::Throw { from: Hand::Right, to: Hand::Left, value: 3, .. })
        ));
        assert!(ball.state.is_in_flight());
        assert_eq!(ball.pos.y, 0.0);
    }

    #[test]
    fn test_flight_parameters() {
        let settings = no_delay();
        let pattern = pattern("3");
        let mut ball = Ball::new(0, Hand::Right, 0.0, &settings);
        ball.update(0.0, &pattern, &settings);

        let BallState::InFlight(flight) = ball.state else {
            panic!("ball should be in flight");
        };
        assert_eq!(flight.duration, 1.5);
        assert_eq!(flight.destination, Hand::Left);
        assert!((flight.vel.x - (-2.0 / 1.5)).abs() < 1e-12);
        assert!((flight.vel.y - 0.5 * 9.8 * 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_apex_at_half_flight() {
        let settings = no_delay();
        let pattern = pattern("3");
        let mut ball = Ball::new(0, Hand::Right, 0.0, &settings);
        ball.update(0.0, &pattern, &settings);

        let pos = ball.advance(0.75, &pattern, &settings);
        // Midway between the hands, at g*T²/8
        assert!(pos.x.abs() < 1e-12);
        assert!((pos.y - 9.8 * 1.5 * 1.5 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_catch_snaps_and_reschedules() {
        let settings = no_delay();
        let pattern = pattern("3");
        let mut ball = Ball::new(0, Hand::Right, 0.0, &settings);
        ball.update(0.0, &pattern, &settings);

        // Late update: catch time still comes from the flight, not the clock
        let event = ball.update(1.53, &pattern, &settings);
        assert_eq!(
            event,
            Some(JuggleEvent::Catch { ball: 0, time: 1.5, hand: Hand::Left })
        );
        assert!(ball.state.is_held());
        assert_eq!(ball.pos, DVec2::new(-1.0, 0.0));
        assert_eq!(ball.scheduled_throw_time, 1.5);
    }

    #[test]
    fn test_self_throw_keeps_hand() {
        let settings = no_delay();
        let pattern = pattern("4");
        let mut ball = Ball::new(0, Hand::Left, 0.0, &settings);

        ball.update(0.0, &pattern, &settings);
        assert!(ball.state.is_in_flight());
        assert_eq!(ball.hand, Hand::Left);

        // Self-throws go straight up
        let pos = ball.advance(1.0, &pattern, &settings);
        assert_eq!(pos.x, -1.0);
        assert!(pos.y > 0.0);

        ball.update(2.0, &pattern, &settings);
        assert!(ball.state.is_held());
        assert_eq!(ball.hand, Hand::Left);
    }

    #[test]
    fn test_zero_throw_holds_one_beat() {
        let settings = no_delay();
        let pattern = pattern("40");
        let mut ball = Ball::new(1, Hand::Left, 0.5, &settings);

        let event = ball.update(0.5, &pattern, &settings);
        assert_eq!(
            event,
            Some(JuggleEvent::Hold { ball: 1, time: 0.5, hand: Hand::Left })
        );
        assert!(ball.state.is_held());
        assert_eq!(ball.scheduled_throw_time, 1.0);

        let event = ball.update(1.0, &pattern, &settings);
        assert!(matches!(event, Some(JuggleEvent::Throw { value: 4, .. })));
    }

    #[test]
    fn test_throw_value_from_scheduled_beat() {
        // Release at 0.75 would round to beat 2 (a 5) if the release time were used
        let settings = Settings {
            throw_release_delay: 0.2,
            ..Default::default()
        };
        let pattern = pattern("51");
        let mut ball = Ball::new(1, Hand::Left, 0.5, &settings);
        let event = ball.update(0.75, &pattern, &settings);
        assert!(matches!(event, Some(JuggleEvent::Throw { value: 1, .. })));
    }
}
