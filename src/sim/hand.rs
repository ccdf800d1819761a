//! Hand identities and their fixed positions

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::HAND_OFFSET;

/// One of the juggler's two hands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Right,
    Left,
}

impl Hand {
    pub fn opposite(self) -> Self {
        match self {
            Hand::Right => Hand::Left,
            Hand::Left => Hand::Right,
        }
    }

    /// Hand a throw of this value lands in (odd values cross)
    pub fn destination(self, throw_value: u32) -> Self {
        if throw_value % 2 == 1 {
            self.opposite()
        } else {
            self
        }
    }

    /// Starting hand for the ball with this index (right, left, right, ...)
    pub fn for_ball(index: usize) -> Self {
        if index % 2 == 0 { Hand::Right } else { Hand::Left }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Hand::Right => "R",
            Hand::Left => "L",
        }
    }
}

/// Resting positions of both hands, fixed for a simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandPositions {
    pub right: DVec2,
    pub left: DVec2,
}

impl Default for HandPositions {
    fn default() -> Self {
        Self {
            right: DVec2::new(HAND_OFFSET, 0.0),
            left: DVec2::new(-HAND_OFFSET, 0.0),
        }
    }
}

impl HandPositions {
    #[inline]
    pub fn position(&self, hand: Hand) -> DVec2 {
        match hand {
            Hand::Right => self.right,
            Hand::Left => self.left,
        }
    }
}
