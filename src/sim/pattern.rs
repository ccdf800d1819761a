//! Siteswap pattern interpretation
//!
//! A pattern is an ordered sequence of throw values. Its period is the
//! sequence length and the number of balls in play is the average throw value.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::settings::BallCountPolicy;

/// An interpreted siteswap pattern
///
/// Serialized as its bare throw list; the ball count is always rederived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Pattern {
    throws: Vec<u32>,
    num_balls: usize,
}

impl Pattern {
    /// Parse a siteswap string, keeping only its digits
    ///
    /// `"3 3 3"`, `"333"` and `"3,3,3"` all give the same pattern.
    pub fn parse(input: &str, policy: BallCountPolicy) -> Result<Self> {
        let throws = input.chars().filter_map(|c| c.to_digit(10)).collect();
        Self::from_throws(throws, policy)
    }

    /// Build a pattern from already-parsed throw values
    pub fn from_throws(throws: Vec<u32>, policy: BallCountPolicy) -> Result<Self> {
        if throws.is_empty() {
            return Err(SimError::EmptyPattern);
        }

        let period = throws.len();
        let sum = sum_throws(&throws);
        let num_balls = sum / period as u64;
        if sum % period as u64 != 0 {
            match policy {
                BallCountPolicy::Strict => {
                    return Err(SimError::NonIntegerBallCount { sum, period });
                }
                BallCountPolicy::Truncate => {
                    log::warn!(
                        "Throw sum {} not divisible by period {}, truncating ball count to {}",
                        sum,
                        period,
                        num_balls
                    );
                }
            }
        }

        Ok(Self {
            num_balls: num_balls as usize,
            throws,
        })
    }

    /// Throw values in pattern order
    pub fn throws(&self) -> &[u32] {
        &self.throws
    }

    /// Number of beats before the pattern repeats
    pub fn period(&self) -> usize {
        self.throws.len()
    }

    pub fn num_balls(&self) -> usize {
        self.num_balls
    }

    /// Sum of all throw values
    pub fn throw_sum(&self) -> u64 {
        sum_throws(&self.throws)
    }

    /// Part of the throw sum lost to truncation (0 for a well-formed pattern)
    pub fn ball_count_remainder(&self) -> u64 {
        self.throw_sum() % self.period() as u64
    }

    /// Throw value due on a beat (negative beats wrap like positive ones)
    #[inline]
    pub fn throw_at(&self, beat: i64) -> u32 {
        let index = beat.rem_euclid(self.period() as i64) as usize;
        self.throws[index]
    }
}

/// Widened so no sequence of `u32` throws can overflow
fn sum_throws(throws: &[u32]) -> u64 {
    throws.iter().map(|&t| u64::from(t)).sum()
}

impl TryFrom<Vec<u32>> for Pattern {
    type Error = SimError;

    fn try_from(throws: Vec<u32>) -> Result<Self> {
        Self::from_throws(throws, BallCountPolicy::Truncate)
    }
}

impl From<Pattern> for Vec<u32> {
    fn from(pattern: Pattern) -> Self {
        pattern.throws
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for throw in &self.throws {
            write!(f, "{}", throw)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cascade() {
        let pattern = Pattern::parse("333", BallCountPolicy::Strict).unwrap();
        assert_eq!(pattern.throws(), &[3, 3, 3]);
        assert_eq!(pattern.period(), 3);
        assert_eq!(pattern.num_balls(), 3);
    }

    #[test]
    fn test_parse_ignores_non_digits() {
        let pattern = Pattern::parse(" 5-1x ", BallCountPolicy::Strict).unwrap();
        assert_eq!(pattern.throws(), &[5, 1]);
        assert_eq!(pattern.num_balls(), 3);
        assert_eq!(pattern.to_string(), "51");
    }

    #[test]
    fn test_empty_pattern() {
        assert!(matches!(
            Pattern::parse("", BallCountPolicy::Truncate),
            Err(SimError::EmptyPattern)
        ));
        assert!(matches!(
            Pattern::parse("abc", BallCountPolicy::Truncate),
            Err(SimError::EmptyPattern)
        ));
    }

    #[test]
    fn test_non_integer_ball_count() {
        // 5 + 2 = 7 over 2 beats
        let pattern = Pattern::parse("52", BallCountPolicy::Truncate).unwrap();
        assert_eq!(pattern.num_balls(), 3);
        assert_eq!(pattern.ball_count_remainder(), 1);

        assert!(matches!(
            Pattern::parse("52", BallCountPolicy::Strict),
            Err(SimError::NonIntegerBallCount { sum: 7, period: 2 })
        ));
    }

    #[test]
    fn test_throw_at_wraps() {
        let pattern = Pattern::parse("531", BallCountPolicy::Strict).unwrap();
        assert_eq!(pattern.throw_at(0), 5);
        assert_eq!(pattern.throw_at(4), 3);
        assert_eq!(pattern.throw_at(8), 1);
        assert_eq!(pattern.throw_at(-1), 1);
    }

    #[test]
    fn test_large_throws_do_not_overflow() {
        let pattern = Pattern::from_throws(vec![u32::MAX, 1], BallCountPolicy::Truncate).unwrap();
        assert_eq!(pattern.throw_sum(), u32::MAX as u64 + 1);
        assert_eq!(pattern.num_balls(), (u32::MAX as usize + 1) / 2);
        assert_eq!(pattern.ball_count_remainder(), 0);

        assert!(matches!(
            Pattern::from_throws(vec![u32::MAX, u32::MAX, 1], BallCountPolicy::Strict),
            Err(SimError::NonIntegerBallCount { sum: 8_589_934_591, period: 3 })
        ));
    }

    #[test]
    fn test_deserialize_rederives_ball_count() {
        let pattern: Pattern = serde_json::from_str("[5, 3, 1]").unwrap();
        assert_eq!(pattern.period(), 3);
        assert_eq!(pattern.num_balls(), 3);
        assert_eq!(serde_json::to_string(&pattern).unwrap(), "[5,3,1]");
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<Pattern>("[]").is_err());
        // A stored ball count is never trusted
        assert!(serde_json::from_str::<Pattern>(r#"{"throws":[],"num_balls":2}"#).is_err());
    }
}
