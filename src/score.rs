use std::ops::Sub;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A score or expectation value in the range `0.0..=1.0`, where `0.0` is a
/// loss and `1.0` is a win.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Score(pub f64);

impl From<Score> for f64 {
    #[inline]
    fn from(Score(score): Score) -> f64 {
        score
    }
}

impl Score {
    pub const LOSS: Score = Score(0.0);
    pub const DRAW: Score = Score(0.5);
    pub const WIN: Score = Score(1.0);

    #[must_use]
    #[inline]
    pub fn opposite(self) -> Score {
        Score(1.0 - self.0)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Sub<Score> for Score {
    type Output = f64;

    #[inline]
    fn sub(self, Score(rhs): Score) -> f64 {
        self.0 - rhs
    }
}

/// Result of a single game, from the point of view of the rated player.
///
/// Unlike [`Score`], this admits no values other than the three that can
/// actually occur in a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// The same game seen from the opponent's side.
    #[must_use]
    pub fn opposite(self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }

    #[inline]
    pub fn score(self) -> Score {
        match self {
            Outcome::Win => Score::WIN,
            Outcome::Loss => Score::LOSS,
            Outcome::Draw => Score::DRAW,
        }
    }
}

impl From<Outcome> for Score {
    #[inline]
    fn from(outcome: Outcome) -> Score {
        outcome.score()
    }
}

impl From<Outcome> for f64 {
    #[inline]
    fn from(outcome: Outcome) -> f64 {
        outcome.score().value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_values() {
        assert_eq!(f64::from(Outcome::Win), 1.0);
        assert_eq!(f64::from(Outcome::Loss), 0.0);
        assert_eq!(f64::from(Outcome::Draw), 0.5);
    }

    #[test]
    fn test_opposite() {
        for outcome in [Outcome::Win, Outcome::Loss, Outcome::Draw] {
            assert_eq!(outcome.opposite().score(), outcome.score().opposite());
            assert_eq!(outcome.opposite().opposite(), outcome);
        }
    }

    #[test]
    fn test_score_difference() {
        assert_eq!(Score::WIN - Score(0.25), 0.75);
        assert_eq!(Score::LOSS - Score::DRAW, -0.5);
    }
}
