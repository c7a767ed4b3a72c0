//! Glicko-2 rating updates for a single player over one rating period.
//!
//! ```
//! use glicko2_period::{Outcome, Rating, RatingPeriod};
//!
//! let player = Rating::new(1500.0, 200.0, 0.06);
//! let opponents = [
//!     Rating::new(1400.0, 30.0, 0.06),
//!     Rating::new(1550.0, 100.0, 0.06),
//!     Rating::new(1700.0, 300.0, 0.06),
//! ];
//! let outcomes = [Outcome::Win, Outcome::Loss, Outcome::Loss];
//!
//! let updated = RatingPeriod::new(&player, &opponents, &outcomes, 0.5)?.rate()?;
//! assert!((f64::from(updated.rating) - 1464.06).abs() < 0.01);
//! assert!((f64::from(updated.deviation) - 151.52).abs() < 0.01);
//! # Ok::<_, glicko2_period::Error>(())
//! ```
//!
//! See <http://www.glicko.net/glicko/glicko2.pdf>.

mod error;
mod internal_rating;
mod rating;
mod rating_period;
mod rating_system;
mod score;
mod volatility;

pub use error::Error;
pub use internal_rating::{InternalRating, EXTERNAL_RATING_CENTER, INTERNAL_RATING_SCALE};
pub use rating::{Rating, RatingDifference, RatingScalar, Volatility};
pub use rating_period::RatingPeriod;
pub use rating_system::{
    RatingSystem, RatingSystemBuilder, CONVERGENCE_TOLERANCE, DEFAULT_DEVIATION, DEFAULT_RATING,
    DEFAULT_TAU, DEFAULT_VOLATILITY, MAX_ITERATIONS,
};
pub use score::{Outcome, Score};

/// Log likelihood deviance metric that can be used to evaluate the quality of
/// rating system predictions.
///
/// Lower is better.
///
/// See <https://www.kaggle.com/c/ChessRatings2/overview/evaluation>.
pub fn deviance(Score(expected): Score, Score(actual): Score) -> f64 {
    let expected = expected.clamp(0.01, 0.99);
    -(actual * expected.log10() + (1.0 - actual) * (1.0 - expected).log10())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deviance() {
        let confident = deviance(Score(0.9), Outcome::Win.into());
        let wrong = deviance(Score(0.9), Outcome::Loss.into());
        assert!(confident < deviance(Score::DRAW, Outcome::Win.into()));
        assert!(wrong > confident);
        assert!(deviance(Score::WIN, Score::WIN).is_finite());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let rating = Rating::new(1464.06, 151.52, 0.05999);
        let json = serde_json::to_string(&rating).unwrap();
        assert_eq!(
            json,
            r#"{"rating":1464.06,"deviation":151.52,"volatility":0.05999}"#
        );
        assert_eq!(serde_json::from_str::<Rating>(&json).unwrap(), rating);
        assert_eq!(serde_json::to_string(&Outcome::Draw).unwrap(), r#""Draw""#);
    }
}
