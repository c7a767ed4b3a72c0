use std::f64::consts::PI;

use crate::{Rating, RatingDifference, RatingScalar, Score, Volatility};

/// Ratio between the external and the internal rating scale.
pub const INTERNAL_RATING_SCALE: f64 = 173.7178;

/// Center of the external rating scale. Maps to `0.0` on the internal scale.
pub const EXTERNAL_RATING_CENTER: f64 = 1500.0;

/// A rating on the internal (Glicko-2) scale, centered around `0.0`, on which
/// all update formulas operate.
///
/// Kept as a distinct type from [`Rating`], so that values on the two scales
/// can not be mixed up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InternalRating {
    /// `μ`
    pub rating: f64,
    /// `φ`
    pub deviation: f64,
    /// `σ`
    pub volatility: f64,
}

impl From<&Rating> for InternalRating {
    fn from(rating: &Rating) -> InternalRating {
        InternalRating {
            rating: (rating.rating.0 - EXTERNAL_RATING_CENTER) / INTERNAL_RATING_SCALE,
            deviation: rating.deviation.0 / INTERNAL_RATING_SCALE,
            volatility: rating.volatility.0,
        }
    }
}

impl From<InternalRating> for Rating {
    fn from(rating: InternalRating) -> Rating {
        Rating {
            rating: RatingScalar(rating.rating * INTERNAL_RATING_SCALE + EXTERNAL_RATING_CENTER),
            deviation: RatingDifference(rating.deviation * INTERNAL_RATING_SCALE),
            volatility: Volatility(rating.volatility),
        }
    }
}

impl InternalRating {
    /// Converts back to the external (Glicko-1) scale.
    #[inline]
    pub fn to_external(self) -> Rating {
        Rating::from(self)
    }

    /// Compares componentwise, with absolute tolerance `epsilon`.
    pub fn approximately_eq(&self, other: &InternalRating, epsilon: f64) -> bool {
        (self.rating - other.rating).abs() < epsilon
            && (self.deviation - other.deviation).abs() < epsilon
            && (self.volatility - other.volatility).abs() < epsilon
    }

    /// Deviation after one rating period, before taking game results into
    /// account: `φ* = sqrt(φ² + σ²)`.
    #[inline]
    pub(crate) fn pre_period_deviation(&self, volatility: Volatility) -> f64 {
        (self.deviation.powi(2) + volatility.sq()).sqrt()
    }

    /// Expected score of `self` against `opponent`, `E(μ, μ_j, φ_j)`.
    pub fn expected_score(&self, opponent: &InternalRating) -> Score {
        expected_score(self.rating, opponent.rating, g(opponent.deviation))
    }
}

/// Weight of a game, given the deviation `φ` of the opponent. Games against
/// opponents with uncertain ratings carry less information.
#[inline]
pub(crate) fn g(deviation: f64) -> f64 {
    1.0 / (1.0 + 3.0 * deviation.powi(2) / (PI * PI)).sqrt()
}

/// Logistic expectation on the internal scale, given the precomputed `g` of
/// the opponent's deviation.
#[inline]
pub(crate) fn expected_score(rating: f64, opponent_rating: f64, opponent_g: f64) -> Score {
    Score(1.0 / (1.0 + (-opponent_g * (rating - opponent_rating)).exp()))
}
