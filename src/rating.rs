use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    internal_rating::InternalRating,
    rating_system::{DEFAULT_DEVIATION, DEFAULT_RATING, DEFAULT_VOLATILITY},
};

/// Number representing playing strength, such that the difference between two
/// ratings can be used to predict an expected score. Higher is better.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct RatingScalar(pub f64);

impl From<RatingScalar> for f64 {
    #[inline]
    fn from(RatingScalar(rating): RatingScalar) -> f64 {
        rating
    }
}

impl From<f64> for RatingScalar {
    #[inline]
    fn from(rating: f64) -> RatingScalar {
        RatingScalar(rating)
    }
}

impl Sub<RatingScalar> for RatingScalar {
    type Output = RatingDifference;

    #[inline]
    fn sub(self, rhs: RatingScalar) -> RatingDifference {
        RatingDifference(self.0 - rhs.0)
    }
}

impl Add<RatingDifference> for RatingScalar {
    type Output = RatingScalar;

    #[inline]
    fn add(self, RatingDifference(difference): RatingDifference) -> RatingScalar {
        RatingScalar(self.0 + difference)
    }
}

/// A difference between two ratings. Deviations are expressed as rating
/// differences.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct RatingDifference(pub f64);

impl From<RatingDifference> for f64 {
    #[inline]
    fn from(RatingDifference(difference): RatingDifference) -> f64 {
        difference
    }
}

impl From<f64> for RatingDifference {
    #[inline]
    fn from(difference: f64) -> RatingDifference {
        RatingDifference(difference)
    }
}

impl RatingDifference {
    #[must_use]
    #[inline]
    pub fn abs(self) -> RatingDifference {
        RatingDifference(self.0.abs())
    }
}

impl Sub<RatingDifference> for RatingDifference {
    type Output = RatingDifference;

    #[inline]
    fn sub(self, RatingDifference(difference): RatingDifference) -> RatingDifference {
        RatingDifference(self.0 - difference)
    }
}

/// Number indicating the degree of expected fluctuation in a rating.
///
/// Volatility is the same on both the external and the internal scale.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Volatility(pub f64);

impl Volatility {
    #[inline]
    pub(crate) fn sq(self) -> f64 {
        self.0 * self.0
    }
}

impl From<Volatility> for f64 {
    #[inline]
    fn from(Volatility(volatility): Volatility) -> f64 {
        volatility
    }
}

impl From<f64> for Volatility {
    #[inline]
    fn from(volatility: f64) -> Volatility {
        Volatility(volatility)
    }
}

/// A rating on the external (Glicko-1) scale, centered around 1500.
///
/// Ratings are values. Conversions and updates always produce a new
/// [`Rating`] and leave the original untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rating {
    /// Number indicating playing strength. Higher is better. The difference
    /// between two ratings determines the expected score in a game between
    /// the two players.
    pub rating: RatingScalar,
    /// Uncertainty in the rating. A range from rating minus twice the deviation
    /// to rating plus twice the deviation approximately represents a 95%
    /// confidence interval.
    pub deviation: RatingDifference,
    /// Number indicating the degree of expected fluctuation in the rating.
    pub volatility: Volatility,
}

impl Default for Rating {
    /// Rating 1500, deviation 350, volatility 0.06.
    fn default() -> Rating {
        Rating::new(DEFAULT_RATING, DEFAULT_DEVIATION, DEFAULT_VOLATILITY)
    }
}

impl Rating {
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Rating {
        Rating {
            rating: RatingScalar(rating),
            deviation: RatingDifference(deviation),
            volatility: Volatility(volatility),
        }
    }

    /// Converts to the internal (Glicko-2) scale.
    #[inline]
    pub fn to_internal(&self) -> InternalRating {
        InternalRating::from(self)
    }

    /// Compares componentwise, with absolute tolerance `epsilon`.
    pub fn approximately_eq(&self, other: &Rating, epsilon: f64) -> bool {
        (self.rating - other.rating).abs() < RatingDifference(epsilon)
            && (self.deviation - other.deviation).abs() < RatingDifference(epsilon)
            && (self.volatility.0 - other.volatility.0).abs() < epsilon
    }
}
