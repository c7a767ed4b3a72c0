use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use crate::{
    internal_rating::{expected_score, g, InternalRating},
    volatility::{IllinoisSolver, VolatilityProblem},
    Error, Outcome, Rating, Score, Volatility,
};

/// All games of a single player in one rating period.
///
/// The player and opponents are converted to the internal scale once, on
/// construction. Intermediate values are cached, so a period is meant to be
/// rated once and then discarded.
#[derive(Debug, Clone)]
pub struct RatingPeriod {
    player: InternalRating,
    opponents: Vec<InternalRating>,
    outcomes: Vec<Outcome>,
    tau: f64,
    solver: IllinoisSolver,

    // Opponents frequently share a deviation (for example, new players).
    g_cache: FxHashMap<OrderedFloat<f64>, f64>,
    // Indexed like opponents.
    e_cache: Vec<Option<Score>>,
}

impl RatingPeriod {
    /// Prepares the rating period of `player`, who played against each of
    /// `opponents` (all on the external scale) with the corresponding
    /// `outcomes`. `tau` is the system constant.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if there is not exactly one outcome per
    /// opponent. [`Error::DegenerateInput`] for non-finite values, negative
    /// deviations, and volatilities or `tau` that are not strictly positive.
    pub fn new(
        player: &Rating,
        opponents: &[Rating],
        outcomes: &[Outcome],
        tau: f64,
    ) -> Result<RatingPeriod, Error> {
        RatingPeriod::with_solver(player, opponents, outcomes, tau, IllinoisSolver::default())
    }

    pub(crate) fn with_solver(
        player: &Rating,
        opponents: &[Rating],
        outcomes: &[Outcome],
        tau: f64,
        solver: IllinoisSolver,
    ) -> Result<RatingPeriod, Error> {
        if opponents.len() != outcomes.len() {
            return Err(Error::LengthMismatch {
                opponents: opponents.len(),
                outcomes: outcomes.len(),
            });
        }
        if !(tau.is_finite() && tau > 0.0) {
            return Err(Error::degenerate("tau", tau));
        }
        validate(player)?;
        for opponent in opponents {
            validate(opponent)?;
        }

        Ok(RatingPeriod {
            player: player.to_internal(),
            opponents: opponents.iter().map(Rating::to_internal).collect(),
            outcomes: outcomes.to_vec(),
            tau,
            solver,
            g_cache: FxHashMap::default(),
            e_cache: vec![None; opponents.len()],
        })
    }

    /// The rated player, on the internal scale.
    pub fn player(&self) -> &InternalRating {
        &self.player
    }

    /// The opponents, on the internal scale.
    pub fn opponents(&self) -> &[InternalRating] {
        &self.opponents
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Number of games.
    pub fn len(&self) -> usize {
        self.opponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opponents.is_empty()
    }

    /// `g(φ_j)` of the opponent at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub fn g(&mut self, index: usize) -> f64 {
        let deviation = self.opponents[index].deviation;
        *self
            .g_cache
            .entry(OrderedFloat(deviation))
            .or_insert_with(|| g(deviation))
    }

    /// Expected score `E(μ, μ_j, φ_j)` of the player against the opponent at
    /// `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub fn expected_score(&mut self, index: usize) -> Score {
        if let Some(e) = self.e_cache[index] {
            return e;
        }
        let opponent_g = self.g(index);
        let e = expected_score(self.player.rating, self.opponents[index].rating, opponent_g);
        self.e_cache[index] = Some(e);
        e
    }

    /// Step 3: estimated variance `v` of the player's rating based only on
    /// game outcomes.
    ///
    /// Returns `None` if no games were played.
    pub fn estimated_variance(&mut self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let information: f64 = (0..self.len())
            .map(|i| {
                let Score(e) = self.expected_score(i);
                self.g(i).powi(2) * e * (1.0 - e)
            })
            .sum();
        Some(1.0 / information)
    }

    /// Step 4: estimated improvement `Δ`, given the estimated variance `v`.
    pub fn estimated_improvement(&mut self, variance: f64) -> f64 {
        variance * self.performance()
    }

    /// `Σ g(φ_j) (s_j − E_j)`, the weighted difference between actual and
    /// expected scores.
    fn performance(&mut self) -> f64 {
        (0..self.len())
            .map(|i| self.g(i) * (self.outcomes[i].score() - self.expected_score(i)))
            .sum()
    }

    /// Computes the player's rating after the period, on the external scale.
    ///
    /// Without games, only the deviation grows, as in the first half of
    /// step 6.
    ///
    /// # Errors
    ///
    /// [`Error::ConvergenceFailure`] if the new volatility can not be
    /// determined. [`Error::DegenerateInput`] if the rating differences are
    /// so extreme that every expected score is exactly 0 or 1.
    pub fn rate(mut self) -> Result<Rating, Error> {
        let player = self.player;
        let prior_volatility = Volatility(player.volatility);

        let Some(variance) = self.estimated_variance() else {
            let rating = InternalRating {
                deviation: player.pre_period_deviation(prior_volatility),
                ..player
            };
            tracing::debug!(deviation = rating.deviation, "rated period without games");
            return Ok(rating.to_external());
        };
        // Every expected score saturated at 0 or 1, so the games carry no
        // information.
        if !variance.is_finite() {
            return Err(Error::degenerate("variance", variance));
        }

        let performance = self.performance();
        let improvement = variance * performance;

        let volatility = self.solver.solve(&VolatilityProblem {
            volatility: prior_volatility,
            deviation: player.deviation,
            variance,
            improvement,
            tau: self.tau,
        })?;

        let pre_period_deviation = player.pre_period_deviation(volatility);
        let deviation = 1.0 / (1.0 / pre_period_deviation.powi(2) + 1.0 / variance).sqrt();
        let rating = InternalRating {
            rating: player.rating + deviation.powi(2) * performance,
            deviation,
            volatility: volatility.into(),
        };

        tracing::debug!(
            games = self.len(),
            variance,
            improvement,
            volatility = rating.volatility,
            "rated period"
        );

        Ok(rating.to_external())
    }
}

fn validate(rating: &Rating) -> Result<(), Error> {
    let rating_value = f64::from(rating.rating);
    let deviation = f64::from(rating.deviation);
    let volatility = f64::from(rating.volatility);

    if !rating_value.is_finite() {
        Err(Error::degenerate("rating", rating_value))
    } else if !(deviation.is_finite() && deviation >= 0.0) {
        Err(Error::degenerate("deviation", deviation))
    } else if !(volatility.is_finite() && volatility > 0.0) {
        Err(Error::degenerate("volatility", volatility))
    } else {
        Ok(())
    }
}
