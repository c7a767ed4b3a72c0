use crate::{
    internal_rating::InternalRating, volatility::IllinoisSolver, Error, Outcome, Rating,
    RatingPeriod, Score,
};

/// Starting rating of a new player.
pub const DEFAULT_RATING: f64 = 1500.0;
/// Starting deviation of a new player.
pub const DEFAULT_DEVIATION: f64 = 350.0;
/// Starting volatility of a new player.
pub const DEFAULT_VOLATILITY: f64 = 0.06;
/// Default system constant `τ`, constraining the change in volatility over
/// time. Reasonable choices are between 0.3 and 1.2.
pub const DEFAULT_TAU: f64 = 0.3;
/// The volatility iteration stops once the bracket around `ln(σ'²)` is
/// narrower than this.
pub const CONVERGENCE_TOLERANCE: f64 = 0.000_001;
/// Upper bound for both the bracket search and the Illinois iteration of the
/// volatility update.
pub const MAX_ITERATIONS: usize = 1000;

#[derive(Debug, Clone)]
pub struct RatingSystemBuilder {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,

    tau: f64,

    convergence_tolerance: f64,
    max_iterations: usize,
}

impl Default for RatingSystemBuilder {
    fn default() -> RatingSystemBuilder {
        RatingSystemBuilder::new()
    }
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder {
            default_rating: DEFAULT_RATING,
            default_deviation: DEFAULT_DEVIATION,
            default_volatility: DEFAULT_VOLATILITY,

            tau: DEFAULT_TAU,

            convergence_tolerance: CONVERGENCE_TOLERANCE,
            max_iterations: MAX_ITERATIONS,
        }
    }

    pub fn default_rating(&mut self, default_rating: f64) -> &mut Self {
        assert!(default_rating.is_finite());
        self.default_rating = default_rating;
        self
    }

    pub fn default_deviation(&mut self, default_deviation: f64) -> &mut Self {
        assert!(default_deviation >= 0.0 && default_deviation.is_finite());
        self.default_deviation = default_deviation;
        self
    }

    pub fn default_volatility(&mut self, default_volatility: f64) -> &mut Self {
        assert!(default_volatility > 0.0 && default_volatility.is_finite());
        self.default_volatility = default_volatility;
        self
    }

    pub fn tau(&mut self, tau: f64) -> &mut Self {
        assert!(tau > 0.0 && tau.is_finite());
        self.tau = tau;
        self
    }

    pub fn convergence_tolerance(&mut self, convergence_tolerance: f64) -> &mut Self {
        assert!(convergence_tolerance > 0.0);
        self.convergence_tolerance = convergence_tolerance;
        self
    }

    pub fn max_iterations(&mut self, max_iterations: usize) -> &mut Self {
        assert!(max_iterations > 0);
        self.max_iterations = max_iterations;
        self
    }

    pub fn build(&self) -> RatingSystem {
        RatingSystem {
            default_rating: self.default_rating,
            default_deviation: self.default_deviation,
            default_volatility: self.default_volatility,

            tau: self.tau,

            solver: IllinoisSolver {
                tolerance: self.convergence_tolerance,
                max_iterations: self.max_iterations,
            },
        }
    }
}

/// Parameters of the rating system, shared by all rating periods computed
/// with it.
#[derive(Debug, Clone)]
pub struct RatingSystem {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,

    tau: f64,

    solver: IllinoisSolver,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem::new()
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::builder().build()
    }

    pub fn default_rating(&self) -> f64 {
        self.default_rating
    }

    pub fn default_deviation(&self) -> f64 {
        self.default_deviation
    }

    pub fn default_volatility(&self) -> f64 {
        self.default_volatility
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn convergence_tolerance(&self) -> f64 {
        self.solver.tolerance
    }

    pub fn max_iterations(&self) -> usize {
        self.solver.max_iterations
    }

    /// Rating for a player without any games.
    pub fn new_rating(&self) -> Rating {
        Rating::new(
            self.default_rating,
            self.default_deviation,
            self.default_volatility,
        )
    }

    /// Expected score of `player` in a game against `opponent`.
    pub fn expected_score(&self, player: &Rating, opponent: &Rating) -> Score {
        InternalRating::from(player).expected_score(&InternalRating::from(opponent))
    }

    /// Prepares the rating period of `player`, who played against each of
    /// `opponents` with the corresponding `outcomes`.
    ///
    /// # Errors
    ///
    /// See [`RatingPeriod::new()`].
    pub fn rating_period(
        &self,
        player: &Rating,
        opponents: &[Rating],
        outcomes: &[Outcome],
    ) -> Result<RatingPeriod, Error> {
        RatingPeriod::with_solver(player, opponents, outcomes, self.tau, self.solver)
    }

    /// Computes the rating of `player` after the rating period.
    ///
    /// # Errors
    ///
    /// See [`RatingPeriod::new()`] and [`RatingPeriod::rate()`].
    pub fn update_rating(
        &self,
        player: &Rating,
        opponents: &[Rating],
        outcomes: &[Outcome],
    ) -> Result<Rating, Error> {
        self.rating_period(player, opponents, outcomes)?.rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let rating_system = RatingSystem::builder()
            .default_rating(1200.0)
            .default_deviation(300.0)
            .tau(0.75)
            .max_iterations(50)
            .build();

        assert_eq!(rating_system.new_rating(), Rating::new(1200.0, 300.0, 0.06));
        assert_eq!(rating_system.tau(), 0.75);
        assert_eq!(rating_system.max_iterations(), 50);
        assert_eq!(rating_system.convergence_tolerance(), CONVERGENCE_TOLERANCE);
    }

    #[test]
    fn test_default() {
        let rating_system = RatingSystem::default();
        assert_eq!(rating_system.new_rating(), Rating::default());
        assert_eq!(rating_system.tau(), DEFAULT_TAU);
    }

    #[test]
    #[should_panic]
    fn test_builder_rejects_tau() {
        RatingSystem::builder().tau(0.0);
    }

    #[test]
    fn test_expected_score() {
        let rating_system = RatingSystem::new();
        let player = Rating::new(1500.0, 200.0, 0.06);
        let opponent = Rating::new(1400.0, 30.0, 0.06);
        let Score(expected) = rating_system.expected_score(&player, &opponent);
        assert!((expected - 0.639).abs() < 0.001);

        let equal = rating_system.expected_score(&player, &player);
        assert!((equal.value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_update_rating_uses_tau() {
        let player = Rating::new(1500.0, 200.0, 0.06);
        let opponents = [
            Rating::new(1400.0, 30.0, 0.06),
            Rating::new(1550.0, 100.0, 0.06),
            Rating::new(1700.0, 300.0, 0.06),
        ];
        let outcomes = [Outcome::Win, Outcome::Loss, Outcome::Loss];

        let rating_system = RatingSystem::builder().tau(0.5).build();
        let updated = rating_system
            .update_rating(&player, &opponents, &outcomes)
            .unwrap();
        let expected = RatingPeriod::new(&player, &opponents, &outcomes, 0.5)
            .unwrap()
            .rate()
            .unwrap();
        assert!(updated.approximately_eq(&expected, 1e-12));
    }
}
