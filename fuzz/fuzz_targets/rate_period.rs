#![no_main]

use arbitrary::Arbitrary;
use glicko2_period::{Outcome, Rating, RatingPeriod};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct ArbitraryRating {
    rating: f64,
    deviation: f64,
    volatility: f64,
}

impl ArbitraryRating {
    fn into_clamped(self) -> Option<Rating> {
        if self.rating.is_nan() || self.deviation.is_nan() || self.volatility.is_nan() {
            None
        } else {
            Some(Rating::new(
                self.rating.clamp(-10000.0, 10000.0),
                self.deviation.clamp(0.0, 1000.0),
                self.volatility.clamp(0.001, 1.0),
            ))
        }
    }
}

#[derive(Arbitrary, Debug)]
enum ArbitraryOutcome {
    Win,
    Loss,
    Draw,
}

impl From<ArbitraryOutcome> for Outcome {
    fn from(outcome: ArbitraryOutcome) -> Outcome {
        match outcome {
            ArbitraryOutcome::Win => Outcome::Win,
            ArbitraryOutcome::Loss => Outcome::Loss,
            ArbitraryOutcome::Draw => Outcome::Draw,
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Period {
    player: ArbitraryRating,
    games: Vec<(ArbitraryRating, ArbitraryOutcome)>,
    tau: f64,
}

fn assert_rating(rating: &Rating) {
    assert!(f64::from(rating.rating).is_finite());
    assert!(f64::from(rating.deviation).is_finite());
    assert!(f64::from(rating.deviation) >= 0.0);
    assert!(f64::from(rating.volatility) > 0.0);
}

fuzz_target!(|period: Period| {
    let Some(player) = period.player.into_clamped() else {
        return;
    };
    let mut opponents = Vec::new();
    let mut outcomes = Vec::new();
    for (opponent, outcome) in period.games {
        let Some(opponent) = opponent.into_clamped() else {
            return;
        };
        opponents.push(opponent);
        outcomes.push(Outcome::from(outcome));
    }
    if period.tau.is_nan() {
        return;
    }
    let tau = period.tau.clamp(0.01, 2.0);

    let Ok(rating_period) = RatingPeriod::new(&player, &opponents, &outcomes, tau) else {
        panic!("valid input rejected");
    };
    if let Ok(rating) = rating_period.rate() {
        assert_rating(&rating);
    }
});
