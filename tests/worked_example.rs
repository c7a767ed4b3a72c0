use glicko2_period::{Error, Outcome, Rating, RatingPeriod, RatingSystem};

fn opponents() -> [Rating; 3] {
    [
        Rating::new(1400.0, 30.0, 0.06),
        Rating::new(1550.0, 100.0, 0.06),
        Rating::new(1700.0, 300.0, 0.06),
    ]
}

#[test]
fn test_glickman_example() {
    let player = Rating::new(1500.0, 200.0, 0.06);
    let outcomes = [Outcome::Win, Outcome::Loss, Outcome::Loss];

    let updated = RatingPeriod::new(&player, &opponents(), &outcomes, 0.5)
        .unwrap()
        .rate()
        .unwrap();

    assert!((f64::from(updated.rating) - 1464.06).abs() < 0.01, "{updated:?}");
    assert!((f64::from(updated.deviation) - 151.52).abs() < 0.01, "{updated:?}");
    assert!((f64::from(updated.volatility) - 0.05999).abs() < 0.0001, "{updated:?}");
}

#[test]
fn test_length_mismatch() {
    let player = Rating::new(1500.0, 200.0, 0.06);
    let outcomes = [Outcome::Win, Outcome::Loss];
    assert!(matches!(
        RatingPeriod::new(&player, &opponents(), &outcomes, 0.5),
        Err(Error::LengthMismatch { opponents: 3, outcomes: 2 })
    ));
}

#[test]
fn test_more_wins_against_weaker_opponents() {
    let rating_system = RatingSystem::builder().tau(0.5).build();
    let player = Rating::new(1500.0, 200.0, 0.06);
    let weaker = [
        Rating::new(1400.0, 50.0, 0.06),
        Rating::new(1400.0, 50.0, 0.06),
        Rating::new(1400.0, 50.0, 0.06),
    ];

    let ratings: Vec<f64> = (0..=3)
        .map(|wins| {
            let outcomes: Vec<Outcome> = (0..3)
                .map(|i| if i < wins { Outcome::Win } else { Outcome::Loss })
                .collect();
            let updated = rating_system
                .update_rating(&player, &weaker, &outcomes)
                .unwrap();
            f64::from(updated.rating)
        })
        .collect();

    for pair in ratings.windows(2) {
        assert!(pair[0] < pair[1], "{ratings:?}");
    }
    assert!(ratings[3] > 1500.0);
}

#[test]
fn test_inactive_player() {
    let rating_system = RatingSystem::new();
    let player = Rating::new(1720.0, 80.0, 0.07);

    let updated = rating_system.update_rating(&player, &[], &[]).unwrap();

    assert!((f64::from(updated.rating) - 1720.0).abs() < 1e-9);
    assert_eq!(updated.volatility, player.volatility);
    assert!(updated.deviation > player.deviation);
}

#[test]
fn test_draws_against_equal_opponents() {
    let player = Rating::new(1500.0, 200.0, 0.06);
    let opponents = [player.clone(), player.clone()];
    let updated = RatingPeriod::new(&player, &opponents, &[Outcome::Draw, Outcome::Draw], 0.5)
        .unwrap()
        .rate()
        .unwrap();

    assert!((f64::from(updated.rating) - 1500.0).abs() < 1e-9);
    assert!(updated.deviation < player.deviation);
}
