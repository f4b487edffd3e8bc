use std::f64::consts::{FRAC_PI_2, TAU};

use polar_walk::{
    Distributions, Interval, RandomWalk, StepSample, Walk, WalkConfig, WalkError, distance,
    generate,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_length_matches_point_count() {
    for n in [1, 2, 3, 10, 7999] {
        let mut walker = RandomWalk::seeded(WalkConfig::new(n, (0.0, 0.0)), 11);
        let walk = walker.generate(&Distributions::default()).unwrap();
        assert_eq!(walk.xs.len(), n);
        assert_eq!(walk.ys.len(), n);
    }
}

#[test]
fn test_first_point_is_start_point() {
    let start = (3.5, -7.25);
    let mut walker = RandomWalk::seeded(WalkConfig::new(500, start), 5);
    for _ in 0..3 {
        let walk = walker.generate(&Distributions::default()).unwrap();
        assert_eq!(walk.xs[0], start.0);
        assert_eq!(walk.ys[0], start.1);
    }
}

#[test]
fn test_same_seed_gives_identical_walks() {
    let config = WalkConfig::new(2000, (1.0, 2.0));
    let dists = Distributions::default();
    let a = RandomWalk::seeded(config, 1234).generate(&dists).unwrap();
    let b = RandomWalk::seeded(config, 1234).generate(&dists).unwrap();
    assert_eq!(a, b);

    let mut rng1 = StdRng::seed_from_u64(9);
    let mut rng2 = StdRng::seed_from_u64(9);
    assert_eq!(
        generate(&config, &dists, &mut rng1).unwrap(),
        generate(&config, &dists, &mut rng2).unwrap()
    );
}

#[test]
fn test_regenerating_gives_a_new_walk() {
    let mut walker = RandomWalk::seeded(WalkConfig::new(100, (0.0, 0.0)), 77);
    let first = walker.generate(&Distributions::default()).unwrap();
    let second = walker.generate(&Distributions::default()).unwrap();
    assert_eq!(first.len(), second.len());
    assert_ne!(first, second);
}

#[test]
fn test_zero_radius_walk_stays_at_start() {
    let start = (2.0, -1.0);
    let dists = Distributions::new((0.0, 0.0), (0.0, TAU));
    let walk = RandomWalk::seeded(WalkConfig::new(250, start), 3)
        .generate(&dists)
        .unwrap();
    assert!(walk.xs.iter().all(|&x| x == start.0));
    assert!(walk.ys.iter().all(|&y| y == start.1));
    assert_eq!(distance(&walk).unwrap(), 0.0);
}

#[test]
fn test_three_four_five_distance() {
    let angle = 4f64.atan2(3.0);
    let dists = Distributions::new((5.0, 5.0), (angle, angle));
    let walk = RandomWalk::seeded(WalkConfig::new(2, (0.0, 0.0)), 0)
        .generate(&dists)
        .unwrap();
    assert!(approx(walk.xs[1], 3.0));
    assert!(approx(walk.ys[1], 4.0));
    assert!(approx(distance(&walk).unwrap(), 5.0));
}

#[test]
fn test_single_point_walk() {
    let walk = RandomWalk::seeded(WalkConfig::new(1, (4.0, 5.0)), 8)
        .generate(&Distributions::default())
        .unwrap();
    assert_eq!(walk.xs, vec![4.0]);
    assert_eq!(walk.ys, vec![5.0]);
    assert_eq!(walk.distance().unwrap(), 0.0);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let mut walker = RandomWalk::seeded(WalkConfig::new(0, (0.0, 0.0)), 1);
    assert!(matches!(
        walker.generate(&Distributions::default()),
        Err(WalkError::InvalidConfiguration(_))
    ));

    let mut walker = RandomWalk::seeded(WalkConfig::new(10, (0.0, 0.0)), 1);
    let reversed_radius = Distributions::new((5.0, 1.0), (0.0, TAU));
    assert!(matches!(
        walker.generate(&reversed_radius),
        Err(WalkError::InvalidConfiguration(_))
    ));

    let reversed_angle = Distributions {
        radius: Interval::new(0.0, 1.0),
        angle: Interval::new(1.0, 0.0),
    };
    assert!(matches!(
        walker.generate(&reversed_angle),
        Err(WalkError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_cumulative_sum_of_forced_steps() {
    let walk = Walk::from_steps(
        (0.0, 0.0),
        &[StepSample::new(1.0, 0.0), StepSample::new(1.0, FRAC_PI_2)],
    );
    let expect_x = [0.0, 1.0, 1.0];
    let expect_y = [0.0, 0.0, 1.0];
    for i in 0..3 {
        assert!(approx(walk.xs[i], expect_x[i]), "x[{}] = {}", i, walk.xs[i]);
        assert!(approx(walk.ys[i], expect_y[i]), "y[{}] = {}", i, walk.ys[i]);
    }
    assert!(approx(walk.distance().unwrap(), 2f64.sqrt()));
}

#[test]
fn test_steps_respect_radius_bounds() {
    let dists = Distributions::new((2.0, 3.0), (0.0, TAU));
    let walk = RandomWalk::seeded(WalkConfig::new(1000, (0.0, 0.0)), 21)
        .generate(&dists)
        .unwrap();
    let pts: Vec<(f64, f64)> = walk.points().collect();
    for pair in pts.windows(2) {
        let step = (pair[1].0 - pair[0].0).hypot(pair[1].1 - pair[0].1);
        assert!((2.0 - 1e-9..=3.0 + 1e-9).contains(&step), "step length {}", step);
    }
}

#[test]
fn test_empty_walk_distance_fails() {
    assert!(matches!(distance(&Walk::default()), Err(WalkError::EmptyWalk)));
}
