//! Integration tests for route generation
//!
//! These tests drive the route generator through the public API the way an
//! outer layer would: build it from configuration, generate with an injected
//! random source, and serialize the result.

use std::collections::HashSet;
use std::path::PathBuf;

use fly_engine::{
    Config, Coordinate, CueTable, Direction, FixedSequence, Grid, RouteDescriptor,
    RouteGenerator, SessionRng,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Path to the sample config fixture.
fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/fly.json")
}

fn generator(size: u32) -> RouteGenerator {
    RouteGenerator::new(Grid::new(size).expect("valid grid size"), CueTable::default())
}

/// Checks every structural property a descriptor must have.
fn assert_route_properties(generator: &RouteGenerator, steps: usize, d: &RouteDescriptor) {
    let grid = generator.grid();

    assert!(!d.route.is_empty(), "route must hold the start cell");
    assert!(
        d.route.len() <= (steps + 1).min(grid.cell_count()),
        "route of {} cells exceeds bound for {steps} steps",
        d.route.len()
    );
    assert_eq!(d.directions.len(), d.route.len() - 1);
    assert_eq!(d.audio_cues.len(), d.route.len() - 1);

    let distinct: HashSet<Coordinate> = d.route.iter().copied().collect();
    assert_eq!(distinct.len(), d.route.len(), "route revisits a cell");

    for c in &d.route {
        assert!(c.x >= 0 && c.y >= 0, "{c} is negative");
        assert!(grid.in_bounds(*c), "{c} is outside the grid");
    }

    for (i, pair) in d.route.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        assert_eq!(from.x.abs_diff(to.x) + from.y.abs_diff(to.y), 1);

        let direction = d.directions[i];
        assert_eq!(direction.delta(), (to.x - from.x, to.y - from.y));
        assert_eq!(&d.audio_cues[i], generator.cues().cue_for(direction));
    }
}

#[test]
fn test_fixture_config_loads() {
    let path = fixture_path();
    assert!(path.exists(), "Config fixture not found at: {path:?}");

    let config = Config::load_from_file(&path).expect("Failed to load config");
    assert_eq!(config.grid_size, 6);
    assert_eq!(config.default_steps, 12);
    assert_eq!(config.seed, Some(2024));
}

#[test]
fn test_properties_hold_for_fixture_config() {
    let config = Config::load_from_file(&fixture_path()).expect("Failed to load config");
    let generator = config.route_generator().expect("valid generator");

    let mut rng = SessionRng::from_seed_or_random(config.seed);
    for _ in 0..100 {
        let d = generator.generate(config.default_steps, &mut rng);
        assert_route_properties(&generator, config.default_steps, &d);
    }
}

#[test]
fn test_properties_hold_across_sizes_and_lengths() {
    for size in [1, 2, 3, 5, 8] {
        let generator = generator(size);
        for seed in 0..50_u64 {
            for steps in [0, 1, 4, 24, 80] {
                let mut rng = StdRng::seed_from_u64(seed);
                let d = generator.generate(steps, &mut rng);
                assert_route_properties(&generator, steps, &d);
            }
        }
    }
}

#[test]
fn test_single_cell_grid_returns_start_only() {
    let generator = generator(1);
    let d = generator.generate(5, &mut SessionRng::new(0));

    assert_eq!(d.route, vec![Coordinate::new(0, 0)]);
    assert!(d.directions.is_empty());
    assert!(d.audio_cues.is_empty());
}

#[test]
fn test_zero_steps_on_default_grid() {
    let generator = RouteGenerator::default();
    let d = generator.generate(0, &mut SessionRng::new(8));
    assert_eq!(d.route.len(), 1);
    assert_eq!(d.initial_position, d.final_position);
}

#[test]
fn test_same_seed_same_descriptor() {
    let generator = generator(5);
    for seed in [1, 17, 4096] {
        let a = generator.generate(15, &mut SessionRng::new(seed));
        let b = generator.generate(15, &mut SessionRng::new(seed));
        assert_eq!(a, b, "seed {seed} produced different routes");
    }
}

#[test]
fn test_same_scripted_draws_same_descriptor() {
    let generator = generator(5);
    let draws = vec![4, 0, 2, 1, 3, 0, 1];
    let a = generator.generate(9, &mut FixedSequence::new(draws.clone()));
    let b = generator.generate(9, &mut FixedSequence::new(draws));
    assert_eq!(a, b);
}

#[test]
fn test_trapped_walk_is_short_not_an_error() {
    // (0,0) -> (0,1) -> (1,1) -> (1,0), then every neighbor is visited.
    let generator = generator(2);
    let d = generator.generate(50, &mut FixedSequence::new(vec![0]));
    assert_eq!(d.route.len(), 4);
    assert!(d.is_short(50));
    assert_route_properties(&generator, 50, &d);
}

#[test]
fn test_walk_can_cover_whole_small_grid() {
    let generator = generator(3);
    let longest = (0..500_u64)
        .map(|seed| generator.generate(100, &mut SessionRng::new(seed)).route.len())
        .max()
        .unwrap_or(0);
    assert!(longest <= 9);
    assert!(longest >= 6, "no walk got past six cells: {longest}");
}

#[test]
fn test_descriptor_json_shape() {
    let generator = generator(5);
    let d = generator.generate(3, &mut FixedSequence::new(vec![0]));
    let json = serde_json::to_value(&d).expect("serializable");

    assert_eq!(json["initial_position"], serde_json::json!([0, 0]));
    assert_eq!(json["final_position"], serde_json::json!([0, 3]));
    assert_eq!(json["directions"], serde_json::json!(["Right", "Right", "Right"]));
    assert_eq!(json["audio_cues"][0], "static/right.m4a");

    let restored: RouteDescriptor = serde_json::from_value(json).expect("deserializable");
    assert_eq!(restored, d);
}

#[test]
fn test_every_direction_appears_over_many_routes() {
    let generator = generator(5);
    let mut seen = HashSet::new();
    for seed in 0..100 {
        let d = generator.generate(10, &mut SessionRng::new(seed));
        seen.extend(d.directions);
    }
    for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
        assert!(seen.contains(&direction), "{direction} never generated");
    }
}
