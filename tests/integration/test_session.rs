//! Integration tests for the game session state machine
//!
//! Covers the operation sequences a client drives, and concurrent access to
//! one shared session from many tasks.

use fly_engine::{
    Config, Difficulty, FlyError, GameSession, RouteGenerator, SessionRng, SessionStatus,
};

fn new_session(seed: u64) -> GameSession {
    GameSession::new(RouteGenerator::default(), SessionRng::new(seed))
}

#[test]
fn test_invalid_difficulty_keeps_previous_level() {
    let session = new_session(1);

    let err = session.set_difficulty("expert").unwrap_err();
    assert!(matches!(err, FlyError::InvalidDifficulty { .. }));
    assert!(err.is_client_error());
    assert_eq!(session.get_state().difficulty, Difficulty::Unset);

    session.set_difficulty("pro").expect("pro is a valid level");
    assert_eq!(session.get_state().difficulty, Difficulty::Pro);

    assert!(session.set_difficulty("beginer").is_err());
    assert_eq!(session.get_state().difficulty, Difficulty::Pro);
}

#[test]
fn test_start_game_resets_score() {
    let session = new_session(2);
    session.set_score(40);
    assert_eq!(session.get_state().score, 40);

    session.start_game(3);

    let state = session.get_state();
    assert_eq!(state.score, 0);
    assert_eq!(state.status, SessionStatus::Playing);
}

#[test]
fn test_full_game_lifecycle() {
    let session = new_session(3);
    assert_eq!(session.get_state().status, SessionStatus::Waiting);

    session.set_difficulty("experienced").expect("valid level");
    let started = session.start_game(8);
    let route = started.current_route.clone().expect("route attached");
    assert!(route.step_count() <= 8);

    assert_eq!(session.open_settings().message, "Settings menu opened");
    assert_eq!(session.get_state(), started);

    session.set_score(25);
    let exited = session.exit_game();
    assert_eq!(exited.status, SessionStatus::Exited);
    assert_eq!(exited.score, 25);
    assert_eq!(exited.current_route, Some(route));
    assert_eq!(exited.difficulty, Difficulty::Experienced);

    // A new game may start straight from `exited`.
    let restarted = session.start_game(2);
    assert_eq!(restarted.status, SessionStatus::Playing);
    assert_eq!(restarted.score, 0);
    assert_eq!(restarted.difficulty, Difficulty::Experienced);
}

#[test]
fn test_same_seed_sessions_generate_same_routes() {
    let a = new_session(77);
    let b = new_session(77);
    for steps in [5, 0, 12, 3] {
        assert_eq!(a.start_game(steps), b.start_game(steps));
    }
}

#[test]
fn test_session_from_config() {
    let config = Config {
        grid_size: 1,
        seed: Some(9),
        ..Config::default()
    };
    let session = GameSession::new(
        config.route_generator().expect("valid generator"),
        SessionRng::from_seed_or_random(config.seed),
    );

    let snapshot = session.start_game(5);
    let route = snapshot.current_route.expect("route attached");
    assert_eq!(route.route.len(), 1);
    assert!(route.directions.is_empty());
}

#[test]
fn test_snapshot_json_shape() {
    let session = new_session(4);
    session.start_game(2);
    session.set_difficulty("beginner").expect("valid level");

    let json = serde_json::to_value(session.get_state()).expect("serializable");
    assert_eq!(json["status"], "playing");
    assert_eq!(json["difficulty"], "beginner");
    assert_eq!(json["score"], 0);
    assert_eq!(
        json["current_route"]["route"]
            .as_array()
            .expect("route array")
            .len(),
        3
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_start_game_snapshots_are_consistent() {
    let session = new_session(5);
    let mut handles = Vec::new();

    for i in 0..64_usize {
        let session = session.clone();
        handles.push(tokio::spawn(async move {
            // Walks of at most three moves cannot trap on a grid wider than
            // one cell, so the route length identifies the call.
            let steps = i % 4;
            if i % 3 == 0 {
                session.set_score(i64::try_from(i).unwrap_or(i64::MAX));
            }
            (steps, session.start_game(steps))
        }));
    }

    for handle in handles {
        let (steps, snapshot) = handle.await.expect("task panicked");
        assert_eq!(snapshot.status, SessionStatus::Playing);
        assert_eq!(snapshot.score, 0);
        let route = snapshot.current_route.expect("route attached");
        assert_eq!(route.step_count(), steps);
        assert_eq!(route.route.len(), steps + 1);
    }

    let last = session.get_state();
    assert_eq!(last.status, SessionStatus::Playing);
    assert!(last.current_route.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mixed_operations_never_tear() {
    let session = new_session(6);
    let mut handles = Vec::new();

    for i in 0..90_i64 {
        let session = session.clone();
        handles.push(tokio::task::spawn_blocking(move || match i % 3 {
            0 => {
                let s = session.start_game(3);
                assert_eq!(s.status, SessionStatus::Playing);
                assert_eq!(s.score, 0);
            }
            1 => {
                let s = session.exit_game();
                assert_eq!(s.status, SessionStatus::Exited);
            }
            _ => {
                let s = session.set_score(i);
                assert_eq!(s.score, i);
            }
        }));
    }

    for handle in handles {
        handle.await.expect("task panicked");
    }

    let state = session.get_state();
    if let Some(route) = state.current_route {
        assert_eq!(route.step_count(), 3);
    }
}
