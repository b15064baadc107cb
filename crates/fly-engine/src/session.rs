//! Session state machine for the fly game.
//!
//! A session moves between `waiting`, `playing` and `exited` through named
//! operations. Operations overwrite fields rather than reject calls made in
//! an unexpected order: the only validation is difficulty membership.
//!
//! [`GameSession`] is the shared handle. Every operation, including the route
//! generation inside [`GameSession::start_game`], runs under one lock, so a
//! [`SessionSnapshot`] is never a mix of two calls.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{FlyError, Result};
use crate::route::{RouteDescriptor, RouteGenerator};
use crate::rng::{RandomSource, SessionRng};

// ============================================================================
// SessionStatus
// ============================================================================

/// Play status of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No game has been started yet.
    #[default]
    Waiting,
    /// A game is in progress.
    Playing,
    /// The player left the game.
    Exited,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Waiting => "waiting",
            Self::Playing => "playing",
            Self::Exited => "exited",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Difficulty
// ============================================================================

/// Difficulty chosen by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// No difficulty chosen yet.
    #[default]
    Unset,
    /// Beginner level.
    Beginner,
    /// Experienced level.
    Experienced,
    /// Pro level.
    Pro,
}

impl Difficulty {
    /// Returns the name of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Beginner => "beginner",
            Self::Experienced => "experienced",
            Self::Pro => "pro",
        }
    }
}

impl FromStr for Difficulty {
    type Err = FlyError;

    /// Parses a selectable level.
    ///
    /// Matching is exact: case and spelling must agree, and `unset` cannot be
    /// selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use fly_engine::Difficulty;
    ///
    /// assert_eq!("pro".parse::<Difficulty>().unwrap(), Difficulty::Pro);
    /// assert!("Pro".parse::<Difficulty>().is_err());
    /// assert!("unset".parse::<Difficulty>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "experienced" => Ok(Self::Experienced),
            "pro" => Ok(Self::Pro),
            _ => Err(FlyError::invalid_difficulty(s)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Session
// ============================================================================

/// The in-memory record of one game session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Current play status.
    pub status: SessionStatus,

    /// Chosen difficulty.
    pub difficulty: Difficulty,

    /// Current score. Not range checked.
    pub score: i64,

    /// Route of the game in progress, if one was ever started.
    pub current_route: Option<RouteDescriptor>,
}

impl Session {
    /// Creates a session in `waiting` with no difficulty, no score and no route.
    ///
    /// # Examples
    ///
    /// ```
    /// use fly_engine::{Difficulty, Session, SessionStatus};
    ///
    /// let session = Session::new();
    /// assert_eq!(session.status, SessionStatus::Waiting);
    /// assert_eq!(session.difficulty, Difficulty::Unset);
    /// assert_eq!(session.score, 0);
    /// assert!(session.current_route.is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new game with `route`, resetting the score.
    pub fn start(&mut self, route: RouteDescriptor) {
        self.status = SessionStatus::Playing;
        self.score = 0;
        self.current_route = Some(route);
    }

    /// Marks the session as exited. Route and score are kept.
    pub fn exit(&mut self) {
        self.status = SessionStatus::Exited;
    }

    /// Returns a copy of all fields.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            difficulty: self.difficulty,
            score: self.score,
            current_route: self.current_route.clone(),
        }
    }
}

/// A consistent, read-only copy of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Play status at the time of the snapshot.
    pub status: SessionStatus,
    /// Difficulty at the time of the snapshot.
    pub difficulty: Difficulty,
    /// Score at the time of the snapshot.
    pub score: i64,
    /// Route at the time of the snapshot.
    pub current_route: Option<RouteDescriptor>,
}

/// A plain acknowledgement message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Human-readable message.
    pub message: String,
}

impl Acknowledgement {
    /// Creates a new acknowledgement.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// GameSession
// ============================================================================

#[derive(Debug)]
struct Inner<R> {
    session: Session,
    rng: R,
}

/// Shared handle to the process-wide session.
///
/// Cloning the handle shares the same session.
///
/// # Examples
///
/// ```
/// use fly_engine::{GameSession, RouteGenerator, SessionRng, SessionStatus};
///
/// let session = GameSession::new(RouteGenerator::default(), SessionRng::new(7));
/// let snapshot = session.start_game(4);
/// assert_eq!(snapshot.status, SessionStatus::Playing);
/// assert_eq!(snapshot.score, 0);
/// assert!(snapshot.current_route.is_some());
/// ```
#[derive(Debug)]
pub struct GameSession<R = SessionRng> {
    inner: Arc<Mutex<Inner<R>>>,
    generator: Arc<RouteGenerator>,
}

impl<R> Clone for GameSession<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Creates a handle to a fresh session.
    #[must_use]
    pub fn new(generator: RouteGenerator, rng: R) -> Self {
        Self::with_session(generator, rng, Session::new())
    }

    /// Creates a handle around an existing session.
    #[must_use]
    pub fn with_session(generator: RouteGenerator, rng: R, session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { session, rng })),
            generator: Arc::new(generator),
        }
    }

    /// Returns the route generator used by `start_game`.
    #[must_use]
    pub fn generator(&self) -> &RouteGenerator {
        &self.generator
    }

    fn lock(&self) -> MutexGuard<'_, Inner<R>> {
        // Every write completes before anything that could panic, so a
        // poisoned session is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new game: status `playing`, score 0 and a fresh route of at
    /// most `steps` moves.
    pub fn start_game(&self, steps: usize) -> SessionSnapshot {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let route = self.generator.generate(steps, &mut inner.rng);
        if route.is_short(steps) {
            debug!(
                requested = steps,
                produced = route.step_count(),
                "Route shorter than requested"
            );
        }
        let previous = inner.session.status;
        inner.session.start(route);
        info!(from = %previous, steps, "Game started");
        inner.session.snapshot()
    }

    /// Acknowledges that the settings menu was opened. Changes nothing.
    #[allow(clippy::unused_self)]
    pub fn open_settings(&self) -> Acknowledgement {
        debug!("Settings menu opened");
        Acknowledgement::new("Settings menu opened")
    }

    /// Marks the session as exited, keeping route and score.
    pub fn exit_game(&self) -> SessionSnapshot {
        let mut inner = self.lock();
        let previous = inner.session.status;
        inner.session.exit();
        info!(from = %previous, score = inner.session.score, "Game exited");
        inner.session.snapshot()
    }

    /// Sets the difficulty from its exact name.
    ///
    /// The value is validated before the lock is taken, so a rejected value
    /// never touches the session.
    ///
    /// # Errors
    ///
    /// Returns `FlyError::InvalidDifficulty` if `level` is not `beginner`,
    /// `experienced` or `pro`.
    pub fn set_difficulty(&self, level: &str) -> Result<Acknowledgement> {
        let difficulty = level.parse::<Difficulty>().map_err(|e| {
            warn!(level, "Rejected difficulty level");
            e
        })?;
        self.lock().session.difficulty = difficulty;
        info!(%difficulty, "Difficulty set");
        Ok(Acknowledgement::new(format!("difficulty set to {difficulty}")))
    }

    /// Overwrites the score.
    pub fn set_score(&self, value: i64) -> SessionSnapshot {
        let mut inner = self.lock();
        inner.session.score = value;
        debug!(score = value, "Score set");
        inner.session.snapshot()
    }

    /// Returns a consistent copy of the session.
    pub fn get_state(&self) -> SessionSnapshot {
        self.lock().session.snapshot()
    }
}
