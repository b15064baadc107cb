//! Fly game engine
//!
//! Generates self-avoiding fly routes on a square grid and tracks the game
//! session that plays them.

pub mod audio;
pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod route;
pub mod session;

pub use audio::{AudioCue, CueTable};
pub use config::{Config, MAX_DEFAULT_STEPS};
pub use error::{FlyError, Result};
pub use grid::{Coordinate, Direction, Grid, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
pub use rng::{FixedSequence, RandomSource, SessionRng};
pub use route::{RouteDescriptor, RouteGenerator};
pub use session::{
    Acknowledgement, Difficulty, GameSession, Session, SessionSnapshot, SessionStatus,
};
