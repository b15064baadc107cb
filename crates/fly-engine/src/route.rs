//! Self-avoiding random walk over the grid.
//!
//! The walk never backtracks and never restarts. When every in-bounds
//! neighbor of the tail has already been visited, generation stops and the
//! route is simply shorter than requested.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::audio::{AudioCue, CueTable};
use crate::grid::{Coordinate, Direction, Grid};
use crate::rng::RandomSource;

// ============================================================================
// RouteDescriptor
// ============================================================================

/// A generated route with its per-step annotations.
///
/// `directions[i]` and `audio_cues[i]` describe the move from `route[i]` to
/// `route[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// First cell of the route.
    pub initial_position: Coordinate,

    /// Last cell of the route.
    pub final_position: Coordinate,

    /// Every visited cell, in order.
    pub route: Vec<Coordinate>,

    /// Direction of each move.
    pub directions: Vec<Direction>,

    /// Audio cue of each move.
    pub audio_cues: Vec<AudioCue>,
}

impl RouteDescriptor {
    /// Number of moves in the route.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.directions.len()
    }

    /// Returns `true` if the route holds fewer moves than `requested`.
    #[must_use]
    pub fn is_short(&self, requested: usize) -> bool {
        self.step_count() < requested
    }

    /// Returns the moves as `(from, to, direction, cue)` tuples.
    pub fn moves(&self) -> impl Iterator<Item = (Coordinate, Coordinate, Direction, &AudioCue)> {
        self.route
            .windows(2)
            .zip(self.directions.iter().zip(&self.audio_cues))
            .map(|(pair, (&direction, cue))| (pair[0], pair[1], direction, cue))
    }
}

// ============================================================================
// RouteGenerator
// ============================================================================

/// Generates self-avoiding routes on a fixed grid.
#[derive(Debug, Clone, Default)]
pub struct RouteGenerator {
    grid: Grid,
    cues: CueTable,
}

impl RouteGenerator {
    /// Creates a generator for `grid` that annotates moves from `cues`.
    #[must_use]
    pub const fn new(grid: Grid, cues: CueTable) -> Self {
        Self { grid, cues }
    }

    /// Returns the grid routes are generated on.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the cue table used to annotate moves.
    #[must_use]
    pub const fn cues(&self) -> &CueTable {
        &self.cues
    }

    /// Generates a route of at most `steps` moves.
    ///
    /// The start cell is drawn first (row, then column). Each move then draws
    /// one index among the unvisited in-bounds neighbors of the tail, listed
    /// in [`Direction::SCAN_ORDER`]. If none are left the walk ends early.
    ///
    /// # Examples
    ///
    /// ```
    /// use fly_engine::{CueTable, FixedSequence, Grid, RouteGenerator};
    ///
    /// let generator = RouteGenerator::new(Grid::new(1).unwrap(), CueTable::default());
    /// let descriptor = generator.generate(5, &mut FixedSequence::default());
    /// assert_eq!(descriptor.route.len(), 1);
    /// assert!(descriptor.directions.is_empty());
    /// ```
    pub fn generate<R: RandomSource + ?Sized>(&self, steps: usize, rng: &mut R) -> RouteDescriptor {
        let size = self.grid.size();
        let start = self.grid.cell(rng.next_index(size), rng.next_index(size));

        let capacity = steps.min(self.grid.cell_count()) + 1;
        let mut route = Vec::with_capacity(capacity);
        let mut visited = HashSet::with_capacity(capacity);
        let mut directions = Vec::with_capacity(capacity - 1);
        let mut audio_cues = Vec::with_capacity(capacity - 1);

        route.push(start);
        visited.insert(start);
        let mut tail = start;

        for _ in 0..steps {
            let candidates: Vec<(Direction, Coordinate)> = self
                .grid
                .neighbors(tail)
                .filter(|(_, next)| !visited.contains(next))
                .collect();

            if candidates.is_empty() {
                debug!(tail = %tail, moves = directions.len(), "Walk trapped, stopping early");
                break;
            }

            let (direction, next) = candidates[rng.next_index(candidates.len())];
            route.push(next);
            visited.insert(next);
            directions.push(direction);
            audio_cues.push(self.cues.cue_for(direction).clone());
            tail = next;
        }

        debug!(
            requested = steps,
            produced = directions.len(),
            start = %start,
            end = %tail,
            "Generated route"
        );

        RouteDescriptor {
            initial_position: start,
            final_position: tail,
            route,
            directions,
            audio_cues,
        }
    }
}
