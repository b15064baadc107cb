//! Grid model: coordinates, directions and bounds.
//!
//! The grid is a square lattice of side `size`. A [`Coordinate`] is a
//! `(x, y)` pair where `x` is the row and `y` the column, so moving
//! [`Direction::Down`] increments `x` and moving [`Direction::Right`]
//! increments `y`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FlyError, Result};

/// Default side length of the grid.
pub const DEFAULT_GRID_SIZE: u32 = 5;

/// Largest supported side length of the grid.
pub const MAX_GRID_SIZE: u32 = 1024;

// ============================================================================
// Coordinate
// ============================================================================

/// A cell on the grid.
///
/// Serializes as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Coordinate {
    /// Row index.
    pub x: i32,
    /// Column index.
    pub y: i32,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighboring coordinate one step in `direction`.
    ///
    /// The result may lie outside the grid; check it with [`Grid::in_bounds`].
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the Manhattan distance to `other`.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<[i32; 2]> for Coordinate {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for [i32; 2] {
    fn from(c: Coordinate) -> Self {
        [c.x, c.y]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ============================================================================
// Direction
// ============================================================================

/// One of the four unit moves on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move to the previous row.
    Up,
    /// Move to the next row.
    Down,
    /// Move to the previous column.
    Left,
    /// Move to the next column.
    Right,
}

impl Direction {
    /// Neighbor scan order used by the route generator.
    ///
    /// Changing this order changes which cell a given random draw selects.
    pub const SCAN_ORDER: [Self; 4] = [Self::Right, Self::Down, Self::Left, Self::Up];

    /// Returns the canonical unit delta `(dx, dy)` for this direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use fly_engine::Direction;
    ///
    /// assert_eq!(Direction::Right.delta(), (0, 1));
    /// assert_eq!(Direction::Up.delta(), (-1, 0));
    /// ```
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Returns the direction whose canonical delta is `delta`.
    ///
    /// Only the four unit deltas map to a direction; anything else yields
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fly_engine::Direction;
    ///
    /// assert_eq!(Direction::from_delta((1, 0)), Some(Direction::Down));
    /// assert_eq!(Direction::from_delta((1, 1)), None);
    /// ```
    #[must_use]
    pub const fn from_delta(delta: (i32, i32)) -> Option<Self> {
        match delta {
            (-1, 0) => Some(Self::Up),
            (1, 0) => Some(Self::Down),
            (0, -1) => Some(Self::Left),
            (0, 1) => Some(Self::Right),
            _ => None,
        }
    }

    /// Returns the direction that leads from `from` to the adjacent cell `to`.
    #[must_use]
    pub const fn between(from: Coordinate, to: Coordinate) -> Option<Self> {
        Self::from_delta((to.x - from.x, to.y - from.y))
    }

    /// Returns the lowercase name of this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Grid
// ============================================================================

/// A square grid with a validated side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: i32,
}

impl Default for Grid {
    #[allow(clippy::cast_possible_wrap)]
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE as i32,
        }
    }
}

impl Grid {
    /// Creates a grid of side `size`.
    ///
    /// # Errors
    ///
    /// Returns `FlyError::InvalidGridSize` unless `1 <= size <= MAX_GRID_SIZE`.
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(FlyError::invalid_grid_size(size));
        }
        let size = i32::try_from(size).map_err(|_| FlyError::invalid_grid_size(size))?;
        Ok(Self { size })
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size.unsigned_abs() as usize
    }

    /// Returns the number of cells on the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.size() * self.size()
    }

    /// Returns `true` if both components of `c` lie in `[0, size)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fly_engine::{Coordinate, Grid};
    ///
    /// let grid = Grid::new(5).unwrap();
    /// assert!(grid.in_bounds(Coordinate::new(0, 4)));
    /// assert!(!grid.in_bounds(Coordinate::new(5, 0)));
    /// assert!(!grid.in_bounds(Coordinate::new(-1, 2)));
    /// ```
    #[must_use]
    pub const fn in_bounds(&self, c: Coordinate) -> bool {
        c.x >= 0 && c.x < self.size && c.y >= 0 && c.y < self.size
    }

    /// Returns the in-bounds neighbors of `c` in scan order, with the
    /// direction that reaches each of them.
    pub fn neighbors(&self, c: Coordinate) -> impl Iterator<Item = (Direction, Coordinate)> {
        let grid = *self;
        Direction::SCAN_ORDER
            .into_iter()
            .map(move |direction| (direction, c.step(direction)))
            .filter(move |&(_, next)| grid.in_bounds(next))
    }

    /// Returns the coordinate at row `row` and column `col`.
    ///
    /// Indices are expected to be below [`Grid::size`].
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Coordinate {
        let clamp = |i: usize| i32::try_from(i).map_or(self.size - 1, |i| i.min(self.size - 1));
        Coordinate::new(clamp(row), clamp(col))
    }
}
