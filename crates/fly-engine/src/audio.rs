//! Audio cue lookup for movement directions.
//!
//! Each [`Direction`] has exactly one cue, a reference to a sound file the
//! client plays when the fly moves that way. The table is loaded once at
//! startup and never changes afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Direction;

fn default_up() -> AudioCue {
    AudioCue::new("static/up.m4a")
}

fn default_down() -> AudioCue {
    AudioCue::new("static/down.m4a")
}

fn default_left() -> AudioCue {
    AudioCue::new("static/left.m4a")
}

fn default_right() -> AudioCue {
    AudioCue::new("static/right.m4a")
}

/// Identifier of an audio cue (a path or URL to a sound file).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioCue(String);

impl AudioCue {
    /// Creates a new cue identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The direction to audio cue table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueTable {
    /// Cue for [`Direction::Up`].
    #[serde(default = "default_up")]
    pub up: AudioCue,

    /// Cue for [`Direction::Down`].
    #[serde(default = "default_down")]
    pub down: AudioCue,

    /// Cue for [`Direction::Left`].
    #[serde(default = "default_left")]
    pub left: AudioCue,

    /// Cue for [`Direction::Right`].
    #[serde(default = "default_right")]
    pub right: AudioCue,
}

impl Default for CueTable {
    fn default() -> Self {
        Self {
            up: default_up(),
            down: default_down(),
            left: default_left(),
            right: default_right(),
        }
    }
}

impl CueTable {
    /// Returns the cue for `direction`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fly_engine::{CueTable, Direction};
    ///
    /// let cues = CueTable::default();
    /// assert_eq!(cues.cue_for(Direction::Left).as_str(), "static/left.m4a");
    /// ```
    #[must_use]
    pub const fn cue_for(&self, direction: Direction) -> &AudioCue {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    /// Returns the first direction whose cue is empty, if any.
    #[must_use]
    pub fn first_empty(&self) -> Option<Direction> {
        Direction::SCAN_ORDER
            .into_iter()
            .find(|&d| self.cue_for(d).as_str().trim().is_empty())
    }
}
