//! Error types for the fly game engine.
//!
//! Only a handful of operations can fail: choosing a difficulty, building a
//! grid, and loading configuration. Route generation itself never fails.

use std::path::PathBuf;

/// A specialized `Result` type for fly engine operations.
pub type Result<T> = std::result::Result<T, FlyError>;

/// Errors that can occur in the fly game engine.
#[derive(Debug, thiserror::Error)]
pub enum FlyError {
    // ========================================================================
    // Session Errors
    // ========================================================================
    /// The requested difficulty is not one of the recognized levels.
    #[error("Invalid difficulty level: '{value}'\n\nSuggestion: Use one of 'beginner', 'experienced' or 'pro'")]
    InvalidDifficulty {
        /// The rejected value, exactly as supplied.
        value: String,
    },

    // ========================================================================
    // Grid Errors
    // ========================================================================
    /// Grid side length is outside the supported range.
    #[error("Invalid grid size: {size}\n\nSuggestion: Use a grid size between 1 and {}", crate::grid::MAX_GRID_SIZE)]
    InvalidGridSize {
        /// The rejected side length.
        size: u32,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// The configuration file could not be read or is not valid JSON.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate your fly.json with a JSON linter")]
    ConfigParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidationError {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    // ========================================================================
    // General I/O Errors
    // ========================================================================
    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FlyError {
    /// Creates a new `InvalidDifficulty` error.
    #[must_use]
    pub fn invalid_difficulty(value: impl Into<String>) -> Self {
        Self::InvalidDifficulty {
            value: value.into(),
        }
    }

    /// Creates a new `InvalidGridSize` error.
    #[must_use]
    pub const fn invalid_grid_size(size: u32) -> Self {
        Self::InvalidGridSize { size }
    }

    /// Creates a new `ConfigParseError` with the given path and message.
    #[must_use]
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigValidationError` with the given message and suggestion.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Returns `true` if this error was caused by a caller-supplied value.
    ///
    /// Outer layers map these to a client error and keep running; everything
    /// else is a startup problem.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidDifficulty { .. })
    }
}
