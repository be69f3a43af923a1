//! # Error Types
//!
//! This module defines all error types for the smooth cursor.
//!
//! Only caller misuse and host failures are errors. Degenerate inputs that the
//! cursor can answer sensibly (an empty score, two note groups at the same
//! instant, a playback time past the end) produce clamped results instead.
//!
//! ## Error Types
//! - `NotRendered` - Snapshots were requested before the score was laid out
//! - `InvalidTempo` - A tempo that is zero, negative or not finite
//! - `OverlayUnavailable` - The host could not create the cursor marker
//! - `ConfigError` - Options or layout YAML could not be parsed
//!
//! ## Usage
//! ```rust
//! use smooth_cursor::{CursorError, TempoMap};
//!
//! match TempoMap::constant(0.0) {
//!     Ok(_) => unreachable!(),
//!     Err(CursorError::InvalidTempo(bpm)) => eprintln!("Bad tempo: {}", bpm),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CursorError {
    /// The cursor element had no layout while snapshots were being built.
    ///
    /// Snapshot building reads screen coordinates, so it must run after the
    /// score has been rendered.
    ///
    /// # Example
    /// ```
    /// # use smooth_cursor::CursorError;
    /// let err = CursorError::NotRendered { measure: 2 };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Score is not rendered: no cursor layout at measure 2"
    /// );
    /// ```
    #[error("Score is not rendered: no cursor layout at measure {measure}")]
    NotRendered { measure: usize },

    /// Tempo in beats per minute must be positive and finite.
    ///
    /// # Example
    /// ```
    /// # use smooth_cursor::CursorError;
    /// let err = CursorError::InvalidTempo(-20.0);
    /// assert_eq!(err.to_string(), "Invalid tempo: -20 bpm");
    /// ```
    #[error("Invalid tempo: {0} bpm")]
    InvalidTempo(f64),

    /// The host environment failed to create the overlay marker.
    #[error("Cursor overlay unavailable: {0}")]
    OverlayUnavailable(String),

    /// Invalid options or layout YAML.
    ///
    /// # Example
    /// ```
    /// # use smooth_cursor::CursorError;
    /// let err = CursorError::ConfigError("tempo: invalid type".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: tempo: invalid type");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
