//! Cursor options
//!
//! Options are plain data with a default for every field, so hosts can build
//! them in code or read them from a YAML document with only the keys they
//! care about.
//!
//! ```rust
//! use smooth_cursor::CursorOptions;
//!
//! let options = CursorOptions::from_yaml("paint-notes-on-cursor: true\ntempo: 72")?;
//! assert!(options.paint_notes_on_cursor);
//! assert_eq!(options.tempo, 72.0);
//! assert_eq!(options.highlight_color, "#faa00f");
//! # Ok::<(), smooth_cursor::CursorError>(())
//! ```

use serde::Deserialize;

use crate::error::CursorError;
use crate::overlay::MarkerGeometry;

/// Horizontal offset that centers the marker over a notehead.
pub const CURSOR_LEFT_MARGIN: f64 = 5.0;
/// Marker width in pixels.
pub const CURSOR_WIDTH: f64 = 3.0;
/// Tempo used until the host sets one.
pub const DEFAULT_TEMPO: f64 = 100.0;

pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#faa00f";
pub const DEFAULT_NOTE_COLOR: &str = "black";

/// Options for the smooth cursor
///
/// # Fields
/// - `paint_notes_on_cursor`: Recolor the notes under the cursor while playing
/// - `highlight_color`: Color for notes under the cursor
/// - `default_color`: Color notes return to once the cursor has passed
/// - `left_margin`: Offset added to the engine cursor's x position
/// - `marker_width`: Width of the overlay marker
/// - `tempo`: Initial tempo in BPM (beat = quarter note)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CursorOptions {
    pub paint_notes_on_cursor: bool,
    pub highlight_color: String,
    pub default_color: String,
    pub left_margin: f64,
    pub marker_width: f64,
    pub tempo: f64,
}

impl Default for CursorOptions {
    fn default() -> Self {
        CursorOptions {
            paint_notes_on_cursor: false,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            default_color: DEFAULT_NOTE_COLOR.to_string(),
            left_margin: CURSOR_LEFT_MARGIN,
            marker_width: CURSOR_WIDTH,
            tempo: DEFAULT_TEMPO,
        }
    }
}

impl CursorOptions {
    /// Parse options from YAML. Missing keys keep their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, CursorError> {
        if content.trim().is_empty() {
            return Ok(CursorOptions::default());
        }
        serde_yaml::from_str(content).map_err(|e| CursorError::ConfigError(e.to_string()))
    }

    pub fn geometry(&self) -> MarkerGeometry {
        MarkerGeometry {
            left_margin: self.left_margin,
            width: self.marker_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CursorOptions::default();
        assert!(!options.paint_notes_on_cursor);
        assert_eq!(options.left_margin, 5.0);
        assert_eq!(options.marker_width, 3.0);
        assert_eq!(options.tempo, 100.0);
        assert_eq!(options.default_color, "black");
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        assert_eq!(CursorOptions::from_yaml("").unwrap(), CursorOptions::default());
    }

    #[test]
    fn test_partial_yaml() {
        let options = CursorOptions::from_yaml(
            r##"
highlight-color: "#00ff00"
marker-width: 4
"##,
        )
        .unwrap();
        assert_eq!(options.highlight_color, "#00ff00");
        assert_eq!(options.marker_width, 4.0);
        assert_eq!(options.left_margin, 5.0);
    }

    #[test]
    fn test_bad_yaml_is_config_error() {
        let result = CursorOptions::from_yaml("tempo: fast");
        assert!(matches!(result, Err(CursorError::ConfigError(_))));
    }
}
