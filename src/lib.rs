//! Smoothly interpolated playback cursor for rendered sheet music.
//!
//! A rendering engine moves its cursor from note group to note group. This
//! crate layers a marker on top that glides between those groups in step with
//! a playback clock, and recolors notes as the playback passes them.

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod layout;
pub mod locator;
pub mod overlay;

pub use config::CursorOptions;
pub use driver::SmoothCursor;
pub use engine::ScoreCursor;
pub use error::*;
pub use locator::{build_snapshots, whole_notes_to_ms, CursorSnapshot, Locator, TempoMap};
pub use overlay::{CursorOverlay, CursorRect, MarkerGeometry, MemoryOverlay};
