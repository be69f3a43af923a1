//! Snapshot building
//!
//! Walks the engine cursor over the whole score once and records where the
//! cursor element sits at every note group, together with the playback time
//! at which that group is reached.

use log::debug;

use super::tempo::{TempoClock, TempoMap};
use crate::engine::ScoreCursor;
use crate::error::CursorError;
use crate::overlay::{CursorRect, MarkerGeometry};

/// Cursor position at one note-group boundary
///
/// # Fields
/// - `x`, `y`: Marker position in pixels (`x` includes the left margin)
/// - `width`, `height`: Marker size at this boundary
/// - `measure_index`: Measure containing the group (0-indexed)
/// - `notes`: Notes sounding at this boundary, across all voices
/// - `timestamp`: Symbolic time in whole notes
/// - `time`: Playback time in milliseconds at the snapshot's tempo
#[derive(Debug, Clone, PartialEq)]
pub struct CursorSnapshot<N> {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub measure_index: usize,
    pub notes: Vec<N>,
    pub timestamp: f64,
    pub time: f64,
}

impl<N> CursorSnapshot<N> {
    pub fn rect(&self) -> CursorRect {
        CursorRect::new(self.x, self.y, self.width, self.height)
    }
}

/// Build the snapshot list for the whole score.
///
/// The engine cursor is reset before the walk and again afterwards, also when
/// the walk fails.
///
/// # Errors
/// [`CursorError::NotRendered`] if a note group has no cursor layout.
pub fn build_snapshots<C: ScoreCursor>(
    cursor: &mut C,
    tempo: &TempoMap,
    geometry: &MarkerGeometry,
) -> Result<Vec<CursorSnapshot<C::Note>>, CursorError> {
    cursor.reset();
    let result = collect_snapshots(cursor, tempo, geometry);
    cursor.reset();

    if let Ok(snapshots) = &result {
        debug!(
            "built {} cursor snapshots, {:.0} ms total at base tempo {} bpm",
            snapshots.len(),
            snapshots.last().map(|s| s.time).unwrap_or(0.0),
            tempo.base()
        );
    }
    result
}

fn collect_snapshots<C: ScoreCursor>(
    cursor: &mut C,
    tempo: &TempoMap,
    geometry: &MarkerGeometry,
) -> Result<Vec<CursorSnapshot<C::Note>>, CursorError> {
    let mut snapshots: Vec<CursorSnapshot<C::Note>> = Vec::new();
    let mut clock = TempoClock::new(tempo);

    while !cursor.end_reached() {
        let measure_index = cursor.current_measure_index();
        let rect = cursor.cursor_rect().ok_or(CursorError::NotRendered {
            measure: measure_index + 1,
        })?;

        let notes: Vec<C::Note> = cursor.current_voice_notes().into_iter().flatten().collect();
        let timestamp = cursor.current_timestamp();
        let mut time = clock.ms_at(timestamp, measure_index);

        // Keep the list sorted even if the engine reports a timestamp going backwards.
        if let Some(previous) = snapshots.last() {
            time = time.max(previous.time);
        }

        snapshots.push(CursorSnapshot {
            x: rect.x + geometry.left_margin,
            y: rect.y,
            width: geometry.width,
            height: rect.height,
            measure_index,
            notes,
            timestamp,
            time,
        });
        cursor.next();
    }

    Ok(snapshots)
}
