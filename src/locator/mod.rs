//! # Locator Module
//!
//! Map a playback time to a screen position for the cursor marker.
//!
//! ## Purpose
//! The rendering engine only knows discrete cursor positions, one per note
//! group. The locator caches those positions with the time each one is reached
//! (the *snapshots*) and interpolates between neighbours so the marker glides
//! instead of jumping from note to note.
//!
//! ## Sub-modules
//! - `snapshot` - CursorSnapshot and the snapshot builder
//! - `tempo` - TempoMap and symbolic-time to milliseconds conversion
//!
//! ## Interpolation Rules
//! For a playback time `t`:
//! 1. No snapshots: the origin
//! 2. `t` at or before the first snapshot: the first snapshot
//! 3. Otherwise the first snapshot `S[i]` with `S[i].time >= t` brackets `t`
//!    together with `S[i-1]`:
//!    - same line (`y` equal): `x` moves linearly between the two
//!    - different line: jump straight to `S[i]`
//!    - zero time span: jump straight to `S[i]`
//! 4. `t` past the last snapshot: the last snapshot
//!
//! ## Cursor Stepping
//! The engine cursor stays on the group the playback has reached. The locator
//! tracks which snapshot that is (`cursor_index`) and the time at which the
//! next group starts (`next_cursor_time`); the driver steps the engine cursor
//! once that time has been reached.
//!
//! ## Example
//! ```rust
//! use smooth_cursor::layout::{NoteGroup, StaticScore};
//! use smooth_cursor::{Locator, MarkerGeometry, TempoMap};
//!
//! let mut score = StaticScore::new(vec![
//!     NoteGroup::new(0.0, 0, 10.0, 50.0),
//!     NoteGroup::new(0.25, 0, 30.0, 50.0),
//! ]);
//! let tempo = TempoMap::constant(60.0)?;
//! let locator = Locator::new(&mut score, tempo, MarkerGeometry::default())?;
//!
//! // Halfway between the two quarter notes at 60 bpm
//! let rect = locator.position_at(500.0);
//! assert_eq!(rect.x, 25.0);
//! assert_eq!(rect.y, 50.0);
//! # Ok::<(), smooth_cursor::CursorError>(())
//! ```

mod snapshot;
mod tempo;


pub use snapshot::{build_snapshots, CursorSnapshot};
pub use tempo::{whole_notes_to_ms, TempoMap};

use log::debug;

use crate::engine::ScoreCursor;
use crate::error::CursorError;
use crate::overlay::{CursorRect, MarkerGeometry};

/// Time-to-position interpolator over a score's snapshots
#[derive(Debug, Clone)]
pub struct Locator<N> {
    snapshots: Vec<CursorSnapshot<N>>,
    tempo: TempoMap,
    geometry: MarkerGeometry,
    time: f64,
    next_cursor_time: Option<f64>,
    cursor_index: usize,
}

impl<N: Clone> Locator<N> {
    /// Build snapshots from a rendered score and start at its first note group.
    pub fn new<C>(cursor: &mut C, tempo: TempoMap, geometry: MarkerGeometry) -> Result<Self, CursorError>
    where
        C: ScoreCursor<Note = N>,
    {
        let snapshots = build_snapshots(cursor, &tempo, &geometry)?;
        let mut locator = Locator {
            snapshots,
            tempo,
            geometry,
            time: 0.0,
            next_cursor_time: None,
            cursor_index: 0,
        };
        locator.init();
        Ok(locator)
    }

    /// Rebuild every snapshot for a new tempo.
    ///
    /// The cursor index and last playback time are kept; the next step time is
    /// recomputed at the new tempo. On error the locator is left unchanged.
    pub fn set_tempo<C>(&mut self, cursor: &mut C, tempo: TempoMap) -> Result<(), CursorError>
    where
        C: ScoreCursor<Note = N>,
    {
        let snapshots = build_snapshots(cursor, &tempo, &self.geometry)?;
        self.snapshots = snapshots;
        self.tempo = tempo;
        self.cursor_index = self.cursor_index.min(self.snapshots.len().saturating_sub(1));
        self.next_cursor_time = self.time_after(self.cursor_index);
        Ok(())
    }

    /// Go back to the first note group at time zero.
    pub fn init(&mut self) {
        self.cursor_index = 0;
        self.time = 0.0;
        self.next_cursor_time = self.time_after(0);
    }

    /// Record the latest playback time.
    pub fn update(&mut self, time: f64) {
        self.time = time;
    }

    /// True once `time` has reached the start of the next note group.
    pub fn should_move_cursor(&self, time: f64) -> bool {
        self.next_cursor_time.is_some_and(|next| time >= next)
    }

    /// Note that the engine cursor stepped to the next group.
    pub fn cursor_moved(&mut self) {
        if self.cursor_index + 1 < self.snapshots.len() {
            self.cursor_index += 1;
        }
        self.next_cursor_time = self.time_after(self.cursor_index);
        debug!(
            "cursor at group {} (measure {}), next step at {:?} ms",
            self.cursor_index,
            self.snapshots
                .get(self.cursor_index)
                .map(|s| s.measure_index)
                .unwrap_or(0),
            self.next_cursor_time
        );
    }

    fn time_after(&self, index: usize) -> Option<f64> {
        self.snapshots.get(index + 1).map(|s| s.time)
    }
}

impl<N> Locator<N> {
    /// Interpolated marker position at playback time `time` (milliseconds).
    pub fn position_at(&self, time: f64) -> CursorRect {
        let Some(first) = self.snapshots.first() else {
            return CursorRect::default();
        };
        if time.is_nan() || time <= first.time {
            return first.rect();
        }

        // Snapshots are sorted by time, so this is the first with time >= t.
        let index = self.snapshots.partition_point(|s| s.time < time);
        match self.snapshots.get(index) {
            Some(to) => interpolate(&self.snapshots[index - 1], to, time),
            None => self.snapshots[self.snapshots.len() - 1].rect(),
        }
    }

    pub fn snapshots(&self) -> &[CursorSnapshot<N>] {
        &self.snapshots
    }

    pub fn tempo(&self) -> &TempoMap {
        &self.tempo
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn next_cursor_time(&self) -> Option<f64> {
        self.next_cursor_time
    }

    /// Index of the snapshot the engine cursor is on.
    pub fn cursor_index(&self) -> usize {
        self.cursor_index
    }

    pub fn current_snapshot(&self) -> Option<&CursorSnapshot<N>> {
        self.snapshots.get(self.cursor_index)
    }
}

fn interpolate<N>(from: &CursorSnapshot<N>, to: &CursorSnapshot<N>, time: f64) -> CursorRect {
    let span = to.time - from.time;
    if from.y != to.y || span <= 0.0 {
        return to.rect();
    }

    let progress = (time - from.time) / span;
    CursorRect::new(from.x + (to.x - from.x) * progress, from.y, from.width, from.height)
}
