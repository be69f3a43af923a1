//! Tempo map and symbolic-time conversion

use std::collections::BTreeMap;

use crate::error::CursorError;

/// Convert a whole-note duration to milliseconds at `bpm` quarter notes per minute.
pub fn whole_notes_to_ms(whole_notes: f64, bpm: f64) -> f64 {
    whole_notes * 4.0 * 60_000.0 / bpm
}

fn check_bpm(bpm: f64) -> Result<f64, CursorError> {
    if bpm.is_finite() && bpm > 0.0 {
        Ok(bpm)
    } else {
        Err(CursorError::InvalidTempo(bpm))
    }
}

/// Tempo for every measure of a score
///
/// A base tempo plus tempo changes keyed by (0-indexed) measure. A change
/// holds until the next one.
///
/// ```rust
/// use smooth_cursor::TempoMap;
///
/// let tempo = TempoMap::constant(120.0)?.with_change(4, 90.0)?;
/// assert_eq!(tempo.bpm_at_measure(3), 120.0);
/// assert_eq!(tempo.bpm_at_measure(4), 90.0);
/// assert_eq!(tempo.bpm_at_measure(10), 90.0);
/// # Ok::<(), smooth_cursor::CursorError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TempoMap {
    base: f64,
    changes: BTreeMap<usize, f64>,
}

impl TempoMap {
    pub fn constant(bpm: f64) -> Result<Self, CursorError> {
        Ok(TempoMap {
            base: check_bpm(bpm)?,
            changes: BTreeMap::new(),
        })
    }

    /// Add a tempo change starting at `measure_index`.
    pub fn with_change(mut self, measure_index: usize, bpm: f64) -> Result<Self, CursorError> {
        self.changes.insert(measure_index, check_bpm(bpm)?);
        Ok(self)
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn is_constant(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn bpm_at_measure(&self, measure_index: usize) -> f64 {
        self.changes
            .range(..=measure_index)
            .next_back()
            .map(|(_, bpm)| *bpm)
            .unwrap_or(self.base)
    }
}

/// Running conversion from symbolic time to elapsed milliseconds.
///
/// Each tempo segment is converted at its own bpm and anchored at the
/// elapsed time where the previous one left off.
pub(crate) struct TempoClock<'a> {
    tempo: &'a TempoMap,
    bpm: f64,
    anchor_timestamp: f64,
    anchor_ms: f64,
}

impl<'a> TempoClock<'a> {
    pub(crate) fn new(tempo: &'a TempoMap) -> Self {
        TempoClock {
            tempo,
            bpm: tempo.base,
            anchor_timestamp: 0.0,
            anchor_ms: 0.0,
        }
    }

    pub(crate) fn ms_at(&mut self, timestamp: f64, measure_index: usize) -> f64 {
        let bpm = self.tempo.bpm_at_measure(measure_index);
        if bpm != self.bpm {
            self.anchor_ms = self.elapsed(timestamp);
            self.anchor_timestamp = timestamp;
            self.bpm = bpm;
        }
        self.elapsed(timestamp)
    }

    fn elapsed(&self, timestamp: f64) -> f64 {
        self.anchor_ms + whole_notes_to_ms(timestamp - self.anchor_timestamp, self.bpm)
    }
}
