//! # Cursor Driver
//!
//! [`SmoothCursor`] ties a rendered score, the overlay marker and the
//! [`Locator`] together and is what the host player talks to.
//!
//! ## Lifecycle
//! 1. `SmoothCursor::new(engine, options)` once the score is loaded
//! 2. `attach_overlay` (or `create_overlay`) after the score is rendered
//! 3. `initialize_cursor_tracking` to build the snapshots
//! 4. `on_time_tick(t)` on every frame of playback
//! 5. `set_tempo(bpm)` whenever the tempo changes, `restart()` to rewind
//!
//! ## Tick Policy
//! On each tick the engine cursor steps until it sits on the last note group
//! starting at or before `t`. At every step the notes under the cursor go back
//! to the default color, the cursor moves on and (with `paint_notes_on_cursor`)
//! the new notes are highlighted. The marker is then placed at the interpolated
//! position for `t`, whether or not a step happened.
//!
//! ## Example
//! ```rust
//! use smooth_cursor::layout::{NoteGroup, StaticScore};
//! use smooth_cursor::{CursorOptions, MemoryOverlay, SmoothCursor};
//!
//! let score = StaticScore::new(vec![
//!     NoteGroup::new(0.0, 0, 10.0, 50.0).with_voice(&["c4"]),
//!     NoteGroup::new(0.25, 0, 30.0, 50.0).with_voice(&["d4"]),
//! ]);
//! let mut cursor = SmoothCursor::new(score, CursorOptions::default())?;
//! cursor.attach_overlay(MemoryOverlay::new());
//! cursor.initialize_cursor_tracking()?;
//! cursor.set_tempo(60.0)?;
//!
//! cursor.on_time_tick(500.0);
//! assert_eq!(cursor.overlay().unwrap().rect.x, 25.0);
//!
//! cursor.on_time_tick(1000.0);
//! assert_eq!(cursor.locator().unwrap().cursor_index(), 1);
//! # Ok::<(), smooth_cursor::CursorError>(())
//! ```

use std::fmt::Display;

use log::{debug, info};

use crate::config::CursorOptions;
use crate::engine::ScoreCursor;
use crate::error::CursorError;
use crate::locator::{Locator, TempoMap};
use crate::overlay::CursorOverlay;

/// Smoothly interpolated playback cursor over a rendered score
pub struct SmoothCursor<E: ScoreCursor, O: CursorOverlay> {
    engine: E,
    options: CursorOptions,
    tempo: TempoMap,
    overlay: Option<O>,
    locator: Option<Locator<E::Note>>,
}

impl<E: ScoreCursor, O: CursorOverlay> SmoothCursor<E, O> {
    /// # Errors
    /// [`CursorError::InvalidTempo`] if `options.tempo` is not a valid tempo.
    pub fn new(engine: E, options: CursorOptions) -> Result<Self, CursorError> {
        let tempo = TempoMap::constant(options.tempo)?;
        Ok(SmoothCursor {
            engine,
            options,
            tempo,
            overlay: None,
            locator: None,
        })
    }

    /// Install the marker for a freshly rendered score.
    ///
    /// If tracking is already initialized the marker is placed at time zero.
    pub fn attach_overlay(&mut self, overlay: O) {
        self.overlay = Some(overlay);
        if let (Some(overlay), Some(locator)) = (self.overlay.as_mut(), self.locator.as_ref()) {
            overlay.move_to(locator.position_at(0.0));
        }
    }

    /// Create the marker with a host factory and install it.
    ///
    /// # Errors
    /// [`CursorError::OverlayUnavailable`] if the factory fails.
    pub fn create_overlay<F, S>(&mut self, create: F) -> Result<(), CursorError>
    where
        F: FnOnce() -> Result<O, S>,
        S: Display,
    {
        let overlay = create().map_err(|e| CursorError::OverlayUnavailable(e.to_string()))?;
        self.attach_overlay(overlay);
        Ok(())
    }

    /// Build the snapshots of the rendered score and start tracking.
    ///
    /// # Errors
    /// [`CursorError::NotRendered`] if the score has not been laid out.
    pub fn initialize_cursor_tracking(&mut self) -> Result<(), CursorError> {
        let locator = Locator::new(&mut self.engine, self.tempo.clone(), self.options.geometry())?;
        info!(
            "cursor tracking initialized: {} note groups at {} bpm",
            locator.snapshots().len(),
            self.tempo.base()
        );
        self.locator = Some(locator);
        Ok(())
    }

    /// Change the tempo, rebuilding every snapshot.
    ///
    /// Before tracking is initialized the tempo is only stored.
    pub fn set_tempo(&mut self, bpm: f64) -> Result<(), CursorError> {
        self.set_tempo_map(TempoMap::constant(bpm)?)
    }

    /// Change the tempo with per-measure changes, rebuilding every snapshot.
    ///
    /// The engine cursor stays on the note group it was on.
    pub fn set_tempo_map(&mut self, tempo: TempoMap) -> Result<(), CursorError> {
        if let Some(locator) = self.locator.as_mut() {
            let rebuilt = locator.set_tempo(&mut self.engine, tempo.clone());
            // Snapshot building leaves the engine cursor at the start, also on failure.
            for _ in 0..locator.cursor_index() {
                if self.engine.end_reached() {
                    break;
                }
                self.engine.next();
            }
            rebuilt?;
        }
        info!("tempo set to {} bpm", tempo.base());
        self.tempo = tempo;
        Ok(())
    }

    /// Advance the cursor to playback time `time` (milliseconds).
    ///
    /// Steps over every note group that starts at or before `time`, so the
    /// resulting state depends only on `time`.
    ///
    /// Does nothing until both the overlay and tracking are set up.
    pub fn on_time_tick(&mut self, time: f64) {
        let (Some(locator), Some(overlay)) = (self.locator.as_mut(), self.overlay.as_mut()) else {
            debug!("time tick at {} ms ignored, cursor tracking not ready", time);
            return;
        };

        locator.update(time);

        while locator.should_move_cursor(time) {
            let passed = self.engine.notes_under_cursor();
            self.engine.recolor_notes(&passed, &self.options.default_color);
            self.engine.next();
            locator.cursor_moved();

            if self.options.paint_notes_on_cursor {
                let current = self.engine.notes_under_cursor();
                self.engine.recolor_notes(&current, &self.options.highlight_color);
            }
        }

        overlay.move_to(locator.position_at(time));
    }

    /// Rewind to the beginning of the score.
    pub fn restart(&mut self) {
        let under_cursor = self.engine.notes_under_cursor();
        self.engine.recolor_notes(&under_cursor, &self.options.default_color);
        self.engine.reset();
        if let Some(locator) = self.locator.as_mut() {
            locator.init();
        }
        self.on_time_tick(0.0);
    }

    /// Measure of the note group under the engine cursor.
    pub fn current_measure_index(&self) -> Option<usize> {
        if self.engine.end_reached() {
            None
        } else {
            Some(self.engine.current_measure_index())
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.locator.is_some()
    }

    pub fn locator(&self) -> Option<&Locator<E::Note>> {
        self.locator.as_ref()
    }

    pub fn overlay(&self) -> Option<&O> {
        self.overlay.as_ref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn options(&self) -> &CursorOptions {
        &self.options
    }

    pub fn tempo(&self) -> &TempoMap {
        &self.tempo
    }
}
