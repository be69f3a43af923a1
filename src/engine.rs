//! # Rendering Engine Interface
//!
//! The smooth cursor sits on top of a sheet-music rendering engine that it
//! never looks inside. Everything it needs from the engine is expressed by
//! [`ScoreCursor`]:
//!
//! - a resettable iterator over time-ordered note groups
//! - the layout of the engine's own cursor element at the current group
//! - a way to find and paint the graphical element of a note
//!
//! ## Symbolic time
//! `current_timestamp` is measured in whole notes from the start of the score,
//! so a quarter note lasts `0.25`. The tempo (beats per minute, beat = quarter
//! note) converts it to milliseconds:
//!
//! ```text
//! ms = timestamp * 4 * 60000 / bpm
//! ```
//!
//! ## Recoloring
//! Engines expose an explicit `element_for_note` lookup instead of letting the
//! cursor reach into their internal graphics objects. `recolor_notes` is built
//! on top of it and skips notes that have no element (rests, hidden notes).

use crate::overlay::CursorRect;

/// Iteration and styling capabilities of a rendered score.
pub trait ScoreCursor {
    /// Handle to a note in the engine's note graph.
    type Note: Clone;
    /// Handle to the graphical element of a note.
    type Element;

    /// Move the cursor back to the first note group.
    fn reset(&mut self);

    /// Advance the cursor by one note group.
    fn next(&mut self);

    /// True once the cursor has moved past the last note group.
    fn end_reached(&self) -> bool;

    /// Notes at the current group, one list per voice.
    fn current_voice_notes(&self) -> Vec<Vec<Self::Note>>;

    /// Symbolic time of the current group, in whole notes.
    fn current_timestamp(&self) -> f64;

    fn current_measure_index(&self) -> usize;

    /// Laid-out rect of the engine's cursor element, or `None` before render.
    fn cursor_rect(&self) -> Option<CursorRect>;

    /// Notes currently under the engine cursor.
    fn notes_under_cursor(&self) -> Vec<Self::Note>;

    fn element_for_note(&self, note: &Self::Note) -> Option<Self::Element>;

    /// Paint the noteheads of `element` with `color`.
    fn paint_element(&mut self, element: &Self::Element, color: &str);

    /// Paint every note in `notes` that has a graphical element.
    fn recolor_notes(&mut self, notes: &[Self::Note], color: &str) {
        for note in notes {
            if let Some(element) = self.element_for_note(note) {
                self.paint_element(&element, color);
            }
        }
    }
}
