//! # Static Layout
//!
//! An in-memory [`ScoreCursor`] backed by a precomputed layout: the cursor
//! position of every note group as an engine reported it after rendering.
//!
//! ## Purpose
//! - Drive the smooth cursor without a live rendering engine (CLI, tests)
//! - Let hosts export the layout once and replay it elsewhere
//!
//! ## Layout Format
//! ```yaml
//! options:
//!   paint-notes-on-cursor: true
//!   tempo: 90
//! tempo-changes:
//!   - measure: 2
//!     bpm: 60
//! groups:
//!   - timestamp: 0      # whole notes from the start
//!     measure: 0
//!     x: 40
//!     y: 100
//!     height: 60
//!     voices: [[c4, e4], [c3]]
//! ```
//!
//! Every key except `groups` is optional. Note ids are free-form strings; each
//! id is also its own graphical element, so recoloring a note paints the id.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::CursorOptions;
use crate::engine::ScoreCursor;
use crate::error::CursorError;
use crate::locator::TempoMap;
use crate::overlay::CursorRect;

const DEFAULT_GROUP_HEIGHT: f64 = 60.0;

fn default_height() -> f64 {
    DEFAULT_GROUP_HEIGHT
}

/// Layout of one note group
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NoteGroup {
    pub timestamp: f64,
    #[serde(default)]
    pub measure: usize,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub voices: Vec<Vec<String>>,
}

impl NoteGroup {
    pub fn new(timestamp: f64, measure: usize, x: f64, y: f64) -> Self {
        NoteGroup {
            timestamp,
            measure,
            x,
            y,
            height: DEFAULT_GROUP_HEIGHT,
            voices: Vec::new(),
        }
    }

    /// Add a voice holding `notes`.
    pub fn with_voice(mut self, notes: &[&str]) -> Self {
        self.voices.push(notes.iter().map(|n| n.to_string()).collect());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TempoChange {
    pub measure: usize,
    pub bpm: f64,
}

/// A layout file: options, tempo changes and note groups
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LayoutFile {
    #[serde(default)]
    pub options: CursorOptions,
    #[serde(default)]
    pub tempo_changes: Vec<TempoChange>,
    pub groups: Vec<NoteGroup>,
}

impl LayoutFile {
    pub fn from_yaml(content: &str) -> Result<Self, CursorError> {
        serde_yaml::from_str(content).map_err(|e| CursorError::ConfigError(e.to_string()))
    }

    /// Tempo map from `options.tempo` and the tempo changes.
    pub fn tempo_map(&self) -> Result<TempoMap, CursorError> {
        self.tempo_changes
            .iter()
            .try_fold(TempoMap::constant(self.options.tempo)?, |map, change| {
                map.with_change(change.measure, change.bpm)
            })
    }

    pub fn into_score(self) -> StaticScore {
        StaticScore::new(self.groups)
    }
}

/// One occurrence of a note in the layout
///
/// Note ids need not be unique: the same id in two groups (or two voices) is
/// two occurrences, each with its own graphical element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteRef {
    pub group: usize,
    pub voice: usize,
    pub index: usize,
    pub id: String,
}

impl PartialEq<&str> for NoteRef {
    fn eq(&self, other: &&str) -> bool {
        self.id == *other
    }
}

/// Precomputed score layout with an iteration cursor
///
/// Recolors are applied to an in-memory color table and logged in order, so
/// callers can inspect what a real engine would have painted.
#[derive(Debug, Clone)]
pub struct StaticScore {
    groups: Vec<NoteGroup>,
    position: usize,
    rendered: bool,
    colors: HashMap<NoteRef, String>,
    paint_log: Vec<(NoteRef, String)>,
}

impl StaticScore {
    pub fn new(groups: Vec<NoteGroup>) -> Self {
        StaticScore {
            groups,
            position: 0,
            rendered: true,
            colors: HashMap::new(),
            paint_log: Vec::new(),
        }
    }

    /// A score whose cursor element has not been laid out yet.
    pub fn unrendered(groups: Vec<NoteGroup>) -> Self {
        StaticScore {
            rendered: false,
            ..StaticScore::new(groups)
        }
    }

    pub fn set_rendered(&mut self, rendered: bool) {
        self.rendered = rendered;
    }

    pub fn groups(&self) -> &[NoteGroup] {
        &self.groups
    }

    /// Index of the group under the cursor (equals the group count at the end).
    pub fn position(&self) -> usize {
        self.position
    }

    /// Color last painted on note `id` in group `group`.
    pub fn color_of(&self, group: usize, id: &str) -> Option<&str> {
        self.colors
            .iter()
            .find(|(note, _)| note.group == group && note.id == id)
            .map(|(_, color)| color.as_str())
    }

    /// Every paint as `(note, color)`, oldest first.
    pub fn paint_log(&self) -> &[(NoteRef, String)] {
        &self.paint_log
    }

    pub fn clear_paint_log(&mut self) {
        self.paint_log.clear();
    }

    fn current(&self) -> Option<&NoteGroup> {
        self.groups.get(self.position)
    }
}

impl ScoreCursor for StaticScore {
    type Note = NoteRef;
    type Element = NoteRef;

    fn reset(&mut self) {
        self.position = 0;
    }

    fn next(&mut self) {
        if self.position < self.groups.len() {
            self.position += 1;
        }
    }

    fn end_reached(&self) -> bool {
        self.position >= self.groups.len()
    }

    fn current_voice_notes(&self) -> Vec<Vec<NoteRef>> {
        let Some(group) = self.current() else {
            return Vec::new();
        };
        group
            .voices
            .iter()
            .enumerate()
            .map(|(voice, notes)| {
                notes
                    .iter()
                    .enumerate()
                    .map(|(index, id)| NoteRef {
                        group: self.position,
                        voice,
                        index,
                        id: id.clone(),
                    })
                    .collect()
            })
            .collect()
    }

    fn current_timestamp(&self) -> f64 {
        match self.current() {
            Some(group) => group.timestamp,
            None => self.groups.last().map(|g| g.timestamp).unwrap_or(0.0),
        }
    }

    fn current_measure_index(&self) -> usize {
        match self.current() {
            Some(group) => group.measure,
            None => self.groups.last().map(|g| g.measure).unwrap_or(0),
        }
    }

    /// Groups carry no cursor width; the marker width comes from the options.
    fn cursor_rect(&self) -> Option<CursorRect> {
        if !self.rendered {
            return None;
        }
        self.current().map(|g| CursorRect::new(g.x, g.y, 0.0, g.height))
    }

    fn notes_under_cursor(&self) -> Vec<NoteRef> {
        self.current_voice_notes().into_iter().flatten().collect()
    }

    fn element_for_note(&self, note: &NoteRef) -> Option<NoteRef> {
        if !self.rendered {
            return None;
        }
        let id = self
            .groups
            .get(note.group)?
            .voices
            .get(note.voice)?
            .get(note.index)?;
        (*id == note.id).then(|| note.clone())
    }

    fn paint_element(&mut self, element: &NoteRef, color: &str) {
        self.colors.insert(element.clone(), color.to_string());
        self.paint_log.push((element.clone(), color.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = r#"
options:
  paint-notes-on-cursor: true
  tempo: 90
tempo-changes:
  - measure: 1
    bpm: 45
groups:
  - timestamp: 0
    x: 40
    y: 100
    voices: [[c4, e4], [c3]]
  - timestamp: 0.25
    x: 80
    y: 100
    height: 70
    voices: [[d4]]
  - timestamp: 1
    measure: 1
    x: 40
    y: 250
"#;

    #[test]
    fn test_parse_layout() {
        let layout = LayoutFile::from_yaml(LAYOUT).unwrap();
        assert!(layout.options.paint_notes_on_cursor);
        assert_eq!(layout.options.tempo, 90.0);
        assert_eq!(layout.groups.len(), 3);
        assert_eq!(layout.groups[0].height, 60.0);
        assert_eq!(layout.groups[1].height, 70.0);
        assert_eq!(layout.groups[2].measure, 1);
        assert!(layout.groups[2].voices.is_empty());
    }

    #[test]
    fn test_layout_tempo_map() {
        let tempo = LayoutFile::from_yaml(LAYOUT).unwrap().tempo_map().unwrap();
        assert_eq!(tempo.bpm_at_measure(0), 90.0);
        assert_eq!(tempo.bpm_at_measure(1), 45.0);
    }

    #[test]
    fn test_layout_rejects_bad_tempo_change() {
        let layout = LayoutFile::from_yaml("tempo-changes: [{measure: 1, bpm: 0}]\ngroups: []").unwrap();
        assert_eq!(layout.tempo_map(), Err(CursorError::InvalidTempo(0.0)));
    }

    #[test]
    fn test_missing_groups_is_config_error() {
        let result = LayoutFile::from_yaml("options: {}");
        assert!(matches!(result, Err(CursorError::ConfigError(_))));
    }

    #[test]
    fn test_iteration() {
        let mut score = LayoutFile::from_yaml(LAYOUT).unwrap().into_score();
        assert!(!score.end_reached());
        assert_eq!(score.notes_under_cursor(), vec!["c4", "e4", "c3"]);

        score.next();
        assert_eq!(score.current_timestamp(), 0.25);
        score.next();
        score.next();
        assert!(score.end_reached());
        assert!(score.cursor_rect().is_none());
        assert!(score.notes_under_cursor().is_empty());

        score.reset();
        assert_eq!(score.position(), 0);
    }

    fn note(group: usize, voice: usize, index: usize, id: &str) -> NoteRef {
        NoteRef {
            group,
            voice,
            index,
            id: id.to_string(),
        }
    }

    #[test]
    fn test_recolor_skips_unknown_notes() {
        let mut score = LayoutFile::from_yaml(LAYOUT).unwrap().into_score();
        score.recolor_notes(&[note(1, 0, 0, "d4"), note(1, 0, 0, "x9"), note(7, 0, 0, "d4")], "red");

        assert_eq!(score.color_of(1, "d4"), Some("red"));
        assert_eq!(score.color_of(1, "x9"), None);
        assert_eq!(score.paint_log().len(), 1);
    }

    #[test]
    fn test_repeated_note_ids_are_painted_separately() {
        let mut score = StaticScore::new(vec![
            NoteGroup::new(0.0, 0, 10.0, 50.0).with_voice(&["e4"]),
            NoteGroup::new(0.25, 0, 30.0, 50.0).with_voice(&["e4"]),
        ]);
        let first = score.notes_under_cursor();
        score.next();
        let second = score.notes_under_cursor();
        assert_ne!(first, second);

        score.recolor_notes(&first, "black");
        score.recolor_notes(&second, "#faa00f");

        assert_eq!(score.color_of(0, "e4"), Some("black"));
        assert_eq!(score.color_of(1, "e4"), Some("#faa00f"));
    }

    #[test]
    fn test_cursor_rect_has_no_width() {
        let score = LayoutFile::from_yaml(LAYOUT).unwrap().into_score();
        assert_eq!(score.cursor_rect(), Some(CursorRect::new(40.0, 100.0, 0.0, 60.0)));
    }
}
