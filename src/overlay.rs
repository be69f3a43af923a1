//! Overlay marker
//!
//! The marker is the single screen-space element showing the playback
//! position. The driver owns exactly one per rendered score; hosts supply the
//! implementation (a DOM element, a canvas sprite, ...).

/// Position and size of the marker, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CursorRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        CursorRect { x, y, width, height }
    }
}

/// How a marker is placed relative to the engine's own cursor element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerGeometry {
    pub left_margin: f64,
    pub width: f64,
}

impl Default for MarkerGeometry {
    fn default() -> Self {
        MarkerGeometry {
            left_margin: crate::config::CURSOR_LEFT_MARGIN,
            width: crate::config::CURSOR_WIDTH,
        }
    }
}

/// A screen-space cursor marker.
pub trait CursorOverlay {
    /// Move the marker and make it visible.
    ///
    /// A zero `width` or `height` leaves that dimension unchanged.
    fn move_to(&mut self, rect: CursorRect);
}

impl<T: CursorOverlay + ?Sized> CursorOverlay for Box<T> {
    fn move_to(&mut self, rect: CursorRect) {
        (**self).move_to(rect)
    }
}

/// In-memory marker that remembers where it was last placed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryOverlay {
    pub rect: CursorRect,
    pub visible: bool,
    pub moves: usize,
}

impl MemoryOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CursorOverlay for MemoryOverlay {
    fn move_to(&mut self, rect: CursorRect) {
        self.rect.x = rect.x;
        self.rect.y = rect.y;
        if rect.width != 0.0 {
            self.rect.width = rect.width;
        }
        if rect.height != 0.0 {
            self.rect.height = rect.height;
        }
        self.visible = true;
        self.moves += 1;
    }
}
