//! Terminal viewport: cells measured in virtual pixels.
//!
//! A terminal cell is far too coarse to be a viewport unit (an 80 column
//! terminal would scale every speed to zero), so each cell counts as a
//! `CELL_PX_W` x `CELL_PX_H` block of viewport units, roughly the shape of a
//! monospace glyph.

use grandpa_core::{Sizer, ViewportSizer};

use crate::types::{DESIGN_HEIGHT, DESIGN_WIDTH};

/// Viewport units per terminal column.
pub const CELL_PX_W: f64 = 8.0;
/// Viewport units per terminal row.
pub const CELL_PX_H: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalSizer {
    cols: u16,
    rows: u16,
    inner: ViewportSizer,
}

impl TerminalSizer {
    pub fn new(design_width: f64, design_height: f64, cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            inner: ViewportSizer::new(
                design_width,
                design_height,
                f64::from(cols) * CELL_PX_W,
                f64::from(rows) * CELL_PX_H,
            ),
        }
    }

    pub fn with_cells(cols: u16, rows: u16) -> Self {
        Self::new(DESIGN_WIDTH, DESIGN_HEIGHT, cols, rows)
    }

    pub fn resize_cells(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.inner
            .resize(f64::from(cols) * CELL_PX_W, f64::from(rows) * CELL_PX_H);
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Viewport position to the cell that contains it.
    pub fn to_cell(&self, x: f64, y: f64) -> (i32, i32) {
        ((x / CELL_PX_W).floor() as i32, (y / CELL_PX_H).floor() as i32)
    }

    /// Viewport extent to a cell count, never less than one cell.
    pub fn to_cells(&self, w: f64, h: f64) -> (i32, i32) {
        (
            ((w / CELL_PX_W).round() as i32).max(1),
            ((h / CELL_PX_H).round() as i32).max(1),
        )
    }
}

impl Sizer for TerminalSizer {
    fn scale(&self, value: f64) -> f64 {
        self.inner.scale(value)
    }

    fn width(&self) -> f64 {
        self.inner.width()
    }

    fn height(&self) -> f64 {
        self.inner.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_terminal_keeps_design_scale() {
        let s = TerminalSizer::with_cells(80, 24);
        assert_eq!(s.width(), 640.0);
        assert_eq!(s.height(), 384.0);
        assert_eq!(s.scale(5.0), 5.0);
    }

    #[test]
    fn resize_tracks_cells() {
        let mut s = TerminalSizer::with_cells(80, 24);
        s.resize_cells(160, 45);
        assert_eq!((s.cols(), s.rows()), (160, 45));
        assert_eq!(s.scale(36.0), 72.0);
    }

    #[test]
    fn cell_mapping() {
        let s = TerminalSizer::with_cells(80, 24);
        assert_eq!(s.to_cell(17.0, 33.0), (2, 2));
        assert_eq!(s.to_cells(36.0, 67.0), (5, 4));
        assert_eq!(s.to_cells(1.0, 1.0), (1, 1));
    }
}
