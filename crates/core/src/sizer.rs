//! Viewport scaling capability.
//!
//! The core never does its own viewport math. It asks a [`Sizer`] how large
//! the viewport is and how a logical length maps onto it.

use crate::types::{DESIGN_HEIGHT, DESIGN_WIDTH};

/// Converts logical (design) units to current-viewport units.
pub trait Sizer {
    /// Scale a logical length to viewport units.
    fn scale(&self, value: f64) -> f64;
    /// Viewport width in viewport units.
    fn width(&self) -> f64;
    /// Viewport height in viewport units.
    fn height(&self) -> f64;
}

/// Identity scale over a fixed viewport. Handy for headless runs and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSizer {
    pub width: f64,
    pub height: f64,
}

impl FixedSizer {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Sizer for FixedSizer {
    fn scale(&self, value: f64) -> f64 {
        value
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

/// Uniform scale from a design resolution onto the live viewport.
///
/// The smaller of the two axis ratios wins so content authored for the design
/// resolution always fits. Scaled values are rounded to whole viewport units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSizer {
    design_width: f64,
    design_height: f64,
    width: f64,
    height: f64,
    ratio: f64,
}

impl ViewportSizer {
    pub fn new(design_width: f64, design_height: f64, width: f64, height: f64) -> Self {
        let mut sizer = Self {
            design_width,
            design_height,
            width,
            height,
            ratio: 1.0,
        };
        sizer.resize(width, height);
        sizer
    }

    /// Sizer for the default 640x360 design resolution.
    pub fn with_design(width: f64, height: f64) -> Self {
        Self::new(DESIGN_WIDTH, DESIGN_HEIGHT, width, height)
    }

    /// Recompute the ratio for a new viewport extent.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let rx = if self.design_width > 0.0 {
            self.width / self.design_width
        } else {
            1.0
        };
        let ry = if self.design_height > 0.0 {
            self.height / self.design_height
        } else {
            1.0
        };
        self.ratio = rx.min(ry);
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl Sizer for ViewportSizer {
    fn scale(&self, value: f64) -> f64 {
        (value * self.ratio).round()
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}
