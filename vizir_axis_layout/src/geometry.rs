// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas, plotting region and axis box geometry.
//!
//! These are the record shapes hosts already use (edges plus cached
//! width/height). `kurbo::Rect` conversions are provided for callers that
//! draw with kurbo.

use core::fmt;

use kurbo::Rect;

/// The drawing surface for one layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Canvas {
    /// Width in canvas units (typically pixels).
    pub width: f64,
    /// Height in canvas units (typically pixels).
    pub height: f64,
}

impl Canvas {
    /// Creates a canvas of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the canvas as a rectangle anchored at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Returns the canvas extent along `dimension`.
    pub fn extent(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }
}

/// A canvas dimension, used when reporting degenerate layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Left-to-right; consumed by left and right bands.
    Width,
    /// Top-to-bottom; consumed by top and bottom bands.
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Width => "width",
            Self::Height => "height",
        })
    }
}

/// The rectangle left for data marks once axis bands are subtracted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlottingRegion {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// `right - left`.
    pub width: f64,
    /// `bottom - top`.
    pub height: f64,
}

impl PlottingRegion {
    /// Creates a region from its edges, deriving width and height.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Returns the region covering the whole canvas.
    pub fn full(canvas: Canvas) -> Self {
        Self::from_edges(0.0, 0.0, canvas.width, canvas.height)
    }

    /// Returns `true` if every field is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.left,
            self.top,
            self.right,
            self.bottom,
            self.width,
            self.height,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Returns `true` if the region is finite, non-negative in both
    /// dimensions, and its cached size agrees with its edges.
    pub fn is_consistent(&self) -> bool {
        self.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
            && self.width == self.right - self.left
            && self.height == self.bottom - self.top
    }

    /// Converts to a `kurbo::Rect`.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }
}

/// The absolute box reserved for one axis band.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisGeometry {
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// `right - left`.
    pub width: f64,
    /// `bottom - top`.
    pub height: f64,
}

impl AxisGeometry {
    /// Creates a box from its edges, deriving width and height.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Creates a box from a `kurbo::Rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::from_edges(rect.x0, rect.y0, rect.x1, rect.y1)
    }

    /// Converts to a `kurbo::Rect`.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }

    /// Returns `true` if every field is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.left,
            self.right,
            self.top,
            self.bottom,
            self.width,
            self.height,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Returns the box area.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_region_matches_canvas() {
        let canvas = Canvas::new(800.0, 400.0);
        let region = PlottingRegion::full(canvas);
        assert_eq!(region.to_rect(), canvas.rect());
        assert!(region.is_consistent());
    }

    #[test]
    fn inverted_region_is_not_consistent() {
        let region = PlottingRegion::from_edges(60.0, 0.0, 40.0, 10.0);
        assert!(region.is_finite());
        assert!(!region.is_consistent());
    }

    #[test]
    fn axis_geometry_round_trips_through_kurbo() {
        let rect = Rect::new(0.0, 10.0, 51.0, 390.0);
        let g = AxisGeometry::from_rect(rect);
        assert_eq!(g.width, 51.0);
        assert_eq!(g.height, 380.0);
        assert_eq!(g.to_rect(), rect);
    }
}
