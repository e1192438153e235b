// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content measurement hooks for axis fitting.
//!
//! Text shaping lives downstream, so the fitter only asks a
//! [`ContentMeasurer`] how far an axis' widest (or tallest) label reaches.
//! Measurement is allowed to fail; failures are returned as [`MeasureError`]
//! and turned into data by the fitter rather than aborting the pass.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use thiserror::Error;

use crate::axis::{AxisDescriptor, AxisId, Orientation};
use crate::spacing::is_valid_extent;

/// Why an axis' content could not be measured.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MeasureError {
    /// The measurer has no content registered for this axis.
    #[error("no label content registered for axis {0}")]
    UnknownAxis(AxisId),
    /// The measurer produced an extent that is not a usable length.
    #[error("measured extent {0} is not a finite, non-negative length")]
    InvalidExtent(f64),
    /// The measurement backend failed.
    #[error("measurement backend failed: {0}")]
    Backend(String),
}

/// Returns the label content extent of an axis, perpendicular to its edge.
///
/// For vertical bands this is the widest label; for horizontal bands the
/// tallest. A legitimately empty axis measures `0`.
pub trait ContentMeasurer {
    /// Measure the content of `axis`.
    fn measure(&self, axis: &AxisDescriptor) -> Result<f64, MeasureError>;
}

impl<F> ContentMeasurer for F
where
    F: Fn(&AxisDescriptor) -> Result<f64, MeasureError>,
{
    fn measure(&self, axis: &AxisDescriptor) -> Result<f64, MeasureError> {
        (self)(axis)
    }
}

/// A minimal single-line text measurement interface.
pub trait TextMeasurer {
    /// Returns `(width, height)` in canvas units.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// A tiny heuristic text measurer suitable for demos and early layout.
///
/// It assumes an average glyph width of ~0.6em and height of 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}

/// Measures axes from their tick label strings.
#[derive(Clone, Debug)]
pub struct LabelContentMeasurer<M> {
    text: M,
    font_size: f64,
    labels: HashMap<AxisId, Vec<String>>,
}

impl<M: TextMeasurer> LabelContentMeasurer<M> {
    /// Creates a measurer with no registered labels.
    pub fn new(text: M, font_size: f64) -> Self {
        Self {
            text,
            font_size,
            labels: HashMap::new(),
        }
    }

    /// Registers (or replaces) the tick labels for `axis`.
    pub fn with_labels<I, S>(mut self, axis: AxisId, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_labels(axis, labels);
        self
    }

    /// Registers (or replaces) the tick labels for `axis`.
    pub fn set_labels<I, S>(&mut self, axis: AxisId, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels
            .insert(axis, labels.into_iter().map(Into::into).collect());
    }
}

impl<M: TextMeasurer> ContentMeasurer for LabelContentMeasurer<M> {
    fn measure(&self, axis: &AxisDescriptor) -> Result<f64, MeasureError> {
        let labels = self
            .labels
            .get(&axis.id)
            .ok_or(MeasureError::UnknownAxis(axis.id))?;

        let mut max_extent = 0.0_f64;
        for label in labels {
            let (w, h) = self.text.measure(label, self.font_size);
            let extent = match axis.orientation() {
                Orientation::Vertical => w,
                Orientation::Horizontal => h,
            };
            if !is_valid_extent(extent) {
                return Err(MeasureError::InvalidExtent(extent));
            }
            max_extent = max_extent.max(extent);
        }
        Ok(max_extent)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn vertical_axis_measures_widest_label() {
        let m = LabelContentMeasurer::new(HeuristicTextMeasurer, 10.0)
            .with_labels(AxisId(1), ["0", "250", "1000"]);
        let extent = m.measure(&AxisDescriptor::left(1)).unwrap();
        assert!((extent - 24.0).abs() < 1e-9, "{extent}");
    }

    #[test]
    fn horizontal_axis_measures_line_height() {
        let m = LabelContentMeasurer::new(HeuristicTextMeasurer, 10.0)
            .with_labels(AxisId(2), ["Jan", "February"]);
        let extent = m.measure(&AxisDescriptor::bottom(2)).unwrap();
        assert_eq!(extent, 10.0);
    }

    #[test]
    fn empty_label_set_measures_zero() {
        let m = LabelContentMeasurer::new(HeuristicTextMeasurer, 10.0)
            .with_labels(AxisId(1), Vec::<String>::new());
        assert_eq!(m.measure(&AxisDescriptor::left(1)), Ok(0.0));
    }

    #[test]
    fn unregistered_axis_is_an_error() {
        let m = LabelContentMeasurer::new(HeuristicTextMeasurer, 10.0);
        assert_eq!(
            m.measure(&AxisDescriptor::left(7)),
            Err(MeasureError::UnknownAxis(AxisId(7)))
        );
    }

    #[test]
    fn non_finite_text_metrics_are_rejected() {
        struct Broken;
        impl TextMeasurer for Broken {
            fn measure(&self, _text: &str, _font_size: f64) -> (f64, f64) {
                (f64::NAN, f64::NAN)
            }
        }
        let m = LabelContentMeasurer::new(Broken, 10.0).with_labels(AxisId(1), ["x"]);
        assert!(matches!(
            m.measure(&AxisDescriptor::left(1)),
            Err(MeasureError::InvalidExtent(_))
        ));
    }

    #[test]
    fn closures_are_measurers() {
        let m = |_axis: &AxisDescriptor| -> Result<f64, MeasureError> { Ok(12.5) };
        assert_eq!(m.measure(&AxisDescriptor::top(3)), Ok(12.5));
    }
}
