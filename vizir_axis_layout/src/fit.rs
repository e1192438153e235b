// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fit stage: how thick each axis band wants to be.
//!
//! `thickness = min(max_extent, content + 2 * spacing + fixed_margin)`
//!
//! Spacing is resolved before it enters the formula, so an unset spacing
//! option can never turn the sum non-finite. A measurement failure leaves the
//! thickness unknown (`None`) for [`crate::GeometrySanitizer`] to repair.

use log::{debug, warn};

use crate::axis::{AxisDescriptor, FittedAxis};
use crate::config::{DEFAULT_SPACING, FIXED_MARGIN, LayoutConfig};
use crate::measure::{ContentMeasurer, MeasureError};
use crate::report::{LayoutIssue, LayoutReport};
use crate::spacing::{is_valid_extent, resolve_spacing};

/// Combines content extent, spacing and the fixed margin into a thickness,
/// clamped to `max_extent` when one is given.
pub(crate) fn band_thickness(
    content: f64,
    spacing: f64,
    fixed_margin: f64,
    max_extent: Option<f64>,
) -> f64 {
    let raw = content + 2.0 * spacing + fixed_margin;
    match max_extent {
        Some(max) => raw.min(max),
        None => raw,
    }
}

/// Computes axis band thickness from measured content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisFitter {
    default_spacing: f64,
    fixed_margin: f64,
}

impl Default for AxisFitter {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl AxisFitter {
    /// Creates a fitter from `config`.
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            default_spacing: resolve_spacing(Some(config.default_spacing), DEFAULT_SPACING),
            fixed_margin: resolve_spacing(Some(config.fixed_margin), FIXED_MARGIN),
        }
    }

    /// Returns the spacing the fitter uses for `axis`.
    pub fn spacing_for(&self, axis: &AxisDescriptor) -> f64 {
        resolve_spacing(axis.spacing, self.default_spacing)
    }

    /// Returns the thickness for `axis` given an already measured content extent.
    ///
    /// Returns `None` if `content` is not a usable length.
    pub fn thickness_for(&self, axis: &AxisDescriptor, content: f64) -> Option<f64> {
        is_valid_extent(content).then(|| {
            band_thickness(
                content,
                self.spacing_for(axis),
                self.fixed_margin,
                axis.usable_max_extent(),
            )
        })
    }

    /// Fits `axis`, measuring its content with `measurer`.
    ///
    /// Hidden axes are fitted to zero without being measured. If measurement
    /// fails the returned thickness is `None`.
    pub fn fit(&self, axis: &AxisDescriptor, measurer: &dyn ContentMeasurer) -> FittedAxis {
        self.fit_reporting(axis, measurer, &mut LayoutReport::new())
    }

    /// Like [`AxisFitter::fit`], but records measurement failures in `report`.
    pub fn fit_reporting(
        &self,
        axis: &AxisDescriptor,
        measurer: &dyn ContentMeasurer,
        report: &mut LayoutReport,
    ) -> FittedAxis {
        if !axis.visible {
            return FittedAxis::new(axis, None, Some(0.0));
        }

        let measured = measurer.measure(axis).and_then(|extent| {
            if is_valid_extent(extent) {
                Ok(extent)
            } else {
                Err(MeasureError::InvalidExtent(extent))
            }
        });

        match measured {
            Ok(content) => {
                let thickness = self.thickness_for(axis, content);
                debug!(
                    "fitted axis {} ({:?}): content {content}, thickness {thickness:?}",
                    axis.id, axis.orient
                );
                FittedAxis::new(axis, Some(content), thickness)
            }
            Err(err) => {
                warn!("axis {}: {err}; thickness left for repair", axis.id);
                report.push(LayoutIssue::MeasurementFailure {
                    axis: axis.id,
                    source: err,
                });
                FittedAxis::new(axis, None, None)
            }
        }
    }
}
