// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry repair.
//!
//! The sanitizer replaces missing or non-finite values with deterministic,
//! finite fallbacks. It is pure: it returns corrected copies and leaves the
//! caller to apply them. Sanitizing an already valid value returns it
//! unchanged, so repair can be run at any stage without drift.

use log::warn;

use crate::axis::{AxisDescriptor, FittedAxis};
use crate::config::{DEFAULT_FALLBACK_SPACING, FIXED_MARGIN, LayoutConfig};
use crate::fit::band_thickness;
use crate::geometry::{Canvas, PlottingRegion};
use crate::report::{LayoutIssue, LayoutReport};
use crate::spacing::{is_valid_extent, resolve_spacing};

/// Replaces unusable thickness, margin and region values with fallbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometrySanitizer {
    fallback_spacing: f64,
    fixed_margin: f64,
}

impl Default for GeometrySanitizer {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl GeometrySanitizer {
    /// Creates a sanitizer from `config`.
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            fallback_spacing: resolve_spacing(
                Some(config.fallback_spacing),
                DEFAULT_FALLBACK_SPACING,
            ),
            fixed_margin: resolve_spacing(Some(config.fixed_margin), FIXED_MARGIN),
        }
    }

    /// Returns the thickness substituted for an axis whose own is unusable.
    ///
    /// Recomputed from the raw content extent when one was measured, otherwise
    /// the axis ceiling, otherwise `0` (a hidden-looking but harmless band).
    pub fn fallback_thickness(&self, fitted: &FittedAxis, axis: &AxisDescriptor) -> f64 {
        if !fitted.visible {
            return 0.0;
        }
        let max_extent = axis.usable_max_extent();
        match fitted.content_extent.filter(|c| is_valid_extent(*c)) {
            Some(content) => {
                let t = band_thickness(
                    content,
                    self.fallback_spacing,
                    self.fixed_margin,
                    max_extent,
                );
                if is_valid_extent(t) {
                    t
                } else {
                    max_extent.unwrap_or(0.0)
                }
            }
            None => max_extent.unwrap_or(0.0),
        }
    }

    /// Returns `fitted` with a finite, non-negative thickness and length.
    ///
    /// Valid values pass through untouched.
    pub fn sanitize(&self, fitted: &FittedAxis, axis: &AxisDescriptor) -> FittedAxis {
        let mut out = *fitted;
        if fitted.valid_thickness().is_none() {
            out.thickness = Some(self.fallback_thickness(fitted, axis));
        }
        if !is_valid_extent(out.length) {
            out.length = 0.0;
        }
        if out.content_extent.is_some_and(|c| !is_valid_extent(c)) {
            out.content_extent = None;
        }
        out
    }

    /// Like [`GeometrySanitizer::sanitize`], but records a repaired thickness
    /// in `report`.
    pub fn sanitize_reporting(
        &self,
        fitted: &FittedAxis,
        axis: &AxisDescriptor,
        report: &mut LayoutReport,
    ) -> FittedAxis {
        let out = self.sanitize(fitted, axis);
        if out.thickness != fitted.thickness {
            let to = out.thickness_or_zero();
            warn!(
                "axis {}: unusable thickness {:?} replaced with {to}",
                fitted.id, fitted.thickness
            );
            report.push(LayoutIssue::ThicknessRepaired {
                axis: fitted.id,
                from: fitted.thickness,
                to,
            });
        }
        out
    }

    /// Returns a margin (inset) value that is safe to accumulate.
    ///
    /// Non-finite margins become `0`; finite margins, including negative
    /// ones, are kept as-is so their sign is never silently flipped.
    pub fn sanitize_margin(value: f64) -> f64 {
        if value.is_finite() { value } else { 0.0 }
    }

    /// Returns a canvas whose dimensions are finite and non-negative.
    pub fn sanitize_canvas(canvas: Canvas) -> Canvas {
        let clean = |v: f64| if is_valid_extent(v) { v } else { 0.0 };
        Canvas::new(clean(canvas.width), clean(canvas.height))
    }

    /// Returns `region` with finite edges, non-inverted extents, and cached
    /// width/height recomputed from the edges.
    pub fn sanitize_region(&self, region: PlottingRegion) -> PlottingRegion {
        let left = Self::sanitize_margin(region.left);
        let top = Self::sanitize_margin(region.top);
        let right = Self::sanitize_margin(region.right).max(left);
        let bottom = Self::sanitize_margin(region.bottom).max(top);
        PlottingRegion::from_edges(left, top, right, bottom)
    }

    /// Like [`GeometrySanitizer::sanitize_region`], but records a repair in
    /// `report` when anything changed.
    pub fn sanitize_region_reporting(
        &self,
        region: PlottingRegion,
        report: &mut LayoutReport,
    ) -> PlottingRegion {
        let out = self.sanitize_region(region);
        // NaN fields never compare equal, so any non-finite input counts as changed.
        if out != region {
            warn!("plotting region {region:?} repaired to {out:?}");
            report.push(LayoutIssue::RegionRepaired);
        }
        out
    }
}
