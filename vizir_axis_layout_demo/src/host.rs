// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A toy host renderer with its own fit and accumulation steps.
//!
//! It reproduces the classic defect: an axis with no explicit spacing gets a
//! `NaN` thickness, which then spreads into every accumulated edge. The
//! hooks are what keep that from reaching the drawing.

use log::debug;
use vizir_axis_layout::{
    AxisDescriptor, AxisGeometry, AxisOrient, Canvas, ContentMeasurer, FIXED_MARGIN, HostAxis,
    HostLayout, LayoutHooks, LayoutReport, LayoutTarget, Placement, PlottingRegion,
};

pub(crate) struct ToyHost<'a> {
    pub(crate) hooks: Option<&'a dyn LayoutHooks>,
}

impl ToyHost<'_> {
    /// The host's own fit. `spacing: None` is read as `NaN`.
    fn naive_thickness(axis: &AxisDescriptor, measurer: &dyn ContentMeasurer) -> Option<f64> {
        let content = measurer.measure(axis).ok()?;
        let spacing = axis.spacing.unwrap_or(f64::NAN);
        Some((content + 2.0 * spacing + FIXED_MARGIN).min(axis.max_extent))
    }

    /// Runs the host pipeline, invoking the hooks if installed.
    pub(crate) fn layout(
        &self,
        canvas: Canvas,
        axes: &[AxisDescriptor],
        measurer: &dyn ContentMeasurer,
    ) -> (HostLayout, LayoutReport) {
        let mut layout = HostLayout::default();
        let (mut left, mut right, mut top, mut bottom) = (0.0, 0.0, 0.0, 0.0);
        for axis in axes {
            let mut thickness = Self::naive_thickness(axis, measurer);
            if let Some(hooks) = self.hooks {
                thickness = Some(hooks.after_fit(axis, thickness, measurer));
            }
            let t = thickness.unwrap_or(f64::NAN);
            debug!("toy host fitted axis {} to {t}", axis.id);
            match axis.orient {
                AxisOrient::Left => left += t,
                AxisOrient::Right => right += t,
                AxisOrient::Top => top += t,
                AxisOrient::Bottom => bottom += t,
            }
            let mut host_axis = HostAxis::new(*axis);
            host_axis.thickness = thickness;
            layout.axes.push(host_axis);
        }

        let area =
            PlottingRegion::from_edges(left, top, canvas.width - right, canvas.height - bottom);
        for host_axis in &mut layout.axes {
            let t = host_axis.thickness.unwrap_or(f64::NAN);
            host_axis.geometry = match host_axis.descriptor.orient {
                AxisOrient::Left => {
                    AxisGeometry::from_edges(area.left - t, area.top, area.left, area.bottom)
                }
                AxisOrient::Right => {
                    AxisGeometry::from_edges(area.right, area.top, area.right + t, area.bottom)
                }
                AxisOrient::Top => {
                    AxisGeometry::from_edges(area.left, area.top - t, area.right, area.top)
                }
                AxisOrient::Bottom => {
                    AxisGeometry::from_edges(area.left, area.bottom, area.right, area.bottom + t)
                }
            };
        }
        layout.chart_area = area;

        let report = match self.hooks {
            Some(hooks) => hooks.after_layout(canvas, &mut layout),
            None => LayoutReport::new(),
        };
        (layout, report)
    }
}

/// Records every delivered placement.
#[derive(Debug, Default)]
pub(crate) struct CollectingTarget {
    pub(crate) placements: Vec<Placement>,
}

impl LayoutTarget for CollectingTarget {
    fn deliver(&mut self, placement: &Placement) {
        self.placements.push(placement.clone());
    }
}
