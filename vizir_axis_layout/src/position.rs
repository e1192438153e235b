// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The position stage: bands accumulate inward from the canvas edges.
//!
//! 1. **Accumulation**: each side contributes the thickness of its (at most
//!    one) visible band; the plotting region is whatever is left.
//! 2. **Placement**: every band gets an absolute box adjacent to the region.
//!
//! Left/right bands span the region's height and top/bottom bands its width,
//! so the four bands and the region never overlap. The four corner squares
//! belong to no band.
//!
//! If opposing bands ask for more than the canvas extent, both are shrunk
//! proportionally so the region collapses to zero instead of going negative.

use hashbrown::HashMap;
use log::{debug, warn};
use smallvec::SmallVec;

use crate::axis::{AxisId, AxisOrient, FittedAxis, Orientation};
use crate::geometry::{AxisGeometry, Canvas, Dimension, PlottingRegion};
use crate::report::{LayoutIssue, LayoutReport};
use crate::sanitize::GeometrySanitizer;

/// Output of [`BandPositioner::position`].
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// The plotting region.
    pub region: PlottingRegion,
    /// The input axes with final thickness and length.
    pub axes: SmallVec<[FittedAxis; 4]>,
    /// Absolute box for every input axis.
    pub geometry: HashMap<AxisId, AxisGeometry>,
    /// Degenerate layouts and side conflicts encountered.
    pub report: LayoutReport,
}

impl Placement {
    /// Returns the box for `id`.
    pub fn geometry(&self, id: AxisId) -> Option<&AxisGeometry> {
        self.geometry.get(&id)
    }

    /// Returns the positioned axis for `id`.
    pub fn axis(&self, id: AxisId) -> Option<&FittedAxis> {
        self.axes.iter().find(|a| a.id == id)
    }
}

/// Assigns absolute positions to fitted axis bands.
#[derive(Clone, Copy, Debug, Default)]
pub struct BandPositioner;

impl BandPositioner {
    /// Creates a positioner.
    pub fn new() -> Self {
        Self
    }

    /// Positions `axes` on `canvas`.
    ///
    /// Unusable thicknesses are treated as `0`; callers are expected to have
    /// sanitized them already. The returned region is always finite with
    /// non-negative width and height.
    pub fn position(&self, canvas: Canvas, axes: &[FittedAxis]) -> Placement {
        let mut report = LayoutReport::new();
        let canvas = GeometrySanitizer::sanitize_canvas(canvas);

        // Accumulation.
        let mut owners: [Option<usize>; 4] = [None; 4];
        let mut requested = [0.0_f64; 4];
        for (i, axis) in axes.iter().enumerate() {
            if !axis.visible {
                continue;
            }
            let side = axis.orient.index();
            if owners[side].is_some() {
                warn!(
                    "axis {} requested occupied side {:?}; collapsing it",
                    axis.id, axis.orient
                );
                report.push(LayoutIssue::SideConflict {
                    orient: axis.orient,
                    axis: axis.id,
                });
                continue;
            }
            owners[side] = Some(i);
            requested[side] = axis.thickness_or_zero();
        }

        let [left, right, top, bottom] = requested;
        let (left, right, width_filled) =
            fit_opposing(left, right, Dimension::Width, canvas, &mut report);
        let (top, bottom, height_filled) =
            fit_opposing(top, bottom, Dimension::Height, canvas, &mut report);

        let region_left = left.min(canvas.width);
        let region_top = top.min(canvas.height);
        let region_right = if width_filled {
            region_left
        } else {
            (canvas.width - right).max(region_left)
        };
        let region_bottom = if height_filled {
            region_top
        } else {
            (canvas.height - bottom).max(region_top)
        };
        let region =
            PlottingRegion::from_edges(region_left, region_top, region_right, region_bottom);
        debug!("plotting region {region:?} on {canvas:?}");

        // Placement.
        let mut out_axes = SmallVec::with_capacity(axes.len());
        let mut geometry = HashMap::with_capacity(axes.len());
        for (i, axis) in axes.iter().enumerate() {
            let owns_side = owners[axis.orient.index()] == Some(i);
            let (geom, thickness) = if owns_side {
                let geom = band_box(axis.orient, &region, canvas);
                let thickness = match axis.orientation() {
                    Orientation::Vertical if width_filled => geom.width,
                    Orientation::Horizontal if height_filled => geom.height,
                    _ => axis.thickness_or_zero(),
                };
                (geom, thickness)
            } else {
                (collapsed_box(axis.orient, &region), 0.0)
            };

            let mut positioned = *axis;
            positioned.thickness = Some(thickness);
            positioned.length = match axis.orientation() {
                Orientation::Vertical => region.height,
                Orientation::Horizontal => region.width,
            };
            geometry.insert(axis.id, geom);
            out_axes.push(positioned);
        }

        Placement {
            region,
            axes: out_axes,
            geometry,
            report,
        }
    }
}

/// Relative slack under which an overshoot is treated as rounding noise.
///
/// Thicknesses written back by a degenerate pass sum to the canvas extent only
/// up to rounding, and must not be shrunk (and reported) a second time.
const ROUNDING_SLACK: f64 = 1e-9;

/// Shrinks a pair of opposing thicknesses so they fit within the canvas
/// extent along `dimension`, preserving their ratio.
///
/// The returned flag is `true` if the pair fills the whole extent, either
/// exactly (up to rounding) or after shrinking; the region then has zero
/// extent along `dimension`.
fn fit_opposing(
    a: f64,
    b: f64,
    dimension: Dimension,
    canvas: Canvas,
    report: &mut LayoutReport,
) -> (f64, f64, bool) {
    let available = canvas.extent(dimension);
    let sum = a + b;
    let slack = ROUNDING_SLACK * available.max(1.0);
    if sum < available - slack {
        return (a, b, false);
    }
    if sum <= available + slack {
        return (a, b, true);
    }

    let a_fit = if sum > 0.0 && sum.is_finite() {
        a / sum * available
    } else {
        0.0
    };
    let b_fit = available - a_fit;
    warn!(
        "axis bands need {sum} of {available} canvas {dimension}; shrinking to {a_fit} + {b_fit}"
    );
    report.push(LayoutIssue::DegenerateLayout {
        dimension,
        requested: sum,
        available,
    });
    (a_fit, b_fit, true)
}

/// Box for the band that owns `orient`.
fn band_box(orient: AxisOrient, region: &PlottingRegion, canvas: Canvas) -> AxisGeometry {
    match orient {
        AxisOrient::Left => AxisGeometry::from_edges(0.0, region.top, region.left, region.bottom),
        AxisOrient::Right => {
            AxisGeometry::from_edges(region.right, region.top, canvas.width, region.bottom)
        }
        AxisOrient::Top => AxisGeometry::from_edges(region.left, 0.0, region.right, region.top),
        AxisOrient::Bottom => {
            AxisGeometry::from_edges(region.left, region.bottom, region.right, canvas.height)
        }
    }
}

/// Zero-thickness box on the region edge facing `orient`.
fn collapsed_box(orient: AxisOrient, region: &PlottingRegion) -> AxisGeometry {
    match orient {
        AxisOrient::Left => {
            AxisGeometry::from_edges(region.left, region.top, region.left, region.bottom)
        }
        AxisOrient::Right => {
            AxisGeometry::from_edges(region.right, region.top, region.right, region.bottom)
        }
        AxisOrient::Top => {
            AxisGeometry::from_edges(region.left, region.top, region.right, region.top)
        }
        AxisOrient::Bottom => {
            AxisGeometry::from_edges(region.left, region.bottom, region.right, region.bottom)
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::AxisDescriptor;

    fn fitted(axis: AxisDescriptor, thickness: f64) -> FittedAxis {
        FittedAxis::new(&axis, None, Some(thickness))
    }

    #[test]
    fn no_axes_leaves_full_canvas() {
        let canvas = Canvas::new(800.0, 400.0);
        let placement = BandPositioner::new().position(canvas, &[]);
        assert_eq!(placement.region, PlottingRegion::full(canvas));
        assert!(placement.report.is_clean());
    }

    #[test]
    fn four_bands_surround_region() {
        let canvas = Canvas::new(800.0, 400.0);
        let axes = [
            fitted(AxisDescriptor::left(1), 50.0),
            fitted(AxisDescriptor::right(2), 40.0),
            fitted(AxisDescriptor::top(3), 20.0),
            fitted(AxisDescriptor::bottom(4), 30.0),
        ];
        let p = BandPositioner::new().position(canvas, &axes);
        assert_eq!(p.region, PlottingRegion::from_edges(50.0, 20.0, 760.0, 370.0));

        let left = p.geometry(AxisId(1)).unwrap();
        assert_eq!(*left, AxisGeometry::from_edges(0.0, 20.0, 50.0, 370.0));
        let right = p.geometry(AxisId(2)).unwrap();
        assert_eq!(*right, AxisGeometry::from_edges(760.0, 20.0, 800.0, 370.0));
        let top = p.geometry(AxisId(3)).unwrap();
        assert_eq!(*top, AxisGeometry::from_edges(50.0, 0.0, 760.0, 20.0));
        let bottom = p.geometry(AxisId(4)).unwrap();
        assert_eq!(*bottom, AxisGeometry::from_edges(50.0, 370.0, 760.0, 400.0));

        assert_eq!(p.axis(AxisId(1)).unwrap().length, 350.0);
        assert_eq!(p.axis(AxisId(4)).unwrap().length, 710.0);
    }

    #[test]
    fn overfull_width_shrinks_proportionally() {
        let canvas = Canvas::new(100.0, 100.0);
        let axes = [
            fitted(AxisDescriptor::left(1), 70.0),
            fitted(AxisDescriptor::right(2), 60.0),
        ];
        let p = BandPositioner::new().position(canvas, &axes);
        assert_eq!(p.region.width, 0.0);
        assert!(p.region.is_consistent());

        let left = p.axis(AxisId(1)).unwrap().thickness.unwrap();
        let right = p.axis(AxisId(2)).unwrap().thickness.unwrap();
        assert!((left - 700.0 / 13.0).abs() < 1e-9, "{left}");
        assert!((right - 600.0 / 13.0).abs() < 1e-9, "{right}");
        assert!(p.report.is_degenerate());
    }

    #[test]
    fn overfull_height_shrinks_proportionally() {
        let canvas = Canvas::new(100.0, 50.0);
        let axes = [
            fitted(AxisDescriptor::top(1), 30.0),
            fitted(AxisDescriptor::bottom(2), 45.0),
        ];
        let p = BandPositioner::new().position(canvas, &axes);
        assert_eq!(p.region.height, 0.0);
        assert_eq!(p.region.width, 100.0);
        assert!(p.region.is_consistent());

        let top = p.axis(AxisId(1)).unwrap().thickness.unwrap();
        let bottom = p.axis(AxisId(2)).unwrap().thickness.unwrap();
        assert!((top - 20.0).abs() < 1e-9, "{top}");
        assert!((bottom - 30.0).abs() < 1e-9, "{bottom}");
        assert!(matches!(
            p.report.issues(),
            [LayoutIssue::DegenerateLayout {
                dimension: Dimension::Height,
                ..
            }]
        ));
    }

    #[test]
    fn degenerate_region_is_exactly_empty_for_awkward_values() {
        for k in 1..200 {
            let width = f64::from(k) * 0.37;
            for j in 1..40 {
                for extra in [7.3, 13.1, 29.9, 41.7] {
                    let left = f64::from(j) * 1.13;
                    let right = left + extra;
                    if left + right <= width {
                        continue;
                    }
                    let axes = [
                        fitted(AxisDescriptor::left(1), left),
                        fitted(AxisDescriptor::right(2), right),
                    ];
                    let p = BandPositioner::new().position(Canvas::new(width, 10.0), &axes);
                    assert_eq!(p.region.width, 0.0, "width {width}, bands {left} + {right}");
                    assert!(p.region.is_consistent());
                }
            }
        }
    }

    #[test]
    fn shrunk_bands_are_not_shrunk_again() {
        let canvas = Canvas::new(29.97, 10.0);
        let first = BandPositioner::new().position(
            canvas,
            &[
                fitted(AxisDescriptor::left(1), 14.69),
                fitted(AxisDescriptor::right(2), 43.79),
            ],
        );
        assert!(first.report.is_degenerate());

        let second = BandPositioner::new().position(canvas, &first.axes);
        assert!(second.report.is_clean(), "{:?}", second.report);
        assert_eq!(second.region, first.region);
    }

    #[test]
    fn second_band_on_a_side_is_collapsed() {
        let canvas = Canvas::new(200.0, 100.0);
        let axes = [
            fitted(AxisDescriptor::left(1), 30.0),
            fitted(AxisDescriptor::left(2), 45.0),
        ];
        let p = BandPositioner::new().position(canvas, &axes);
        assert_eq!(p.region.left, 30.0);
        let collapsed = p.geometry(AxisId(2)).unwrap();
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.left, 30.0);
        assert_eq!(p.axis(AxisId(2)).unwrap().thickness, Some(0.0));
        assert!(matches!(
            p.report.issues(),
            [LayoutIssue::SideConflict {
                orient: AxisOrient::Left,
                axis: AxisId(2)
            }]
        ));
    }

    #[test]
    fn hidden_band_takes_no_space() {
        let canvas = Canvas::new(200.0, 100.0);
        let axes = [fitted(AxisDescriptor::left(1).with_visible(false), 30.0)];
        let p = BandPositioner::new().position(canvas, &axes);
        assert_eq!(p.region, PlottingRegion::full(canvas));
        assert_eq!(p.geometry(AxisId(1)).unwrap().width, 0.0);
    }

    #[test]
    fn unusable_thickness_and_canvas_still_give_finite_region() {
        let canvas = Canvas::new(f64::NAN, 100.0);
        let mut axis = fitted(AxisDescriptor::left(1), 0.0);
        axis.thickness = Some(f64::NAN);
        let p = BandPositioner::new().position(canvas, &[axis]);
        assert!(p.region.is_consistent());
        assert!(p.geometry(AxisId(1)).unwrap().is_finite());
    }
}
