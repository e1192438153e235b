// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the layout invariants.

use float_cmp::approx_eq;
use proptest::prelude::*;

use vizir_axis_layout::{
    AxisDescriptor, AxisFitter, AxisId, AxisOrient, BandPositioner, Canvas, DEFAULT_SPACING,
    FittedAxis, GeometrySanitizer, LayoutCoordinator, MeasureError,
};

// ===================
// Strategies
// ===================

fn orient_strategy() -> impl Strategy<Value = AxisOrient> {
    prop_oneof![
        Just(AxisOrient::Left),
        Just(AxisOrient::Right),
        Just(AxisOrient::Top),
        Just(AxisOrient::Bottom),
    ]
}

/// Values a host might hand us, including the broken ones.
fn maybe_broken_strategy() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(None),
        Just(Some(f64::NAN)),
        Just(Some(f64::INFINITY)),
        Just(Some(f64::NEG_INFINITY)),
        (-50.0f64..0.0).prop_map(Some),
        (0.0f64..400.0).prop_map(Some),
    ]
}

fn canvas_strategy() -> impl Strategy<Value = Canvas> {
    (0.0f64..2000.0, 0.0f64..2000.0).prop_map(|(w, h)| Canvas::new(w, h))
}

fn descriptor_strategy() -> impl Strategy<Value = AxisDescriptor> {
    (
        orient_strategy(),
        maybe_broken_strategy(),
        prop_oneof![Just(f64::NAN), Just(-1.0), 1.0f64..400.0],
        any::<bool>(),
    )
        .prop_map(|(orient, spacing, max_extent, visible)| AxisDescriptor {
            id: AxisId(0),
            orient,
            visible,
            spacing,
            max_extent,
        })
}

/// One fitted axis per side, with arbitrary (possibly broken) state.
fn fitted_sides_strategy() -> impl Strategy<Value = Vec<(AxisDescriptor, FittedAxis)>> {
    prop::collection::vec(
        (
            descriptor_strategy(),
            maybe_broken_strategy(),
            maybe_broken_strategy(),
        ),
        4,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .zip(AxisOrient::ALL)
            .enumerate()
            .map(|(i, ((mut axis, content, thickness), orient))| {
                axis.id = AxisId(i as u64);
                axis.orient = orient;
                (axis, FittedAxis::new(&axis, content, thickness))
            })
            .collect()
    })
}

fn measured(extent: f64) -> impl Fn(&AxisDescriptor) -> Result<f64, MeasureError> {
    move |_axis| Ok(extent)
}

// ===================
// Property Test Functions
// ===================

/// With valid inputs, fitted thickness stays within `[0, max_extent]`.
fn check_fit_within_ceiling(
    content: f64,
    spacing: f64,
    max_extent: f64,
) -> Result<(), TestCaseError> {
    let axis = AxisDescriptor::left(1)
        .with_spacing(spacing)
        .with_max_extent(max_extent);
    let fitted = AxisFitter::default().fit(&axis, &measured(content));
    let t = fitted.thickness.expect("valid inputs produce a thickness");
    prop_assert!(t.is_finite());
    prop_assert!((0.0..=max_extent).contains(&t));
    Ok(())
}

/// An absent spacing behaves exactly like the documented default.
fn check_absent_spacing_is_default(content: f64, orient: AxisOrient) -> Result<(), TestCaseError> {
    let fitter = AxisFitter::default();
    let absent = AxisDescriptor::new(AxisId(1), orient);
    let explicit = absent.with_spacing(DEFAULT_SPACING);
    let a = fitter.fit(&absent, &measured(content)).thickness;
    let b = fitter.fit(&explicit, &measured(content)).thickness;
    prop_assert!(a.is_some_and(f64::is_finite));
    prop_assert_eq!(a, b);
    Ok(())
}

/// Whatever the inputs, positioning yields a finite, non-negative region and
/// finite boxes.
fn check_region_invariant(
    canvas: Canvas,
    sides: &[(AxisDescriptor, FittedAxis)],
) -> Result<(), TestCaseError> {
    let axes: Vec<FittedAxis> = sides.iter().map(|(_, f)| *f).collect();
    let p = BandPositioner::new().position(canvas, &axes);
    prop_assert!(p.region.is_finite());
    prop_assert!(p.region.width >= 0.0);
    prop_assert!(p.region.height >= 0.0);
    for axis in &p.axes {
        prop_assert!(axis.thickness.is_some_and(f64::is_finite));
        prop_assert!(axis.length.is_finite());
    }
    for geometry in p.geometry.values() {
        prop_assert!(geometry.is_finite());
    }
    Ok(())
}

/// The same holds for a full coordinated pass.
fn check_pass_invariant(
    canvas: Canvas,
    sides: &[(AxisDescriptor, FittedAxis)],
    content: Option<f64>,
) -> Result<(), TestCaseError> {
    let axes: Vec<AxisDescriptor> = sides.iter().map(|(a, _)| *a).collect();
    let measurer = move |_axis: &AxisDescriptor| match content {
        Some(c) => Ok(c),
        None => Err(MeasureError::Backend("unavailable".into())),
    };
    let p = LayoutCoordinator::default().layout(canvas, &axes, &measurer);
    prop_assert!(p.region.is_consistent());
    for geometry in p.geometry.values() {
        prop_assert!(geometry.is_finite());
    }
    Ok(())
}

/// Sanitizing twice is the same as sanitizing once.
fn check_sanitize_idempotent(axis: AxisDescriptor, fitted: FittedAxis) -> Result<(), TestCaseError> {
    let s = GeometrySanitizer::default();
    let once = s.sanitize(&fitted, &axis);
    let twice = s.sanitize(&once, &axis);
    prop_assert_eq!(once, twice);
    prop_assert!(once.thickness.is_some_and(f64::is_finite));
    Ok(())
}

/// With valid thicknesses, the region plus the four bands plus the four
/// corners cover the canvas exactly, and every band touches the region.
fn check_tiling(canvas: Canvas, thicknesses: [f64; 4]) -> Result<(), TestCaseError> {
    let axes: Vec<FittedAxis> = AxisOrient::ALL
        .iter()
        .zip(thicknesses)
        .enumerate()
        .map(|(i, (orient, t))| {
            FittedAxis::new(&AxisDescriptor::new(AxisId(i as u64), *orient), None, Some(t))
        })
        .collect();
    let p = BandPositioner::new().position(canvas, &axes);
    let r = p.region;
    let g = |i: u64| p.geometry(AxisId(i)).copied().expect("every axis is placed");
    let (left, right, top, bottom) = (g(0), g(1), g(2), g(3));

    prop_assert_eq!(left.right, r.left);
    prop_assert_eq!(right.left, r.right);
    prop_assert_eq!(top.bottom, r.top);
    prop_assert_eq!(bottom.top, r.bottom);
    prop_assert_eq!((left.top, left.bottom), (r.top, r.bottom));
    prop_assert_eq!((top.left, top.right), (r.left, r.right));

    let corners = (left.width + right.width) * (top.height + bottom.height);
    let covered = r.width * r.height
        + left.area()
        + right.area()
        + top.area()
        + bottom.area()
        + corners;
    let total = canvas.width * canvas.height;
    prop_assert!(
        approx_eq!(f64, covered, total, epsilon = 1e-6 * total.max(1.0)),
        "covered {covered} of {total}"
    );
    Ok(())
}

proptest! {
    #[test]
    fn fit_within_ceiling(
        content in 0.0f64..1000.0,
        spacing in 0.0f64..50.0,
        max_extent in 1.0f64..400.0,
    ) {
        check_fit_within_ceiling(content, spacing, max_extent)?;
    }

    #[test]
    fn absent_spacing_is_default(content in 0.0f64..1000.0, orient in orient_strategy()) {
        check_absent_spacing_is_default(content, orient)?;
    }

    #[test]
    fn region_invariant(canvas in canvas_strategy(), sides in fitted_sides_strategy()) {
        check_region_invariant(canvas, &sides)?;
    }

    #[test]
    fn pass_invariant(
        canvas in canvas_strategy(),
        sides in fitted_sides_strategy(),
        content in maybe_broken_strategy(),
    ) {
        check_pass_invariant(canvas, &sides, content)?;
    }

    #[test]
    fn sanitize_idempotent(sides in fitted_sides_strategy()) {
        for (axis, fitted) in sides {
            check_sanitize_idempotent(axis, fitted)?;
        }
    }

    #[test]
    fn tiling(
        canvas in canvas_strategy(),
        thicknesses in prop::array::uniform4(0.0f64..600.0),
    ) {
        check_tiling(canvas, thicknesses)?;
    }
}
