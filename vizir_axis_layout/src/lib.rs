// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis band layout for VizIR charts.
//!
//! Given a fixed canvas and up to one axis band per side, this crate works out
//! how thick each band is, where it sits, and what plotting region remains:
//! - **Fit**: measure each band from its label content plus spacing
//!   ([`AxisFitter`]).
//! - **Sanitize**: repair any missing or non-finite thickness or region value
//!   ([`GeometrySanitizer`]).
//! - **Position**: accumulate band thicknesses inward from the canvas edges
//!   ([`BandPositioner`]).
//!
//! [`LayoutCoordinator`] runs the three stages as one pass and also exposes
//! them to a host renderer through the [`LayoutHooks`] seam, so a host that
//! performs its own fit and accumulation can have its intermediate results
//! corrected before it draws.
//!
//! A pass never fails. Measurement failures, repairs and degenerate canvases
//! are reported as [`LayoutIssue`]s in a [`LayoutReport`] while the geometry
//! itself always stays finite and internally consistent.
//!
//! Text shaping is out of scope; label extents come from a
//! [`ContentMeasurer`] supplied by the caller.

#![no_std]

extern crate alloc;

mod axis;
mod config;
mod coordinator;
mod fit;
mod geometry;
mod measure;
mod position;
mod report;
mod sanitize;
mod spacing;

pub use axis::{AxisDescriptor, AxisId, AxisOrient, FittedAxis, Orientation};
pub use config::{
    DEFAULT_FALLBACK_SPACING, DEFAULT_MAX_DEFERRED_PASSES, DEFAULT_MAX_EXTENT, DEFAULT_SPACING,
    FIXED_MARGIN, LayoutConfig,
};
pub use coordinator::{
    HostAxis, HostLayout, InstallState, LayoutCoordinator, LayoutHooks, LayoutRequest,
    LayoutTarget, PassStatus, install, is_installed,
};
pub use fit::AxisFitter;
pub use geometry::{AxisGeometry, Canvas, Dimension, PlottingRegion};
pub use measure::{
    ContentMeasurer, HeuristicTextMeasurer, LabelContentMeasurer, MeasureError, TextMeasurer,
};
pub use position::{BandPositioner, Placement};
pub use report::{LayoutIssue, LayoutReport};
pub use sanitize::GeometrySanitizer;
pub use spacing::{is_valid_extent, resolve_spacing};
