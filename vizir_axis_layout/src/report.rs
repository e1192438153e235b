// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-fatal layout diagnostics.
//!
//! No layout condition aborts a pass. Anything the host may want to surface
//! is collected into a [`LayoutReport`] alongside the (always finite)
//! geometry.

use smallvec::SmallVec;
use thiserror::Error;

use crate::axis::{AxisId, AxisOrient};
use crate::geometry::Dimension;
use crate::measure::MeasureError;

/// A condition encountered and recovered from during a layout pass.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LayoutIssue {
    /// Content measurement failed; the axis thickness was left unknown for
    /// the sanitizer to repair.
    #[error("failed to measure axis {axis}")]
    MeasurementFailure {
        /// The affected axis.
        axis: AxisId,
        /// What the measurer reported.
        #[source]
        source: MeasureError,
    },
    /// A missing or non-finite thickness was replaced with a fallback.
    #[error("repaired thickness of axis {axis}: {from:?} -> {to}")]
    ThicknessRepaired {
        /// The affected axis.
        axis: AxisId,
        /// The unusable input value.
        from: Option<f64>,
        /// The substituted value.
        to: f64,
    },
    /// A host-supplied plotting region held non-finite or inverted edges.
    #[error("repaired non-finite or inverted plotting region")]
    RegionRepaired,
    /// Opposing bands requested more than the canvas extent and were shrunk
    /// proportionally.
    #[error("axis bands need {requested} of {available} canvas {dimension}; shrunk to fit")]
    DegenerateLayout {
        /// The overfull canvas dimension.
        dimension: Dimension,
        /// Sum of the requested opposing thicknesses.
        requested: f64,
        /// Canvas extent in that dimension.
        available: f64,
    },
    /// A second visible axis was placed on an already occupied side.
    #[error("side {orient:?} already holds an axis; axis {axis} collapsed to zero thickness")]
    SideConflict {
        /// The contested side.
        orient: AxisOrient,
        /// The axis that was collapsed.
        axis: AxisId,
    },
}

/// Issues collected over one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutReport {
    issues: SmallVec<[LayoutIssue; 4]>,
}

impl LayoutReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an issue.
    pub fn push(&mut self, issue: LayoutIssue) {
        self.issues.push(issue);
    }

    /// Appends every issue from `other`.
    pub fn extend(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }

    /// Returns the recorded issues in the order they occurred.
    pub fn issues(&self) -> &[LayoutIssue] {
        &self.issues
    }

    /// Returns `true` if nothing needed recovering.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns `true` if any dimension had to be shrunk to fit the canvas.
    pub fn is_degenerate(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i, LayoutIssue::DegenerateLayout { .. }))
    }
}
