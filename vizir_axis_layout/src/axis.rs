// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis descriptors and fitted axis state.
//!
//! Axes follow Vega's `orient` model: one band per canvas side. An
//! [`AxisDescriptor`] is what the host hands in for a pass; a [`FittedAxis`]
//! is what the fit stage produces and later stages refine.

use core::fmt;

use crate::config::DEFAULT_MAX_EXTENT;
use crate::spacing::is_valid_extent;

/// Stable identity of an axis within one chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(pub u64);

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which canvas edge an axis band is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal band along the top edge.
    Top,
    /// A horizontal band along the bottom edge.
    Bottom,
    /// A vertical band along the left edge.
    Left,
    /// A vertical band along the right edge.
    Right,
}

impl AxisOrient {
    /// All four sides, in accumulation order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Returns the band orientation implied by this side.
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Top | Self::Bottom => Orientation::Horizontal,
            Self::Left | Self::Right => Orientation::Vertical,
        }
    }

    /// Returns the side's index into [`AxisOrient::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Top => 2,
            Self::Bottom => 3,
        }
    }
}

/// Orientation of an axis band.
///
/// Thickness is measured across the band: width for vertical bands, height
/// for horizontal ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// A top or bottom band; thickness is a height.
    Horizontal,
    /// A left or right band; thickness is a width.
    Vertical,
}

/// One axis band as configured by the host for a single layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisDescriptor {
    /// Stable identity.
    pub id: AxisId,
    /// Side of the canvas the band is attached to.
    pub orient: AxisOrient,
    /// Whether the band takes part in layout.
    pub visible: bool,
    /// Spacing on each side of the label content, if configured.
    ///
    /// May be absent or hold an unusable value; the fitter resolves it.
    pub spacing: Option<f64>,
    /// Ceiling on the band's thickness.
    pub max_extent: f64,
}

impl AxisDescriptor {
    /// Creates a visible axis with no spacing and the default thickness ceiling.
    pub fn new(id: AxisId, orient: AxisOrient) -> Self {
        Self {
            id,
            orient,
            visible: true,
            spacing: None,
            max_extent: DEFAULT_MAX_EXTENT,
        }
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id: u64) -> Self {
        Self::new(AxisId(id), AxisOrient::Left)
    }

    /// Convenience constructor for a `right` axis.
    pub fn right(id: u64) -> Self {
        Self::new(AxisId(id), AxisOrient::Right)
    }

    /// Convenience constructor for a `top` axis.
    pub fn top(id: u64) -> Self {
        Self::new(AxisId(id), AxisOrient::Top)
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id: u64) -> Self {
        Self::new(AxisId(id), AxisOrient::Bottom)
    }

    /// Set the spacing option.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Clear the spacing option.
    pub fn without_spacing(mut self) -> Self {
        self.spacing = None;
        self
    }

    /// Set the thickness ceiling.
    pub fn with_max_extent(mut self, max_extent: f64) -> Self {
        self.max_extent = max_extent;
        self
    }

    /// Show or hide the band.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Returns the band orientation.
    pub fn orientation(&self) -> Orientation {
        self.orient.orientation()
    }

    /// Returns the thickness ceiling if it is usable (finite and positive).
    pub fn usable_max_extent(&self) -> Option<f64> {
        (self.max_extent.is_finite() && self.max_extent > 0.0).then_some(self.max_extent)
    }
}

/// An axis after the fit stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FittedAxis {
    /// Stable identity, copied from the descriptor.
    pub id: AxisId,
    /// Side of the canvas, copied from the descriptor.
    pub orient: AxisOrient,
    /// Visibility, copied from the descriptor.
    pub visible: bool,
    /// Raw label content extent, if measurement produced a usable value.
    ///
    /// Kept so that a later repair can recompute a thickness from content
    /// rather than falling straight back to the ceiling.
    pub content_extent: Option<f64>,
    /// Band thickness.
    ///
    /// `None` or a non-finite value means the thickness is unknown and must be
    /// repaired before positioning.
    pub thickness: Option<f64>,
    /// The band's extent along its own orientation; `0` until positioned.
    pub length: f64,
}

impl FittedAxis {
    /// Creates a fitted axis for `axis` with the given content and thickness.
    pub fn new(axis: &AxisDescriptor, content_extent: Option<f64>, thickness: Option<f64>) -> Self {
        Self {
            id: axis.id,
            orient: axis.orient,
            visible: axis.visible,
            content_extent,
            thickness,
            length: 0.0,
        }
    }

    /// Returns the thickness if it is usable (finite and non-negative).
    pub fn valid_thickness(&self) -> Option<f64> {
        self.thickness.filter(|t| is_valid_extent(*t))
    }

    /// Returns the thickness to use for accumulation, treating anything
    /// unusable as `0`.
    pub(crate) fn thickness_or_zero(&self) -> f64 {
        self.valid_thickness().unwrap_or(0.0)
    }

    /// Returns the band orientation.
    pub fn orientation(&self) -> Orientation {
        self.orient.orientation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_follows_side() {
        assert_eq!(AxisOrient::Left.orientation(), Orientation::Vertical);
        assert_eq!(AxisOrient::Right.orientation(), Orientation::Vertical);
        assert_eq!(AxisOrient::Top.orientation(), Orientation::Horizontal);
        assert_eq!(AxisOrient::Bottom.orientation(), Orientation::Horizontal);
    }

    #[test]
    fn side_indices_match_all_order() {
        for (i, side) in AxisOrient::ALL.iter().enumerate() {
            assert_eq!(side.index(), i);
        }
    }

    #[test]
    fn unusable_ceiling_is_rejected() {
        assert_eq!(AxisDescriptor::left(1).usable_max_extent(), Some(200.0));
        assert_eq!(
            AxisDescriptor::left(1)
                .with_max_extent(0.0)
                .usable_max_extent(),
            None
        );
        assert_eq!(
            AxisDescriptor::left(1)
                .with_max_extent(f64::NAN)
                .usable_max_extent(),
            None
        );
    }

    #[test]
    fn non_finite_thickness_is_not_valid() {
        let axis = AxisDescriptor::bottom(2);
        assert_eq!(FittedAxis::new(&axis, None, Some(12.0)).valid_thickness(), Some(12.0));
        assert_eq!(FittedAxis::new(&axis, None, Some(f64::NAN)).valid_thickness(), None);
        assert_eq!(FittedAxis::new(&axis, None, Some(-1.0)).valid_thickness(), None);
        assert_eq!(FittedAxis::new(&axis, None, None).thickness_or_zero(), 0.0);
    }
}
