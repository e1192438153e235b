// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout orchestration and the host integration seam.
//!
//! [`LayoutCoordinator`] runs fit → sanitize → position as one pass. Hosts
//! that keep their own layout pipeline call into it through [`LayoutHooks`]
//! instead:
//! - [`LayoutHooks::after_fit`] runs once per axis right after the host's own
//!   fit, before the host accumulates thicknesses, so a bad value is corrected
//!   before it can spread.
//! - [`LayoutHooks::after_layout`] runs once per chart after the host has
//!   produced its geometry, and overwrites that geometry with a repaired and
//!   re-positioned copy.
//!
//! A pass is stateless across invocations. The only process-wide state is the
//! install flag (see [`install`]).

use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::axis::{AxisDescriptor, AxisId, FittedAxis};
use crate::config::LayoutConfig;
use crate::fit::AxisFitter;
use crate::geometry::{AxisGeometry, Canvas, PlottingRegion};
use crate::measure::{ContentMeasurer, MeasureError};
use crate::position::{BandPositioner, Placement};
use crate::report::LayoutReport;
use crate::sanitize::GeometrySanitizer;
use crate::spacing::is_valid_extent;

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Result of [`install`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallState {
    /// This call installed the hooks.
    Installed,
    /// The hooks were already installed; nothing changed.
    AlreadyInstalled,
}

/// Marks the layout hooks as installed for this process.
///
/// Idempotent: the first call returns [`InstallState::Installed`], every later
/// call [`InstallState::AlreadyInstalled`]. There is no uninstall.
pub fn install() -> InstallState {
    match INSTALLED.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => {
            info!("axis layout hooks installed");
            InstallState::Installed
        }
        Err(_) => {
            debug!("axis layout hooks already installed");
            InstallState::AlreadyInstalled
        }
    }
}

/// Returns `true` once [`install`] has run in this process.
pub fn is_installed() -> bool {
    INSTALLED.load(Ordering::Acquire)
}

/// One axis as the host renderer tracks it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostAxis {
    /// The axis configuration.
    pub descriptor: AxisDescriptor,
    /// The host's thickness; may be missing or non-finite.
    pub thickness: Option<f64>,
    /// The host's raw label extent, if it kept one.
    pub content_extent: Option<f64>,
    /// The host's box for this axis; may hold non-finite values.
    pub geometry: AxisGeometry,
}

impl HostAxis {
    /// Creates a host axis with no thickness or geometry yet.
    pub fn new(descriptor: AxisDescriptor) -> Self {
        Self {
            descriptor,
            thickness: None,
            content_extent: None,
            geometry: AxisGeometry::default(),
        }
    }

    /// Set the host's thickness.
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }

    /// Set the host's raw content extent.
    pub fn with_content_extent(mut self, content_extent: f64) -> Self {
        self.content_extent = Some(content_extent);
        self
    }
}

/// The host renderer's layout state after its own layout step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostLayout {
    /// The host's plotting region; may hold non-finite or inverted values.
    pub chart_area: PlottingRegion,
    /// The host's axes.
    pub axes: SmallVec<[HostAxis; 4]>,
}

/// The seam a host renderer calls to have its layout corrected.
///
/// Both hooks transform the records the host already owns; they introduce no
/// new state.
pub trait LayoutHooks {
    /// Inspects the host's fitted thickness for `axis` and returns the value
    /// the host should use instead.
    ///
    /// Valid thicknesses (finite, non-negative) are returned unchanged.
    fn after_fit(
        &self,
        axis: &AxisDescriptor,
        host_thickness: Option<f64>,
        measurer: &dyn ContentMeasurer,
    ) -> f64;

    /// Repairs and re-positions the host's geometry in place.
    fn after_layout(&self, canvas: Canvas, layout: &mut HostLayout) -> LayoutReport;
}

/// Input for one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutRequest {
    /// The canvas to lay out on.
    pub canvas: Canvas,
    /// The axes to place; at most one visible axis per side is expected.
    pub axes: SmallVec<[AxisDescriptor; 4]>,
}

impl LayoutRequest {
    /// Creates a request with no axes.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            axes: SmallVec::new(),
        }
    }

    /// Add an axis.
    pub fn with_axis(mut self, axis: AxisDescriptor) -> Self {
        self.axes.push(axis);
        self
    }
}

/// Receives the results of [`LayoutCoordinator::run`].
pub trait LayoutTarget {
    /// Applies a finished layout.
    ///
    /// Implementations may request another layout (for example from a
    /// synchronous resize); such requests are deferred until this call
    /// returns and then delivered to this same target.
    fn deliver(&mut self, placement: &Placement);
}

/// Content extents captured from the caller's measurer when a request was
/// deferred, so the deferred pass fits against the content it was asked for.
#[derive(Clone, Debug, Default, PartialEq)]
struct CapturedContent {
    extents: SmallVec<[(AxisId, Result<f64, MeasureError>); 4]>,
}

impl CapturedContent {
    fn capture(axes: &[AxisDescriptor], measurer: &dyn ContentMeasurer) -> Self {
        Self {
            extents: axes
                .iter()
                .filter(|axis| axis.visible)
                .map(|axis| (axis.id, measurer.measure(axis)))
                .collect(),
        }
    }
}

impl ContentMeasurer for CapturedContent {
    fn measure(&self, axis: &AxisDescriptor) -> Result<f64, MeasureError> {
        self.extents
            .iter()
            .find(|(id, _)| *id == axis.id)
            .map_or(Err(MeasureError::UnknownAxis(axis.id)), |(_, extent)| {
                extent.clone()
            })
    }
}

/// A request queued behind the active pass.
#[derive(Clone, Debug, PartialEq)]
struct DeferredRequest {
    request: LayoutRequest,
    content: CapturedContent,
}

/// What happened to a [`LayoutCoordinator::run`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassStatus {
    /// The request ran; `passes` counts it plus any deferred requests drained
    /// after it.
    Completed {
        /// Number of layouts delivered.
        passes: usize,
    },
    /// A pass was already running; the request was queued behind it.
    Deferred,
}

/// Runs layout passes and implements [`LayoutHooks`].
#[derive(Debug)]
pub struct LayoutCoordinator {
    config: LayoutConfig,
    fitter: AxisFitter,
    sanitizer: GeometrySanitizer,
    positioner: BandPositioner,
    active: Cell<bool>,
    pending: RefCell<Option<DeferredRequest>>,
}

impl Default for LayoutCoordinator {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutCoordinator {
    /// Creates a coordinator, installing the hooks on first use.
    pub fn new(config: LayoutConfig) -> Self {
        install();
        let config = config.resolved();
        Self {
            fitter: AxisFitter::new(&config),
            sanitizer: GeometrySanitizer::new(&config),
            positioner: BandPositioner::new(),
            config,
            active: Cell::new(false),
            pending: RefCell::new(None),
        }
    }

    /// Returns the (resolved) configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Returns `true` while [`LayoutCoordinator::run`] is delivering a layout.
    pub fn is_in_pass(&self) -> bool {
        self.active.get()
    }

    /// Computes one full layout: fit, sanitize, then position.
    ///
    /// The result always has finite geometry; anything that needed recovering
    /// is listed in [`Placement::report`].
    pub fn layout(
        &self,
        canvas: Canvas,
        axes: &[AxisDescriptor],
        measurer: &dyn ContentMeasurer,
    ) -> Placement {
        let mut report = LayoutReport::new();
        let mut fitted: SmallVec<[FittedAxis; 4]> = SmallVec::with_capacity(axes.len());
        for axis in axes {
            let raw = self.fitter.fit_reporting(axis, measurer, &mut report);
            fitted.push(self.sanitizer.sanitize_reporting(&raw, axis, &mut report));
        }

        let mut placement = self.positioner.position(canvas, &fitted);
        report.extend(core::mem::take(&mut placement.report));
        placement.report = report;
        placement
    }

    /// Runs a layout pass and delivers it to `target`.
    ///
    /// If a pass is already running (the target re-entered the coordinator),
    /// the request's content is measured right away with `measurer`, the
    /// request is queued (replacing any earlier queued request), and
    /// [`PassStatus::Deferred`] is returned. The nested call's `target` is not
    /// used: the outer call lays out the queued request once the current
    /// delivery returns and delivers it to the outer target. At most
    /// [`LayoutConfig::max_deferred_passes`] queued requests are drained per
    /// outer call.
    pub fn run(
        &self,
        request: LayoutRequest,
        measurer: &dyn ContentMeasurer,
        target: &mut dyn LayoutTarget,
    ) -> PassStatus {
        if self.active.replace(true) {
            debug!("layout requested during an active pass; deferring");
            let content = CapturedContent::capture(&request.axes, measurer);
            *self.pending.borrow_mut() = Some(DeferredRequest { request, content });
            return PassStatus::Deferred;
        }
        let _guard = ActiveGuard {
            active: &self.active,
            pending: &self.pending,
        };

        let placement = self.layout(request.canvas, &request.axes, measurer);
        target.deliver(&placement);
        let mut passes = 1;

        loop {
            let deferred = self.pending.borrow_mut().take();
            let Some(deferred) = deferred else {
                break;
            };
            if passes > self.config.max_deferred_passes {
                warn!(
                    "dropping deferred layout request after {} deferred passes",
                    self.config.max_deferred_passes
                );
                break;
            }
            let DeferredRequest { request, content } = deferred;
            let placement = self.layout(request.canvas, &request.axes, &content);
            target.deliver(&placement);
            passes += 1;
        }
        PassStatus::Completed { passes }
    }
}

impl LayoutHooks for LayoutCoordinator {
    fn after_fit(
        &self,
        axis: &AxisDescriptor,
        host_thickness: Option<f64>,
        measurer: &dyn ContentMeasurer,
    ) -> f64 {
        if let Some(t) = host_thickness.filter(|t| is_valid_extent(*t)) {
            return t;
        }

        let mut report = LayoutReport::new();
        let fitted = self.fitter.fit_reporting(axis, measurer, &mut report);
        let repaired = self.sanitizer.sanitize_reporting(&fitted, axis, &mut report);
        let thickness = repaired.thickness_or_zero();
        warn!(
            "axis {}: host thickness {host_thickness:?} overridden with {thickness}",
            axis.id
        );
        thickness
    }

    fn after_layout(&self, canvas: Canvas, layout: &mut HostLayout) -> LayoutReport {
        let mut report = LayoutReport::new();
        // Only diagnosed here; the region is rebuilt from the bands below.
        self.sanitizer
            .sanitize_region_reporting(layout.chart_area, &mut report);

        let fitted: SmallVec<[FittedAxis; 4]> = layout
            .axes
            .iter()
            .map(|host| {
                let raw = FittedAxis::new(&host.descriptor, host.content_extent, host.thickness);
                self.sanitizer
                    .sanitize_reporting(&raw, &host.descriptor, &mut report)
            })
            .collect();

        let placement = self.positioner.position(canvas, &fitted);
        for (host, positioned) in layout.axes.iter_mut().zip(&placement.axes) {
            host.thickness = positioned.thickness;
            if let Some(geometry) = placement.geometry(positioned.id) {
                host.geometry = *geometry;
            }
        }
        layout.chart_area = placement.region;
        report.extend(placement.report);
        report
    }
}

/// Ends the active pass when dropped, including during unwinding.
///
/// Anything still queued belongs to the pass being ended and is discarded.
struct ActiveGuard<'a> {
    active: &'a Cell<bool>,
    pending: &'a RefCell<Option<DeferredRequest>>,
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.try_borrow_mut() {
            pending.take();
        }
        self.active.set(false);
    }
}
