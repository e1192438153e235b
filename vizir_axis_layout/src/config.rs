// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout tuning knobs.
//!
//! The defaults are visual heuristics rather than derived constants, so they
//! are exposed as a plain struct the caller can override.

use crate::spacing::resolve_spacing;

/// Spacing applied on each side of an axis' label content when the axis does
/// not configure its own.
pub const DEFAULT_SPACING: f64 = 3.0;

/// Spacing used when the sanitizer has to recompute a thickness from scratch.
pub const DEFAULT_FALLBACK_SPACING: f64 = 3.0;

/// Allowance added to every fitted thickness for the domain line and ticks.
pub const FIXED_MARGIN: f64 = 8.0;

/// Default ceiling on an axis band's thickness.
pub const DEFAULT_MAX_EXTENT: f64 = 200.0;

/// Default bound on nested layout requests drained after one outer pass.
pub const DEFAULT_MAX_DEFERRED_PASSES: usize = 4;

/// Configuration shared by the fitter, sanitizer and coordinator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Spacing used by the fitter when an axis has none (or an invalid one).
    pub default_spacing: f64,
    /// Spacing used by the sanitizer when recomputing a fallback thickness.
    pub fallback_spacing: f64,
    /// Border/tick allowance added to every fitted thickness.
    pub fixed_margin: f64,
    /// Maximum number of deferred nested layout requests drained per pass.
    pub max_deferred_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_spacing: DEFAULT_SPACING,
            fallback_spacing: DEFAULT_FALLBACK_SPACING,
            fixed_margin: FIXED_MARGIN,
            max_deferred_passes: DEFAULT_MAX_DEFERRED_PASSES,
        }
    }
}

impl LayoutConfig {
    /// Set the fitter's default spacing.
    pub fn with_default_spacing(mut self, spacing: f64) -> Self {
        self.default_spacing = spacing;
        self
    }

    /// Set the sanitizer's fallback spacing.
    pub fn with_fallback_spacing(mut self, spacing: f64) -> Self {
        self.fallback_spacing = spacing;
        self
    }

    /// Set the fixed border/tick allowance.
    pub fn with_fixed_margin(mut self, margin: f64) -> Self {
        self.fixed_margin = margin;
        self
    }

    /// Set the bound on deferred nested layout requests.
    pub fn with_max_deferred_passes(mut self, passes: usize) -> Self {
        self.max_deferred_passes = passes;
        self
    }

    /// Returns a copy with every length resolved to a finite, non-negative value.
    ///
    /// Unusable values fall back to the corresponding compile-time default.
    #[must_use]
    pub fn resolved(&self) -> Self {
        Self {
            default_spacing: resolve_spacing(Some(self.default_spacing), DEFAULT_SPACING),
            fallback_spacing: resolve_spacing(
                Some(self.fallback_spacing),
                DEFAULT_FALLBACK_SPACING,
            ),
            fixed_margin: resolve_spacing(Some(self.fixed_margin), FIXED_MARGIN),
            max_deferred_passes: self.max_deferred_passes,
        }
    }
}
