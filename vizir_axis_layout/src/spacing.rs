// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spacing resolution.
//!
//! Axis configuration may leave spacing unset, or set it to something that is
//! not a usable length. Everything downstream multiplies spacing into a
//! thickness, so it is resolved to a finite, non-negative value here first.

use log::trace;

/// Returns `true` if `value` is a usable length: finite and non-negative.
#[inline]
pub fn is_valid_extent(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Resolves an optional spacing value against a default.
///
/// Returns `option` if it is present, finite and non-negative; otherwise
/// returns `default`. If `default` is itself unusable the result is `0`, so
/// the return value is always finite and non-negative.
pub fn resolve_spacing(option: Option<f64>, default: f64) -> f64 {
    match option {
        Some(v) if is_valid_extent(v) => v,
        other => {
            let fallback = if is_valid_extent(default) { default } else { 0.0 };
            trace!("spacing {other:?} unusable, falling back to {fallback}");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_spacing_is_kept() {
        assert_eq!(resolve_spacing(Some(5.0), 3.0), 5.0);
        assert_eq!(resolve_spacing(Some(0.0), 3.0), 0.0);
    }

    #[test]
    fn absent_or_invalid_spacing_uses_default() {
        assert_eq!(resolve_spacing(None, 3.0), 3.0);
        assert_eq!(resolve_spacing(Some(f64::NAN), 3.0), 3.0);
        assert_eq!(resolve_spacing(Some(f64::INFINITY), 3.0), 3.0);
        assert_eq!(resolve_spacing(Some(-1.0), 3.0), 3.0);
    }

    #[test]
    fn unusable_default_collapses_to_zero() {
        assert_eq!(resolve_spacing(None, f64::NAN), 0.0);
        assert_eq!(resolve_spacing(Some(f64::NEG_INFINITY), -2.0), 0.0);
    }
}
