// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves and progress helpers for scroll animation.

use core::f64::consts::PI;

use crate::time::{Duration, HostTime};

/// Symmetric sine ease-in-out: `-(cos(π·t) - 1) / 2`.
///
/// Maps `0.0 → 0.0` and `1.0 → 1.0` and is monotonic non-decreasing on
/// `[0, 1]`. Inputs outside that range are not clamped.
#[inline]
#[must_use]
pub fn ease_in_out_sine(t: f64) -> f64 {
    -(libm::cos(PI * t) - 1.0) / 2.0
}

/// Linear progress of an animation at `now`, clamped to `[0, 1]`.
///
/// A zero-length animation is complete immediately.
#[must_use]
pub fn progress(started_at: HostTime, now: HostTime, duration: Duration) -> f64 {
    if duration == Duration::ZERO {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(started_at).ticks() as f64;
    (elapsed / duration.ticks() as f64).clamp(0.0, 1.0)
}

/// Rounds half-way values towards positive infinity, like `Math.round`.
#[inline]
#[must_use]
pub fn round_half_up(v: f64) -> f64 {
    libm::floor(v + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_endpoints_and_midpoint() {
        assert!(ease_in_out_sine(0.0).abs() < 1e-12, "starts at zero");
        assert!((ease_in_out_sine(1.0) - 1.0).abs() < 1e-12, "ends at one");
        assert!((ease_in_out_sine(0.5) - 0.5).abs() < 1e-12, "symmetric");
    }

    #[test]
    fn sine_is_monotonic() {
        let mut prev = ease_in_out_sine(0.0);
        for i in 1..=1000 {
            let v = ease_in_out_sine(f64::from(i) / 1000.0);
            assert!(v >= prev, "eased value decreased at step {i}");
            prev = v;
        }
    }

    #[test]
    fn progress_clamps() {
        let d = Duration(1000);
        assert_eq!(progress(HostTime(500), HostTime(0), d), 0.0);
        assert_eq!(progress(HostTime(500), HostTime(1000), d), 0.5);
        assert_eq!(progress(HostTime(500), HostTime(9000), d), 1.0);
        assert_eq!(progress(HostTime(500), HostTime(500), Duration::ZERO), 1.0);
    }

    #[test]
    fn rounding_matches_math_round() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.49), 2.0);
    }
}
