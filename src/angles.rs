// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Angle helpers shared by the series and the coordinate transforms.

use std::f64::consts::{PI, TAU};

pub(crate) const DEG_TO_RAD: f64 = PI / 180.0;

pub(crate) const ARCMIN_TO_RAD: f64 = DEG_TO_RAD / 60.0;

pub(crate) const HALF_PI: f64 = PI / 2.0;

/// Reduces an angle to `[0, 2π)`.
#[inline]
pub(crate) fn normalize_radians(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_into_one_turn() {
        assert_eq!(normalize_radians(0.0), 0.0);
        assert!((normalize_radians(-HALF_PI) - 3.0 * HALF_PI).abs() < 1e-15);
        assert!((normalize_radians(5.0 * PI) - PI).abs() < 1e-12);
        assert!(normalize_radians(-1e-18) < TAU);
    }
}
