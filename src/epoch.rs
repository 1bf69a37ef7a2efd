// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observation epoch and sidereal time.
//!
//! An [`ObservationEpoch`] bundles a Julian Day (UT) with everything derived
//! from it: the Julian centuries `t` (on the TT axis, ΔT applied) used by the
//! Sun and Moon series, and the Greenwich mean sidereal time.  The derived
//! values are only ever rebuilt together, so a half-updated epoch cannot be
//! observed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::angles::normalize_radians;
use crate::location::GeoLocation;
use crate::scales::TT;
use crate::JulianDay;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Radians of rotation per second of sidereal time.
const SIDEREAL_SECOND_TO_RAD: f64 = std::f64::consts::TAU / SECONDS_PER_DAY;

/// A Julian Day (UT) with its epoch-derived quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObservationEpoch {
    jd: JulianDay,
    t: f64,
    gmst: f64,
}

impl ObservationEpoch {
    pub fn new(jd: JulianDay) -> Self {
        Self {
            jd,
            t: jd.to::<TT>().julian_centuries().value(),
            gmst: greenwich_mean_sidereal_time(jd),
        }
    }

    /// Moves the epoch to `jd`, recomputing every derived value.
    pub fn set(&mut self, jd: JulianDay) {
        *self = Self::new(jd);
    }

    /// Julian Day on the UT axis.
    #[inline]
    pub fn julian_day(&self) -> JulianDay {
        self.jd
    }

    /// Julian centuries of TT since J2000.0.
    #[inline]
    pub fn centuries(&self) -> f64 {
        self.t
    }

    /// Greenwich mean sidereal time in radians, `[0, 2π)`.
    #[inline]
    pub fn greenwich_sidereal_time(&self) -> f64 {
        self.gmst
    }

    /// Local mean sidereal time in radians, `[0, 2π)`.
    #[inline]
    pub fn local_sidereal_time(&self, location: &GeoLocation) -> f64 {
        normalize_radians(self.gmst + location.longitude())
    }
}

/// Greenwich mean sidereal time (IAU 1982) in radians.
///
/// The polynomial is evaluated at the preceding 0h UT and advanced by the
/// elapsed UT seconds scaled to sidereal rate.
pub fn greenwich_mean_sidereal_time(jd: JulianDay) -> f64 {
    let jd0 = jd.day_start();
    let t0 = jd0.ut_centuries();
    let secs = (jd - jd0).value() * SECONDS_PER_DAY;

    let gmst0 = ((-6.2e-6 * t0 + 9.3104e-2) * t0 + 8_640_184.812_866) * t0 + 24_110.548_41;
    let sidereal_rate =
        1.0 + ((-1.86e-5 * t0 + 0.186_208) * t0 + 8_640_184.812_866) / (SECONDS_PER_DAY * 36_525.0);
    normalize_radians((gmst0 + sidereal_rate * secs) * SIDEREAL_SECOND_TO_RAD)
}
