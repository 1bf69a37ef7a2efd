// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T) — UT↔TT Correction Layer
//!
//! **ΔT = TT − UT** is modelled by two quintic least-squares fits to the
//! Espenak & Meeus (2006) reconstruction, split at the year 1600:
//!
//! | Range | Variable |
//! |-------|----------|
//! | −600 < y < 1600 | `u = (y − 500) / 1000` |
//! | 1600 ≤ y < 2200 | `u = (y − 1900) / 100` |
//!
//! Outside (−600, 2200) the correction is zero.  The fits stay within a
//! few tens of seconds of the reference curve, which shifts the Sun by well
//! under an arcsecond and the Moon by a few arcseconds.
//!
//! The correction is applied automatically by the [`UT`](super::UT) scale:
//! `Time::<UT>::to::<TT>()` adds ΔT.

use super::instant::Time;
use super::scales::UT;
use qtty::{Days, Seconds};

/// Fit for −600 < y < 1600, in powers of `(y − 500) / 1000`.
#[rustfmt::skip]
const ANCIENT: [f64; 6] = [
    5_654.749_572_639_119, -9_615.657_630_461_828, 1_610.018_729_848_904_5,
    2_709.725_150_217_901_5, 1_373.505_409_418_390_2, -1_527.213_158_931_803_7,
];

/// Fit for 1600 ≤ y < 2200, in powers of `(y − 1900) / 100`.
#[rustfmt::skip]
const MODERN: [f64; 6] = [
    15.286_195_176_986_663, 13.822_619_933_271_941, 14.628_133_754_293_932,
    10.230_394_083_690_433, 1.885_237_618_846_353_8, -0.628_424_516_599_613_8,
];

const FIRST_YEAR: f64 = -600.0;
const SPLIT_YEAR: f64 = 1600.0;
const LAST_YEAR: f64 = 2200.0;

#[inline]
fn horner(coefficients: &[f64; 6], u: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * u + c)
}

/// Decimal (Julian) year of a Julian Day.
#[inline]
pub(crate) fn decimal_year(jd: Days) -> f64 {
    2000.0 + (jd.value() - 2_451_545.0) / 365.25
}

/// Returns **ΔT** in seconds for a decimal year.
pub(crate) fn delta_t_seconds_for_year(year: f64) -> Seconds {
    if !(year > FIRST_YEAR && year < LAST_YEAR) {
        return Seconds::new(0.0);
    }
    let dt = if year < SPLIT_YEAR {
        horner(&ANCIENT, (year - 500.0) / 1000.0)
    } else {
        horner(&MODERN, (year - 1900.0) / 100.0)
    };
    Seconds::new(dt)
}

/// Returns **ΔT** in seconds for a Julian Day on the **UT** axis.
#[inline]
pub(crate) fn delta_t_seconds_from_ut(jd_ut: Days) -> Seconds {
    delta_t_seconds_for_year(decimal_year(jd_ut))
}

impl Time<UT> {
    /// Returns **ΔT = TT − UT** in seconds for this UT epoch.
    #[inline]
    pub fn delta_t(&self) -> Seconds {
        delta_t_seconds_from_ut(self.quantity())
    }
}
