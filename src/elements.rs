// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Mean orbital elements of the Sun and the Moon
//!
//! Truncated trigonometric series giving the apparent ecliptic position of
//! both bodies for an epoch `t` (Julian centuries of TT since J2000.0).
//!
//! The Moon's series takes the Sun's mean anomaly and apparent longitude as
//! explicit inputs, so the two evaluations are plain functions of their
//! arguments:
//!
//! ```text
//! let sun = sun_elements(t);
//! let moon = moon_elements(t, sun.mean_anomaly, sun.apparent_longitude_deg);
//! ```
//!
//! Coefficients follow the low-precision lunar theory of Meeus,
//! *Astronomical Algorithms*, ch. 47 (tables 47.A and 47.B), and are kept
//! verbatim.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::angles::{normalize_radians, DEG_TO_RAD};

/// Astronomical unit in kilometres.
pub(crate) const AU_KM: f64 = 149_597_870.7;

/// Equatorial radius of the Earth in kilometres.
pub(crate) const EARTH_RADIUS_KM: f64 = 6_378.136_6;

const SUN_RADIUS_KM: f64 = 696_000.0;

const MOON_RADIUS_KM: f64 = 1_737.4;

/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

/// Apparent ecliptic position of a body at one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyPosition {
    /// Ecliptic longitude in radians (not reduced to one turn).
    pub longitude: f64,
    /// Ecliptic latitude in radians.
    pub latitude: f64,
    /// Geocentric distance in astronomical units.
    pub distance_au: f64,
    /// Apparent angular radius of the disk in radians.
    pub angular_radius: f64,
}

/// Output of [`sun_elements`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunElements {
    pub position: BodyPosition,
    /// Mean anomaly in radians, consumed by [`moon_elements`].
    pub mean_anomaly: f64,
    /// Apparent longitude in degrees (not reduced), consumed by [`moon_elements`].
    pub apparent_longitude_deg: f64,
}

/// Output of [`moon_elements`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonElements {
    pub position: BodyPosition,
    /// Moon minus Sun apparent longitude, in radians `[0, 2π)`.
    pub elongation: f64,
    /// Days since the last new moon.
    pub age_days: f64,
}

// ═══════════════════════════════════════════════════════════════════════════
// Fundamental arguments
// ═══════════════════════════════════════════════════════════════════════════

/// Longitude of the Moon's ascending node and twice the Sun's mean
/// longitude, in radians, the two arguments of the abridged nutation.
#[inline]
pub(crate) fn nutation_arguments(t: f64) -> (f64, f64) {
    let node = (124.90 - 1_934.134 * t + 0.002_063 * t * t) * DEG_TO_RAD;
    let sun = (201.11 + 72_001.537_7 * t + 0.000_57 * t * t) * DEG_TO_RAD;
    (node, sun)
}

/// Moon's argument of latitude (mean distance from the ascending node), radians.
#[inline]
pub(crate) fn moon_argument_of_latitude(t: f64) -> f64 {
    (93.272_099_3 + 483_202.017_527_3 * t - 0.003_402_9 * t * t - t.powi(3) / 3_526_000.0
        + t.powi(4) / 863_310_000.0)
        * DEG_TO_RAD
}

/// Mean longitude of the Moon's ascending node, radians.
#[inline]
pub(crate) fn moon_ascending_node(t: f64) -> f64 {
    (125.044_555_0 - 1_934.136_209_1 * t + 0.002_076_2 * t * t + t.powi(3) / 467_410.0
        - t.powi(4) / 18_999_000.0)
        * DEG_TO_RAD
}

// ═══════════════════════════════════════════════════════════════════════════
// Sun
// ═══════════════════════════════════════════════════════════════════════════

/// Apparent geocentric position of the Sun.
///
/// Mean longitude plus a three-term equation of the centre, corrected for
/// aberration and nutation in longitude.  Distance from the eccentricity and
/// true anomaly.
pub fn sun_elements(t: f64) -> SunElements {
    let t2 = t * t;
    let mean_longitude = 280.466_45 + 36_000.769_83 * t + 0.000_303_2 * t2;
    let mean_anomaly =
        (357.529_1 + 35_999.050_3 * t - 0.000_155_9 * t2 - 4.8e-7 * t2 * t) * DEG_TO_RAD;

    let centre = (1.914_6 - 0.004_817 * t - 0.000_014 * t2) * mean_anomaly.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000_29 * (3.0 * mean_anomaly).sin();

    let (m1, m2) = nutation_arguments(t);
    let aberration_nutation = -0.005_69 - 0.004_778_5 * m1.sin() - 0.000_366_7 * m2.sin();

    let apparent_longitude_deg = mean_longitude + centre + aberration_nutation;

    let eccentricity = 0.016_708_617 - 4.2037e-5 * t - 1.236e-7 * t2;
    let true_anomaly = mean_anomaly + centre * DEG_TO_RAD;
    let distance_au = 1.000_001_018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos());

    SunElements {
        position: BodyPosition {
            longitude: apparent_longitude_deg * DEG_TO_RAD,
            latitude: 0.0,
            distance_au,
            angular_radius: (SUN_RADIUS_KM / (AU_KM * distance_au)).atan(),
        },
        mean_anomaly,
        apparent_longitude_deg,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Moon
// ═══════════════════════════════════════════════════════════════════════════

// Periodic terms as (D, M, M', F, coefficient) where D is the mean
// elongation, M the Sun's mean anomaly, M' the Moon's mean anomaly and F the
// argument of latitude.  Terms involving M are scaled by E^|M|.

/// Longitude, degrees (sine terms).
#[rustfmt::skip]
const LONGITUDE_TERMS: [(f64, f64, f64, f64, f64); 39] = [
    ( 0.0,  0.0,  1.0,  0.0,  6.288_75),
    ( 2.0,  0.0, -1.0,  0.0,  1.274_018),
    ( 2.0,  0.0,  0.0,  0.0,  0.658_309),
    ( 0.0,  0.0,  2.0,  0.0,  0.213_616),
    ( 0.0,  1.0,  0.0,  0.0, -0.185_596),
    ( 0.0,  0.0,  0.0,  2.0, -0.114_336),
    ( 2.0,  0.0, -2.0,  0.0,  0.058_793),
    ( 2.0, -1.0, -1.0,  0.0,  0.057_212),
    ( 2.0,  0.0,  1.0,  0.0,  0.053_32),
    ( 2.0, -1.0,  0.0,  0.0,  0.045_874),
    ( 0.0, -1.0,  1.0,  0.0,  0.041_024),
    ( 1.0,  0.0,  0.0,  0.0, -0.034_718),
    ( 0.0,  1.0,  1.0,  0.0, -0.030_465),
    ( 2.0,  0.0,  0.0, -2.0,  0.015_326),
    ( 0.0,  0.0,  1.0,  2.0, -0.012_528),
    ( 0.0,  0.0, -1.0,  2.0, -0.010_98),
    ( 4.0,  0.0, -1.0,  0.0,  0.010_674),
    ( 0.0,  0.0,  3.0,  0.0,  0.010_034),
    ( 4.0,  0.0, -2.0,  0.0,  0.008_548),
    ( 2.0,  1.0, -1.0,  0.0, -0.007_91),
    ( 2.0,  1.0,  0.0,  0.0, -0.006_783),
    (-1.0,  0.0,  1.0,  0.0,  0.005_162),
    ( 1.0,  1.0,  0.0,  0.0,  0.005),
    ( 4.0,  0.0,  0.0,  0.0,  0.003_862),
    ( 2.0, -1.0,  1.0,  0.0,  0.004_049),
    ( 2.0,  0.0,  2.0,  0.0,  0.003_996),
    ( 2.0,  0.0, -3.0,  0.0,  0.003_665),
    ( 0.0, -1.0,  2.0,  0.0,  0.002_695),
    (-2.0,  0.0,  1.0, -2.0,  0.002_602),
    ( 2.0, -1.0, -2.0,  0.0,  0.002_396),
    ( 1.0,  0.0,  1.0,  0.0, -0.002_349),
    ( 2.0, -2.0,  0.0,  0.0,  0.002_249),
    ( 0.0,  1.0,  2.0,  0.0, -0.002_125),
    ( 0.0,  2.0,  0.0,  0.0, -0.002_079),
    ( 2.0, -2.0, -1.0,  0.0,  0.002_059),
    ( 2.0,  0.0,  1.0, -2.0, -0.001_773),
    ( 2.0,  0.0,  0.0,  2.0, -0.001_595),
    ( 4.0, -1.0, -1.0,  0.0,  0.001_22),
    ( 0.0,  0.0,  2.0,  2.0, -0.001_11),
];

/// Latitude, degrees (sine terms).
#[rustfmt::skip]
const LATITUDE_TERMS: [(f64, f64, f64, f64, f64); 17] = [
    ( 0.0,  0.0,  0.0,  1.0,  5.128_189),
    ( 0.0,  0.0,  1.0,  1.0,  0.280_606),
    ( 0.0,  0.0,  1.0, -1.0,  0.277_693),
    ( 2.0,  0.0,  0.0, -1.0,  0.173_238),
    ( 2.0,  0.0, -1.0,  1.0,  0.055_413),
    ( 2.0,  0.0, -1.0, -1.0,  0.046_272),
    ( 2.0,  0.0,  0.0,  1.0,  0.032_573),
    ( 0.0,  0.0,  2.0,  1.0,  0.017_198),
    ( 2.0,  0.0,  1.0, -1.0,  0.009_267),
    ( 0.0,  0.0,  2.0, -1.0,  0.008_823),
    ( 2.0, -1.0,  0.0, -1.0,  0.008_247),
    ( 2.0,  0.0, -2.0, -1.0,  0.004_323),
    ( 2.0,  0.0,  1.0,  1.0,  0.004_2),
    (-2.0, -1.0,  0.0,  1.0,  0.003_372),
    ( 2.0, -1.0, -1.0,  1.0,  0.002_472),
    ( 2.0, -1.0,  0.0,  1.0,  0.002_222),
    ( 2.0, -1.0, -1.0, -1.0,  0.002_072),
];

/// Horizontal parallax, degrees (cosine terms, constant term excluded).
#[rustfmt::skip]
const PARALLAX_TERMS: [(f64, f64, f64, f64, f64); 13] = [
    ( 0.0,  0.0,  1.0,  0.0,  0.051_818),
    ( 2.0,  0.0, -1.0,  0.0,  0.009_531),
    ( 2.0,  0.0,  0.0,  0.0,  0.007_843),
    ( 0.0,  0.0,  2.0,  0.0,  0.002_824),
    ( 2.0,  0.0,  1.0,  0.0,  0.000_857),
    ( 2.0, -1.0,  0.0,  0.0,  0.000_533),
    ( 2.0, -1.0, -1.0,  0.0,  0.000_401),
    ( 0.0, -1.0,  1.0,  0.0,  0.000_32),
    ( 1.0,  0.0,  0.0,  0.0, -0.000_271),
    ( 0.0,  1.0,  1.0,  0.0, -0.000_264),
    ( 0.0,  0.0, -1.0,  2.0, -0.000_198),
    ( 0.0,  0.0,  3.0,  0.0,  0.000_173),
    ( 4.0,  0.0, -1.0,  0.0,  0.000_167),
];

const PARALLAX_CONSTANT_DEG: f64 = 0.950_724;

/// Fundamental lunar arguments of one epoch, in radians.
struct LunarArguments {
    elongation: f64,
    sun_anomaly: f64,
    moon_anomaly: f64,
    latitude_argument: f64,
    /// Eccentricity factor of the Earth's orbit.
    e: f64,
}

impl LunarArguments {
    fn sum(&self, terms: &[(f64, f64, f64, f64, f64)], f: fn(f64) -> f64) -> f64 {
        terms.iter().fold(0.0, |acc, &(d, m, mp, ff, coefficient)| {
            let argument = d * self.elongation
                + m * self.sun_anomaly
                + mp * self.moon_anomaly
                + ff * self.latitude_argument;
            acc + coefficient * self.e.powi(m.abs() as i32) * f(argument)
        })
    }
}

/// Apparent geocentric position of the Moon and its age.
///
/// `sun_mean_anomaly` (radians) and `sun_apparent_longitude_deg` come from
/// [`sun_elements`] for the same `t`.
pub fn moon_elements(
    t: f64,
    sun_mean_anomaly: f64,
    sun_apparent_longitude_deg: f64,
) -> MoonElements {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let tp1 = t + 1.0;
    let args = LunarArguments {
        elongation: (297.850_204_2 + 445_267.111_516_8 * t - 0.001_63 * t2 + t3 / 545_868.0
            - t4 / 113_065_000.0)
            * DEG_TO_RAD,
        sun_anomaly: sun_mean_anomaly,
        moon_anomaly: (134.963_411_4 + 477_198.867_631_3 * t + 0.008_997 * t2 + t3 / 69_699.0
            - t4 / 14_712_000.0)
            * DEG_TO_RAD,
        latitude_argument: moon_argument_of_latitude(t),
        e: 1.0 - (0.002_495 + 7.52e-6 * tp1) * tp1,
    };

    let mean_longitude = 218.316_645_63 + 481_267.881_195_8 * t - 0.001_466_39 * t2
        + t3 / 540_135.03
        - t4 / 65_193_770.4;
    let (m1, m2) = nutation_arguments(t);
    let longitude_deg = mean_longitude + args.sum(&LONGITUDE_TERMS, f64::sin)
        - 0.004_778_5 * m1.sin()
        - 0.000_366_7 * m2.sin();

    let latitude_deg = args.sum(&LATITUDE_TERMS, f64::sin);

    let parallax_deg = PARALLAX_CONSTANT_DEG + args.sum(&PARALLAX_TERMS, f64::cos);
    let distance_earth_radii = 1.0 / (parallax_deg * DEG_TO_RAD).sin();

    let elongation = normalize_radians((longitude_deg - sun_apparent_longitude_deg) * DEG_TO_RAD);

    MoonElements {
        position: BodyPosition {
            longitude: longitude_deg * DEG_TO_RAD,
            latitude: latitude_deg * DEG_TO_RAD,
            distance_au: distance_earth_radii * EARTH_RADIUS_KM / AU_KM,
            angular_radius: (MOON_RADIUS_KM / (distance_earth_radii * EARTH_RADIUS_KM)).atan(),
        },
        elongation,
        age_days: elongation * SYNODIC_MONTH_DAYS / std::f64::consts::TAU,
    }
}

/// Evaluates the Sun and then the Moon at `t`.
pub fn sun_and_moon(t: f64) -> (SunElements, MoonElements) {
    let sun = sun_elements(t);
    let moon = moon_elements(t, sun.mean_anomaly, sun.apparent_longitude_deg);
    (sun, moon)
}
