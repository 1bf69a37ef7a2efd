// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Topocentric transform and horizon crossings
//!
//! Takes an apparent ecliptic [`BodyPosition`] to the observer's horizon:
//!
//! 1. ecliptic → equatorial with the true obliquity,
//! 2. geocentric → topocentric by removing the observer's position vector,
//! 3. equatorial → horizontal with the local sidereal time,
//! 4. rise/set/transit estimates from the hour angle at which the body
//!    crosses the altitude selected by a [`HorizonThreshold`].
//!
//! Estimates are single-shot; [`refine`](crate::refine()) iterates them.

use std::f64::consts::{PI, TAU};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use qtty::Days;

use crate::angles::{normalize_radians, ARCMIN_TO_RAD, DEG_TO_RAD, HALF_PI};
use crate::elements::{nutation_arguments, BodyPosition, AU_KM, EARTH_RADIUS_KM};
use crate::epoch::ObservationEpoch;
use crate::location::GeoLocation;
use crate::JulianDay;

/// Ratio of the mean solar day to the sidereal day.
const SIDEREAL_RATE: f64 = 1.002_737_811_911_354_48;

/// Days of UT per radian of hour angle.
const DAYS_PER_RADIAN: f64 = 1.0 / (SIDEREAL_RATE * TAU);

/// Standard refraction at the horizon.
const HORIZON_REFRACTION: f64 = -34.0 * ARCMIN_TO_RAD;

/// Refraction is only applied above this geometric altitude.
const REFRACTION_FLOOR: f64 = -3.0 * DEG_TO_RAD;

const COS_LATITUDE_EPSILON: f64 = 1e-12;

// ═══════════════════════════════════════════════════════════════════════════
// Horizon thresholds
// ═══════════════════════════════════════════════════════════════════════════

/// Altitude whose crossing defines a rise or a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HorizonThreshold {
    /// Upper limb on the refracted horizon: −34′ minus the body's angular radius.
    Horizon,
    /// Centre of the Sun 6° below the horizon.
    CivilTwilight,
    /// Centre of the Sun 12° below the horizon.
    NauticalTwilight,
    /// Centre of the Sun 18° below the horizon.
    AstronomicalTwilight,
    /// Centre of the Sun 6° above the horizon.
    GoldenHour,
    /// Centre of the Sun 4° below the horizon.
    BlueHour,
}

impl HorizonThreshold {
    /// Every threshold except the ordinary horizon.
    pub const TWILIGHTS: [Self; 5] = [
        Self::CivilTwilight,
        Self::NauticalTwilight,
        Self::AstronomicalTwilight,
        Self::GoldenHour,
        Self::BlueHour,
    ];

    /// Fixed altitude in radians, or `None` for [`Horizon`](Self::Horizon)
    /// whose altitude depends on the body.
    pub fn fixed_altitude(self) -> Option<f64> {
        match self {
            Self::Horizon => None,
            Self::CivilTwilight => Some(-6.0 * DEG_TO_RAD),
            Self::NauticalTwilight => Some(-12.0 * DEG_TO_RAD),
            Self::AstronomicalTwilight => Some(-18.0 * DEG_TO_RAD),
            Self::GoldenHour => Some(6.0 * DEG_TO_RAD),
            Self::BlueHour => Some(-4.0 * DEG_TO_RAD),
        }
    }

    /// Crossing altitude in radians for a body of the given angular radius.
    pub fn altitude(self, angular_radius: f64) -> f64 {
        self.fixed_altitude()
            .unwrap_or(HORIZON_REFRACTION - angular_radius)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Horizon => "horizon",
            Self::CivilTwilight => "civil twilight",
            Self::NauticalTwilight => "nautical twilight",
            Self::AstronomicalTwilight => "astronomical twilight",
            Self::GoldenHour => "golden hour",
            Self::BlueHour => "blue hour",
        }
    }
}

impl fmt::Display for HorizonThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Event times
// ═══════════════════════════════════════════════════════════════════════════

/// A rise, set or transit instant, or the reason there is none.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventTime {
    /// The event happens at this Julian Day (UT).
    Occurs(JulianDay),
    /// The body stays below the threshold all day.
    NeverRises,
    /// The body stays above the threshold all day.
    NeverSets,
    /// Refinement did not settle within one second.
    NonConvergent,
}

impl EventTime {
    /// The instant, if the event happens.
    ///
    /// Every absence reason maps to `None`.
    #[inline]
    pub fn instant(&self) -> Option<JulianDay> {
        match *self {
            Self::Occurs(jd) => Some(jd),
            _ => None,
        }
    }

    #[inline]
    pub fn occurs(&self) -> bool {
        matches!(self, Self::Occurs(_))
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occurs(jd) => write!(f, "JD {:.6}", jd.value()),
            Self::NeverRises => f.write_str("no event (never rises)"),
            Self::NeverSets => f.write_str("no event (never sets)"),
            Self::NonConvergent => f.write_str("no event (not convergent)"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Atmosphere
// ═══════════════════════════════════════════════════════════════════════════

/// Conditions scaling the empirical refraction correction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Atmosphere {
    pub pressure_mbar: f64,
    pub temperature_celsius: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            pressure_mbar: 1_010.0,
            temperature_celsius: 10.0,
        }
    }
}

impl Atmosphere {
    #[inline]
    fn factor(&self) -> f64 {
        0.28 * self.pressure_mbar / (273.0 + self.temperature_celsius)
    }

    /// Apparent altitude for a geometric altitude, both in radians.
    ///
    /// Only altitudes above −3° are corrected; the result never exceeds 90°.
    pub fn refract(&self, altitude: f64) -> f64 {
        if altitude <= REFRACTION_FLOOR {
            return altitude;
        }
        let deg = altitude.to_degrees();
        let correction = 0.016_667
            * DEG_TO_RAD
            * ((90.0 - (deg + 7.31 / (deg + 4.4))) * DEG_TO_RAD).tan().abs();
        (altitude + correction * self.factor()).min(HALF_PI)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Transform
// ═══════════════════════════════════════════════════════════════════════════

/// Horizontal and equatorial position of a body plus its event estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TopocentricResult {
    /// Azimuth from north through east, radians `[0, 2π)`.
    pub azimuth: f64,
    /// Apparent elevation, radians.
    pub elevation: f64,
    pub rise: EventTime,
    pub set: EventTime,
    pub transit: EventTime,
    /// Apparent elevation at the meridian, radians.
    pub transit_elevation: f64,
    /// Topocentric right ascension, radians `[0, 2π)`.
    pub right_ascension: f64,
    /// Topocentric declination, radians.
    pub declination: f64,
    /// Topocentric distance, AU.
    pub distance_au: f64,
    /// Hour angle of the threshold crossing, radians `[0, π]`, if it occurs.
    pub crossing_hour_angle: Option<f64>,
}

/// Obliquity of the ecliptic (Laskar mean obliquity plus nutation), radians.
pub fn true_obliquity(t: f64) -> f64 {
    let (m1, m2) = nutation_arguments(t);
    let nutation = 0.002_558 * m1.cos() - 0.000_153_39 * m2.cos();

    let u = t / 100.0;
    let mut arcsec = u * (27.87 + u * (5.79 + u * 2.45));
    arcsec = u * (-249.67 + u * (-39.05 + u * (7.12 + arcsec)));
    arcsec = u * (-1.55 + u * (1_999.25 + u * (-51.38 + arcsec)));
    arcsec = u * (-4_680.93 + arcsec);

    (23.439_291_111_111_1 + arcsec / 3_600.0 + nutation) * DEG_TO_RAD
}

/// Hour angle at which a body of declination `dec` crosses `altitude`.
///
/// Returns the cosine of the hour angle; outside `[-1, 1]` the crossing does
/// not happen.
#[inline]
fn crossing_cosine(altitude: f64, latitude: f64, declination: f64) -> f64 {
    let cos_lat = latitude.cos().max(COS_LATITUDE_EPSILON);
    (altitude.sin() - latitude.sin() * declination.sin()) / (cos_lat * declination.cos())
}

/// Picks between two candidate offsets (days from `jd`) one sidereal day
/// apart: `alternative` wins when it lands on the same civil day as `jd`
/// and is nearer to it.
#[inline]
fn nearest_candidate(jd: JulianDay, default: f64, alternative: f64) -> f64 {
    let today = jd.day_start();
    if (jd + Days::new(alternative)).day_start() == today && alternative.abs() < default.abs() {
        alternative
    } else {
        default
    }
}

/// Topocentric equatorial coordinates of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    /// Right ascension, radians `[0, 2π)`.
    pub right_ascension: f64,
    /// Declination, radians.
    pub declination: f64,
    /// Distance from the observer, AU.
    pub distance_au: f64,
}

/// Rotates `position` onto the equator and shifts it to the observer.
pub fn topocentric_equatorial(
    position: &BodyPosition,
    epoch: &ObservationEpoch,
    location: &GeoLocation,
) -> Equatorial {
    let obliquity = true_obliquity(epoch.centuries());
    let (sin_eps, cos_eps) = obliquity.sin_cos();

    // Ecliptic rectangular, then rotate about x into the equator.
    let cos_b = position.latitude.cos();
    let x = position.distance_au * position.longitude.cos() * cos_b;
    let y0 = position.distance_au * position.longitude.sin() * cos_b;
    let z0 = position.distance_au * position.latitude.sin();
    let y = y0 * cos_eps - z0 * sin_eps;
    let z = y0 * sin_eps + z0 * cos_eps;

    // Observer's geocentric position.
    let lat = location.latitude();
    let geocentric_lat = lat - 0.1925 * DEG_TO_RAD * (2.0 * lat).sin();
    let geocentric_radius = 0.998_33 + 0.001_67 * (2.0 * lat).cos();
    let observer_au = geocentric_radius * EARTH_RADIUS_KM / AU_KM;
    let lst = epoch.local_sidereal_time(location);
    let cos_gl = geocentric_lat.cos();

    let xt = x - observer_au * cos_gl * lst.cos();
    let yt = y - observer_au * cos_gl * lst.sin();
    let zt = z - observer_au * geocentric_lat.sin();

    let rho = xt.hypot(yt);
    Equatorial {
        right_ascension: normalize_radians(yt.atan2(xt)),
        declination: (zt / rho).atan(),
        distance_au: (rho * rho + zt * zt).sqrt(),
    }
}

/// Topocentric coordinates and event estimates of `position` at `epoch`.
pub fn topocentric(
    position: &BodyPosition,
    epoch: &ObservationEpoch,
    location: &GeoLocation,
    threshold: HorizonThreshold,
    atmosphere: &Atmosphere,
) -> TopocentricResult {
    let Equatorial {
        right_ascension: ra,
        declination: dec,
        distance_au,
    } = topocentric_equatorial(position, epoch, location);
    let lat = location.latitude();
    let lst = epoch.local_sidereal_time(location);

    // Horizontal coordinates.
    let hour_angle = lst - ra;
    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let altitude = (sin_lat * sin_dec + cos_lat * cos_dec * hour_angle.cos()).asin();
    let azimuth = normalize_radians(
        PI + hour_angle
            .sin()
            .atan2(hour_angle.cos() * sin_lat - sin_dec * cos_lat / cos_dec),
    );
    let elevation = atmosphere.refract(altitude);

    // Events.
    let jd = epoch.julian_day();
    let to_transit = normalize_radians(ra - lst);
    let transit_offset = nearest_candidate(
        jd,
        DAYS_PER_RADIAN * to_transit,
        DAYS_PER_RADIAN * (to_transit - TAU),
    );
    let transit = EventTime::Occurs(jd + Days::new(transit_offset));
    let transit_elevation = atmosphere.refract((sin_dec * sin_lat + cos_dec * cos_lat).asin());

    let crossing = crossing_cosine(threshold.altitude(position.angular_radius), lat, dec);
    let (rise, set, crossing_hour_angle) = if crossing > 1.0 {
        (EventTime::NeverRises, EventTime::NeverRises, None)
    } else if crossing < -1.0 {
        (EventTime::NeverSets, EventTime::NeverSets, None)
    } else {
        let h0 = crossing.acos();
        let to_rise = normalize_radians(ra - h0 - lst);
        let to_set = normalize_radians(ra + h0 - lst);
        let rise_offset = nearest_candidate(
            jd,
            DAYS_PER_RADIAN * to_rise,
            DAYS_PER_RADIAN * (to_rise - TAU),
        );
        let set_offset = nearest_candidate(
            jd,
            DAYS_PER_RADIAN * (to_set - TAU),
            DAYS_PER_RADIAN * to_set,
        );
        (
            EventTime::Occurs(jd + Days::new(rise_offset)),
            EventTime::Occurs(jd + Days::new(set_offset)),
            Some(h0),
        )
    };

    TopocentricResult {
        azimuth,
        elevation,
        rise,
        set,
        transit,
        transit_elevation,
        right_ascension: ra,
        declination: dec,
        distance_au,
        crossing_hour_angle,
    }
}
