// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Orientation of the Moon's disk as seen by the observer.
//!
//! Optical libration and the position angle of the rotation axis follow
//! Meeus ch. 53 (physical libration is not modelled); the bright-limb angle
//! follows Meeus ch. 48 and the parallactic angle ch. 14.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::angles::{normalize_radians, DEG_TO_RAD, HALF_PI};
use crate::elements::{moon_argument_of_latitude, moon_ascending_node, sun_and_moon};
use crate::epoch::ObservationEpoch;
use crate::location::GeoLocation;
use crate::topocentric::{topocentric_equatorial, true_obliquity};

/// Inclination of the mean lunar equator to the ecliptic.
const LUNAR_EQUATOR_INCLINATION: f64 = 1.542_42 * DEG_TO_RAD;

/// Disk orientation angles, all in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoonDiskAngles {
    /// Optical libration in longitude, `(-π, π]`.
    pub libration_longitude: f64,
    /// Optical libration in latitude.
    pub libration_latitude: f64,
    /// Position angle of the rotation axis, from celestial north through east.
    pub axis_position_angle: f64,
    /// Position angle of the midpoint of the bright limb, `[0, 2π)`.
    pub bright_limb_angle: f64,
    /// Angle between the celestial north and the zenith at the Moon.
    pub parallactic_angle: f64,
}

/// Parallactic angle of a body at `hour_angle`.
///
/// When the denominator vanishes the angle is ±90° by the sign of the
/// numerator.
pub fn parallactic_angle(hour_angle: f64, declination: f64, latitude: f64) -> f64 {
    let y = hour_angle.sin();
    let x = latitude.tan() * declination.cos() - declination.sin() * hour_angle.cos();
    if x != 0.0 {
        y.atan2(x)
    } else {
        HALF_PI.copysign(y)
    }
}

/// Disk angles of the Moon for `location` at `epoch`.
pub fn moon_disk_angles(epoch: &ObservationEpoch, location: &GeoLocation) -> MoonDiskAngles {
    let t = epoch.centuries();
    let (sun, moon) = sun_and_moon(t);
    let lambda = moon.position.longitude;
    let beta = moon.position.latitude;

    let node = moon_ascending_node(t);
    let argument_of_latitude = moon_argument_of_latitude(t);
    let (sin_i, cos_i) = LUNAR_EQUATOR_INCLINATION.sin_cos();
    let (sin_b, cos_b) = beta.sin_cos();

    // Optical librations.
    let w = lambda - node;
    let a = (w.sin() * cos_b * cos_i - sin_b * sin_i).atan2(w.cos() * cos_b);
    let mut libration_longitude = normalize_radians(a - argument_of_latitude);
    if libration_longitude > PI {
        libration_longitude -= std::f64::consts::TAU;
    }
    let libration_latitude = (-w.sin() * cos_b * sin_i - sin_b * cos_i).asin();

    let moon_eq = topocentric_equatorial(&moon.position, epoch, location);
    let sun_eq = topocentric_equatorial(&sun.position, epoch, location);

    // Axis position angle.
    let obliquity = true_obliquity(t);
    let x = sin_i * node.sin();
    let y = sin_i * node.cos() * obliquity.cos() - cos_i * obliquity.sin();
    let omega = x.atan2(y);
    let axis_position_angle = (x.hypot(y) * (moon_eq.right_ascension - omega).cos()
        / libration_latitude.cos())
    .asin();

    // Bright limb.
    let (sin_ds, cos_ds) = sun_eq.declination.sin_cos();
    let (sin_dm, cos_dm) = moon_eq.declination.sin_cos();
    let delta_ra = moon_eq.right_ascension - sun_eq.right_ascension;
    let bright_limb_angle = normalize_radians(
        PI + (cos_ds * delta_ra.sin()).atan2(cos_ds * sin_dm * delta_ra.cos() - sin_ds * cos_dm),
    );

    let hour_angle = epoch.local_sidereal_time(location) - moon_eq.right_ascension;

    MoonDiskAngles {
        libration_longitude,
        libration_latitude,
        axis_position_angle,
        bright_limb_angle,
        parallactic_angle: parallactic_angle(hour_angle, moon_eq.declination, location.latitude()),
    }
}
