// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer location.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EphemerisError, Result};

/// Geographic position of the observer.
///
/// Built from degrees (latitude north positive, longitude **east**
/// positive) and stored in radians.  Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RadianFields"))]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

/// Wire form, in radians like the stored fields.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RadianFields {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RadianFields> for GeoLocation {
    type Error = EphemerisError;

    fn try_from(f: RadianFields) -> Result<Self> {
        Self::from_radians(f.latitude, f.longitude)
    }
}

impl GeoLocation {
    /// Validated constructor from geographic degrees.
    ///
    /// Latitude must lie in `[-90, 90]`, longitude in `[-180, 360]`.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self> {
        let valid = latitude_deg.is_finite()
            && longitude_deg.is_finite()
            && (-90.0..=90.0).contains(&latitude_deg)
            && (-180.0..=360.0).contains(&longitude_deg);
        if !valid {
            return Err(EphemerisError::InvalidLocation {
                latitude: latitude_deg,
                longitude: longitude_deg,
            });
        }
        Ok(Self {
            latitude: latitude_deg.to_radians(),
            longitude: longitude_deg.to_radians(),
        })
    }

    /// Validated constructor from radians, with the same ranges as [`new`](Self::new).
    pub fn from_radians(latitude: f64, longitude: f64) -> Result<Self> {
        use std::f64::consts::{FRAC_PI_2, PI, TAU};

        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-FRAC_PI_2..=FRAC_PI_2).contains(&latitude)
            && (-PI..=TAU).contains(&longitude);
        if !valid {
            return Err(EphemerisError::InvalidLocation {
                latitude: latitude.to_degrees(),
                longitude: longitude.to_degrees(),
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in radians.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// East longitude in radians.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub fn latitude_degrees(&self) -> f64 {
        self.latitude.to_degrees()
    }

    #[inline]
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude.to_degrees()
    }
}
