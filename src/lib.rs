// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sun and Moon ephemeris
//!
//! Topocentric positions of the Sun and the Moon, with rise, set and transit
//! times for the ordinary horizon and for the twilight thresholds (civil,
//! nautical, astronomical, golden hour, blue hour), plus the Moon's age,
//! illumination and disk orientation.  Accuracy targets amateur use
//! (≈0.01°–0.1°, rise/set times within a minute or two).
//!
//! # Core types
//!
//! - [`Time<S>`] — generic instant parameterised by a [`TimeScale`] marker.
//! - [`JulianDay`] — type alias for `Time<UT>`, the axis of every event.
//! - [`CivilDateTime`] / [`LocalTimestamp`] — calendar fields in UT or in a fixed offset.
//! - [`GeoLocation`] — observer position.
//! - [`ObservationEpoch`] — a Julian Day with its derived centuries and sidereal time.
//! - [`EventTime`] — an instant, or the reason an event does not happen.
//! - [`EphemerisCalculator`] / [`EphemerisReport`] — the full pipeline and its output.
//!
//! # Time scales
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`UT`] | Universal Time (Earth rotation) |
//! | [`TT`] | Terrestrial Time |
//!
//! The difference **ΔT = TT − UT** is applied automatically by the [`UT`]
//! scale; the raw value is available via
//! [`Time::<UT>::delta_t()`](Time::delta_t).
//!
//! # Example
//!
//! ```
//! use lunisolar::{compute_ephemeris, CivilDateTime, GeoLocation, HorizonThreshold};
//!
//! # fn main() -> lunisolar::Result<()> {
//! let date = CivilDateTime::new(2024, 6, 21, 12, 0, 0)?; // UT
//! let berlin = GeoLocation::new(52.52, 13.405)?;
//! let report = compute_ephemeris(date, berlin, 2.0)?;
//!
//! println!("sunrise {}", report.sun.rise);
//! let astronomical = report.twilight(HorizonThreshold::AstronomicalTwilight).unwrap();
//! assert!(!astronomical.set.occurs()); // no astronomical night at midsummer
//! # Ok(())
//! # }
//! ```

mod angles;
pub mod calendar;
mod delta_t;
pub mod disk;
pub mod elements;
pub mod ephemeris;
pub mod epoch;
pub mod error;
pub(crate) mod instant;
mod julian_day_ext;
pub mod location;
pub mod refine;
pub(crate) mod scales;
pub mod topocentric;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{
    from_julian_day, to_julian_day, to_localized, CivilDateTime, LocalTimestamp,
};
pub use disk::{moon_disk_angles, MoonDiskAngles};
pub use elements::{moon_elements, sun_elements, BodyPosition, MoonElements, SunElements};
pub use ephemeris::{
    compute_ephemeris, BodyReport, EphemerisCalculator, EphemerisConfig, EphemerisReport,
    LocalizedEvent, TwilightReport,
};
pub use epoch::ObservationEpoch;
pub use error::{EphemerisError, Result};
pub use instant::{Time, TimeScale};
pub use location::GeoLocation;
pub use refine::{refine, Body, EventKind};
pub use scales::{TT, UT};
pub use topocentric::{topocentric, Atmosphere, EventTime, HorizonThreshold, TopocentricResult};

// ── Type aliases ──────────────────────────────────────────────────────────

/// Julian Day on the Universal Time axis.
///
/// Calendar conversion, sidereal time and every rise/set/transit instant use
/// this type.
pub type JulianDay = Time<UT>;

/// Julian Ephemeris Day — the uniform axis the orbital series run on.
pub type JulianEphemerisDay = Time<TT>;
