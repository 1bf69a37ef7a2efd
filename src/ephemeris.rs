// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Ephemeris reports
//!
//! [`EphemerisCalculator`] drives the whole pipeline for one observer:
//!
//! ```text
//! civil date (UT) ─► Julian Day ─► Sun/Moon elements ─► topocentric
//!     ─► raw rise/set/transit ─► refinement ─► localized timestamps
//! ```
//!
//! The ordinary horizon is evaluated for both bodies; every configured
//! twilight threshold then gets its own Sun pass, restarted from the same
//! raw estimate rather than from earlier refined times.  Any input error
//! aborts the whole report.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::debug;

use crate::calendar::{to_localized, CivilDateTime, LocalTimestamp};
use crate::disk::{moon_disk_angles, MoonDiskAngles};
use crate::elements::sun_and_moon;
use crate::epoch::ObservationEpoch;
use crate::error::Result;
use crate::location::GeoLocation;
use crate::refine::{refine, Body, EventKind, RefineContext, MOON_ITERATIONS, SUN_ITERATIONS};
use crate::topocentric::{topocentric, Atmosphere, EventTime, HorizonThreshold};
use crate::JulianDay;

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Tunables of an ephemeris run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EphemerisConfig {
    pub sun_iterations: u32,
    pub moon_iterations: u32,
    /// Extra Sun passes, reported in this order.
    pub thresholds: Vec<HorizonThreshold>,
    pub atmosphere: Atmosphere,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            sun_iterations: SUN_ITERATIONS,
            moon_iterations: MOON_ITERATIONS,
            thresholds: HorizonThreshold::TWILIGHTS.to_vec(),
            atmosphere: Atmosphere::default(),
        }
    }
}

impl EphemerisConfig {
    pub fn with_sun_iterations(mut self, iterations: u32) -> Self {
        self.sun_iterations = iterations;
        self
    }

    pub fn with_moon_iterations(mut self, iterations: u32) -> Self {
        self.moon_iterations = iterations;
        self
    }

    pub fn with_thresholds(mut self, thresholds: impl IntoIterator<Item = HorizonThreshold>) -> Self {
        self.thresholds = thresholds.into_iter().collect();
        self
    }

    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.atmosphere = atmosphere;
        self
    }

    fn iterations(&self, body: Body) -> u32 {
        match body {
            Body::Sun => self.sun_iterations,
            Body::Moon => self.moon_iterations,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Report types
// ═══════════════════════════════════════════════════════════════════════════

/// An event with its local timestamp, present only when the event occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalizedEvent {
    pub time: EventTime,
    pub local: Option<LocalTimestamp>,
}

impl LocalizedEvent {
    fn new(time: EventTime, utc_offset_hours: f64) -> Result<Self> {
        let local = match time.instant() {
            Some(jd) => Some(to_localized(jd, utc_offset_hours)?),
            None => None,
        };
        Ok(Self { time, local })
    }

    #[inline]
    pub fn occurs(&self) -> bool {
        self.local.is_some()
    }
}

impl fmt::Display for LocalizedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.local {
            Some(local) => write!(f, "{local}"),
            None => write!(f, "{}", self.time),
        }
    }
}

/// Position and ordinary-horizon events of one body.  Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyReport {
    pub azimuth: f64,
    pub elevation: f64,
    pub right_ascension: f64,
    pub declination: f64,
    pub distance_au: f64,
    pub rise: LocalizedEvent,
    pub set: LocalizedEvent,
    pub transit: LocalizedEvent,
    /// Elevation at the refined transit, if the transit converged.
    pub transit_elevation: Option<f64>,
}

/// Sun rise/set for one twilight threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TwilightReport {
    pub threshold: HorizonThreshold,
    pub rise: LocalizedEvent,
    pub set: LocalizedEvent,
}

/// Everything computed for one observer and one instant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EphemerisReport {
    /// Nominal instant (UT).
    pub julian_day: JulianDay,
    /// Nominal instant in the caller's zone.
    pub local_time: LocalTimestamp,
    pub sun: BodyReport,
    pub moon: BodyReport,
    pub twilights: Vec<TwilightReport>,
    /// Days since the last new moon.
    pub moon_age_days: f64,
    /// Illuminated fraction of the disk, `[0, 1]`.
    pub moon_illumination: f64,
    pub moon_disk: MoonDiskAngles,
}

impl EphemerisReport {
    /// The Sun pass for `threshold`, if it was configured.
    pub fn twilight(&self, threshold: HorizonThreshold) -> Option<&TwilightReport> {
        self.twilights.iter().find(|t| t.threshold == threshold)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Calculator
// ═══════════════════════════════════════════════════════════════════════════

/// Ephemeris context for one observer.
///
/// Holds no mutable state; one calculator can serve any number of dates,
/// from any number of threads.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisCalculator {
    location: GeoLocation,
    config: EphemerisConfig,
}

impl EphemerisCalculator {
    pub fn new(location: GeoLocation) -> Self {
        Self::with_config(location, EphemerisConfig::default())
    }

    pub fn with_config(location: GeoLocation, config: EphemerisConfig) -> Self {
        Self { location, config }
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    pub fn config(&self) -> &EphemerisConfig {
        &self.config
    }

    /// Report for a civil date and time read as UT, localized to
    /// `utc_offset_hours`.
    pub fn compute(&self, date: CivilDateTime, utc_offset_hours: f64) -> Result<EphemerisReport> {
        self.compute_at(date.julian_day(), utc_offset_hours)
    }

    /// Report for a Julian Day (UT), localized to `utc_offset_hours`.
    pub fn compute_at(&self, jd: JulianDay, utc_offset_hours: f64) -> Result<EphemerisReport> {
        let local_time = to_localized(jd, utc_offset_hours)?;
        let epoch = ObservationEpoch::new(jd);

        let sun = self.body_report(Body::Sun, &epoch, utc_offset_hours)?;
        let moon = self.body_report(Body::Moon, &epoch, utc_offset_hours)?;

        let twilights = self
            .config
            .thresholds
            .iter()
            .map(|&threshold| self.twilight_report(threshold, &epoch, utc_offset_hours))
            .collect::<Result<Vec<_>>>()?;

        let (_, moon_elements) = sun_and_moon(epoch.centuries());

        Ok(EphemerisReport {
            julian_day: jd,
            local_time,
            sun,
            moon,
            twilights,
            moon_age_days: moon_elements.age_days,
            moon_illumination: (1.0 - moon_elements.elongation.cos()) / 2.0,
            moon_disk: moon_disk_angles(&epoch, &self.location),
        })
    }

    fn context(&self, threshold: HorizonThreshold) -> RefineContext<'_> {
        RefineContext {
            location: &self.location,
            threshold,
            atmosphere: &self.config.atmosphere,
        }
    }

    fn body_report(
        &self,
        body: Body,
        epoch: &ObservationEpoch,
        utc_offset_hours: f64,
    ) -> Result<BodyReport> {
        let context = self.context(HorizonThreshold::Horizon);
        let raw = topocentric(
            &body.position(epoch),
            epoch,
            &self.location,
            HorizonThreshold::Horizon,
            &self.config.atmosphere,
        );
        let iterations = self.config.iterations(body);
        let rise = refine(raw.rise, EventKind::Rise, iterations, body, &context);
        let set = refine(raw.set, EventKind::Set, iterations, body, &context);
        let transit = refine(raw.transit, EventKind::Transit, iterations, body, &context);

        let transit_elevation = transit.instant().map(|jd| {
            let at_transit = ObservationEpoch::new(jd);
            topocentric(
                &body.position(&at_transit),
                &at_transit,
                &self.location,
                HorizonThreshold::Horizon,
                &self.config.atmosphere,
            )
            .transit_elevation
        });

        debug!("{body} (horizon): rise {rise}, set {set}, transit {transit}");

        Ok(BodyReport {
            azimuth: raw.azimuth,
            elevation: raw.elevation,
            right_ascension: raw.right_ascension,
            declination: raw.declination,
            distance_au: raw.distance_au,
            rise: LocalizedEvent::new(rise, utc_offset_hours)?,
            set: LocalizedEvent::new(set, utc_offset_hours)?,
            transit: LocalizedEvent::new(transit, utc_offset_hours)?,
            transit_elevation,
        })
    }

    fn twilight_report(
        &self,
        threshold: HorizonThreshold,
        epoch: &ObservationEpoch,
        utc_offset_hours: f64,
    ) -> Result<TwilightReport> {
        let context = self.context(threshold);
        let raw = topocentric(
            &Body::Sun.position(epoch),
            epoch,
            &self.location,
            threshold,
            &self.config.atmosphere,
        );
        let iterations = self.config.sun_iterations;
        let rise = refine(raw.rise, EventKind::Rise, iterations, Body::Sun, &context);
        let set = refine(raw.set, EventKind::Set, iterations, Body::Sun, &context);

        debug!("Sun ({threshold}): rise {rise}, set {set}");

        Ok(TwilightReport {
            threshold,
            rise: LocalizedEvent::new(rise, utc_offset_hours)?,
            set: LocalizedEvent::new(set, utc_offset_hours)?,
        })
    }
}

/// Report with the default configuration.
///
/// `date` is read as UT; `utc_offset_hours` only affects the localized
/// timestamps.
pub fn compute_ephemeris(
    date: CivilDateTime,
    location: GeoLocation,
    utc_offset_hours: f64,
) -> Result<EphemerisReport> {
    EphemerisCalculator::new(location).compute(date, utc_offset_hours)
}
