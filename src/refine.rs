// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed-point refinement of rise, set and transit estimates.
//!
//! A raw estimate is computed from the body's position at the nominal
//! instant.  Re-evaluating the position at the estimate and solving again
//! moves the estimate onto the actual crossing.  The iteration count is
//! fixed; afterwards the last step must be below one second or the event is
//! reported as [`EventTime::NonConvergent`].

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::{debug, trace};

use crate::elements::{sun_and_moon, sun_elements, BodyPosition};
use crate::epoch::ObservationEpoch;
use crate::location::GeoLocation;
use crate::topocentric::{topocentric, Atmosphere, EventTime, HorizonThreshold, TopocentricResult};

/// Largest final step, in days, accepted as converged.
pub const CONVERGENCE_TOLERANCE_DAYS: f64 = 1.0 / 86_400.0;

/// Default iteration count for the Sun.
pub const SUN_ITERATIONS: u32 = 3;

/// Default iteration count for the Moon, whose faster motion needs more.
pub const MOON_ITERATIONS: u32 = 5;

/// Body whose events are refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Body {
    Sun,
    Moon,
}

impl Body {
    /// Apparent ecliptic position at `epoch`.
    pub fn position(self, epoch: &ObservationEpoch) -> BodyPosition {
        let t = epoch.centuries();
        match self {
            Self::Sun => sun_elements(t).position,
            Self::Moon => sun_and_moon(t).1.position,
        }
    }

    /// Iteration count used unless configured otherwise.
    pub const fn default_iterations(self) -> u32 {
        match self {
            Self::Sun => SUN_ITERATIONS,
            Self::Moon => MOON_ITERATIONS,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
        })
    }
}

/// Which event of a [`TopocentricResult`] is being refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Rise,
    Set,
    Transit,
}

impl EventKind {
    #[inline]
    pub fn select(self, result: &TopocentricResult) -> EventTime {
        match self {
            Self::Rise => result.rise,
            Self::Set => result.set,
            Self::Transit => result.transit,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rise => "rise",
            Self::Set => "set",
            Self::Transit => "transit",
        })
    }
}

/// Observer-side inputs shared by every refinement of one report.
#[derive(Debug, Clone, Copy)]
pub struct RefineContext<'a> {
    pub location: &'a GeoLocation,
    pub threshold: HorizonThreshold,
    pub atmosphere: &'a Atmosphere,
}

/// Refines `estimate` by re-solving at each new estimate `iterations` times.
///
/// An absent estimate is returned unchanged, as is an absence reported by
/// any intermediate solve.
pub fn refine(
    estimate: EventTime,
    kind: EventKind,
    iterations: u32,
    body: Body,
    context: &RefineContext<'_>,
) -> EventTime {
    let mut current = match estimate {
        EventTime::Occurs(jd) => jd,
        absent => return absent,
    };
    let mut epoch = ObservationEpoch::new(current);
    let mut step = 0.0_f64;

    for iteration in 0..iterations {
        epoch.set(current);
        let result = topocentric(
            &body.position(&epoch),
            &epoch,
            context.location,
            context.threshold,
            context.atmosphere,
        );
        let next = match kind.select(&result) {
            EventTime::Occurs(jd) => jd,
            absent => {
                debug!("{body} {kind} ({}): {absent} at iteration {iteration}", context.threshold);
                return absent;
            }
        };
        step = (next - current).value().abs();
        trace!(
            "{body} {kind} ({}): iteration {iteration}, JD {:.8}, step {:.3} s",
            context.threshold,
            next.value(),
            step * 86_400.0
        );
        current = next;
    }

    if step > CONVERGENCE_TOLERANCE_DAYS {
        debug!(
            "{body} {kind} ({}): abandoned after {iterations} iterations, last step {:.1} s",
            context.threshold,
            step * 86_400.0
        );
        return EventTime::NonConvergent;
    }
    EventTime::Occurs(current)
}
