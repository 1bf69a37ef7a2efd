// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! | Marker | Description |
//! |--------|-------------|
//! | [`UT`] | Universal Time, the civil scale tied to Earth's rotation |
//! | [`TT`] | Terrestrial Time, the uniform scale of the orbital series |
//!
//! Both store an absolute Julian Day; they differ by **ΔT = TT − UT**.

use super::instant::{Time, TimeScale};
use qtty::Days;

/// Terrestrial Time — the basis for the Sun and Moon series.
///
/// The stored quantity *is* JD(TT).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TT;

impl TimeScale for TT {
    const LABEL: &'static str = "TT";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

/// Universal Time — the civil time scale tied to Earth's rotation.
///
/// Rise, set and transit instants, calendar conversion and sidereal time
/// all live on this axis.  The conversion to JD(TT) adds the epoch-dependent
/// **ΔT**; the inverse is solved by fixed-point iteration.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const LABEL: &'static str = "UT";

    #[inline]
    fn to_jd_tt(ut_value: Days) -> Days {
        let dt_secs = super::delta_t::delta_t_seconds_from_ut(ut_value);
        ut_value + dt_secs.to::<qtty::Day>()
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        // Solve ut + ΔT(ut)/86400 = tt; dΔT/dJD is tiny so three passes suffice.
        let mut ut = jd_tt;
        for _ in 0..3 {
            let dt_days = super::delta_t::delta_t_seconds_from_ut(ut).to::<qtty::Day>();
            ut = jd_tt - dt_days;
        }
        ut
    }
}

impl From<Time<UT>> for Time<TT> {
    #[inline]
    fn from(t: Time<UT>) -> Self {
        t.to::<TT>()
    }
}

impl From<Time<TT>> for Time<UT> {
    #[inline]
    fn from(t: Time<TT>) -> Self {
        t.to::<UT>()
    }
}
