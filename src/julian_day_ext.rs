// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day specific extensions.

use qtty::*;

use super::instant::Time;
use super::scales::{TT, UT};

impl Time<TT> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 TT  (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0, the `t` of every series in this crate.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }
}

impl Time<UT> {
    /// J2000.0 expressed on the UT axis without ΔT (JD 2 451 545.0).
    ///
    /// Used as the origin of the sidereal-time polynomial, which is defined
    /// in UT.
    pub const J2000_UT: Self = Self::new(2_451_545.0);

    /// Start of the civil (0h UT) day containing this instant.
    #[inline]
    pub fn day_start(&self) -> Self {
        Self::new((self.value() - 0.5).floor() + 0.5)
    }

    /// Julian centuries since J2000.0 measured on the UT axis.
    #[inline]
    pub fn ut_centuries(&self) -> f64 {
        (*self - Self::J2000_UT).value() / Time::<TT>::JULIAN_CENTURY.value()
    }
}
