// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil calendar ↔ Julian Day conversion.
//!
//! Dates before 1582-10-15 are read in the (proleptic) Julian calendar,
//! later ones in the Gregorian calendar.  The ten days 1582-10-05 through
//! 1582-10-14 never existed and are rejected.  The algorithms are those of
//! Meeus, *Astronomical Algorithms*, chapter 7, with `INT` taken as `floor`
//! so that negative years convert correctly.
//!
//! ```rust
//! use lunisolar::calendar::{from_julian_day, to_julian_day};
//!
//! let jd = to_julian_day(2000, 1, 1, 12, 0, 0).unwrap();
//! assert_eq!(jd.value(), 2_451_545.0);
//!
//! let civil = from_julian_day(jd).unwrap();
//! assert_eq!((civil.year, civil.month, civil.day, civil.hour), (2000, 1, 1, 12));
//! ```

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use qtty::Days;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EphemerisError, Result};
use crate::JulianDay;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// First Julian Day number (`floor(JD + 0.5)`) of the Gregorian calendar.
const GREGORIAN_START_Z: f64 = 2_299_161.0;

/// Earliest year accepted as input.
pub const MIN_YEAR: i32 = -4712;

/// Earliest year an output timestamp can fall in.  Events and local times
/// of a date in [`MIN_YEAR`] may land on the last day of the year before.
pub const MIN_OUTPUT_YEAR: i32 = MIN_YEAR - 1;

/// Largest accepted UTC offset, in hours.
pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// Broken-down civil date and time (UT unless stated otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CivilFields"))]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CivilDateTime {
    /// Validated constructor.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Result<Self> {
        Self::checked(year, month, day, hour, minute, second, MIN_YEAR)
    }

    fn checked(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        earliest_year: i32,
    ) -> Result<Self> {
        let invalid = |reason| EphemerisError::InvalidDate {
            year,
            month,
            day,
            reason,
        };
        if year < earliest_year {
            return Err(invalid(if earliest_year == MIN_YEAR {
                "year before -4712"
            } else {
                "year before -4713"
            }));
        }
        if !(1..=12).contains(&month) {
            return Err(invalid("month out of range"));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(invalid("day out of range for month"));
        }
        if year == 1582 && month == 10 && (5..=14).contains(&day) {
            return Err(invalid("day skipped by the Gregorian calendar reform"));
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(EphemerisError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Midnight at the start of the given date.
    pub fn date(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// `true` when the date falls in the Julian calendar (before 1582-10-15).
    pub fn is_julian(&self) -> bool {
        (self.year, self.month, self.day) < (1582, 10, 15)
    }

    fn seconds_of_day(&self) -> u32 {
        self.hour * 3_600 + self.minute * 60 + self.second
    }

    /// Julian Day (UT) of this civil instant.
    pub fn julian_day(&self) -> JulianDay {
        let (mut y, mut m) = (self.year as f64, self.month as f64);
        if m < 3.0 {
            y -= 1.0;
            m += 12.0;
        }
        let b = if self.is_julian() {
            0.0
        } else {
            let a = (y / 100.0).floor();
            2.0 - a + (a / 4.0).floor()
        };
        let day_number =
            (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + self.day as f64 + b
                - 1524.5;
        JulianDay::new(day_number + self.seconds_of_day() as f64 / SECONDS_PER_DAY)
    }

    /// Civil date of a UTC timestamp, read in the calendar in force at the time.
    pub fn from_utc(datetime: DateTime<Utc>) -> Result<Self> {
        from_julian_day(JulianDay::from_utc(datetime))
    }

    /// The same instant as a `chrono::DateTime<Utc>`, if chrono can hold it.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.julian_day().to_utc()
    }
}

/// Unvalidated wire form; deserialization goes through the calendar checks.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct CivilFields {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<CivilFields> for CivilDateTime {
    type Error = EphemerisError;

    // Serialized reports may carry local timestamps in MIN_OUTPUT_YEAR.
    fn try_from(f: CivilFields) -> Result<Self> {
        Self::checked(f.year, f.month, f.day, f.hour, f.minute, f.second, MIN_OUTPUT_YEAR)
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Number of days in `month` of `year`, honouring the calendar in force.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Leap-year rule: Julian before 1582, Gregorian afterwards.
pub fn is_leap_year(year: i32) -> bool {
    if year <= 1582 {
        year.rem_euclid(4) == 0
    } else {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }
}

/// Civil calendar fields → Julian Day (UT).
///
/// Fails with [`EphemerisError::InvalidDate`] for dates that do not exist,
/// including the 1582 reform gap.
pub fn to_julian_day(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<JulianDay> {
    Ok(CivilDateTime::new(year, month, day, hour, minute, second)?.julian_day())
}

/// Julian Day (UT) → civil calendar fields, rounded to the nearest second.
///
/// Accepts instants from [`MIN_OUTPUT_YEAR`]-01-01 onwards, so that events
/// near the first accepted input date can still be expressed.  Fails with
/// [`EphemerisError::InvalidJulianDay`] for non-finite values and for years
/// outside that floor or beyond `i32`.
pub fn from_julian_day(jd: JulianDay) -> Result<CivilDateTime> {
    let invalid = || EphemerisError::InvalidJulianDay(jd.value());
    let shifted = jd.value() + 0.5;
    if !shifted.is_finite() {
        return Err(invalid());
    }

    let mut z = shifted.floor();
    let mut seconds = ((shifted - z) * SECONDS_PER_DAY).round();
    if seconds >= SECONDS_PER_DAY {
        z += 1.0;
        seconds -= SECONDS_PER_DAY;
    }

    let a = if z < GREGORIAN_START_Z {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as u32;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 } as u32;
    let year = if month > 2 { c - 4716.0 } else { c - 4715.0 };
    if year < f64::from(MIN_OUTPUT_YEAR) || year > f64::from(i32::MAX) {
        return Err(invalid());
    }

    let seconds = seconds as u32;
    CivilDateTime::checked(
        year as i32,
        month,
        day,
        seconds / 3_600,
        (seconds % 3_600) / 60,
        seconds % 60,
        MIN_OUTPUT_YEAR,
    )
}

/// A civil timestamp in a fixed UTC offset, for display.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalTimestamp {
    pub civil: CivilDateTime,
    pub utc_offset_hours: f64,
}

impl LocalTimestamp {
    /// The same instant as a `chrono::DateTime<FixedOffset>`.
    ///
    /// `None` for Julian-calendar dates, which chrono's proleptic Gregorian
    /// calendar would mislabel, and for instants chrono cannot hold.
    pub fn to_chrono(&self) -> Option<DateTime<FixedOffset>> {
        if self.civil.is_julian() {
            return None;
        }
        let offset = FixedOffset::east_opt((self.utc_offset_hours * 3_600.0).round() as i32)?;
        let utc = self.to_julian_day().to_utc()?;
        Some(offset.from_utc_datetime(&utc.naive_utc()))
    }

    /// Julian Day (UT) this timestamp denotes.
    pub fn to_julian_day(&self) -> JulianDay {
        self.civil.julian_day() - Days::new(self.utc_offset_hours / 24.0)
    }
}

impl fmt::Display for LocalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_minutes = (self.utc_offset_hours * 60.0).round() as i64;
        let sign = if total_minutes < 0 { '-' } else { '+' };
        let total_minutes = total_minutes.abs();
        write!(
            f,
            "{} UTC{}{:02}:{:02}",
            self.civil,
            sign,
            total_minutes / 60,
            total_minutes % 60
        )
    }
}

/// Expresses a Julian Day (UT) as local civil time at `utc_offset_hours`.
///
/// The offset is applied to the instant before it is broken down, so an hour
/// that wraps past midnight carries into the date.  Display only; results are
/// never fed back into a computation.
pub fn to_localized(jd: JulianDay, utc_offset_hours: f64) -> Result<LocalTimestamp> {
    if !utc_offset_hours.is_finite() || utc_offset_hours.abs() > MAX_UTC_OFFSET_HOURS {
        return Err(EphemerisError::InvalidUtcOffset(utc_offset_hours));
    }
    let civil = from_julian_day(jd + Days::new(utc_offset_hours / 24.0))?;
    Ok(LocalTimestamp {
        civil,
        utc_offset_hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn jd(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> f64 {
        to_julian_day(y, m, d, h, mi, s).unwrap().value()
    }

    #[test]
    fn meeus_reference_dates() {
        assert_eq!(jd(2000, 1, 1, 12, 0, 0), 2_451_545.0);
        assert_eq!(jd(1987, 1, 27, 0, 0, 0), 2_446_822.5);
        assert_eq!(jd(1988, 6, 19, 12, 0, 0), 2_447_332.0);
        assert_eq!(jd(1600, 1, 1, 0, 0, 0), 2_305_447.5);
        assert_eq!(jd(837, 4, 10, 7, 12, 0), 2_026_871.8);
        assert_eq!(jd(333, 1, 27, 12, 0, 0), 1_842_713.0);
        assert_eq!(jd(-1000, 7, 12, 12, 0, 0), 1_356_001.0);
        assert_eq!(jd(-4712, 1, 1, 12, 0, 0), 0.0);
    }

    #[test]
    fn reform_boundary_is_contiguous() {
        let last_julian = jd(1582, 10, 4, 0, 0, 0);
        let first_gregorian = jd(1582, 10, 15, 0, 0, 0);
        assert_eq!(last_julian, 2_299_159.5);
        assert_eq!(first_gregorian - last_julian, 1.0);
    }

    #[test]
    fn reform_gap_is_rejected() {
        for day in 5..=14 {
            let err = to_julian_day(1582, 10, day, 12, 0, 0).unwrap_err();
            assert!(matches!(err, EphemerisError::InvalidDate { day: d, .. } if d == day));
        }
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert!(to_julian_day(2023, 2, 29, 0, 0, 0).is_err());
        assert!(to_julian_day(2024, 2, 30, 0, 0, 0).is_err());
        assert!(to_julian_day(2024, 13, 1, 0, 0, 0).is_err());
        assert!(to_julian_day(2024, 0, 1, 0, 0, 0).is_err());
        assert!(to_julian_day(2024, 4, 31, 0, 0, 0).is_err());
        assert!(to_julian_day(-4713, 12, 31, 0, 0, 0).is_err());
        assert!(matches!(
            to_julian_day(2024, 1, 1, 24, 0, 0),
            Err(EphemerisError::InvalidTime { hour: 24, .. })
        ));
    }

    #[test]
    fn leap_years_follow_the_calendar_in_force() {
        assert!(is_leap_year(1500)); // Julian
        assert!(!is_leap_year(1700)); // Gregorian century
        assert!(is_leap_year(2000));
        assert!(is_leap_year(-4));
        assert!(to_julian_day(1500, 2, 29, 0, 0, 0).is_ok());
        assert!(to_julian_day(1900, 2, 29, 0, 0, 0).is_err());
    }

    #[test]
    fn inverse_of_meeus_examples() {
        let civil = from_julian_day(JulianDay::new(2_436_116.31)).unwrap();
        assert_eq!(
            (civil.year, civil.month, civil.day, civil.hour, civil.minute, civil.second),
            (1957, 10, 4, 19, 26, 24)
        );
        let civil = from_julian_day(JulianDay::new(1_842_713.0)).unwrap();
        assert_eq!((civil.year, civil.month, civil.day, civil.hour), (333, 1, 27, 12));
        let civil = from_julian_day(JulianDay::new(1_507_900.13)).unwrap();
        assert_eq!((civil.year, civil.month, civil.day), (-584, 5, 28));
    }

    #[test]
    fn rounding_carries_into_the_next_day() {
        let civil = from_julian_day(JulianDay::new(2_451_545.5 - 1e-7)).unwrap();
        assert_eq!((civil.year, civil.month, civil.day), (2000, 1, 2));
        assert_eq!((civil.hour, civil.minute, civil.second), (0, 0, 0));
    }

    #[test]
    fn non_finite_julian_day_is_rejected() {
        assert!(matches!(
            from_julian_day(JulianDay::new(f64::NAN)),
            Err(EphemerisError::InvalidJulianDay(_))
        ));
        assert!(matches!(
            from_julian_day(JulianDay::new(-400.0)),
            Err(EphemerisError::InvalidJulianDay(_))
        ));
    }

    #[test]
    fn oversized_julian_day_is_rejected() {
        for value in [5e12, 1e15, f64::MAX] {
            assert!(matches!(
                from_julian_day(JulianDay::new(value)),
                Err(EphemerisError::InvalidJulianDay(_))
            ));
        }
        assert!(matches!(
            to_localized(JulianDay::new(5e12), 0.0),
            Err(EphemerisError::InvalidJulianDay(_))
        ));
    }

    #[test]
    fn output_reaches_the_year_before_the_first_input_year() {
        let civil = from_julian_day(JulianDay::new(-0.5)).unwrap();
        assert_eq!(civil, CivilDateTime::new(-4712, 1, 1, 0, 0, 0).unwrap());

        let civil = from_julian_day(JulianDay::new(-0.75)).unwrap();
        assert_eq!((civil.year, civil.month, civil.day), (-4713, 12, 31));
        assert_eq!((civil.hour, civil.minute, civil.second), (18, 0, 0));

        let civil = from_julian_day(JulianDay::new(-365.5)).unwrap();
        assert_eq!((civil.year, civil.month, civil.day, civil.hour), (-4713, 1, 1, 0));
        assert_eq!(civil.julian_day().value(), -365.5);

        let local = to_localized(JulianDay::new(-0.5), -5.0).unwrap();
        assert_eq!((local.civil.year, local.civil.day, local.civil.hour), (-4713, 31, 19));
    }

    #[test]
    fn localized_timestamp_wraps_into_next_day() {
        let jd = to_julian_day(2024, 6, 21, 23, 30, 0).unwrap();
        let local = to_localized(jd, 2.0).unwrap();
        assert_eq!(local.civil, CivilDateTime::new(2024, 6, 22, 1, 30, 0).unwrap());
        assert_eq!(local.to_string(), "2024-06-22 01:30:00 UTC+02:00");
        assert!((local.to_julian_day() - jd).abs() < Days::new(1e-8));
    }

    #[test]
    fn localized_timestamp_negative_fractional_offset() {
        let jd = to_julian_day(2024, 1, 1, 2, 0, 0).unwrap();
        let local = to_localized(jd, -3.5).unwrap();
        assert_eq!(local.civil, CivilDateTime::new(2023, 12, 31, 22, 30, 0).unwrap());
        assert_eq!(local.to_string(), "2023-12-31 22:30:00 UTC-03:30");
    }

    #[test]
    fn localized_rejects_absurd_offsets() {
        let jd = JulianDay::new(2_451_545.0);
        assert!(matches!(
            to_localized(jd, 15.0),
            Err(EphemerisError::InvalidUtcOffset(_))
        ));
        assert!(to_localized(jd, f64::INFINITY).is_err());
    }

    #[test]
    fn chrono_interop() {
        let jd = to_julian_day(2024, 3, 20, 3, 6, 0).unwrap();
        let local = to_localized(jd, 1.0).unwrap();
        let dt = local.to_chrono().unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 20));
        assert_eq!((dt.hour(), dt.minute()), (4, 6));
        assert_eq!(dt.offset().local_minus_utc(), 3_600);

        let civil = CivilDateTime::from_utc(dt.with_timezone(&Utc)).unwrap();
        assert_eq!(civil, CivilDateTime::new(2024, 3, 20, 3, 6, 0).unwrap());
        assert_eq!(civil.to_utc().unwrap(), dt.with_timezone(&Utc));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_validates_fields() {
        let date = CivilDateTime::new(2024, 6, 21, 12, 0, 0).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(serde_json::from_str::<CivilDateTime>(&json).unwrap(), date);

        let gap = r#"{"year":1582,"month":10,"day":10,"hour":0,"minute":0,"second":0}"#;
        assert!(serde_json::from_str::<CivilDateTime>(gap).is_err());
        let feb = r#"{"year":2023,"month":2,"day":29,"hour":0,"minute":0,"second":0}"#;
        assert!(serde_json::from_str::<CivilDateTime>(feb).is_err());
        let late = r#"{"year":2024,"month":1,"day":1,"hour":25,"minute":0,"second":0}"#;
        assert!(serde_json::from_str::<CivilDateTime>(late).is_err());
    }

    #[test]
    fn julian_dates_have_no_chrono_form() {
        let jd = to_julian_day(1400, 1, 1, 0, 0, 0).unwrap();
        assert!(to_localized(jd, 0.0).unwrap().to_chrono().is_none());
    }
}
