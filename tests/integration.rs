use approx::assert_abs_diff_eq;
use chrono::{DateTime, Utc};
use proptest::prelude::*;

use lunisolar::{
    compute_ephemeris, from_julian_day, to_julian_day, topocentric, sun_elements, Atmosphere,
    CivilDateTime, EphemerisCalculator, EphemerisConfig, EphemerisError, EphemerisReport,
    EventTime, GeoLocation, HorizonThreshold, JulianDay, LocalizedEvent, ObservationEpoch,
};

fn report(
    (y, mo, d, h): (i32, u32, u32, u32),
    latitude: f64,
    longitude: f64,
    utc_offset_hours: f64,
) -> EphemerisReport {
    let date = CivilDateTime::new(y, mo, d, h, 0, 0).unwrap();
    let location = GeoLocation::new(latitude, longitude).unwrap();
    compute_ephemeris(date, location, utc_offset_hours).unwrap()
}

/// Local wall-clock time of an event, in minutes after midnight.
fn local_minutes(event: &LocalizedEvent) -> f64 {
    let civil = event.local.expect("event should occur").civil;
    civil.hour as f64 * 60.0 + civil.minute as f64 + civil.second as f64 / 60.0
}

fn hm(h: u32, m: u32) -> f64 {
    (h * 60 + m) as f64
}

// ── Known values ──────────────────────────────────────────────────────────

#[test]
fn berlin_june_solstice_matches_almanac() {
    // Published: sunrise 04:43, sunset 21:33 CEST.
    let report = report((2024, 6, 21, 12), 52.52, 13.405, 2.0);
    assert_abs_diff_eq!(local_minutes(&report.sun.rise), hm(4, 43), epsilon = 2.0);
    assert_abs_diff_eq!(local_minutes(&report.sun.set), hm(21, 33), epsilon = 2.0);
    assert_abs_diff_eq!(local_minutes(&report.sun.transit), hm(13, 8), epsilon = 2.0);
    assert_eq!(report.sun.rise.local.unwrap().civil.day, 21);
    assert_eq!(
        report.sun.rise.local.unwrap().to_string(),
        "2024-06-21 04:43:14 UTC+02:00"
    );
}

#[test]
fn madrid_march_equinox() {
    let report = report((2024, 3, 20, 12), 40.4168, -3.7038, 1.0);
    assert_abs_diff_eq!(local_minutes(&report.sun.rise), hm(7, 17) + 0.65, epsilon = 0.1);
    assert_abs_diff_eq!(local_minutes(&report.sun.set), hm(19, 27) + 0.28, epsilon = 0.1);
    assert_abs_diff_eq!(local_minutes(&report.sun.transit), hm(13, 22) + 0.12, epsilon = 0.1);
    let astronomical = report
        .twilight(HorizonThreshold::AstronomicalTwilight)
        .unwrap();
    assert_abs_diff_eq!(local_minutes(&astronomical.rise), hm(5, 46) + 0.33, epsilon = 0.1);
    assert_abs_diff_eq!(local_minutes(&astronomical.set), hm(20, 58) + 0.85, epsilon = 0.1);
    // Near the equinox day and night are about equally long.
    let day_length = local_minutes(&report.sun.set) - local_minutes(&report.sun.rise);
    assert!((day_length - 12.0 * 60.0).abs() < 15.0, "{day_length} min");
}

#[test]
fn sydney_summer_solstice() {
    let report = report((2024, 12, 21, 0), -33.8688, 151.2093, 11.0);
    assert_abs_diff_eq!(local_minutes(&report.sun.rise), hm(5, 41) + 0.35, epsilon = 0.1);
    assert_abs_diff_eq!(local_minutes(&report.sun.set), hm(20, 5) + 0.68, epsilon = 0.1);
    let golden = report.twilight(HorizonThreshold::GoldenHour).unwrap();
    assert_abs_diff_eq!(local_minutes(&golden.set), hm(19, 28) + 0.77, epsilon = 0.1);
}

#[test]
fn moon_age_at_new_moon() {
    // New moon 2024-01-11 11:57 UT.
    let report = report((2024, 1, 11, 12), 52.52, 13.405, 1.0);
    let age = report.moon_age_days.min(29.530_588_853 - report.moon_age_days);
    assert!(age < 0.5, "age {}", report.moon_age_days);
    assert!(report.moon_illumination < 0.01);
}

// ── Polar cases ───────────────────────────────────────────────────────────

#[test]
fn polar_day_has_no_sunset() {
    let report = report((2024, 6, 21, 12), 78.0, 15.0, 1.0);
    assert_eq!(report.sun.set.time, EventTime::NeverSets);
    assert_eq!(report.sun.rise.time, EventTime::NeverSets);
    assert!(report.sun.set.local.is_none());
    assert!(report.sun.transit.occurs());
    for twilight in &report.twilights {
        assert!(!twilight.rise.occurs(), "{}", twilight.threshold);
        assert!(!twilight.set.occurs(), "{}", twilight.threshold);
    }
    assert_eq!(report.sun.set.to_string(), "no event (never sets)");
}

#[test]
fn polar_night_keeps_the_deep_twilights() {
    let report = report((2024, 12, 21, 12), 78.0, 15.0, 0.0);
    assert_eq!(report.sun.rise.time, EventTime::NeverRises);
    assert_eq!(report.sun.set.time, EventTime::NeverRises);
    for threshold in [
        HorizonThreshold::CivilTwilight,
        HorizonThreshold::BlueHour,
        HorizonThreshold::GoldenHour,
    ] {
        let pass = report.twilight(threshold).unwrap();
        assert_eq!(pass.rise.time, EventTime::NeverRises, "{threshold}");
    }
    let nautical = report.twilight(HorizonThreshold::NauticalTwilight).unwrap();
    assert_abs_diff_eq!(local_minutes(&nautical.rise), hm(9, 45) + 0.43, epsilon = 0.1);
    assert_abs_diff_eq!(local_minutes(&nautical.set), hm(12, 11) + 0.15, epsilon = 0.1);
}

// ── Errors ────────────────────────────────────────────────────────────────

#[test]
fn reform_gap_dates_are_rejected() {
    for day in 5..=14 {
        assert!(matches!(
            to_julian_day(1582, 10, day, 0, 0, 0),
            Err(EphemerisError::InvalidDate { .. })
        ));
    }
    let before = to_julian_day(1582, 10, 4, 0, 0, 0).unwrap();
    let after = to_julian_day(1582, 10, 15, 0, 0, 0).unwrap();
    assert_eq!((after - before).value(), 1.0);
}

#[test]
fn invalid_inputs_abort_the_report() {
    assert!(GeoLocation::new(95.0, 0.0).is_err());
    let date = CivilDateTime::new(2024, 6, 21, 12, 0, 0).unwrap();
    let location = GeoLocation::new(0.0, 0.0).unwrap();
    assert!(matches!(
        compute_ephemeris(date, location, f64::NAN),
        Err(EphemerisError::InvalidUtcOffset(_))
    ));
}

// ── Determinism ───────────────────────────────────────────────────────────

#[test]
fn first_supported_date_yields_a_full_report() {
    let date = CivilDateTime::new(-4712, 1, 1, 0, 0, 0).unwrap();
    let cases = [
        (0.0, 0.0, 0.0),
        (52.52, 13.405, 0.0),
        (0.0, 170.0, 0.0),
        (0.0, 0.0, -5.0),
    ];
    for (latitude, longitude, offset) in cases {
        let location = GeoLocation::new(latitude, longitude).unwrap();
        let report = compute_ephemeris(date, location, offset).unwrap();
        for event in [&report.sun.rise, &report.sun.set, &report.moon.rise, &report.moon.set] {
            if let Some(local) = event.local {
                assert!(local.civil.year >= -4713);
            }
        }
    }

    let report = compute_ephemeris(date, GeoLocation::new(0.0, 0.0).unwrap(), -5.0).unwrap();
    assert_eq!(
        (report.local_time.civil.year, report.local_time.civil.month, report.local_time.civil.day),
        (-4713, 12, 31)
    );
}

#[test]
fn absurd_julian_day_is_rejected_not_saturated() {
    let calculator = EphemerisCalculator::new(GeoLocation::new(0.0, 0.0).unwrap());
    for value in [5e12, 1e15] {
        assert!(matches!(
            calculator.compute_at(JulianDay::new(value), 0.0),
            Err(EphemerisError::InvalidJulianDay(_))
        ));
    }
}

#[test]
fn repeated_runs_are_bit_identical() {
    let calculator = EphemerisCalculator::new(GeoLocation::new(-33.8688, 151.2093).unwrap());
    let date = CivilDateTime::new(2031, 2, 3, 4, 5, 6).unwrap();
    let first = calculator.compute(date, 11.0).unwrap();
    let second = calculator.compute(date, 11.0).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.sun.rise.time.instant().map(|jd| jd.value().to_bits()),
        second.sun.rise.time.instant().map(|jd| jd.value().to_bits())
    );
}

#[test]
fn report_is_independent_of_the_output_offset() {
    let calculator = EphemerisCalculator::new(GeoLocation::new(52.52, 13.405).unwrap());
    let date = CivilDateTime::new(2024, 6, 21, 12, 0, 0).unwrap();
    let utc = calculator.compute(date, 0.0).unwrap();
    let cest = calculator.compute(date, 2.0).unwrap();
    assert_eq!(utc.sun.rise.time, cest.sun.rise.time);
    assert_eq!(utc.moon.transit.time, cest.moon.transit.time);
    assert_abs_diff_eq!(
        cest.sun.rise.local.unwrap().to_julian_day().value(),
        cest.sun.rise.time.instant().unwrap().value(),
        epsilon = 1.0 / 86_400.0
    );
}

#[test]
fn more_iterations_do_not_move_a_converged_sunrise() {
    let location = GeoLocation::new(40.4168, -3.7038).unwrap();
    let date = CivilDateTime::new(2024, 3, 20, 12, 0, 0).unwrap();
    let default = EphemerisCalculator::new(location).compute(date, 0.0).unwrap();
    let many = EphemerisCalculator::with_config(
        location,
        EphemerisConfig::default().with_sun_iterations(10),
    )
    .compute(date, 0.0)
    .unwrap();
    let a = default.sun.rise.time.instant().unwrap();
    let b = many.sun.rise.time.instant().unwrap();
    assert!((a - b).value().abs() < 1.0 / 86_400.0);
}

#[test]
fn chrono_and_calendar_agree() {
    let datetime: DateTime<Utc> = "2024-06-21T12:00:00Z".parse().unwrap();
    let civil = CivilDateTime::from_utc(datetime).unwrap();
    assert_eq!(civil, CivilDateTime::new(2024, 6, 21, 12, 0, 0).unwrap());
    let jd = JulianDay::from_utc(datetime);
    assert_abs_diff_eq!(jd.value(), civil.julian_day().value(), epsilon = 1e-8);
}

// ── Properties ────────────────────────────────────────────────────────────

fn civil_strategy() -> impl Strategy<Value = CivilDateTime> {
    (-4712i32..3000, 1u32..=12, 1u32..=31, 0u32..24, 0u32..60, 0u32..60).prop_filter_map(
        "invalid civil date",
        |(y, mo, d, h, mi, s)| CivilDateTime::new(y, mo, d, h, mi, s).ok(),
    )
}

/// Days of UT per radian of hour angle.
const DAYS_PER_RADIAN: f64 = 1.0 / (1.002_737_811_911_354_48 * std::f64::consts::TAU);

proptest! {
    #[test]
    fn julian_day_roundtrip(civil in civil_strategy()) {
        let jd = civil.julian_day();
        prop_assert_eq!(from_julian_day(jd).unwrap(), civil);
    }

    #[test]
    fn julian_day_is_strictly_increasing(a in civil_strategy(), b in civil_strategy()) {
        prop_assume!(a != b);
        let (early, late) = if a < b { (a, b) } else { (b, a) };
        prop_assert!(early.julian_day() < late.julian_day());
    }

    #[test]
    fn rise_and_set_hour_angles_mirror_transit(
        latitude in -65.0f64..65.0,
        longitude in -180.0f64..180.0,
        day in 0.0f64..3_650.0,
    ) {
        let epoch = ObservationEpoch::new(JulianDay::new(2_458_849.5 + day));
        let location = GeoLocation::new(latitude, longitude).unwrap();
        let sun = sun_elements(epoch.centuries());
        let result = topocentric(
            &sun.position,
            &epoch,
            &location,
            HorizonThreshold::Horizon,
            &Atmosphere::default(),
        );
        if let (EventTime::Occurs(rise), EventTime::Occurs(set), EventTime::Occurs(transit)) =
            (result.rise, result.set, result.transit)
        {
            let h0 = result.crossing_hour_angle.unwrap();
            let turn = std::f64::consts::TAU;
            let before = ((transit - rise).value() / DAYS_PER_RADIAN).rem_euclid(turn);
            let after = ((set - transit).value() / DAYS_PER_RADIAN).rem_euclid(turn);
            prop_assert!((before - h0).abs() < 1e-6, "{} vs {}", before, h0);
            prop_assert!((after - h0).abs() < 1e-6, "{} vs {}", after, h0);
        } else {
            prop_assert!(result.crossing_hour_angle.is_none());
        }
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
#[test]
fn serde_report_roundtrip() {
    let report = report((2024, 6, 21, 12), 78.0, 15.0, 1.0);
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"moon_illumination\""));
    assert!(json.contains("\"NeverSets\""));
    let back: EphemerisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.twilights.len(), report.twilights.len());
    assert_eq!(back.sun.set.time, EventTime::NeverSets);
    assert_eq!(back.local_time.civil, report.local_time.civil);
}

#[cfg(feature = "serde")]
#[test]
fn serde_config_defaults() {
    let json = serde_json::to_string(&EphemerisConfig::default()).unwrap();
    let back: EphemerisConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.thresholds, HorizonThreshold::TWILIGHTS.to_vec());
    assert_eq!(back.sun_iterations, 3);
}
