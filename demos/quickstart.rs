use chrono::Utc;
use lunisolar::{CivilDateTime, EphemerisCalculator, GeoLocation, HorizonThreshold, Result};

fn main() -> Result<()> {
    let now = CivilDateTime::from_utc(Utc::now())?;
    let berlin = GeoLocation::new(52.52, 13.405)?;
    let report = EphemerisCalculator::new(berlin).compute(now, 2.0)?;

    println!("Now:      {}", report.local_time);
    println!("ΔT:       {}", report.julian_day.delta_t());
    println!(
        "Sun:      az {:.2}°  el {:.2}°",
        report.sun.azimuth.to_degrees(),
        report.sun.elevation.to_degrees()
    );
    println!("  rise    {}", report.sun.rise);
    println!("  transit {}", report.sun.transit);
    println!("  set     {}", report.sun.set);
    for threshold in HorizonThreshold::TWILIGHTS {
        if let Some(pass) = report.twilight(threshold) {
            println!("  {threshold:<22} {} → {}", pass.rise, pass.set);
        }
    }
    println!(
        "Moon:     az {:.2}°  el {:.2}°  age {:.1} d  lit {:.0}%",
        report.moon.azimuth.to_degrees(),
        report.moon.elevation.to_degrees(),
        report.moon_age_days,
        report.moon_illumination * 100.0
    );
    println!("  rise    {}", report.moon.rise);
    println!("  set     {}", report.moon.set);
    println!(
        "  bright limb {:.1}°",
        report.moon_disk.bright_limb_angle.to_degrees()
    );
    Ok(())
}
