use chrono::NaiveDate;

use day_length::{compute, DepressionAngle, Location};

fn main() -> day_length::Result<()> {
    let location = Location::new("Ann Arbor", 42.2253, -83.74567, "America/Detroit")?;
    let date = NaiveDate::from_ymd_opt(2025, 6, 21).expect("valid date");

    let report = compute(date, &location, DepressionAngle::CIVIL)?;

    println!("=== Day Length Calculation Example ===");
    println!(
        "Location: {} ({:.3}°, {:.3}°) {}",
        location.name(),
        location.latitude(),
        location.longitude(),
        location.timezone_id()
    );
    println!("Date: {}", report.date);
    println!(
        "Twilight depression: {}°",
        report.depression_angle.degrees()
    );
    println!("Equation of Time: {:.2} minutes", report.equation_of_time);
    println!();
    for event in report.events() {
        println!("{}", event);
    }
    println!();
    println!("{}", report);

    let segments = report.segments();
    println!();
    println!("--- Dial ---");
    for (label, arcs) in [
        ("daylight", &segments.daylight),
        ("twilight", &segments.twilight),
        ("night", &segments.night),
    ] {
        for arc in arcs {
            println!(
                "{:>9}: start {:.3} rad, width {:.3} rad",
                label, arc.start, arc.width
            );
        }
    }
    Ok(())
}
