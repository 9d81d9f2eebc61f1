//! Classifies one local evening at several sites with each twilight definition.

use chrono::NaiveDate;
use dusk_dawn::{ClassifyOptions, LocationOverrides, Twilight, classify, to_utc};

#[derive(Debug)]
struct Site {
    name: &'static str,
    latitude: &'static str,
    longitude: f64,
    timezone: &'static str,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sites = [
        Site {
            name: "Štrbské Pleso, Slovakia",
            latitude: "49:07:08",
            longitude: 20.0618,
            timezone: "Europe/Bratislava",
        },
        Site {
            name: "Tromsø, Norway (Arctic)",
            latitude: "69:38:56",
            longitude: 18.9553,
            timezone: "Europe/Oslo",
        },
        Site {
            name: "Quito, Ecuador",
            latitude: "-0:13:07",
            longitude: -78.5125,
            timezone: "America/Guayaquil",
        },
    ];

    let local = NaiveDate::from_ymd_opt(2023, 6, 21)
        .ok_or("invalid date")?
        .and_hms_opt(21, 30, 0)
        .ok_or("invalid time")?;

    for site in &sites {
        let instant = to_utc(local, site.timezone)?;
        let location = LocationOverrides::new()
            .latitude(site.latitude)?
            .longitude(site.longitude)?;

        println!("=== {} ===", site.name);
        println!("Local {local} ({}) is {instant}", site.timezone);

        for twilight in [Twilight::Civil, Twilight::Nautical, Twilight::Astronomical] {
            let options = ClassifyOptions::default()
                .with_twilight(twilight)
                .with_duration();
            match classify(instant, &location, &options) {
                Ok(result) => println!(
                    "  {twilight:?}: {result}, ends with {} at {}",
                    result.ending(),
                    result.ends_at().format("%H:%M:%S UTC")
                ),
                Err(err) => println!("  {twilight:?}: {err}"),
            }
        }
        println!();
    }

    Ok(())
}
