//! Phase classification against the SPA ephemeris.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use csv::ReaderBuilder;
use dusk_dawn::{
    Circumstance, ClassifyOptions, Error, LocationOverrides, Observer, Phase, SiteConfig,
    SpaEphemeris, Transition, Twilight, classify, classify_at_site, classify_with,
};
use std::error::Error as StdError;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Checks a civil-twilight phase against the Sun's apparent altitude.
fn assert_phase_matches_altitude(
    ephemeris: &SpaEphemeris,
    observer: &Observer,
    instant: DateTime<Utc>,
    phase: Phase,
) {
    let altitude = ephemeris.solar_altitude(observer, instant).unwrap();
    let place = (observer.latitude(), observer.longitude());
    match phase {
        Phase::Day => assert!(altitude > -2.0, "day at {instant} {place:?}, sun at {altitude}"),
        Phase::Night => {
            assert!(altitude < -5.0, "night at {instant} {place:?}, sun at {altitude}");
        }
        Phase::Dawn | Phase::Dusk => assert!(
            altitude > -7.0 && altitude < 0.5,
            "{phase} at {instant} {place:?}, sun at {altitude}"
        ),
    }
}

fn duration_of(instant: DateTime<Utc>, location: &LocationOverrides) -> (Phase, TimeDelta) {
    let options = ClassifyOptions::default().with_duration();
    let result = classify(instant, location, &options).unwrap();
    (result.phase(), result.duration().unwrap().as_time_delta())
}

#[test]
fn validate_phases_against_reference_table() -> Result<(), Box<dyn StdError>> {
    let mut reader = ReaderBuilder::new().from_path("tests/data/phases.csv")?;
    let mut count = 0;

    for record in reader.records() {
        let record = record?;
        let instant: DateTime<Utc> = record[0].parse()?;
        let location = LocationOverrides::new()
            .latitude(&record[1])?
            .longitude(&record[2])?;
        let twilight: Twilight = record[3].parse()?;
        let expected: Phase = record[4].parse()?;

        let options = ClassifyOptions::default().with_twilight(twilight);
        let result = classify(instant, &location, &options)?;
        assert_eq!(
            result.phase(),
            expected,
            "{instant} at ({}, {}) with twilight {}",
            &record[1],
            &record[2],
            &record[3]
        );
        assert!(result.ends_at() > instant);
        count += 1;
    }

    assert_eq!(count, 22);
    Ok(())
}

#[test]
fn summer_noon_at_default_site_is_day() {
    let result = classify(
        at(2023, 6, 21, 12, 0),
        &LocationOverrides::new(),
        &ClassifyOptions::default(),
    )
    .unwrap();
    assert_eq!(result.label(), "day");
    assert_eq!(result.ending(), Transition::Sunset);
}

#[test]
fn phases_of_one_solar_day_sum_to_a_day() {
    let location = LocationOverrides::new();
    let samples = [
        (at(2023, 6, 21, 0, 0), Phase::Night),
        (at(2023, 6, 21, 2, 12), Phase::Dawn),
        (at(2023, 6, 21, 12, 0), Phase::Day),
        (at(2023, 6, 21, 19, 12), Phase::Dusk),
    ];

    let mut total = TimeDelta::zero();
    for (instant, expected) in samples {
        let (phase, duration) = duration_of(instant, &location);
        assert_eq!(phase, expected, "{instant}");
        assert!(duration > TimeDelta::zero(), "{phase} duration {duration}");
        total += duration;
    }

    let error = (total - TimeDelta::days(1)).abs();
    assert!(
        error < TimeDelta::minutes(10),
        "phases summed to {total} instead of 24 h"
    );
}

#[test]
fn summer_day_at_default_site_is_long() {
    let (phase, duration) = duration_of(at(2023, 6, 21, 12, 0), &LocationOverrides::new());
    assert_eq!(phase, Phase::Day);
    assert!(duration > TimeDelta::hours(16) && duration < TimeDelta::hours(17));

    let (phase, duration) = duration_of(at(2023, 6, 21, 19, 12), &LocationOverrides::new());
    assert_eq!(phase, Phase::Dusk);
    assert!(duration > TimeDelta::minutes(30) && duration < TimeDelta::minutes(50));
}

#[test]
fn equator_equinox_day_matches_night_with_twilights() {
    let equator = LocationOverrides::new()
        .latitude(0.0)
        .unwrap()
        .longitude(0.0)
        .unwrap()
        .elevation(0.0);

    let (phase, day) = duration_of(at(2023, 3, 20, 12, 0), &equator);
    assert_eq!(phase, Phase::Day);
    let (phase, night) = duration_of(at(2023, 3, 21, 0, 0), &equator);
    assert_eq!(phase, Phase::Night);
    let (phase, dusk) = duration_of(at(2023, 3, 20, 18, 23), &equator);
    assert_eq!(phase, Phase::Dusk);
    let (phase, dawn) = duration_of(at(2023, 3, 21, 5, 53), &equator);
    assert_eq!(phase, Phase::Dawn);

    // Refraction and the solar disc make the day slightly longer than twelve hours.
    assert!((day - TimeDelta::hours(12)).abs() < TimeDelta::minutes(20));
    let dark = night + dusk + dawn;
    assert!(
        (day - dark).abs() < TimeDelta::minutes(45),
        "day {day} vs night with twilights {dark}"
    );
}

#[test]
fn polar_night_reports_missing_sunrise() {
    let svalbard = LocationOverrides::new()
        .latitude(78.22)
        .unwrap()
        .longitude(15.65)
        .unwrap();

    let err = classify(at(2023, 12, 21, 12, 0), &svalbard, &ClassifyOptions::default())
        .unwrap_err();
    assert!(err.is_no_such_transition(), "unexpected error {err}");
    assert!(matches!(
        err,
        Error::NoSuchTransition {
            circumstance: Circumstance::AlwaysBelow,
            ..
        }
    ));
}

#[test]
fn polar_day_reports_missing_sunset() {
    let svalbard = LocationOverrides::new()
        .latitude(78.22)
        .unwrap()
        .longitude(15.65)
        .unwrap();

    let err = classify(at(2023, 6, 21, 12, 0), &svalbard, &ClassifyOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NoSuchTransition {
            circumstance: Circumstance::AlwaysAbove,
            ..
        }
    ));
}

#[test]
fn astronomical_twilight_never_ends_in_tatra_summer() {
    let options = ClassifyOptions::default().with_twilight(Twilight::Astronomical);
    let err = classify(at(2023, 6, 21, 0, 0), &LocationOverrides::new(), &options).unwrap_err();
    assert_eq!(
        err,
        Error::no_such_transition(Transition::TwilightStart, Circumstance::AlwaysAbove)
    );
}

#[test]
fn invalid_location_is_rejected_before_any_query() {
    let location = LocationOverrides::new().latitude(123.0).unwrap();
    let err = classify(at(2023, 6, 21, 12, 0), &location, &ClassifyOptions::default())
        .unwrap_err();
    assert!(err.is_invalid_location());
}

#[test]
fn hourly_phases_follow_the_solar_cycle() {
    let ephemeris = SpaEphemeris::default();
    let observer = SiteConfig::default().observer().unwrap();
    let options = ClassifyOptions::default().with_duration();

    for start in [at(2023, 6, 20, 0, 0), at(2023, 12, 20, 0, 0)] {
        let mut previous: Option<Phase> = None;
        for hour in 0..72 {
            let instant = start + TimeDelta::minutes(hour * 20);
            let result = classify_with(&ephemeris, instant, &observer, &options).unwrap();
            let phase = result.phase();

            assert!(result.duration().unwrap().as_time_delta() >= TimeDelta::zero());

            assert_phase_matches_altitude(&ephemeris, &observer, instant, phase);

            if let Some(before) = previous {
                // Phases only ever stay the same or advance to the next one.
                assert!(
                    phase == before || before.closed_by() == phase.opened_by(),
                    "{before} jumped to {phase} at {instant}"
                );
            }
            previous = Some(phase);
        }
    }
}

#[test]
fn new_york_afternoon_before_late_utc_sunset_is_day() {
    let new_york = LocationOverrides::new()
        .latitude(40.7)
        .unwrap()
        .longitude(-74.0)
        .unwrap();
    let options = ClassifyOptions::default().with_duration();
    let result = classify(at(2023, 8, 14, 16, 7), &new_york, &options).unwrap();

    assert_eq!(result.phase(), Phase::Day);
    assert_eq!(result.ending(), Transition::Sunset);
    assert!(result.ends_at() < at(2023, 8, 15, 0, 10));
    let duration = result.duration().unwrap().as_time_delta();
    assert!(
        duration > TimeDelta::hours(13) && duration < TimeDelta::hours(15),
        "day lasted {duration}"
    );
}

#[test]
fn phases_match_altitude_through_the_year_at_many_longitudes() {
    let ephemeris = SpaEphemeris::default();
    let options = ClassifyOptions::default().with_duration();
    let sites = [(40.7, -74.0), (0.0, 179.9), (0.0, -179.9), (55.0, -170.0), (-33.9, 151.2)];
    let start = at(2023, 1, 1, 0, 0);

    for (latitude, longitude) in sites {
        let observer = SiteConfig::at(latitude, longitude).observer().unwrap();
        for step in 0..237 {
            let instant = start + TimeDelta::minutes(37 * 60 * step);
            let result = classify_with(&ephemeris, instant, &observer, &options).unwrap();
            assert_phase_matches_altitude(&ephemeris, &observer, instant, result.phase());

            let duration = result.duration().unwrap().as_time_delta();
            assert!(
                duration > TimeDelta::zero() && duration < TimeDelta::days(1),
                "{} at {instant} ({latitude}, {longitude}) lasted {duration}",
                result.phase()
            );
            assert!(result.ends_at() > instant);
            assert!(result.ends_at() - instant < TimeDelta::days(1));
        }
    }
}

#[test]
fn site_defaults_feed_unset_fields() {
    let singapore = SiteConfig::at(1.2833, 103.8333)
        .with_elevation(15.0)
        .with_atmosphere(30.0, 1008.0);
    let (phase, duration) = classify_at_site(
        at(2023, 3, 20, 4, 0),
        &singapore,
        &LocationOverrides::new(),
        &ClassifyOptions::default(),
    )
    .unwrap();
    assert_eq!(phase, Phase::Day);
    assert_eq!(duration, None);

    // A latitude override keeps the Singapore longitude.
    let (phase, _) = classify_at_site(
        at(2023, 3, 20, 16, 0),
        &singapore,
        &LocationOverrides::new().latitude(0.0).unwrap(),
        &ClassifyOptions::default(),
    )
    .unwrap();
    assert_eq!(phase, Phase::Night);
}
