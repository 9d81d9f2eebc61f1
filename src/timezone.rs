//! Conversion of naive local timestamps to UTC through the IANA timezone database.
//!
//! ```
//! use chrono::NaiveDate;
//! use dusk_dawn::to_utc;
//!
//! let local = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let utc = to_utc(local, "Europe/Warsaw").unwrap();
//! assert_eq!(utc.to_rfc3339(), "2022-12-31T23:00:00+00:00");
//! ```

use crate::{Error, Result};
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// How to resolve a local time that occurs twice when clocks fall back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Disambiguation {
    /// Reject ambiguous times.
    #[default]
    Strict,
    /// Take the first occurrence (still on daylight time).
    Earliest,
    /// Take the second occurrence (already on standard time).
    Latest,
}

/// Looks up an IANA timezone identifier such as `"Europe/Warsaw"`.
///
/// # Errors
/// Returns `InvalidTimezone` if the identifier is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| Error::invalid_timezone(name))
}

/// Interprets `local` as wall-clock time in `timezone`.
///
/// # Errors
/// Returns `InvalidTimezone`, `AmbiguousLocalTime` or `NonexistentLocalTime`.
pub fn localize(local: NaiveDateTime, timezone: &str) -> Result<DateTime<Tz>> {
    localize_with(local, timezone, Disambiguation::Strict)
}

/// Interprets `local` as wall-clock time in `timezone`, resolving ambiguity by `policy`.
///
/// # Errors
/// Returns `InvalidTimezone` for unknown zones, `NonexistentLocalTime` for
/// times skipped by a DST change, and `AmbiguousLocalTime` under
/// [`Disambiguation::Strict`] for times that occur twice.
pub fn localize_with(
    local: NaiveDateTime,
    timezone: &str,
    policy: Disambiguation,
) -> Result<DateTime<Tz>> {
    let tz = parse_timezone(timezone)?;
    match tz.from_local_datetime(&local) {
        LocalResult::Single(datetime) => Ok(datetime),
        LocalResult::Ambiguous(earliest, latest) => match policy {
            Disambiguation::Strict => Err(Error::AmbiguousLocalTime {
                local,
                earliest,
                latest,
            }),
            Disambiguation::Earliest => Ok(earliest),
            Disambiguation::Latest => Ok(latest),
        },
        LocalResult::None => Err(Error::NonexistentLocalTime {
            local,
            timezone: tz,
        }),
    }
}

/// Converts a naive local timestamp in `timezone` to UTC.
///
/// # Errors
/// See [`localize`].
pub fn to_utc(local: NaiveDateTime, timezone: &str) -> Result<DateTime<Utc>> {
    to_utc_with(local, timezone, Disambiguation::Strict)
}

/// Converts a naive local timestamp in `timezone` to UTC, resolving ambiguity by `policy`.
///
/// # Errors
/// See [`localize_with`].
pub fn to_utc_with(
    local: NaiveDateTime,
    timezone: &str,
    policy: Disambiguation,
) -> Result<DateTime<Utc>> {
    localize_with(local, timezone, policy).map(|datetime| datetime.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_warsaw_new_year() {
        let utc = to_utc(naive(2023, 1, 1, 0, 0), "Europe/Warsaw").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2022, 12, 31, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_summer_offset() {
        let utc = to_utc(naive(2023, 6, 21, 12, 0), "Europe/Bratislava").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2023, 6, 21, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_unknown_timezone() {
        let err = to_utc(naive(2023, 1, 1, 0, 0), "Europe/Atlantis").unwrap_err();
        assert_eq!(err, Error::invalid_timezone("Europe/Atlantis"));
    }

    #[test]
    fn test_fall_back_is_ambiguous() {
        // 02:30 happens twice in Warsaw on 2023-10-29.
        let local = naive(2023, 10, 29, 2, 30);
        let err = to_utc(local, "Europe/Warsaw").unwrap_err();
        assert!(matches!(err, Error::AmbiguousLocalTime { .. }));

        let earliest = to_utc_with(local, "Europe/Warsaw", Disambiguation::Earliest).unwrap();
        let latest = to_utc_with(local, "Europe/Warsaw", Disambiguation::Latest).unwrap();
        assert_eq!(earliest, Utc.with_ymd_and_hms(2023, 10, 29, 0, 30, 0).unwrap());
        assert_eq!(latest, Utc.with_ymd_and_hms(2023, 10, 29, 1, 30, 0).unwrap());
    }

    #[test]
    fn test_spring_forward_is_nonexistent() {
        // 02:30 is skipped in Warsaw on 2023-03-26.
        let local = naive(2023, 3, 26, 2, 30);
        for policy in [
            Disambiguation::Strict,
            Disambiguation::Earliest,
            Disambiguation::Latest,
        ] {
            let err = to_utc_with(local, "Europe/Warsaw", policy).unwrap_err();
            assert!(matches!(err, Error::NonexistentLocalTime { .. }));
        }
    }

    #[test]
    fn test_localize_keeps_zone() {
        let datetime = localize(naive(2023, 1, 1, 0, 0), "America/New_York").unwrap();
        assert_eq!(datetime.timezone(), chrono_tz::America::New_York);
        assert_eq!(datetime.naive_local(), naive(2023, 1, 1, 0, 0));
    }
}
