//! Instant parsing and rendering against the configured time zone.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use google_calendar3::api::EventDateTime;
use thiserror::Error;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantError {
    #[error("{0:?} is a date without a time of day")]
    DateOnly(String),

    #[error("{raw:?} does not exist in {zone} (skipped by a daylight-saving change)")]
    SkippedLocalTime { raw: String, zone: Tz },

    #[error("{0:?} is not an ISO-8601 date-time")]
    Malformed(String),
}

/// Parse an ISO-8601 instant. Values without an offset are read as wall-clock
/// time in `tz`; an ambiguous wall-clock time takes the earlier instant.
pub fn parse_instant(raw: &str, tz: Tz) -> Result<DateTime<Utc>, InstantError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    else {
        if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
            return Err(InstantError::DateOnly(raw.to_string()));
        }
        return Err(InstantError::Malformed(raw.to_string()));
    };

    match tz.from_local_datetime(&naive) {
        | LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        | LocalResult::None => Err(InstantError::SkippedLocalTime {
            raw: raw.to_string(),
            zone: tz,
        }),
    }
}

/// Provider representation of an instant, tagged with the fixed zone.
pub fn event_time(instant: DateTime<Utc>, tz: Tz) -> EventDateTime {
    EventDateTime {
        date_time: Some(instant),
        time_zone: Some(tz.name().to_string()),
        ..Default::default()
    }
}

/// Human rendering of a start/end: an instant in `tz`, or a bare date for
/// all-day events.
pub fn display_time(value: Option<&EventDateTime>, tz: Tz) -> String {
    match value {
        | Some(EventDateTime { date_time: Some(dt), .. }) => dt.with_timezone(&tz).to_rfc3339(),
        | Some(EventDateTime { date: Some(date), .. }) => date.format("%Y-%m-%d").to_string(),
        | _ => "unspecified".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_honoured() {
        let dt = parse_instant("2024-05-01T10:00:00+02:00", Tz::UTC).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T08:00:00+00:00");
    }

    #[test]
    fn naive_instants_use_configured_zone() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let dt = parse_instant("2024-05-01T10:00:00", tz).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T14:00:00+00:00");

        let dt = parse_instant("2024-05-01T10:00", tz).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T14:00:00+00:00");
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            parse_instant("next tuesday", Tz::UTC),
            Err(InstantError::Malformed("next tuesday".into()))
        );
        assert!(matches!(parse_instant("", Tz::UTC), Err(InstantError::Malformed(_))));
    }

    #[test]
    fn bare_dates_are_called_out() {
        let err = parse_instant("2024-05-01", Tz::UTC).unwrap_err();
        assert_eq!(err, InstantError::DateOnly("2024-05-01".into()));
        assert_eq!(err.to_string(), "\"2024-05-01\" is a date without a time of day");
    }

    #[test]
    fn wall_clock_times_in_a_dst_gap_are_called_out() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let err = parse_instant("2024-03-10T02:30:00", tz).unwrap_err();
        assert!(matches!(err, InstantError::SkippedLocalTime { .. }));
        assert!(err.to_string().contains("does not exist in America/New_York"));

        // Repeated hour on fall-back resolves to the first occurrence (EDT).
        let dt = parse_instant("2024-11-03T01:30:00", tz).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-11-03T05:30:00+00:00");
    }

    #[test]
    fn event_time_carries_zone_name() {
        let tz: Tz = "Europe/Berlin".parse().unwrap();
        let et = event_time(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(), tz);
        assert_eq!(et.time_zone.as_deref(), Some("Europe/Berlin"));
        assert!(et.date.is_none());
    }

    #[test]
    fn all_day_events_render_as_dates() {
        let et = EventDateTime {
            date: NaiveDate::from_ymd_opt(2024, 12, 25),
            ..Default::default()
        };
        assert_eq!(display_time(Some(&et), Tz::UTC), "2024-12-25");
        assert_eq!(display_time(None, Tz::UTC), "unspecified");
    }
}
