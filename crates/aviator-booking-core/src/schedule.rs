//! Scheduling helpers: timezone conversion and interval overlap
//!
//! Clients submit lesson times as naive local datetimes interpreted in the
//! student's stored IANA timezone; everything is normalized to UTC before
//! it touches the database. Conversion goes through chrono-tz so DST
//! transitions are handled by the tz database, never by fixed offsets.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::BookingError;

/// Convert a client-submitted local datetime to a UTC instant
///
/// Ambiguous local times (the repeated hour when clocks fall back) resolve
/// to the earlier instant. Nonexistent local times (the skipped hour when
/// clocks spring forward) are rejected.
pub fn local_to_utc(local: NaiveDateTime, timezone: &str) -> Result<DateTime<Utc>, BookingError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| BookingError::InvalidTimezone(timezone.to_string()))?;

    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => Err(BookingError::InvalidLocalTime(local.to_string())),
    }
}

/// End instant of a lesson starting at `start` for `duration_minutes`
pub fn end_of(start: DateTime<Utc>, duration_minutes: i32) -> DateTime<Utc> {
    start + Duration::minutes(i64::from(duration_minutes))
}

/// Boundary-exclusive interval intersection test
///
/// `[a_start, a_end)` and `[b_start, b_end)` overlap iff
/// `a_start < b_end && a_end > b_start`; a lesson ending exactly when the
/// next begins is not a conflict.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_partial_overlap_conflicts() {
        // 14:00-15:00 vs 14:30-15:30
        assert!(overlaps(utc(14, 0), utc(15, 0), utc(14, 30), utc(15, 30)));
    }

    #[test]
    fn test_back_to_back_does_not_conflict() {
        // 14:00-15:00 vs 15:00-16:00
        assert!(!overlaps(utc(14, 0), utc(15, 0), utc(15, 0), utc(16, 0)));
    }

    #[test]
    fn test_containment_conflicts() {
        assert!(overlaps(utc(14, 0), utc(16, 0), utc(14, 30), utc(15, 0)));
        assert!(overlaps(utc(14, 30), utc(15, 0), utc(14, 0), utc(16, 0)));
    }

    #[test]
    fn test_new_york_summer_offset() {
        // EDT is UTC-4
        let local = NaiveDate::from_ymd_opt(2025, 7, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let utc = local_to_utc(local, "America/New_York").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2025, 7, 10, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_new_york_winter_offset() {
        // EST is UTC-5
        let local = NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let utc = local_to_utc(local, "America/New_York").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2025, 1, 10, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_spring_forward_gap_rejected() {
        // 2025-03-09 02:30 does not exist in America/New_York
        let local = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let err = local_to_utc(local, "America/New_York").unwrap_err();
        assert!(matches!(err, BookingError::InvalidLocalTime(_)));
    }

    #[test]
    fn test_fall_back_resolves_to_earlier() {
        // 2025-11-02 01:30 occurs twice in America/New_York; earlier is EDT (UTC-4)
        let local = NaiveDate::from_ymd_opt(2025, 11, 2)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let utc = local_to_utc(local, "America/New_York").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2025, 11, 2, 5, 30, 0).unwrap());
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let local = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let err = local_to_utc(local, "Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, BookingError::InvalidTimezone(_)));
    }
}
