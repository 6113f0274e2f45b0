//! Unix-seconds timestamp helpers.
//!
//! Export timestamps are fractional seconds. Rendered dates use the local
//! time zone; date filters compare in UTC.

use chrono::{DateTime, Local, Utc};

/// Format of every date printed in a rendered document.
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Format of the timestamp suffix in output file names.
pub const FILENAME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Converts unix seconds to a UTC instant.
///
/// Returns `None` for non-finite or out-of-range values.
pub fn to_utc(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}

/// Converts unix seconds to local time, falling back to the epoch.
pub fn to_local(seconds: f64) -> DateTime<Local> {
    to_utc(seconds)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&Local)
}

/// `MM/DD/YYYY HH:MM` in local time.
///
/// ```rust
/// use chatmd::core::timestamp::format_timestamp;
///
/// assert_eq!(format_timestamp(1_700_000_000.0).len(), 16);
/// ```
pub fn format_timestamp(seconds: f64) -> String {
    to_local(seconds).format(DISPLAY_FORMAT).to_string()
}

/// `YYYYMMDD_HHMMSS` in local time.
pub fn format_filename_timestamp(seconds: f64) -> String {
    to_local(seconds).format(FILENAME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_utc_whole_and_fractional() {
        let dt = to_utc(1_700_000_000.5).unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
        assert_eq!(dt.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_to_utc_rejects_non_finite() {
        assert!(to_utc(f64::NAN).is_none());
        assert!(to_utc(f64::INFINITY).is_none());
    }

    #[test]
    fn test_format_matches_local_time() {
        let expected = Local
            .timestamp_opt(1_700_000_000, 0)
            .unwrap()
            .format("%m/%d/%Y %H:%M")
            .to_string();
        assert_eq!(format_timestamp(1_700_000_000.0), expected);
    }

    #[test]
    fn test_filename_timestamp_shape() {
        let stamp = format_filename_timestamp(0.0);
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'_');
    }

    #[test]
    fn test_invalid_falls_back_to_epoch() {
        assert_eq!(format_timestamp(f64::NAN), format_timestamp(0.0));
    }
}
