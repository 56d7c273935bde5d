//! EXIF date-time string handling and offset arithmetic.
//!
//! EXIF stores the capture timestamp as a fixed-width ASCII string,
//! `YYYY:MM:DD HH:MM:SS`, with no timezone — the value is local time as-is.
//! Some readers hand the value back wrapped in single quotes; parsing strips
//! one wrapping quote pair before matching the pattern.

use chrono::{Duration, NaiveDateTime};

use crate::error::DateError;

/// The EXIF date-time pattern, as a `chrono` format string.
pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// A signed calendar offset applied to a capture timestamp.
///
/// Components are unbounded and may each be negative. Arithmetic follows
/// proleptic Gregorian carry/borrow rules: adding one second to
/// `2024:01:31 23:59:59` rolls over into `2024:02:01 00:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOffset {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeOffset {
    pub fn new(days: i64, hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the offset to a naive timestamp.
    ///
    /// Returns `DateError::OutOfRange` if any intermediate result leaves the
    /// range `chrono` can represent.
    pub fn apply(&self, instant: NaiveDateTime) -> Result<NaiveDateTime, DateError> {
        let steps = [
            Duration::try_days(self.days),
            Duration::try_hours(self.hours),
            Duration::try_minutes(self.minutes),
            Duration::try_seconds(self.seconds),
        ];

        let mut shifted = instant;
        for step in steps {
            shifted = step
                .and_then(|delta| shifted.checked_add_signed(delta))
                .ok_or(DateError::OutOfRange)?;
        }
        Ok(shifted)
    }
}

impl std::fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Parse an EXIF date-time string into a naive timestamp.
///
/// Leading/trailing whitespace and NUL padding are trimmed, then one wrapping
/// quote pair (`'` or `"`) is stripped if present. Anything that does not
/// match the fixed pattern afterwards — including out-of-range calendar
/// components like month 13 — is a `DateError::Pattern`.
pub fn parse_exif_datetime(raw: &str) -> Result<NaiveDateTime, DateError> {
    let cleaned = strip_quotes(raw.trim().trim_matches('\0').trim());
    NaiveDateTime::parse_from_str(cleaned, EXIF_DATE_FORMAT)
        .map_err(|_| DateError::Pattern(raw.to_string()))
}

/// Format a naive timestamp as an EXIF date-time string.
///
/// Exact inverse of [`parse_exif_datetime`] for any value it produced.
pub fn format_exif_datetime(instant: &NaiveDateTime) -> String {
    instant.format(EXIF_DATE_FORMAT).to_string()
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = s
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        parse_exif_datetime(s).unwrap()
    }

    #[test]
    fn parse_plain() {
        let parsed = dt("2023:06:15 14:30:05");
        assert_eq!(format_exif_datetime(&parsed), "2023:06:15 14:30:05");
    }

    #[test]
    fn parse_strips_single_quotes() {
        assert_eq!(dt("'2023:06:15 14:30:05'"), dt("2023:06:15 14:30:05"));
    }

    #[test]
    fn parse_strips_nul_padding() {
        assert_eq!(dt("2023:06:15 14:30:05\0"), dt("2023:06:15 14:30:05"));
    }

    #[test]
    fn parse_rejects_unmatched_quote() {
        assert!(parse_exif_datetime("'2023:06:15 14:30:05").is_err());
    }

    #[test]
    fn parse_rejects_month_13() {
        assert!(matches!(
            parse_exif_datetime("2023:13:01 00:00:00"),
            Err(DateError::Pattern(_))
        ));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_exif_datetime("last tuesday").is_err());
        assert!(parse_exif_datetime("").is_err());
    }

    #[test]
    fn round_trip_is_lossless() {
        for text in [
            "1999:12:31 23:59:59",
            "2024:02:29 00:00:00",
            "0001:01:01 00:00:00",
        ] {
            assert_eq!(format_exif_datetime(&dt(text)), text);
        }
    }

    #[test]
    fn zero_offset_is_identity() {
        let instant = dt("2023:06:15 14:30:05");
        assert_eq!(TimeOffset::default().apply(instant).unwrap(), instant);
        assert!(TimeOffset::default().is_zero());
    }

    #[test]
    fn one_second_carries_across_month_boundary() {
        let shifted = TimeOffset::new(0, 0, 0, 1)
            .apply(dt("2024:01:31 23:59:59"))
            .unwrap();
        assert_eq!(format_exif_datetime(&shifted), "2024:02:01 00:00:00");
    }

    #[test]
    fn negative_day_borrows_into_leap_february() {
        let shifted = TimeOffset::new(-1, 0, 0, 0)
            .apply(dt("2024:03:01 00:00:00"))
            .unwrap();
        assert_eq!(format_exif_datetime(&shifted), "2024:02:29 00:00:00");
    }

    #[test]
    fn negative_day_borrows_into_common_february() {
        let shifted = TimeOffset::new(-1, 0, 0, 0)
            .apply(dt("2023:03:01 00:00:00"))
            .unwrap();
        assert_eq!(format_exif_datetime(&shifted), "2023:02:28 00:00:00");
    }

    #[test]
    fn mixed_components_accumulate() {
        let shifted = TimeOffset::new(1, 2, 3, 4)
            .apply(dt("2020:01:01 00:00:00"))
            .unwrap();
        assert_eq!(format_exif_datetime(&shifted), "2020:01:02 02:03:04");
    }

    #[test]
    fn overflow_is_an_error_not_a_panic() {
        let result = TimeOffset::new(i64::MAX, 0, 0, 0).apply(dt("2020:01:01 00:00:00"));
        assert!(matches!(result, Err(DateError::OutOfRange)));
    }
}
