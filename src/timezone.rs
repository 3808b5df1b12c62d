//! Resolves the configured timezone to an offset from UTC.

use std::fmt::Display;

use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description,
};
use time_tz::{Offset, TimeZone, Tz};

use crate::Error;

const OFFSET_FORMAT: &[BorrowedFormatItem] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

/// The timezone that decides where one day of transactions ends and the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalTimezone {
    /// An offset from UTC that never changes, e.g. "+07:00".
    Fixed(UtcOffset),
    /// A canonical timezone, e.g. "America/New_York", whose offset may change
    /// with daylight saving time.
    Named(&'static Tz),
}

impl LocalTimezone {
    /// The offset from UTC in effect at `instant`.
    pub fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        match self {
            LocalTimezone::Fixed(offset) => *offset,
            LocalTimezone::Named(tz) => tz.get_offset_utc(&instant).to_utc(),
        }
    }
}

impl Display for LocalTimezone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalTimezone::Fixed(offset) => write!(f, "{offset}"),
            LocalTimezone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

/// Parse `timezone` as either a fixed offset, e.g. "+07:00", or a canonical
/// timezone name, e.g. "Asia/Jakarta".
///
/// # Errors
/// Returns [Error::InvalidTimezone] if `timezone` is neither.
pub fn parse_timezone(timezone: &str) -> Result<LocalTimezone, Error> {
    let timezone = timezone.trim();

    if matches!(timezone, "UTC" | "Z") {
        return Ok(LocalTimezone::Fixed(UtcOffset::UTC));
    }

    if let Ok(offset) = UtcOffset::parse(timezone, OFFSET_FORMAT) {
        return Ok(LocalTimezone::Fixed(offset));
    }

    time_tz::timezones::get_by_name(timezone)
        .map(LocalTimezone::Named)
        .ok_or_else(|| Error::InvalidTimezone(timezone.to_owned()))
}

#[cfg(test)]
mod parse_timezone_tests {
    use time::{
        UtcOffset,
        macros::{datetime, offset},
    };

    use crate::Error;

    use super::{LocalTimezone, parse_timezone};

    #[test]
    fn parses_fixed_offset() {
        assert_eq!(
            parse_timezone("+07:00"),
            Ok(LocalTimezone::Fixed(offset!(+7)))
        );
        assert_eq!(
            parse_timezone("-05:30"),
            Ok(LocalTimezone::Fixed(offset!(-5:30)))
        );
    }

    #[test]
    fn parses_utc() {
        assert_eq!(parse_timezone("UTC"), Ok(LocalTimezone::Fixed(UtcOffset::UTC)));
        assert_eq!(parse_timezone("+00:00"), Ok(LocalTimezone::Fixed(UtcOffset::UTC)));
    }

    #[test]
    fn resolves_timezone_without_daylight_saving() {
        let timezone = parse_timezone("Asia/Jakarta").expect("Could not parse timezone");

        assert_eq!(timezone.offset_at(datetime!(2025-01-15 12:00 UTC)), offset!(+7));
        assert_eq!(timezone.offset_at(datetime!(2025-07-15 12:00 UTC)), offset!(+7));
    }

    #[test]
    fn resolves_daylight_saving_offset_at_each_instant() {
        let timezone = parse_timezone("America/New_York").expect("Could not parse timezone");

        assert_eq!(timezone.offset_at(datetime!(2025-01-15 12:00 UTC)), offset!(-5));
        assert_eq!(timezone.offset_at(datetime!(2025-07-15 12:00 UTC)), offset!(-4));
    }

    #[test]
    fn fixed_offset_does_not_change() {
        let timezone = LocalTimezone::Fixed(offset!(-5));

        assert_eq!(timezone.offset_at(datetime!(2025-07-15 12:00 UTC)), offset!(-5));
    }

    #[test]
    fn displays_canonical_name() {
        let timezone = parse_timezone("Asia/Jakarta").expect("Could not parse timezone");

        assert_eq!(timezone.to_string(), "Asia/Jakarta");
    }

    #[test]
    fn rejects_unknown_timezone() {
        assert_eq!(
            parse_timezone("Mars/Olympus_Mons"),
            Err(Error::InvalidTimezone("Mars/Olympus_Mons".to_owned()))
        );
    }

    #[test]
    fn rejects_offset_without_sign() {
        assert!(parse_timezone("07:00").is_err());
    }
}
