//! The local day that a report covers.

use time::{Duration, OffsetDateTime, Time, UtcOffset};

/// A half-open range of instants `[start, end)` covering one local day.
///
/// Both ends are expressed in UTC so they can be compared against the stored
/// UTC timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    /// Local midnight at the start of the day, in UTC. Included in the window.
    pub start: OffsetDateTime,
    /// Local midnight at the start of the next day, in UTC. Excluded from the window.
    pub end: OffsetDateTime,
}

impl DayWindow {
    /// The local day in the timezone `offset` that contains the instant `as_of`.
    pub fn containing(as_of: OffsetDateTime, offset: UtcOffset) -> Self {
        let local_midnight = as_of.to_offset(offset).replace_time(Time::MIDNIGHT);
        let start = local_midnight.to_offset(UtcOffset::UTC);

        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// Whether `instant` falls inside the window.
    #[cfg(test)]
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}
