//! Target moment of the countdown

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use tracing::warn;

/// Offset of Western Indonesia Time (WIB), where both venues are
pub const VENUE_UTC_OFFSET_SECONDS: i32 = 7 * 3600;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// An immutable point in time the countdown runs towards.
///
/// Parsing happens once, at construction. Input that cannot be parsed
/// produces an invalid moment, which always counts down as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMoment(Option<DateTime<Utc>>);

impl TargetMoment {
    /// Parse a moment; naive date-times are read in venue time
    pub fn parse(input: &str) -> Self {
        Self::parse_in(input, venue_offset())
    }

    /// Parse a moment, reading naive date-times at `offset`
    pub fn parse_in(input: &str, offset: FixedOffset) -> Self {
        let input = input.trim();

        if let Ok(moment) = DateTime::parse_from_rfc3339(input) {
            return Self::at(moment.with_timezone(&Utc));
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
                return Self::from_naive(naive, offset);
            }
        }

        if let Some(midnight) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Self::from_naive(midnight, offset);
        }

        warn!("Unparsable target moment {:?}, countdown will stay at zero", input);
        Self::invalid()
    }

    pub fn at(moment: DateTime<Utc>) -> Self {
        Self(Some(moment))
    }

    pub fn invalid() -> Self {
        Self(None)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    pub fn moment(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    fn from_naive(naive: NaiveDateTime, offset: FixedOffset) -> Self {
        match offset.from_local_datetime(&naive).single() {
            Some(moment) => Self::at(moment.with_timezone(&Utc)),
            None => Self::invalid(),
        }
    }
}

/// The venue's fixed UTC offset
pub fn venue_offset() -> FixedOffset {
    FixedOffset::east_opt(VENUE_UTC_OFFSET_SECONDS).unwrap_or(Utc.fix())
}
