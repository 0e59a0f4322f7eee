//! Remaining time until the target moment

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TargetMoment;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until the target, split for display.
///
/// Every field is clamped to zero on its own, so a slightly negative
/// difference at the last tick shows zeros instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemainingDuration {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl RemainingDuration {
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Remaining time from `now` until `target`
    pub fn between(target: TargetMoment, now: DateTime<Utc>) -> Self {
        match target.moment() {
            Some(moment) => Self::from_millis((moment - now).num_milliseconds()),
            None => Self::ZERO,
        }
    }

    /// Split a millisecond difference into days, hours, minutes and seconds
    pub fn from_millis(diff_ms: i64) -> Self {
        Self {
            days: clamp(diff_ms / MS_PER_DAY),
            hours: clamp((diff_ms / MS_PER_HOUR) % 24),
            minutes: clamp((diff_ms / MS_PER_MINUTE) % 60),
            seconds: clamp((diff_ms / MS_PER_SECOND) % 60),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

// Integer division truncates towards zero, which is the floor for the
// positive differences that matter; negative ones clamp to zero anyway.
fn clamp(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

impl fmt::Display for RemainingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02} Days  {:02} Hours  {:02} Minutes  {:02} Seconds",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
