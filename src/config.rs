//! Configuration and CLI argument handling

use std::time::Duration;
use chrono::{DateTime, Utc};
use clap::Parser;
use thiserror::Error;

use crate::{
    invitation::DEFAULT_GUEST_LABEL,
    services::AutoplayPolicy,
    state::TargetMoment,
};

/// Errors in command line values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unrecognised moment {0:?}, expected e.g. 2025-09-07T10:00:00")]
    InvalidMoment(String),
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "undangan")]
#[command(about = "A wedding invitation with a live countdown and background music")]
#[command(version)]
pub struct Config {
    /// Invitation link or query string, e.g. "https://example.id/?to=Budi&event=3031"
    #[arg(short, long, default_value = "")]
    pub link: String,

    /// How long the music popup stays up, in milliseconds
    #[arg(long, default_value = "2000")]
    pub popup_ms: u64,

    /// Countdown refresh period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Simulated time for the background music to buffer, in milliseconds
    #[arg(long, default_value = "1500")]
    pub buffer_ms: u64,

    /// How the environment answers play requests
    #[arg(long, value_enum, default_value_t = AutoplayPolicy::Allow)]
    pub autoplay: AutoplayPolicy,

    /// Label used when the link does not name a guest
    #[arg(long, default_value = DEFAULT_GUEST_LABEL)]
    pub fallback_guest: String,

    /// Preview the invitation as if it were this moment (venue time unless an offset is given)
    #[arg(long, value_parser = parse_moment)]
    pub now: Option<DateTime<Utc>>,

    /// Stop after this many countdown updates
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Print one JSON snapshot per update instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn popup_duration(&self) -> Duration {
        Duration::from_millis(self.popup_ms)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn buffer_duration(&self) -> Duration {
        Duration::from_millis(self.buffer_ms)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Parse a `--now` value with the same rules as event target moments
pub fn parse_moment(value: &str) -> Result<DateTime<Utc>, ConfigError> {
    TargetMoment::parse(value)
        .moment()
        .ok_or_else(|| ConfigError::InvalidMoment(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults_match_the_page() {
        let config = Config::try_parse_from(["undangan"]).unwrap();
        assert_eq!(config.popup_duration(), Duration::from_millis(2000));
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.fallback_guest, "Tamu");
        assert_eq!(config.autoplay, AutoplayPolicy::Allow);
        assert_eq!(config.log_level(), "info");
        assert!(config.now.is_none());
    }

    #[test]
    fn accepts_the_longer_popup_variant_and_preview_time() {
        let config = Config::try_parse_from([
            "undangan",
            "--popup-ms", "7000",
            "--autoplay", "deny",
            "--now", "2025-09-07T09:59:50",
            "--link", "?to=Budi",
            "-v",
        ])
        .unwrap();

        assert_eq!(config.popup_duration(), Duration::from_millis(7000));
        assert_eq!(config.autoplay, AutoplayPolicy::Deny);
        assert_eq!(config.now, Some(Utc.with_ymd_and_hms(2025, 9, 7, 2, 59, 50).unwrap()));
        assert_eq!(config.link, "?to=Budi");
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_zero_tick_period_and_bad_moments() {
        assert!(Config::try_parse_from(["undangan", "--tick-ms", "0"]).is_err());
        assert!(Config::try_parse_from(["undangan", "--now", "tomorrow"]).is_err());
    }
}
