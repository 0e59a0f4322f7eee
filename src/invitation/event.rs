//! Fixed event configurations selected by the `event` link parameter

use serde::Serialize;

/// Known event codes. Anything unrecognised maps to [`EventCode::Primary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCode {
    #[default]
    Primary,
    TokoKesih,
}

impl EventCode {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("3031") => Self::TokoKesih,
            _ => Self::Primary,
        }
    }
}

/// Date and venue of one of the celebrations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventConfig {
    pub code: EventCode,
    /// Naive venue-local date-time the countdown runs to
    pub target_moment: &'static str,
    pub venue_label: &'static str,
    pub venue_name: &'static str,
    pub map_url: &'static str,
}

impl EventConfig {
    pub fn primary() -> Self {
        Self {
            code: EventCode::Primary,
            target_moment: "2025-09-07T10:00:00",
            venue_label: "Resepsi",
            venue_name: "Bale Joglo Purbalingga",
            map_url: "https://www.google.com/maps?q=Bale+Joglo+Purbalingga&output=embed",
        }
    }

    pub fn toko_kesih() -> Self {
        Self {
            code: EventCode::TokoKesih,
            target_moment: "2025-09-06T09:00:00",
            venue_label: "Akad Nikah",
            venue_name: "Toko Kesih",
            map_url: "https://www.google.com/maps?q=Toko+Kesih&output=embed",
        }
    }

    pub fn for_code(code: EventCode) -> Self {
        match code {
            EventCode::Primary => Self::primary(),
            EventCode::TokoKesih => Self::toko_kesih(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_3031_selects_toko_kesih() {
        let config = EventConfig::for_code(EventCode::from_param(Some("3031")));
        assert_eq!(config, EventConfig::toko_kesih());
        assert_eq!(config.venue_name, "Toko Kesih");
    }

    #[test]
    fn anything_else_selects_the_primary_event() {
        for value in [None, Some(""), Some("3032"), Some("toko"), Some("03031"), Some(" 3031"), Some("3031 ")] {
            let config = EventConfig::for_code(EventCode::from_param(value));
            assert_eq!(config, EventConfig::primary(), "value {value:?}");
            assert_eq!(config.venue_name, "Bale Joglo Purbalingga");
        }
    }

    #[test]
    fn every_configuration_has_a_parsable_target() {
        for config in [EventConfig::primary(), EventConfig::toko_kesih()] {
            assert!(crate::state::TargetMoment::parse(config.target_moment).is_valid());
        }
    }
}
