//! JSON snapshot of what the page shows

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    invitation::{EventConfig, Invitation},
    state::{PresentationState, RemainingDuration},
};

/// Everything visible at one moment, for `--json` output
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub guest: String,
    pub event: EventConfig,
    pub target: Option<DateTime<Utc>>,
    pub remaining: RemainingDuration,
    pub presentation: PresentationState,
    pub modal_visible: bool,
    pub popup_visible: bool,
    pub play_enabled: bool,
}

impl Snapshot {
    pub fn new(invitation: &Invitation, remaining: RemainingDuration, presentation: PresentationState) -> Self {
        Self {
            timestamp: Utc::now(),
            guest: invitation.guest.guest_name.clone(),
            event: invitation.event.clone(),
            target: invitation.target.moment(),
            remaining,
            modal_visible: presentation.modal_visible(),
            popup_visible: presentation.popup_visible(),
            play_enabled: presentation.audio_ready_for_play(),
            presentation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invitation::DEFAULT_GUEST_LABEL;

    #[test]
    fn serializes_state_and_countdown() {
        let invitation = Invitation::from_link("?to=Andi", DEFAULT_GUEST_LABEL);
        let remaining = RemainingDuration { days: 1, hours: 2, minutes: 3, seconds: 4 };
        let snapshot = Snapshot::new(&invitation, remaining, PresentationState::new());

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["guest"], "Andi");
        assert_eq!(json["event"]["venue_name"], "Bale Joglo Purbalingga");
        assert_eq!(json["remaining"]["days"], 1);
        assert_eq!(json["presentation"]["phase"]["gated"], "not_ready");
        assert_eq!(json["presentation"]["is_playing"], false);
        assert_eq!(json["modal_visible"], true);
        assert_eq!(json["play_enabled"], false);
    }
}
