//! Invitation details module
//! 
//! Resolves who the invitation is for and which celebration it counts down
//! to, from the link the guest opened.

pub mod event;
pub mod guest;

pub use event::{EventCode, EventConfig};
pub use guest::{Personalization, DEFAULT_GUEST_LABEL};

use crate::state::TargetMoment;

/// Everything the page needs from the link, resolved once at load
#[derive(Debug, Clone)]
pub struct Invitation {
    pub guest: Personalization,
    pub event: EventConfig,
    pub target: TargetMoment,
}

impl Invitation {
    pub fn from_link(link: &str, fallback_label: &str) -> Self {
        let guest = Personalization::from_link(link, fallback_label);
        let event = EventConfig::for_code(guest.event);
        let target = TargetMoment::parse(event.target_moment);
        Self { guest, event, target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_event_and_target_from_link() {
        let invitation = Invitation::from_link("?to=Wati&event=3031", DEFAULT_GUEST_LABEL);
        assert_eq!(invitation.guest.guest_name, "Wati");
        assert_eq!(invitation.event.venue_name, "Toko Kesih");
        assert_eq!(invitation.target, TargetMoment::parse("2025-09-06T09:00:00"));
    }
}
