//! Presentation state of the invitation page
//!
//! The gate (guest modal), audio readiness and the music popup are one
//! sequence, modelled as a single [`Phase`]. Playback is the only flag
//! that varies independently of it.

use std::fmt;
use serde::{Deserialize, Serialize};

/// What the audio is doing while the gate is still closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioStage {
    /// Media not bufferable yet
    NotReady,
    /// Media ready, popup timer running
    PopupRunning,
    /// Media ready, popup already dismissed
    PopupDone,
}

/// Onboarding sequence: gate, audio readiness, popup, steady
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Guest modal shown, content hidden
    Gated(AudioStage),
    /// Content visible, waiting for the audio to become bufferable
    AwaitingAudioReady,
    /// Content visible, music popup shown
    PoppedUp,
    /// Content visible, popup gone
    Steady,
}

/// Full presentation state: the phase plus whether music is playing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationState {
    pub phase: Phase,
    pub is_playing: bool,
}

impl PresentationState {
    /// State at page load: gated, audio not ready, silent
    pub fn new() -> Self {
        Self {
            phase: Phase::Gated(AudioStage::NotReady),
            is_playing: false,
        }
    }

    /// Close the guest modal. Content becomes visible whatever the audio is doing.
    pub fn confirm_gate(&mut self) -> bool {
        let next = match self.phase {
            Phase::Gated(AudioStage::NotReady) => Phase::AwaitingAudioReady,
            Phase::Gated(AudioStage::PopupRunning) => Phase::PoppedUp,
            Phase::Gated(AudioStage::PopupDone) => Phase::Steady,
            _ => return false,
        };
        self.phase = next;
        true
    }

    /// The media can play through.
    ///
    /// Returns `true` when the popup was shown and its timer must be armed.
    /// If music is already playing there is nothing to invite the guest to,
    /// so the popup is skipped.
    pub fn audio_ready(&mut self) -> bool {
        let next = match (self.phase, self.is_playing) {
            (Phase::Gated(AudioStage::NotReady), false) => Phase::Gated(AudioStage::PopupRunning),
            (Phase::Gated(AudioStage::NotReady), true) => Phase::Gated(AudioStage::PopupDone),
            (Phase::AwaitingAudioReady, false) => Phase::PoppedUp,
            (Phase::AwaitingAudioReady, true) => Phase::Steady,
            _ => return false,
        };
        self.phase = next;
        matches!(next, Phase::Gated(AudioStage::PopupRunning) | Phase::PoppedUp)
    }

    /// Hide the popup, either because its timer elapsed or the guest toggled playback
    pub fn dismiss_popup(&mut self) -> bool {
        let next = match self.phase {
            Phase::Gated(AudioStage::PopupRunning) => Phase::Gated(AudioStage::PopupDone),
            Phase::PoppedUp => Phase::Steady,
            _ => return false,
        };
        self.phase = next;
        true
    }

    /// The media failed to load: back to not ready, playback stopped
    pub fn media_failed(&mut self) -> bool {
        let next = match self.phase {
            Phase::Gated(_) => Phase::Gated(AudioStage::NotReady),
            _ => Phase::AwaitingAudioReady,
        };
        let changed = next != self.phase || self.is_playing;
        self.phase = next;
        self.is_playing = false;
        changed
    }

    pub fn set_playing(&mut self, playing: bool) -> bool {
        let changed = self.is_playing != playing;
        self.is_playing = playing;
        changed
    }

    pub fn modal_visible(&self) -> bool {
        matches!(self.phase, Phase::Gated(_))
    }

    pub fn content_visible(&self) -> bool {
        !self.modal_visible()
    }

    /// Whether the play control is enabled
    pub fn audio_ready_for_play(&self) -> bool {
        !matches!(
            self.phase,
            Phase::Gated(AudioStage::NotReady) | Phase::AwaitingAudioReady
        )
    }

    pub fn popup_visible(&self) -> bool {
        matches!(self.phase, Phase::PoppedUp)
    }
}

impl Default for PresentationState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PresentationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self.phase {
            Phase::Gated(AudioStage::NotReady) => "gated (audio loading)",
            Phase::Gated(AudioStage::PopupRunning) => "gated (audio ready, popup pending)",
            Phase::Gated(AudioStage::PopupDone) => "gated (audio ready)",
            Phase::AwaitingAudioReady => "open (audio loading)",
            Phase::PoppedUp => "open (music popup)",
            Phase::Steady => "open",
        };
        write!(f, "{}, {}", phase, if self.is_playing { "playing" } else { "paused" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_gated_and_silent() {
        let state = PresentationState::new();
        assert_eq!(state.phase, Phase::Gated(AudioStage::NotReady));
        assert!(state.modal_visible());
        assert!(!state.is_playing);
        assert!(!state.audio_ready_for_play());
    }

    #[test]
    fn confirming_the_gate_always_reveals_content() {
        for stage in [AudioStage::NotReady, AudioStage::PopupRunning, AudioStage::PopupDone] {
            let mut state = PresentationState { phase: Phase::Gated(stage), is_playing: false };
            assert!(state.confirm_gate());
            assert!(state.content_visible(), "stage {stage:?}");
        }
    }

    #[test]
    fn confirming_twice_is_a_no_op() {
        let mut state = PresentationState::new();
        assert!(state.confirm_gate());
        assert!(!state.confirm_gate());
        assert_eq!(state.phase, Phase::AwaitingAudioReady);
    }

    #[test]
    fn readiness_after_opening_shows_popup_then_settles() {
        let mut state = PresentationState::new();
        state.confirm_gate();

        assert!(state.audio_ready());
        assert!(state.popup_visible());
        assert!(state.audio_ready_for_play());

        assert!(state.dismiss_popup());
        assert_eq!(state.phase, Phase::Steady);
        assert!(!state.dismiss_popup());
    }

    #[test]
    fn readiness_behind_the_gate_carries_over() {
        let mut state = PresentationState::new();
        assert!(state.audio_ready());
        assert_eq!(state.phase, Phase::Gated(AudioStage::PopupRunning));

        state.confirm_gate();
        assert!(state.popup_visible());
    }

    #[test]
    fn popup_that_expired_behind_the_gate_is_not_shown() {
        let mut state = PresentationState::new();
        state.audio_ready();
        assert!(state.dismiss_popup());

        state.confirm_gate();
        assert_eq!(state.phase, Phase::Steady);
    }

    #[test]
    fn repeated_readiness_does_not_rearm_popup() {
        let mut state = PresentationState::new();
        state.confirm_gate();
        assert!(state.audio_ready());
        assert!(!state.audio_ready());
        state.dismiss_popup();
        assert!(!state.audio_ready());
        assert_eq!(state.phase, Phase::Steady);
    }

    #[test]
    fn readiness_while_playing_skips_popup() {
        let mut state = PresentationState::new();
        state.confirm_gate();
        state.set_playing(true);

        assert!(!state.audio_ready());
        assert_eq!(state.phase, Phase::Steady);
    }

    #[test]
    fn media_failure_resets_readiness_and_playback() {
        let mut state = PresentationState::new();
        state.confirm_gate();
        state.audio_ready();
        state.set_playing(true);

        assert!(state.media_failed());
        assert_eq!(state.phase, Phase::AwaitingAudioReady);
        assert!(!state.is_playing);
        assert!(!state.audio_ready_for_play());
        assert!(!state.media_failed());

        let mut gated = PresentationState::new();
        gated.audio_ready();
        assert!(gated.media_failed());
        assert_eq!(gated.phase, Phase::Gated(AudioStage::NotReady));
    }

    #[test]
    fn playback_flag_is_orthogonal() {
        let mut state = PresentationState::new();
        assert!(state.set_playing(true));
        assert!(!state.set_playing(true));
        assert!(state.modal_visible());
        assert_eq!(state.to_string(), "gated (audio loading), playing");
    }
}
