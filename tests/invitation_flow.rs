use std::{sync::Arc, time::Duration};

use chrono::{TimeDelta, TimeZone, Utc};
use tokio::time::sleep;
use undangan::{
    invitation::{EventConfig, Invitation, DEFAULT_GUEST_LABEL},
    services::{AutoplayPolicy, SimulatedMedia, MUSIC_SOURCES},
    state::{Phase, RemainingDuration},
    tasks::{CountdownClock, PresentationCoordinator, TICK_PERIOD},
    utils::ManualClock,
};

#[tokio::test(start_paused = true)]
async fn guest_opens_invitation_and_listens_to_music() {
    let invitation = Invitation::from_link("https://undangan.example/?to=Keluarga%20Wibowo", DEFAULT_GUEST_LABEL);
    assert_eq!(invitation.guest.guest_name, "Keluarga Wibowo");
    assert_eq!(invitation.event, EventConfig::primary());

    // Ten seconds before the reception, venue time
    let now = Utc.with_ymd_and_hms(2025, 9, 7, 2, 59, 50).unwrap();
    let clock = ManualClock::new(now);
    let countdown = CountdownClock::start(invitation.target, TICK_PERIOD, clock.clone());
    assert_eq!(countdown.current(), RemainingDuration { days: 0, hours: 0, minutes: 0, seconds: 10 });

    let media = Arc::new(SimulatedMedia::new(MUSIC_SOURCES, AutoplayPolicy::Allow));
    let coordinator = PresentationCoordinator::start(Arc::clone(&media), Duration::from_millis(2000));
    media.load(Duration::from_millis(1500));

    assert!(coordinator.state().modal_visible());
    assert!(coordinator.confirm_gate());
    assert_eq!(coordinator.state().phase, Phase::AwaitingAudioReady);

    // Buffering finishes, the popup shows, then goes away on its own
    sleep(Duration::from_millis(1600)).await;
    assert_eq!(coordinator.state().phase, Phase::PoppedUp);
    sleep(Duration::from_millis(2000)).await;
    assert_eq!(coordinator.state().phase, Phase::Steady);

    assert!(coordinator.toggle_playback().await);
    assert!(media.is_playing());

    clock.advance(TimeDelta::seconds(30));
    assert!(countdown.tick().is_zero());

    coordinator.shutdown();
    countdown.shutdown();
    assert!(!media.is_playing());
}

#[tokio::test(start_paused = true)]
async fn strict_autoplay_policy_never_breaks_the_page() {
    let media = Arc::new(SimulatedMedia::new(MUSIC_SOURCES, AutoplayPolicy::Deny));
    let coordinator = PresentationCoordinator::start(Arc::clone(&media), Duration::from_millis(7000));
    media.load(Duration::from_millis(100));

    assert!(!coordinator.open_with_music().await);
    let state = coordinator.state();
    assert!(state.content_visible());
    assert!(!state.is_playing);
    assert!(state.audio_ready_for_play());
}

#[tokio::test(start_paused = true)]
async fn second_event_link_counts_down_to_its_own_date() {
    let invitation = Invitation::from_link("?to=Ibu%20Sri&event=3031", DEFAULT_GUEST_LABEL);
    assert_eq!(invitation.event, EventConfig::toko_kesih());

    let now = Utc.with_ymd_and_hms(2025, 9, 5, 2, 0, 0).unwrap();
    let countdown = CountdownClock::start(invitation.target, TICK_PERIOD, ManualClock::new(now));
    assert_eq!(countdown.current(), RemainingDuration { days: 1, hours: 0, minutes: 0, seconds: 0 });
}
