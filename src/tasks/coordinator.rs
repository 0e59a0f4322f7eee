//! Presentation coordinator: gate, audio readiness, music popup and playback

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    services::{MediaElement, MediaEvent},
    state::PresentationState,
    utils::{OnceSubscription, PersistentSubscription, TimerHandle},
};

/// Default time the music popup stays up
pub const POPUP_DURATION: Duration = Duration::from_millis(2000);

/// Sequences the onboarding of a guest and owns the background music.
///
/// Playback is only ever started or stopped through
/// [`PresentationCoordinator::toggle_playback`], one request at a time.
pub struct PresentationCoordinator<M: MediaElement> {
    media: Arc<M>,
    popup_duration: Duration,
    state: Mutex<PresentationState>,
    /// Channel for presentation state updates
    state_tx: watch::Sender<PresentationState>,
    /// Keep the receiver alive to prevent channel closure
    _state_rx: watch::Receiver<PresentationState>,
    popup_timer: Mutex<Option<TimerHandle>>,
    media_listener: Mutex<Option<TimerHandle>>,
    toggle_lock: tokio::sync::Mutex<()>,
    shutdown_tx: watch::Sender<bool>,
}

impl<M: MediaElement> PresentationCoordinator<M> {
    /// Take ownership of `media` and start listening for its events
    pub fn start(media: Arc<M>, popup_duration: Duration) -> Arc<Self> {
        let initial = PresentationState::new();
        let (state_tx, state_rx) = watch::channel(initial.clone());
        let (shutdown_tx, _) = watch::channel(false);
        let events = PersistentSubscription::new(media.events());

        let coordinator = Arc::new(Self {
            media,
            popup_duration,
            state: Mutex::new(initial),
            state_tx,
            _state_rx: state_rx,
            popup_timer: Mutex::new(None),
            media_listener: Mutex::new(None),
            toggle_lock: tokio::sync::Mutex::new(()),
            shutdown_tx,
        });

        let listener = TimerHandle::spawn(
            "media-events",
            listen_for_media_events(Arc::downgrade(&coordinator), events),
        );
        *lock(&coordinator.media_listener) = Some(listener);

        // Readiness may have been signalled before we subscribed
        if coordinator.media.is_bufferable() {
            coordinator.on_audio_ready();
        }

        info!("Presentation coordinator started, popup duration {:?}", popup_duration);
        coordinator
    }

    /// Current presentation state
    pub fn state(&self) -> PresentationState {
        lock(&self.state).clone()
    }

    /// Receive every presentation state change
    pub fn subscribe(&self) -> watch::Receiver<PresentationState> {
        self.state_tx.subscribe()
    }

    pub fn popup_duration(&self) -> Duration {
        self.popup_duration
    }

    /// Close the guest modal and reveal the content
    pub fn confirm_gate(&self) -> bool {
        let opened = self.update("confirm-gate", PresentationState::confirm_gate);
        if opened {
            info!("Invitation opened");
        }
        opened
    }

    /// The gate's music button: open the invitation and start the music.
    ///
    /// Never pauses: if music is already playing only the gate is closed.
    pub async fn open_with_music(&self) -> bool {
        self.confirm_gate();
        if self.state().is_playing {
            debug!("Music already playing");
            return true;
        }
        self.toggle_playback().await
    }

    /// Pause if playing, otherwise request playback. Returns whether music
    /// is playing afterwards.
    ///
    /// A play request made before the media is bufferable waits for the
    /// readiness signal first. Rejections are logged, never returned.
    pub async fn toggle_playback(&self) -> bool {
        let _guard = self.toggle_lock.lock().await;
        if self.is_shut_down() {
            debug!("Ignoring playback toggle after shutdown");
            return false;
        }

        let playing = if self.state().is_playing {
            self.media.pause();
            self.update("pause", |state| state.set_playing(false));
            info!("Music paused");
            false
        } else {
            self.request_play().await
        };

        self.dismiss_popup("toggle");
        playing
    }

    /// Release every timer and listener and stop the music
    pub fn shutdown(&self) {
        if self.shutdown_tx.send_replace(true) {
            return;
        }

        if let Some(timer) = lock(&self.popup_timer).take() {
            timer.release();
        }
        if let Some(listener) = lock(&self.media_listener).take() {
            listener.release();
        }
        if self.state().is_playing {
            self.media.pause();
            self.update("shutdown", |state| state.set_playing(false));
        }
        info!("Presentation coordinator shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    async fn request_play(&self) -> bool {
        // Subscribe before checking so a signal in between is not missed
        let readiness = OnceSubscription::new(self.media.events(), |event| {
            matches!(event, MediaEvent::CanPlayThrough | MediaEvent::Error(_))
        });

        if !self.media.is_bufferable() {
            debug!("Music not bufferable yet, waiting for readiness before playing");
            let mut shutdown = self.shutdown_tx.subscribe();
            tokio::select! {
                event = readiness.wait() => match event {
                    Some(MediaEvent::CanPlayThrough) => {}
                    Some(other) => {
                        warn!("Music became unavailable while waiting to play: {:?}", other);
                        return false;
                    }
                    None => {
                        warn!("Music source went away while waiting to play");
                        return false;
                    }
                },
                _ = shutdown.wait_for(|down| *down) => {
                    debug!("Shut down while waiting for music readiness");
                    return false;
                }
            }
        }

        match self.media.play().await {
            Ok(()) => {
                self.update("play", |state| state.set_playing(true));
                info!("Music playing");
                true
            }
            Err(e) => {
                warn!("Play request rejected: {}", e);
                self.update("play-rejected", |state| state.set_playing(false));
                false
            }
        }
    }

    fn on_audio_ready(self: &Arc<Self>) {
        if self.update("audio-ready", PresentationState::audio_ready) {
            info!("Music can play through, showing popup for {:?}", self.popup_duration);
            self.arm_popup_timer();
        }
    }

    fn on_media_error(&self, reason: &str) {
        warn!("Music failed to load: {}", reason);
        self.update("media-error", PresentationState::media_failed);
        if let Some(timer) = lock(&self.popup_timer).take() {
            timer.release();
        }
    }

    fn on_ended(&self) {
        self.update("ended", |state| state.set_playing(false));
    }

    fn arm_popup_timer(self: &Arc<Self>) {
        let coordinator = Arc::downgrade(self);
        let timer = TimerHandle::once("music-popup", self.popup_duration, move || {
            if let Some(coordinator) = coordinator.upgrade() {
                coordinator.dismiss_popup("popup-elapsed");
            }
        });
        if let Some(previous) = lock(&self.popup_timer).replace(timer) {
            previous.release();
        }
    }

    fn dismiss_popup(&self, reason: &str) -> bool {
        let dismissed = self.update(reason, PresentationState::dismiss_popup);
        if let Some(timer) = lock(&self.popup_timer).take() {
            timer.release();
        }
        if dismissed {
            debug!("Music popup dismissed ({})", reason);
        }
        dismissed
    }

    /// Apply a transition and notify watchers if it changed anything
    fn update<F>(&self, action: &str, transition: F) -> bool
    where
        F: FnOnce(&mut PresentationState) -> bool,
    {
        let mut state = lock(&self.state);
        let changed = transition(&mut state);
        if changed {
            debug!("{} -> {}", action, *state);
            if let Err(e) = self.state_tx.send(state.clone()) {
                warn!("Failed to send presentation state update: {}", e);
            }
        }
        changed
    }
}

impl<M: MediaElement> Drop for PresentationCoordinator<M> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn listen_for_media_events<M: MediaElement>(
    coordinator: Weak<PresentationCoordinator<M>>,
    mut events: PersistentSubscription<MediaEvent>,
) {
    while let Some(event) = events.next().await {
        let Some(coordinator) = coordinator.upgrade() else {
            break;
        };
        match event {
            MediaEvent::CanPlayThrough => coordinator.on_audio_ready(),
            MediaEvent::Error(reason) => coordinator.on_media_error(&reason),
            MediaEvent::Ended => coordinator.on_ended(),
        }
    }
    debug!("Media event listener stopped");
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
