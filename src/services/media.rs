//! Background music media element

use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError, Weak,
    },
    time::Duration,
};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::utils::TimerHandle;

/// Sources of the looping background track, in order of preference
pub const MUSIC_SOURCES: [&str; 2] = ["/music.mp3", "/music.ogg"];

/// Events emitted by a media element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// Enough is buffered to play through without interruption
    CanPlayThrough,
    /// Loading failed; the element is no longer bufferable
    Error(String),
    /// Playback reached the end of a non-looping track
    Ended,
}

/// Why a play request was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("playback not allowed: {0}")]
    NotAllowed(String),
    #[error("no supported source for the audio track")]
    NotSupported,
    #[error("play request aborted before the media was ready")]
    Aborted,
}

/// An audio element owned by the presentation coordinator
pub trait MediaElement: Send + Sync + 'static {
    /// Whether enough is buffered to play through
    fn is_bufferable(&self) -> bool;

    /// Request playback. The environment may grant or reject it.
    fn play(&self) -> impl Future<Output = Result<(), PlaybackError>> + Send;

    /// Pause playback. Always succeeds.
    fn pause(&self);

    /// Subscribe to media events
    fn events(&self) -> broadcast::Receiver<MediaEvent>;
}

/// How the simulated environment answers play requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AutoplayPolicy {
    /// Every play request is granted
    #[default]
    Allow,
    /// Every play request is rejected, as a strict autoplay policy would
    Deny,
}

/// A looping audio element that buffers for a while and then plays
#[derive(Debug)]
pub struct SimulatedMedia {
    sources: Vec<String>,
    policy: AutoplayPolicy,
    bufferable: AtomicBool,
    playing: AtomicBool,
    events_tx: broadcast::Sender<MediaEvent>,
    buffering: Mutex<Option<TimerHandle>>,
}

impl SimulatedMedia {
    pub fn new<I, S>(sources: I, policy: AutoplayPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (events_tx, _) = broadcast::channel(16);
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            policy,
            bufferable: AtomicBool::new(false),
            playing: AtomicBool::new(false),
            events_tx,
            buffering: Mutex::new(None),
        }
    }

    /// Start buffering; the element becomes bufferable after `delay`
    pub fn load(self: &Arc<Self>, delay: Duration) {
        let Some(source) = self.sources.first() else {
            self.fail_load("no audio source configured");
            return;
        };
        info!("Loading background music from {}", source);

        let media: Weak<Self> = Arc::downgrade(self);
        let timer = TimerHandle::once("audio-buffering", delay, move || {
            if let Some(media) = media.upgrade() {
                media.mark_ready();
            }
        });
        if let Some(previous) = self.lock_buffering().replace(timer) {
            previous.release();
        }
    }

    /// Buffering finished: emit the readiness signal
    pub fn mark_ready(&self) {
        self.bufferable.store(true, Ordering::SeqCst);
        debug!("Background music can play through");
        self.emit(MediaEvent::CanPlayThrough);
    }

    /// Loading failed: no longer bufferable, playback stops
    pub fn fail_load(&self, reason: &str) {
        if let Some(timer) = self.lock_buffering().take() {
            timer.release();
        }
        self.bufferable.store(false, Ordering::SeqCst);
        self.playing.store(false, Ordering::SeqCst);
        warn!("Background music failed to load: {}", reason);
        self.emit(MediaEvent::Error(reason.to_string()));
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    /// Stop buffering and playback
    pub fn unload(&self) {
        if let Some(timer) = self.lock_buffering().take() {
            timer.release();
        }
        self.playing.store(false, Ordering::SeqCst);
    }

    fn emit(&self, event: MediaEvent) {
        if let Err(e) = self.events_tx.send(event) {
            debug!("No listeners for media event: {:?}", e.0);
        }
    }

    fn lock_buffering(&self) -> std::sync::MutexGuard<'_, Option<TimerHandle>> {
        self.buffering.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MediaElement for SimulatedMedia {
    fn is_bufferable(&self) -> bool {
        self.bufferable.load(Ordering::SeqCst)
    }

    async fn play(&self) -> Result<(), PlaybackError> {
        // The environment answers play requests asynchronously
        tokio::task::yield_now().await;

        if self.sources.is_empty() {
            return Err(PlaybackError::NotSupported);
        }
        if !self.is_bufferable() {
            return Err(PlaybackError::Aborted);
        }
        match self.policy {
            AutoplayPolicy::Allow => {
                self.playing.store(true, Ordering::SeqCst);
                Ok(())
            }
            AutoplayPolicy::Deny => Err(PlaybackError::NotAllowed(
                "the environment blocked audio playback".to_string(),
            )),
        }
    }

    fn pause(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }

    fn events(&self) -> broadcast::Receiver<MediaEvent> {
        self.events_tx.subscribe()
    }
}
