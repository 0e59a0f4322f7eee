//! Explicit subscriptions to broadcast event sources
//!
//! Single-shot and persistent listeners are distinct types: a
//! [`OnceSubscription`] is consumed by waiting on it, so it cannot fire twice.

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

/// Subscription that yields the first matching event and is then discarded
pub struct OnceSubscription<E> {
    rx: broadcast::Receiver<E>,
    matches: fn(&E) -> bool,
}

impl<E: Clone> OnceSubscription<E> {
    pub fn new(rx: broadcast::Receiver<E>, matches: fn(&E) -> bool) -> Self {
        Self { rx, matches }
    }

    /// Wait for the first matching event. `None` if the source closed first.
    pub async fn wait(mut self) -> Option<E> {
        loop {
            match self.rx.recv().await {
                Ok(event) if (self.matches)(&event) => return Some(event),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Subscription lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

/// Subscription that keeps yielding events until the source closes
#[derive(Debug)]
pub struct PersistentSubscription<E> {
    rx: broadcast::Receiver<E>,
}

impl<E: Clone> PersistentSubscription<E> {
    pub fn new(rx: broadcast::Receiver<E>) -> Self {
        Self { rx }
    }

    pub async fn next(&mut self) -> Option<E> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Subscription lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
