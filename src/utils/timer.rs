//! Owned handles for registered timers and listeners

use std::{future::Future, time::Duration};
use tokio::task::JoinHandle;
use tracing::debug;

/// A spawned timer (or event listener) tied to the lifetime of its owner.
///
/// The task is aborted when the handle is released or dropped. `release`
/// consumes the handle, so a timer is released at most once.
#[derive(Debug)]
pub struct TimerHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Register a task running `future`
    pub fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!("Registering timer: {}", name);
        Self {
            name,
            task: tokio::spawn(future),
        }
    }

    /// Register a single-shot timer that runs `callback` after `delay`
    pub fn once<F>(name: &'static str, delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::spawn(name, async move {
            tokio::time::sleep(delay).await;
            callback();
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the task has run to completion or was aborted
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Release the timer, cancelling it if it has not fired yet
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!("Releasing timer: {}", self.name);
        }
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tokio::time::sleep;

    fn counting_timer(delay_ms: u64) -> (TimerHandle, Arc<AtomicUsize>) {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let timer = TimerHandle::once("test", Duration::from_millis(delay_ms), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (timer, fired)
    }

    #[tokio::test(start_paused = true)]
    async fn once_fires_a_single_time_after_delay() {
        let (timer, fired) = counting_timer(2000);

        sleep(Duration::from_millis(1999)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        sleep(Duration::from_secs(60)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn released_timer_never_fires() {
        let (timer, fired) = counting_timer(500);
        assert_eq!(timer.name(), "test");
        timer.release();

        sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_releases_the_timer() {
        let (timer, fired) = counting_timer(500);
        drop(timer);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
