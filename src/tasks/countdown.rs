//! Countdown clock background task

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{sync::watch, time::MissedTickBehavior};
use tracing::{debug, info};

use crate::{
    state::{RemainingDuration, TargetMoment},
    utils::{Clock, TimerHandle},
};

/// Default refresh period of the countdown
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Shared between the clock and its interval task
struct Ticker {
    target: TargetMoment,
    clock: Arc<dyn Clock>,
    remaining_tx: watch::Sender<RemainingDuration>,
    reached: AtomicBool,
}

impl Ticker {
    fn tick(&self) -> RemainingDuration {
        let remaining = RemainingDuration::between(self.target, self.clock.now());
        if remaining.is_zero() && !self.reached.swap(true, Ordering::SeqCst) {
            info!("Countdown reached the target moment");
        }
        self.remaining_tx.send_replace(remaining);
        remaining
    }
}

/// Reports the time remaining until a fixed target, refreshed on an interval.
///
/// Owns exactly one interval task, released by [`CountdownClock::shutdown`]
/// or on drop.
pub struct CountdownClock {
    ticker: Arc<Ticker>,
    interval: TimerHandle,
}

impl CountdownClock {
    /// Compute the first value now and start refreshing every `period`
    pub fn start<C: Clock>(target: TargetMoment, period: Duration, clock: C) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(clock);
        let (remaining_tx, _) = watch::channel(RemainingDuration::ZERO);
        let ticker = Arc::new(Ticker {
            target,
            clock,
            remaining_tx,
            reached: AtomicBool::new(false),
        });
        ticker.tick();

        let period = period.max(Duration::from_millis(1));
        let task_ticker = Arc::clone(&ticker);
        let interval = TimerHandle::spawn("countdown", async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately and was already computed
            interval.tick().await;
            loop {
                interval.tick().await;
                let remaining = task_ticker.tick();
                debug!("Countdown tick: {}", remaining);
            }
        });

        info!("Countdown started, refreshing every {:?}", period);
        Self { ticker, interval }
    }

    /// Recompute from the clock now and publish the value
    pub fn tick(&self) -> RemainingDuration {
        self.ticker.tick()
    }

    /// Last published value
    pub fn current(&self) -> RemainingDuration {
        *self.ticker.remaining_tx.borrow()
    }

    pub fn target(&self) -> TargetMoment {
        self.ticker.target
    }

    /// Receive every refreshed value
    pub fn subscribe(&self) -> watch::Receiver<RemainingDuration> {
        self.ticker.remaining_tx.subscribe()
    }

    /// Stop refreshing
    pub fn shutdown(self) {
        self.interval.release();
        info!("Countdown stopped");
    }
}
