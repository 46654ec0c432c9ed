use chrono::{DateTime, Utc};
use skypass_core::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Publishes the current instant on a fixed cadence
#[derive(Clone)]
pub struct ClockSource {
    clock: Arc<dyn Clock>,
    period: Duration,
}

impl ClockSource {
    pub fn new(clock: Arc<dyn Clock>, period: Duration) -> Self {
        Self { clock, period }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start refreshing. The refresh runs until the subscription is dropped.
    pub fn subscribe(&self) -> ClockSubscription {
        let (tx, rx) = watch::channel(self.clock.now());
        let clock = self.clock.clone();
        let period = self.period;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let now = clock.now();
                tracing::debug!("Clock tick at {}", now.format("%H:%M:%S"));
                if tx.send(now).is_err() {
                    break;
                }
            }
        });

        ClockSubscription { rx, handle }
    }
}

/// A mounted view's handle on the clock
pub struct ClockSubscription {
    rx: watch::Receiver<DateTime<Utc>>,
    handle: JoinHandle<()>,
}

impl ClockSubscription {
    /// Latest published instant
    pub fn now(&self) -> DateTime<Utc> {
        *self.rx.borrow()
    }

    /// Wait for the next refresh
    pub async fn next_tick(&mut self) -> Option<DateTime<Utc>> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    #[cfg(test)]
    pub(crate) fn observer(&self) -> watch::Receiver<DateTime<Utc>> {
        self.rx.clone()
    }
}

impl Drop for ClockSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
