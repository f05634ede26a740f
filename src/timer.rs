// src/timer.rs

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::session::{self, Shared};

/// Snapshot of the time left on an attempt, refreshed once per second and
/// clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    total_seconds: u64,
}

impl TimeRemaining {
    pub(crate) fn until(deadline: Instant, now: Instant) -> Self {
        Self {
            total_seconds: deadline.saturating_duration_since(now).as_secs(),
        }
    }

    pub fn minutes(&self) -> u64 {
        self.total_seconds / 60
    }

    pub fn seconds(&self) -> u64 {
        self.total_seconds % 60
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn is_expired(&self) -> bool {
        self.total_seconds == 0
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes(), self.seconds())
    }
}

/// The attempt countdown.
///
/// A single 1 Hz tick task recomputes remaining time from the fixed
/// deadline and publishes it for the presentation layer. When the deadline
/// passes it fires exactly one auto-submit through the session and stops
/// itself for good. At most one instance is live per client; the session
/// guarantees that by tearing the previous attempt down before starting a
/// new one.
pub struct DeadlineTimer {
    handle: Option<JoinHandle<()>>,
    remaining: watch::Receiver<TimeRemaining>,
}

impl DeadlineTimer {
    pub(crate) fn start(deadline: Instant, shared: Arc<Shared>) -> Self {
        let (tx, rx) = watch::channel(TimeRemaining::until(deadline, Instant::now()));
        let mut shutdown = shared.shutdown_rx();

        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(Duration::from_secs(1));
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        let left = TimeRemaining::until(deadline, Instant::now());
                        let _ = tx.send(left);

                        if left.is_expired() {
                            session::auto_submit(&shared).await;
                            break;
                        }
                    }
                    _ = shutdown.changed() => break,
                }
            }
        });

        Self {
            handle: Some(handle),
            remaining: rx,
        }
    }

    /// Channel the presentation layer watches for countdown updates.
    pub fn remaining(&self) -> watch::Receiver<TimeRemaining> {
        self.remaining.clone()
    }

    /// Stops the tick task. Stopping an already-stopped timer is a no-op.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
