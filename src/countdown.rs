use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, instrument};

use crate::deadline;
use crate::model::{Boundary, CountdownSnapshot, CountdownState, Instant};

/// Refresh period of a live countdown.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

const MILLIS_PER_SECOND: u64 = 1_000;
const SECONDS_PER_DAY: u64 = 86_400;

/// Break the time left until `target` into day/hour/minute/second buckets.
///
/// Every bucket is floored. Once `now` reaches the target the result is
/// [`CountdownSnapshot::DONE`].
pub fn snapshot(target: Instant, now: DateTime<Local>) -> CountdownSnapshot {
    let diff = target.timestamp_millis() - now.timestamp_millis();
    if diff <= 0 {
        return CountdownSnapshot::DONE;
    }

    let total_seconds = diff.unsigned_abs() / MILLIS_PER_SECOND;
    CountdownSnapshot {
        is_done: false,
        days: total_seconds / SECONDS_PER_DAY,
        hours: total_seconds / 3_600 % 24,
        minutes: total_seconds / 60 % 60,
        seconds: total_seconds % 60,
    }
}

/// A countdown towards a fixed target.
///
/// The state is recomputed from the target and the current time on every
/// tick; nothing latches, so a clock moved backwards shows up on the next
/// tick.
#[derive(Debug, Clone)]
pub struct Countdown {
    target: Instant,
    period: Duration,
    current: CountdownSnapshot,
}

impl Countdown {
    /// Build a countdown for a date-like target, evaluated against the
    /// current time. Returns `None` when the target does not resolve, which
    /// callers must treat as "no timer", not as a finished one.
    pub fn new(target: &str, mode: Boundary) -> Option<Self> {
        deadline::parse(target, mode).map(|target| Self::starting_at(target, Local::now()))
    }

    pub fn starting_at(target: Instant, now: DateTime<Local>) -> Self {
        Self {
            target,
            period: DEFAULT_TICK,
            current: snapshot(target, now),
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn target(&self) -> Instant {
        self.target
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// The snapshot computed by the most recent tick (or construction).
    pub fn current(&self) -> CountdownSnapshot {
        self.current
    }

    pub fn state(&self) -> CountdownState {
        self.current.state()
    }

    /// Recompute the snapshot for `now`.
    pub fn tick(&mut self, now: DateTime<Local>) -> CountdownSnapshot {
        let next = snapshot(self.target, now);
        if next.state() != self.current.state() {
            debug!(
                deadline = %self.target,
                from = %self.current.state(),
                to = %next.state(),
                "countdown state changed"
            );
        }
        self.current = next;
        next
    }

    /// Drive the countdown on a tokio interval using the local wall clock.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> CountdownTicker {
        self.spawn_with_clock(Local::now)
    }

    #[instrument(skip(self, clock), fields(deadline = %self.target, period = ?self.period))]
    pub fn spawn_with_clock<C>(mut self, clock: C) -> CountdownTicker
    where
        C: Fn() -> DateTime<Local> + Send + 'static,
    {
        let (tx, rx) = watch::channel(self.current);
        let period = self.period;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick fires immediately; construction already published that value
            interval.tick().await;

            loop {
                interval.tick().await;
                let next = self.tick(clock());
                if tx.send(next).is_err() {
                    debug!("no countdown receivers left, stopping");
                    break;
                }
            }
        });

        debug!("countdown ticker started");
        CountdownTicker {
            handle,
            snapshots: rx,
        }
    }
}

/// Handle to a running countdown task. Stopping or dropping it cancels the
/// task.
#[derive(Debug)]
pub struct CountdownTicker {
    handle: JoinHandle<()>,
    snapshots: watch::Receiver<CountdownSnapshot>,
}

impl CountdownTicker {
    /// A receiver that is notified on every tick.
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> CountdownSnapshot {
        *self.snapshots.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        debug!("countdown ticker stopped");
        self.handle.abort();
    }
}
