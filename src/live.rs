//! Widgets that keep refreshing after the initial load.
//!
//! Two timers exist: the launch countdown ticker and the ISS position poller.
//! Both are started through [`spawn_interval`], which hands back an
//! [`IntervalHandle`] so the owner can stop them deterministically.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use astrapatch_core::models::IssState;
use astrapatch_core::Countdown;

use crate::board::{Board, Region};
use crate::client::SpaceClient;
use crate::sources;

/// Handle to a repeating background task.
///
/// Cancelling is idempotent. Dropping the handle also cancels the task.
#[derive(Debug)]
pub struct IntervalHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl IntervalHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cancel(&self) {
        if !self.task.is_finished() {
            tracing::debug!(timer = self.name, "cancelling timer");
        }
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Run `tick` every `period`, first after one full period.
///
/// Ticks run back to back on one task; a slow tick delays the next one
/// rather than piling up.
pub fn spawn_interval<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> IntervalHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let period = clamp_period(period);
    let task = tokio::spawn(async move {
        let mut ticker = delayed_interval(period);
        loop {
            ticker.tick().await;
            tick().await;
        }
    });
    tracing::debug!(timer = name, ?period, "timer started");
    IntervalHandle { name, task }
}

// tokio intervals reject a zero period.
fn clamp_period(period: Duration) -> Duration {
    period.max(Duration::from_millis(1))
}

fn delayed_interval(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

// ============================================================
// Launch countdowns
// ============================================================

/// A countdown attached to one rendered launch.
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownBinding {
    pub label: String,
    pub countdown: Countdown,
}

/// The set of countdowns the ticker re-renders.
#[derive(Debug, Clone, Default)]
pub struct CountdownBindings {
    inner: Arc<Mutex<Vec<CountdownBinding>>>,
}

impl CountdownBindings {
    pub fn replace(&self, bindings: Vec<CountdownBinding>) {
        *self.inner.lock().expect("countdown lock poisoned") = bindings;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("countdown lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One line per binding, recomputed from `now`.
    pub fn render(&self, now: DateTime<Utc>) -> Vec<String> {
        let bindings = self.inner.lock().expect("countdown lock poisoned");
        bindings
            .iter()
            .map(|binding| format!("{}: {}", binding.label, binding.countdown.display(now)))
            .collect()
    }
}

/// Re-render every countdown on each tick.
pub fn start_countdown_ticker(
    bindings: CountdownBindings,
    board: Board,
    period: Duration,
) -> IntervalHandle {
    spawn_interval("countdowns", period, move || {
        board.replace(Region::Countdowns, bindings.render(Utc::now()));
        async {}
    })
}

// ============================================================
// ISS position
// ============================================================

/// Last known ISS position, shared between the adapter and the poller.
#[derive(Debug, Clone, Default)]
pub struct IssTracker {
    state: Arc<Mutex<Option<IssState>>>,
}

impl IssTracker {
    pub fn current(&self) -> Option<IssState> {
        self.state.lock().expect("iss lock poisoned").clone()
    }

    pub fn update(&self, state: IssState) {
        *self.state.lock().expect("iss lock poisoned") = Some(state);
    }
}

/// Poll the ISS position every `period`.
///
/// Each tick starts its own fetch, so a slow response never blocks the next
/// poll; whichever response lands last wins. Fetches belong to the poller
/// task, and cancelling the handle aborts those still in flight.
pub fn start_iss_poller(
    client: SpaceClient,
    board: Board,
    tracker: IssTracker,
    period: Duration,
) -> IntervalHandle {
    let period = clamp_period(period);
    let task = tokio::spawn(async move {
        let mut ticker = delayed_interval(period);
        let mut fetches = JoinSet::new();
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let (client, board, tracker) = (client.clone(), board.clone(), tracker.clone());
                    fetches.spawn(async move {
                        sources::iss::refresh(&client, &board, &tracker).await;
                    });
                }
                Some(_) = fetches.join_next(), if !fetches.is_empty() => {}
            }
        }
    });
    tracing::debug!(timer = "iss", ?period, "timer started");
    IntervalHandle { name: "iss", task }
}
