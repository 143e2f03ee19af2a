use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate, Utc};

use crate::board::Board;
use crate::client::{ClientError, SpaceClient};
use crate::config::DashboardConfig;
use crate::live::{self, CountdownBindings, IntervalHandle, IssTracker};
use crate::loader::LoadTask;
use crate::sources;

/// Everything the adapters share: configuration, the HTTP client, the board,
/// and the state owned by live widgets.
///
/// Cheap to clone; clones share all state.
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: Arc<DashboardConfig>,
    client: SpaceClient,
    board: Board,
    countdowns: CountdownBindings,
    iss: IssTracker,
    timers: Arc<Mutex<Vec<IntervalHandle>>>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self, ClientError> {
        let client = SpaceClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
            board: Board::new(),
            countdowns: CountdownBindings::default(),
            iss: IssTracker::default(),
            timers: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn client(&self) -> &SpaceClient {
        &self.client
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn countdowns(&self) -> &CountdownBindings {
        &self.countdowns
    }

    pub fn iss(&self) -> &IssTracker {
        &self.iss
    }

    /// Today's date in UTC, used for upstream query windows.
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Today's date on the local calendar, used for the moon phase.
    pub fn local_today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// The initial load sequence, in display order.
    pub fn load_tasks(&self) -> Vec<LoadTask> {
        vec![
            self.task("launches", |d| async move {
                sources::launches::load(&d).await;
                anyhow::Ok(())
            }),
            self.task("iss_tracking", |d| async move {
                sources::iss::load(&d).await;
                anyhow::Ok(())
            }),
            self.task("satellites", |d| async move {
                sources::satellites::load(&d).await;
                anyhow::Ok(())
            }),
            self.task("crew", |d| async move {
                sources::crew::load(&d).await;
                anyhow::Ok(())
            }),
            self.task("spacewalks", |d| async move {
                sources::spacewalks::load(&d).await;
                anyhow::Ok(())
            }),
            self.task("solar_events", |d| async move {
                sources::solar::load(&d).await;
                anyhow::Ok(())
            }),
            self.task("asteroids", |d| async move {
                sources::asteroids::load(&d).await;
                anyhow::Ok(())
            }),
            self.task("mars_weather", |d| async move {
                sources::panels::mars_weather(d.board());
                anyhow::Ok(())
            }),
            self.task("meteor_showers", |d| async move {
                sources::panels::meteor_showers(d.board());
                anyhow::Ok(())
            }),
            self.task("moon_phase", |d| async move {
                sources::panels::moon_phase(d.board(), d.local_today());
                anyhow::Ok(())
            }),
            self.task("apod", |d| async move {
                sources::apod::load(&d).await;
                anyhow::Ok(())
            }),
        ]
    }

    fn task<F, Fut>(&self, name: &'static str, run: F) -> LoadTask
    where
        F: FnOnce(Dashboard) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let dashboard = self.clone();
        LoadTask::new(name, move || run(dashboard))
    }

    /// Start re-rendering launch countdowns on the configured interval.
    pub fn start_countdown_ticker(&self) {
        let handle = live::start_countdown_ticker(
            self.countdowns.clone(),
            self.board.clone(),
            self.config.countdown_interval(),
        );
        self.register_timer(handle);
    }

    /// Start polling the ISS position on the configured interval.
    pub fn start_iss_poller(&self) {
        let handle = live::start_iss_poller(
            self.client.clone(),
            self.board.clone(),
            self.iss.clone(),
            self.config.iss_poll_interval(),
        );
        self.register_timer(handle);
    }

    fn register_timer(&self, handle: IntervalHandle) {
        tracing::info!(timer = handle.name(), "live refresh started");
        self.timers.lock().expect("timer lock poisoned").push(handle);
    }

    /// Names of the timers currently registered.
    pub fn active_timers(&self) -> Vec<&'static str> {
        self.timers
            .lock()
            .expect("timer lock poisoned")
            .iter()
            .filter(|handle| !handle.is_finished())
            .map(|handle| handle.name())
            .collect()
    }

    /// Cancel every live timer.
    pub fn shutdown(&self) {
        let timers: Vec<_> = self
            .timers
            .lock()
            .expect("timer lock poisoned")
            .drain(..)
            .collect();
        for handle in &timers {
            handle.cancel();
        }
        tracing::info!(count = timers.len(), "live refresh stopped");
    }
}
