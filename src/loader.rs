//! Progressive loading of dashboard sources.
//!
//! Tasks run strictly one after another in declared order. Every task
//! settles (completes, fails, panics, or times out) before the next one
//! starts, and every settlement advances the shared [`LoadProgress`] by one,
//! so the bar always reaches 100% even when every source is down.
//!
//! There is no timeout unless one is configured: a task that never settles
//! stalls the rest of the sequence and the reveal.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::watch;

use astrapatch_core::LoadProgress;

pub type TaskFuture = BoxFuture<'static, anyhow::Result<()>>;

type TaskFn = Box<dyn FnOnce() -> TaskFuture + Send>;

/// One unit of the initial load.
pub struct LoadTask {
    name: &'static str,
    run: Option<TaskFn>,
    completed: bool,
}

impl LoadTask {
    pub fn new<F, Fut>(name: &'static str, run: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name,
            run: Some(Box::new(move || run().boxed())),
            completed: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the task has settled, successfully or not.
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

impl std::fmt::Debug for LoadTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadTask")
            .field("name", &self.name)
            .field("completed", &self.completed)
            .finish()
    }
}

/// How a task settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    Failed(String),
    Panicked(String),
    TimedOut,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    Loading,
    Ready,
}

/// What the loading screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderStatus {
    pub phase: LoaderPhase,
    pub progress: LoadProgress,
}

/// Outcome of every task, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub outcomes: Vec<(&'static str, TaskOutcome)>,
}

impl LoadReport {
    pub fn failures(&self) -> impl Iterator<Item = &(&'static str, TaskOutcome)> {
        self.outcomes.iter().filter(|(_, outcome)| !outcome.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }
}

pub struct ProgressiveLoader {
    tasks: Vec<LoadTask>,
    reveal_delay: Duration,
    task_timeout: Option<Duration>,
    status: watch::Sender<LoaderStatus>,
}

impl ProgressiveLoader {
    pub fn new(tasks: Vec<LoadTask>) -> Self {
        let (status, _) = watch::channel(LoaderStatus {
            phase: LoaderPhase::Loading,
            progress: LoadProgress::new(tasks.len()),
        });
        Self {
            tasks,
            reveal_delay: Duration::ZERO,
            task_timeout: None,
            status,
        }
    }

    /// Pause between the last task settling and [`LoaderPhase::Ready`].
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    pub fn with_task_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<LoaderStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> LoaderStatus {
        *self.status.borrow()
    }

    pub fn tasks(&self) -> &[LoadTask] {
        &self.tasks
    }

    /// Run every pending task in order, then reveal.
    pub async fn run(&mut self) -> LoadReport {
        let mut report = LoadReport::default();
        let mut progress = self.status().progress;
        tracing::info!(tasks = self.tasks.len(), "loading dashboard");

        for task in self.tasks.iter_mut() {
            let Some(run) = task.run.take() else {
                continue;
            };

            let outcome = settle(run(), self.task_timeout).await;
            match &outcome {
                TaskOutcome::Completed => tracing::debug!(task = task.name, "task loaded"),
                TaskOutcome::Failed(msg) => {
                    tracing::error!(task = task.name, "task failed: {}", msg)
                }
                TaskOutcome::Panicked(msg) => {
                    tracing::error!(task = task.name, "task panicked: {}", msg)
                }
                TaskOutcome::TimedOut => tracing::error!(task = task.name, "task timed out"),
            }

            task.completed = true;
            progress.advance();
            self.status.send_replace(LoaderStatus {
                phase: LoaderPhase::Loading,
                progress,
            });
            report.outcomes.push((task.name, outcome));
        }

        if !self.reveal_delay.is_zero() {
            tokio::time::sleep(self.reveal_delay).await;
        }
        self.status.send_replace(LoaderStatus {
            phase: LoaderPhase::Ready,
            progress,
        });
        tracing::info!(failed = report.failures().count(), "dashboard ready");

        report
    }
}

async fn settle(future: TaskFuture, timeout: Option<Duration>) -> TaskOutcome {
    let guarded = AssertUnwindSafe(future).catch_unwind();
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, guarded).await {
            Ok(result) => result,
            Err(_) => return TaskOutcome::TimedOut,
        },
        None => guarded.await,
    };

    match result {
        Ok(Ok(())) => TaskOutcome::Completed,
        Ok(Err(e)) => TaskOutcome::Failed(format!("{:#}", e)),
        Err(panic) => TaskOutcome::Panicked(panic_message(panic.as_ref())),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
