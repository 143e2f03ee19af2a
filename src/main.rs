use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use astrapatch::config::DashboardConfig;
use astrapatch::dashboard::Dashboard;
use astrapatch::loader::{LoaderPhase, LoaderStatus, ProgressiveLoader};
use astrapatch::render::{render_board, render_progress_bar};
use astrapatch::sources::panels::render_moon;
use astrapatch_core::{moon_phase, Countdown};

const PROGRESS_BAR_WIDTH: usize = 40;
const REDRAW_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "astra")]
#[command(about = "Live space dashboard: launches, the ISS, solar activity and more")]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only show launches from providers matching this name ("all" shows every launch)
    #[arg(long, global = true)]
    provider: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every source, then keep the dashboard live until Ctrl-C
    Watch,
    /// Load every source once, print the dashboard and exit
    Snapshot,
    /// Show the moon phase for a date
    Moon {
        /// Date as YYYY-MM-DD (defaults to today, local time)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the time remaining until an RFC 3339 instant
    Countdown {
        target: String,
    },
}

/// Initialize tracing on stderr so stdout carries only the dashboard.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "astrapatch=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Snapshot) => {
            let dashboard = load_dashboard(cli.config.as_deref(), cli.provider.as_deref()).await?;
            print!("{}", render_board(dashboard.board()));
            dashboard.shutdown();
        }
        Some(Commands::Moon { date }) => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            for line in render_moon(&moon_phase(date)) {
                println!("{}", line);
            }
        }
        Some(Commands::Countdown { target }) => {
            let countdown = Countdown::parse(&target)
                .ok_or_else(|| anyhow::anyhow!("Invalid launch time: {}", target))?;
            println!("{}", countdown.display(Utc::now()));
        }
        Some(Commands::Watch) | None => {
            let dashboard = load_dashboard(cli.config.as_deref(), cli.provider.as_deref()).await?;
            watch_dashboard(&dashboard).await?;
            dashboard.shutdown();
        }
    }

    Ok(())
}

/// Run the initial load with a progress bar on stderr.
async fn load_dashboard(
    config_path: Option<&std::path::Path>,
    provider: Option<&str>,
) -> anyhow::Result<Dashboard> {
    let config = DashboardConfig::load(config_path).with_launch_provider(provider);
    let dashboard = Dashboard::new(config)?;

    let mut loader = ProgressiveLoader::new(dashboard.load_tasks())
        .with_reveal_delay(dashboard.config().reveal_delay())
        .with_task_timeout(dashboard.config().task_timeout());
    let progress = tokio::spawn(show_progress(loader.subscribe()));

    let report = loader.run().await;
    progress.await?;

    for (task, outcome) in report.failures() {
        tracing::warn!(task, ?outcome, "source unavailable");
    }
    Ok(dashboard)
}

async fn show_progress(mut status: watch::Receiver<LoaderStatus>) {
    loop {
        let current = *status.borrow_and_update();
        eprint!("\r{}", render_progress_bar(&current, PROGRESS_BAR_WIDTH));
        let _ = std::io::stderr().flush();
        if current.phase == LoaderPhase::Ready || status.changed().await.is_err() {
            break;
        }
    }
    eprintln!();
}

/// Redraw the board every second until Ctrl-C.
async fn watch_dashboard(dashboard: &Dashboard) -> anyhow::Result<()> {
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                result?;
                tracing::info!("Shutting down");
                return Ok(());
            }
            _ = redraw.tick() => {
                // Clear screen, cursor home.
                print!("\x1b[2J\x1b[H{}", render_board(dashboard.board()));
                std::io::stdout().flush()?;
            }
        }
    }
}
