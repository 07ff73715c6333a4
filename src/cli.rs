//! Command-line interface components.

use crate::config::Config;
use crate::fetch::NdbcClient;
use crate::models::{PublishOutcome, RunOutcome};
use crate::pipeline::Pipeline;
use crate::publish::StatusPublisher;
use crate::storage::SqliteStore;
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "buoybot")]
#[command(about = "Fetch the latest NDBC buoy observation, store it and post a swell report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "CONFIGPATH", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Station to fetch instead of the configured BuoyId
    #[arg(short, long)]
    pub station: Option<String>,

    /// SQLite database file instead of the configured DatabaseFile
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Fetch and print the observation without saving or publishing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Load the configuration and apply command-line overrides
    pub fn load_config(&self) -> crate::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::from_env()?,
        };

        if let Some(station) = &self.station {
            config = config.with_station(station.as_str())?;
        }
        if let Some(database) = &self.database {
            config = config.with_database_file(database.clone());
        }

        Ok(config)
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("buoybot={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Wire up the real collaborators and run once
pub async fn run(args: Args) -> Result<RunOutcome> {
    info!("Starting buoybot...");

    let config = args.load_config().context("Error loading configuration")?;
    if !config.user_name.is_empty() {
        debug!("Publishing as {}", config.user_name);
    }
    debug!("Feed: {}", config.station_feed_url());

    let database_path = config.database_path()?;
    let store = SqliteStore::open(&database_path)
        .with_context(|| format!("Error opening database {}", database_path.display()))?;

    let feed = NdbcClient::new(config.feed_url.as_str())?;
    let publisher = StatusPublisher::new(config.credentials())?;

    let mut pipeline = Pipeline::new(feed, store, publisher)
        .with_layout(config.feed_layout)
        .with_dry_run(args.dry_run);

    let outcome = pipeline
        .run(&config.buoy_id, chrono::Utc::now())
        .await
        .with_context(|| format!("Error processing station {}", config.buoy_id))?;

    // Closes the database before reporting
    drop(pipeline);

    report_outcome(&outcome);
    info!("Exiting buoybot...");
    Ok(outcome)
}

fn report_outcome(outcome: &RunOutcome) {
    match &outcome.publish {
        PublishOutcome::Published(text) => {
            println!("{}", "Status posted:".bright_green().bold());
            println!("{}", text);
        }
        PublishOutcome::Skipped => {
            println!("{}", "Not at update interval - not publishing.".bright_yellow());
            println!("{}", outcome.summary);
        }
        PublishOutcome::Failed(reason) => {
            println!("{} {}", "Update error:".bright_red().bold(), reason);
            println!("{}", outcome.summary);
        }
        PublishOutcome::DryRun => {
            println!("{}", "Dry run:".bright_cyan().bold());
            println!("{}", outcome.summary);
        }
    }

    if let Some(row_id) = outcome.row_id {
        println!("  {} {}", "Saved as row".bright_cyan(), row_id);
    }
}
