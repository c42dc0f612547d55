//! Activity Board CLI
//!
//! Command-line front end for the activities signup service:
//! - List activities and their participants
//! - Sign a participant up
//! - Unregister a participant
//! - Generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use activity_board::api::HttpClient;
use activity_board::config::{generate_default_config, Config, LoggingConfig};
use activity_board::terminal::TerminalSurface;
use activity_board::{
    ActionOutcome, ActivityApi, ActivityBoard, LoadOutcome, RemovalTarget, SignupForm,
};

#[derive(Parser)]
#[command(name = "activity-board")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and sign up for school activities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Activities service URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search the standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for `list` (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Never offer or perform participant removal
    #[arg(long, global = true)]
    pub read_only: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List activities
    List,

    /// Sign up for an activity
    Signup {
        /// Activity name
        activity: String,
        /// Participant email
        email: String,
    },

    /// Remove a participant from an activity
    Unregister {
        /// Activity name
        activity: String,
        /// Participant email
        email: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&loaded.config.logging);
    loaded.log_problems();

    let mut config = loaded.config;
    if let Some(url) = &cli.api_url {
        config.server.base_url = url.clone();
    }
    if cli.read_only {
        config.board.allow_removal = false;
    }
    tracing::debug!("Using activities service at {}", config.server.base_url);

    let api = HttpClient::new(config.server.client_config())
        .context("Failed to create HTTP client")?;
    let assume_yes = matches!(cli.command, Commands::Unregister { yes: true, .. });
    let board = ActivityBoard::new(api, TerminalSurface::new(assume_yes), config.board.options());

    match cli.command {
        Commands::List => {
            if cli.format == "json" {
                let activities = board
                    .api()
                    .fetch_activities()
                    .await
                    .context("Failed to load activities")?;
                println!("{}", serde_json::to_string_pretty(&activities)?);
            } else if board.load_activities().await == LoadOutcome::Failed {
                std::process::exit(1);
            }
        }

        Commands::Signup { activity, email } => {
            let outcome = board.submit_signup(&SignupForm { email, activity }).await;
            exit_on_failure(&outcome);
        }

        Commands::Unregister {
            activity, email, ..
        } => {
            let outcome = board
                .remove_participant(&RemovalTarget::new(activity, email))
                .await;
            if outcome == ActionOutcome::Disabled {
                eprintln!("Removal is disabled (read-only mode)");
            }
            exit_on_failure(&outcome);
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn exit_on_failure(outcome: &ActionOutcome) {
    if matches!(outcome, ActionOutcome::Failed(_) | ActionOutcome::Disabled) {
        std::process::exit(1);
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("activity_board={}", logging.level)),
    );

    // stdout carries command output; logs go to stderr
    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
