mod cmd;
mod output;
mod root;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, engagement::EngagementSubcommand};
use golive_core::clock::{Clock, FixedClock, SystemClock};
use golive_core::types::RiskStatus;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "golive",
    about = "Forecast go-live dates and deadline risk across an onboarding portfolio",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .golive/)
    #[arg(long, global = true, env = "GOLIVE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Forecast as of this instant (RFC 3339) instead of the current time
    #[arg(long, global = true, value_name = "TIMESTAMP")]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize .golive/ in the current project
    Init,

    /// Forecast every engagement and rank by deadline risk
    Predict {
        /// Only show engagements with this risk status
        #[arg(long = "only", value_name = "STATUS")]
        only: Option<RiskStatus>,
    },

    /// Manage engagements
    Engagement {
        #[command(subcommand)]
        subcommand: EngagementSubcommand,
    },

    /// Inspect and validate the forecast config
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Serve the prediction API over HTTP
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3142")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let clock: Box<dyn Clock> = match cli.now {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Predict { only } => cmd::predict::run(&root, clock.as_ref(), only, cli.json),
        Commands::Engagement { subcommand } => {
            cmd::engagement::run(&root, clock.as_ref(), subcommand, cli.json)
        }
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
