use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bowler_insights::api::{build_router, state::AppState};
use bowler_insights::calculate::{bowlers, build_dashboard, opponents, phases};
use bowler_insights::config::AppConfig;
use bowler_insights::models::{split_phases, Handedness, Opponent, Selection};
use bowler_insights::report::render_text;
use bowler_insights::source::{self, SnapshotCache};

#[derive(Parser)]
#[command(name = "bowler-insights")]
#[command(about = "Bowling statistics and insights from ball-by-ball tournament data")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Delivery CSV to use instead of the configured source (URL or path)
    #[arg(long)]
    source: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// List bowlers in the delivery table
    Bowlers {
        /// Also list each bowler's opponents
        #[arg(long)]
        opponents: bool,
    },

    /// Print the dashboard for one selection
    Report {
        /// Bowler name
        #[arg(long)]
        bowler: String,

        /// Batting team, or "Overall Tournament"
        #[arg(long)]
        opponent: Option<String>,

        /// Phases to include (comma-separated); defaults to every phase
        #[arg(long)]
        phases: Option<String>,

        /// Batter handedness: all, rhb or lhb
        #[arg(long, default_value = "all")]
        handedness: Handedness,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(location) = &cli.source {
        config.source.override_location(location);
    }
    config.validate()?;

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(cli.json_logs.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with(
            (!cli.json_logs)
                .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .init();

    tracing::info!("Starting bowler-insights v{}", env!("CARGO_PKG_VERSION"));

    let source = source::from_config(&config.source)?;
    // validate() has already rejected a missing or zero TTL
    let ttl = config.source.ttl().unwrap_or_default();
    let cache = Arc::new(SnapshotCache::new(source, ttl));

    match cli.command {
        Commands::Serve { host, port } => {
            // Warm the cache; a failed load is retried on the first request
            if let Err(e) = cache.get().await {
                tracing::warn!(
                    "Initial load from {} failed: {}",
                    cache.source_description(),
                    e
                );
            }

            let state =
                AppState::new(cache).with_cors_origin(config.server.cors_origin.clone());
            let app = build_router(state);
            let addr = format!(
                "{}:{}",
                host.unwrap_or(config.server.host),
                port.unwrap_or(config.server.port)
            );
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Bowlers {
            opponents: with_opponents,
        } => {
            let snapshot = cache.get().await?;
            for bowler in bowlers(&snapshot.table) {
                if with_opponents {
                    let teams = opponents(&snapshot.table, &bowler);
                    println!("{}: {}", bowler, teams[1..].join(", "));
                } else {
                    println!("{}", bowler);
                }
            }
        }
        Commands::Report {
            bowler,
            opponent,
            phases: phase_list,
            handedness,
            json,
        } => {
            let snapshot = cache.get().await?;
            if !snapshot.table.has_bowler(&bowler) {
                bail!(
                    "Bowler '{}' not found in {}",
                    bowler,
                    cache.source_description()
                );
            }

            let selected_phases = match phase_list.as_deref() {
                Some(raw) => split_phases(raw),
                None => phases(&snapshot.table),
            };
            let selection = Selection::new(bowler, selected_phases)
                .against(opponent.as_deref().map(Opponent::parse).unwrap_or_default())
                .with_handedness(handedness);

            let dashboard = build_dashboard(&snapshot.table, &selection);
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print!("{}", render_text(&dashboard));
            }
        }
    }

    Ok(())
}
