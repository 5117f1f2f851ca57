mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::commands::{ConfigCommands, ShowArgs};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Connection profile to use (defaults to SNOWFLAKE_PROFILE, then "default")
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Profile file (defaults to SNOWFLAKE_CONFIG_PATH, then ~/.snowflake/config)
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    /// Log write statements instead of sending them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the resolved connection profile
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// List objects of one kind as JSON
    Show(ShowArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);

    let shutdown = CancellationToken::new();
    let listener = tokio::spawn(cancel_on_shutdown_signal(shutdown.clone()));
    let result = run_main(cli, shutdown).await;
    listener.abort();
    result
}

/// Trips `token` on Ctrl+C or SIGTERM so in-flight driver calls abort.
async fn cancel_on_shutdown_signal(token: CancellationToken) {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!("failed to install SIGTERM handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Received shutdown signal, cancelling");
    token.cancel();
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_main(cli: Cli, shutdown: CancellationToken) -> Result<()> {
    let config_path = cli
        .config_file
        .clone()
        .unwrap_or_else(snowflake_sdk::config::default_config_path);
    let config = snowflake_sdk::config::load_config(Some(&config_path), cli.profile.as_deref())?;

    match &cli.command {
        Commands::Config { command } => commands::cmd_config(&config, &config_path, command),
        Commands::Show(args) => {
            let client = snowflake_sdk::Client::connect(config)
                .await?
                .with_cancellation(shutdown);
            client.set_dry_run(cli.dry_run);
            commands::cmd_show(&client, args).await
        }
    }
}
