//! fpm-supervisor
//!
//! Generates a minimal php-fpm config, launches the worker, waits until it
//! accepts connections, and shuts it down on SIGINT/SIGTERM.
//!
//! ```text
//!   settings.toml ──▶ config ──▶ fpm config file ──▶ php-fpm --fpm-config <file> -e
//!                                                          │ (daemonizes)
//!                                                          ▼
//!                        pid file ◀── worker ──▶ listen socket / port
//!                           │                          │
//!                           └──── supervisor polls ────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fpm_supervisor::config::load_config;
use fpm_supervisor::lifecycle::{graceful_shutdown, prepare, ShutdownSignals};
use fpm_supervisor::observability::init_logging;
use fpm_supervisor::{ListenAddress, SupervisorError};

#[derive(Parser)]
#[command(name = "fpm-supervisor")]
#[command(about = "Launch and supervise a single php-fpm worker", long_about = None)]
struct Cli {
    /// Path to the supervisor settings file.
    #[arg(short, long, default_value = "fpm-supervisor.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the worker and supervise it until SIGINT/SIGTERM
    Run,
    /// Print the generated FPM config
    Render,
    /// Show how a listen specification is dialed
    Resolve {
        /// "ip:port", "port" or a socket path
        listen: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { listen } => {
            let address = ListenAddress::resolve(&listen);
            println!("{} {}", address.transport(), address.address());
        }
        Commands::Render => {
            let config = load_config(&cli.config)?;
            let process = config.process.to_process();
            print!("{}", process.config()?);
        }
        Commands::Run => {
            let config = load_config(&cli.config)?;
            init_logging(&config.observability)?;
            run(config).await?;
        }
    }

    Ok(())
}

async fn run(config: fpm_supervisor::SupervisorConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("fpm-supervisor v{} starting", env!("CARGO_PKG_VERSION"));

    let mut signals = ShutdownSignals::register()?;
    let mut supervisor = prepare(&config).await?;
    let grace = config.timeouts.shutdown_grace();

    let started = tokio::select! {
        result = supervisor.start() => Some(result),
        name = signals.recv() => {
            tracing::warn!(signal = name, "Shutdown requested during startup");
            None
        }
    };

    let Some(started) = started else {
        if supervisor.pid().is_some() {
            graceful_shutdown(&mut supervisor, grace).await?;
        }
        return Ok(());
    };

    match started {
        Ok(()) => {}
        Err(e @ SupervisorError::ReadinessTimeout { .. }) => {
            tracing::error!(error = %e, "Worker never became ready, shutting it down");
            graceful_shutdown(&mut supervisor, grace).await?;
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    }

    let name = signals.recv().await;
    tracing::info!(signal = name, "Shutdown signal received");

    graceful_shutdown(&mut supervisor, grace).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
