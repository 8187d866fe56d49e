//! ImageHub server: per-user image storage behind a JWT-protected REST API.
//!
//! Main entry point that loads configuration, initializes logging, and
//! dispatches to the `serve` or `migrate` command.

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use imagehub_core::config::AppConfig;
use imagehub_database::DatabasePool;
use imagehub_database::migration::run_migrations;

/// ImageHub: image upload and management service
#[derive(Debug, Parser)]
#[command(name = "imagehub-server", version, about, long_about = None)]
struct Cli {
    /// Directory holding `default.toml` and the environment overlays
    #[arg(long, env = "IMAGEHUB_CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Environment overlay to load (`development`, `test`, `production`, ...)
    #[arg(long, env = "IMAGEHUB_ENV", default_value = "development")]
    env: String,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Apply pending database migrations and exit
    Migrate,
}

#[derive(Debug, Default, Args)]
struct ServeArgs {
    /// Do not apply migrations before serving
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config_dir, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let command = cli.command.unwrap_or(Commands::Serve(ServeArgs::default()));
    let result = match command {
        Commands::Serve(args) => serve(config, &cli.env, args).await,
        Commands::Migrate => migrate(config).await,
    };

    if let Err(e) = result {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn serve(config: AppConfig, env: &str, args: ServeArgs) -> anyhow::Result<()> {
    tracing::info!("Starting ImageHub v{} (env: {})", env!("CARGO_PKG_VERSION"), env);

    if config.uses_default_secret() {
        if matches!(env, "development" | "test") {
            tracing::warn!("Using the placeholder JWT secret; set IMAGEHUB__AUTH__JWT_SECRET");
        } else {
            bail!("Refusing to start with the placeholder JWT secret in '{env}'");
        }
    }

    let database = DatabasePool::connect(&config.database)
        .await
        .context("Database connection failed")?;

    if args.skip_migrations {
        tracing::info!("Skipping database migrations");
    } else {
        run_migrations(database.pool())
            .await
            .context("Migration failed")?;
    }

    imagehub_api::run_server(config, database)
        .await
        .context("Server error")?;
    Ok(())
}

async fn migrate(config: AppConfig) -> anyhow::Result<()> {
    let database = DatabasePool::connect(&config.database)
        .await
        .context("Database connection failed")?;

    run_migrations(database.pool())
        .await
        .context("Migration failed")?;

    database.close().await;
    Ok(())
}
