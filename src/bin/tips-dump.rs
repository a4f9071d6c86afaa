//! Export the game tips database to a JSON file, or replace it from one.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use game_tips_back::{
    config::AppConfig,
    dao::catalog_store::{CatalogStore, mongodb::MongoCatalogStore},
    services::{
        dump_service::{self, DEFAULT_DUMP_FILE},
        storage_lifecycle,
    },
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Dump or restore every collection of the game tips database")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write every collection to a JSON file
    Export {
        #[arg(long, default_value = DEFAULT_DUMP_FILE)]
        file: PathBuf,
    },
    /// Wipe the database, then load every collection from a JSON file
    Import {
        #[arg(long, default_value = DEFAULT_DUMP_FILE)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = AppConfig::load();
    let store = storage_lifecycle::connect(&config.database)
        .await
        .context("configuring MongoDB client")?;

    let outcome = run(&store, cli.command).await;
    store.close().await;
    outcome
}

async fn run(store: &MongoCatalogStore, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Export { file } => {
            let dump = dump_service::export_database(store).await?;
            dump_service::write_dump_file(&file, &dump)?;
            info!(file = %file.display(), collections = dump.len(), "database exported");
        }
        Command::Import { file } => {
            let dump = dump_service::read_dump_file(&file)?;
            let summary = dump_service::import_database(store, dump).await?;
            info!(
                file = %file.display(),
                collections = summary.collections,
                removed = summary.removed,
                inserted = summary.inserted,
                "database imported"
            );
        }
    }
    Ok(())
}

fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
