use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{config, AppConfig, StoreBackend};
use crate::database::manager::DatabaseManager;
use crate::server::{app, AppState};

#[derive(Parser)]
#[command(name = "kolejka")]
#[command(about = "Kolejka - location tracking ingestion and zone management API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides KOLEJKA_PORT/PORT)")]
        port: Option<u16>,

        #[arg(long, value_parser = parse_store, help = "Store backend: postgres or memory")]
        store: Option<StoreBackend>,
    },

    #[command(about = "Create collections and indexes, then exit")]
    InitStore,
}

fn parse_store(value: &str) -> Result<StoreBackend, String> {
    StoreBackend::parse(value).ok_or_else(|| format!("unknown store '{}', expected postgres or memory", value))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None, store: None }) {
        Commands::Serve { port, store } => {
            let mut settings = config().clone();
            if let Some(port) = port {
                settings.api.port = port;
            }
            if let Some(store) = store {
                settings.database.backend = store;
            }
            serve(settings).await
        }
        Commands::InitStore => {
            let store = DatabaseManager::connect(&config().database).await?;
            store.ensure_collections().await?;
            info!("Store initialized");
            Ok(())
        }
    }
}

async fn serve(settings: AppConfig) -> anyhow::Result<()> {
    info!("Starting kolejka in {:?} mode", settings.environment);

    let store = DatabaseManager::connect(&settings.database).await?;
    store.ensure_collections().await?;

    let router = app(AppState::new(store), &settings.api);

    let bind_addr = format!("0.0.0.0:{}", settings.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Listening on http://{}", bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
