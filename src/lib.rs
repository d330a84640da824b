pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use clap::Parser;

use crate::core::{
    config::{Cli, Settings},
    state::AppState,
    telemetry,
};
use crate::db::InventoryDb;
use crate::services::storage::StorageService;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let storage = StorageService::from_settings(&settings).await?;
    let state = AppState::new(settings, InventoryDb::new(), storage);

    let app = api::router::router(state.clone());
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        cache_dir = %state.storage().root().display(),
        "Inventory Rust API listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(core::shutdown::shutdown_signal()).await?;

    tracing::info!("Inventory Rust API stopped");
    Ok(())
}
