mod app;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    sync::Arc,
};

use arg_core::{
    config::{self, AppConfig},
    CatalogLoader, ShopSession, SupplierDashboard, WalletLedger,
};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let catalog = CatalogLoader::load(config.catalog_path.as_deref())
        .context("failed to load catalog")?;
    info!(
        listings = catalog.len(),
        buckets = catalog.weight_buckets().len(),
        "Catalog ready"
    );

    let shop = ShopSession::new(Arc::new(catalog), WalletLedger::new(config.starting_balance))
        .with_default_quantity(config.default_quantity_kg);

    let mut app = app::ArgApp::new(shop, SupplierDashboard::demo(), config.top_up_amounts);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("arg-demo.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the terminal UI, so only the file layer is installed.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
