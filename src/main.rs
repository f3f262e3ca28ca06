use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, info_span, Instrument};

use bakery_orders::app_system::{setup_tracing, BakerySystem, CatalogSeed};
use bakery_orders::config::Config;
use bakery_orders::http::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Setup tracing once for the entire application
    setup_tracing();
    config.log_summary();

    let system = BakerySystem::start(config.channel_capacity);

    if let Some(path) = &config.catalog {
        let seed = CatalogSeed::from_file(path)
            .with_context(|| format!("loading catalog seed {}", path.display()))?;
        system
            .seed(seed)
            .instrument(info_span!("catalog_seed"))
            .await
            .context("seeding catalog")?;
    }

    info!("Binding to {}", config.bind);
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;

    http::serve(listener, AppState::from(&system), http::shutdown_signal()).await?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    info!("Server stopped");
    Ok(())
}
