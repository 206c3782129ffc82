use anyhow::Context;
use clap::Parser;
use climate_api::{router, ClimateService, ClimateStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Serves read-only aggregate queries over a fixed weather-observation
/// dataset.
#[derive(Debug, Parser)]
#[command(name = "climate-api", version, about)]
struct Args {
    /// Directory containing measurements.csv and stations.csv.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let store = ClimateStore::open(&args.data_dir)
        .await
        .with_context(|| format!("failed to open dataset in '{}'", args.data_dir.display()))?;
    let service = Arc::new(ClimateService::new(store));
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(addr = %args.bind, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
