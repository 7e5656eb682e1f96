//! Address lookup server.
//!
//! Thin HTTP front over the resolution pipeline: parse args, load config,
//! build the resolver, serve.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use waratah::config::Config;
use waratah::http::router;
use waratah::resolver::AddressResolver;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "NSW address lookup server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// Optional TOML config with upstream URLs and timeout
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    info!("Waratah Address Lookup Server");
    info!("Geocoding endpoint: {}", config.geocoding_url);
    info!("Boundaries endpoint: {}", config.boundaries_url);

    let resolver =
        AddressResolver::new(&config).context("Failed to construct address resolver")?;

    let app = router(Arc::new(resolver));

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
