//! Binary crate for the CEP weather HTTP server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Wiring the real upstream clients into the router
//! - Serving the temperature-by-CEP endpoint

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cep_weather_core::{AwesomeApiClient, OpenMeteoClient};

use crate::app::AppState;

mod app;
mod error;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cep-weather-server", version, about = "Temperature-by-CEP HTTP service")]
struct Args {
    /// Socket address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cep_weather_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // One client per upstream for the whole process; reqwest pools
    // connections internally.
    let state = AppState {
        postal: Arc::new(AwesomeApiClient::new()),
        weather: Arc::new(OpenMeteoClient::new()),
    };

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    tracing::info!(address = %args.bind, "server listening");

    axum::serve(listener, app::router(state)).await?;

    Ok(())
}
