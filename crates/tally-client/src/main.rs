//! tally client: one fetch-and-display run against the counter service.
//!
//! Config: `TALLY_CLIENT_CONFIG` (default `tally-client.yaml`, optional);
//! `TALLY_ENDPOINT` overrides the endpoint. Logs go to stderr, the counter
//! to stdout.

use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use tally_client::config::{self, ClientConfig};
use tally_client::display::TerminalSurface;
use tally_client::transport::HttpTransport;
use tally_client::CountFetcher;

const DEFAULT_CONFIG_PATH: &str = "tally-client.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "client config invalid");
            return ExitCode::FAILURE;
        }
    };
    let transport = match HttpTransport::new(&cfg.endpoint, cfg.method) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "client transport init failed");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(endpoint = %cfg.endpoint, method = ?cfg.method, "fetching visitor count");
    let fetcher = CountFetcher::new(transport, cfg.policy());
    let mut surface = TerminalSurface::new(std::io::stdout());

    match fetcher.fetch_and_display(&mut surface, &cfg.display()).await {
        Ok(_) => {
            surface.finish();
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}

fn load_config() -> tally_core::Result<ClientConfig> {
    let path = std::env::var("TALLY_CLIENT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let mut cfg = if Path::new(&path).exists() {
        config::load_from_file(&path)?
    } else {
        tracing::debug!(config = %path, "no client config file, using defaults");
        ClientConfig::default()
    };
    if let Ok(endpoint) = std::env::var("TALLY_ENDPOINT") {
        cfg.endpoint = endpoint;
        cfg.validate()?;
    }
    Ok(cfg)
}
