//! Backend entry-point: loads settings, picks the tutor storage backend and
//! serves the REST API with health probes.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use eduista::inbound::http::health::HealthState;
use eduista::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let storage = settings.storage().map_err(std::io::Error::other)?;

    let config = ServerConfig::new(bind_addr, settings.storage_table()).with_storage(storage);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;

    info!(%bind_addr, "eduista backend listening");
    server.await
}
