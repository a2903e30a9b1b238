//! Backend entry-point: loads settings, selects the car store and serves `/cars`.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cars_backend::inbound::http::health::HealthState;
use cars_backend::server::{ServerConfig, build_car_repository, create_server};
use cars_backend::settings::CarServiceSettings;

fn startup_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

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

    let settings = CarServiceSettings::load().map_err(startup_error)?;
    let bind_addr = settings.bind_addr().map_err(startup_error)?;
    let request_timeout = settings.request_timeout().map_err(startup_error)?;
    let repository = build_car_repository(&settings).await?;

    let config =
        ServerConfig::new(bind_addr, repository).with_request_timeout(request_timeout);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;

    info!(%bind_addr, "listening");
    server.await
}
