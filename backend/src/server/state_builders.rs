//! Builders for the car repository and the HTTP state wrapping it.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use crate::domain::CarService;
use crate::domain::ports::CarRepository;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DbPool, DieselCarRepository, InMemoryCarRepository, PoolConfig, PostgresCarRepository,
};
use crate::settings::{CarServiceSettings, StoreBackend};

use super::ServerConfig;

fn startup_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

/// Construct the repository selected by `settings`.
///
/// The memory store is seeded unless `empty_store` is set. The Diesel store
/// opens its pool here, so an unreachable database fails start-up; the
/// `postgres` store connects per call and only validates its URL. Pool
/// checkout and driver timeouts follow `request_timeout_ms`.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the settings are incomplete or the pool
/// cannot be built.
pub async fn build_car_repository(
    settings: &CarServiceSettings,
) -> std::io::Result<Arc<dyn CarRepository>> {
    let store = settings.store().map_err(startup_error)?;
    let request_timeout = settings.request_timeout().map_err(startup_error)?;
    let repository: Arc<dyn CarRepository> = match store {
        StoreBackend::Memory if settings.seed_fleet() => {
            Arc::new(InMemoryCarRepository::with_seed_fleet())
        }
        StoreBackend::Memory => Arc::new(InMemoryCarRepository::new()),
        StoreBackend::Postgres => {
            let url = settings.database_url(store).map_err(startup_error)?;
            let repository = PostgresCarRepository::new(&url).map_err(startup_error)?;
            Arc::new(repository.with_deadline(request_timeout))
        }
        StoreBackend::Diesel => {
            let url = settings.database_url(store).map_err(startup_error)?;
            let max_size = settings.pool_max_size().map_err(startup_error)?;
            let config = PoolConfig::new(url)
                .with_max_size(max_size)
                .with_connection_timeout(request_timeout);
            let pool = DbPool::new(config)
                .await
                .map_err(startup_error)?;
            Arc::new(DieselCarRepository::new(pool))
        }
    };

    info!(store = %store, "car store selected");
    Ok(repository)
}

/// Wrap the configured repository in a [`CarService`] for the handlers.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let service = CarService::new(config.repository.clone())
        .with_request_timeout(config.request_timeout);
    web::Data::new(HttpState::from_service(service))
}
