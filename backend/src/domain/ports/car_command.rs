//! Driving port for changing cars.

use async_trait::async_trait;

use crate::domain::{Car, CarDraft, CarId, Error};

/// Write-side use cases consumed by inbound adapters.
///
/// Each call mutates the store at most once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarCommand: Send + Sync {
    /// Persist a new car with a freshly assigned id.
    async fn create_car(&self, draft: CarDraft) -> Result<Car, Error>;

    /// Overwrite the car with `id`; not-found when it does not exist.
    async fn replace_car(&self, id: CarId, draft: CarDraft) -> Result<Car, Error>;

    /// Delete the car with `id`, returning it; not-found when absent.
    async fn remove_car(&self, id: CarId) -> Result<Car, Error>;
}
