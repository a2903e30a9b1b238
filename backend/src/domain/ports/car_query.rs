//! Driving port for reading cars.

use async_trait::async_trait;

use crate::domain::{Car, CarId, Error};

/// Read-side use cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarQuery: Send + Sync {
    /// Every car in ascending id order.
    async fn list_cars(&self) -> Result<Vec<Car>, Error>;

    /// The car with `id`; [`crate::domain::ErrorCode::NotFound`] when absent.
    async fn fetch_car(&self, id: CarId) -> Result<Car, Error>;
}
