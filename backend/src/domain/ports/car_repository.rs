//! Driven port for car persistence.
//!
//! Every backend (in-memory map, direct SQL, Diesel) implements this trait so
//! the service can swap stores without touching handlers. A missing row is a
//! normal `None`, never an error.

use async_trait::async_trait;

use crate::domain::{Car, CarDraft, CarId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by car store adapters.
    pub enum CarRepositoryError {
        /// The store could not be reached (connect, pool checkout, transport).
        Connection { message: String } => "car store connection failed: {message}",
        /// A statement or transaction failed, or a row had an unexpected shape.
        Query { message: String } => "car store query failed: {message}",
    }
}

/// Store abstraction over cars.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Every stored car in ascending id order.
    async fn list(&self) -> Result<Vec<Car>, CarRepositoryError>;

    /// The car with `id`, if present.
    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError>;

    /// Insert a new car and assign it a fresh identifier.
    async fn save(&self, draft: &CarDraft) -> Result<Car, CarRepositoryError>;

    /// Overwrite brand, year and price of the row with `car.id()`.
    ///
    /// Returns the stored row, or `None` when nothing matched.
    async fn update(&self, car: &Car) -> Result<Option<Car>, CarRepositoryError>;

    /// Remove the car with `id`, returning the row as it was.
    async fn delete(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_their_message() {
        let err = CarRepositoryError::connection("refused");
        assert_eq!(err.to_string(), "car store connection failed: refused");
        assert_eq!(
            CarRepositoryError::query("syntax").to_string(),
            "car store query failed: syntax"
        );
    }
}
