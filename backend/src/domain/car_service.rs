//! Car use cases on top of a [`CarRepository`].
//!
//! Every repository call runs under a deadline. Elapsed deadlines surface as
//! [`ErrorCode::ServiceUnavailable`](crate::domain::ErrorCode), store failures
//! as internal errors; neither is retried.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::domain::ports::{CarCommand, CarQuery, CarRepository, CarRepositoryError};
use crate::domain::{Car, CarDraft, CarId, Error};

/// Deadline applied to each repository call unless configured otherwise.
///
/// An elapsed deadline only abandons the wait. A write already handed to the
/// store may still commit, so a `503` after `POST` does not mean no row was
/// inserted and retrying can create a duplicate. SQL stores are built with
/// their connect and statement timeouts set to the same deadline.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Message returned when an id does not resolve.
pub const CAR_NOT_FOUND_MESSAGE: &str = "Модель автомобиля не найдена";

/// Implements [`CarQuery`] and [`CarCommand`] over any store backend.
#[derive(Clone)]
pub struct CarService {
    repository: Arc<dyn CarRepository>,
    request_timeout: Duration,
}

impl CarService {
    /// Wrap a repository using [`DEFAULT_REQUEST_TIMEOUT`].
    pub fn new(repository: Arc<dyn CarRepository>) -> Self {
        Self {
            repository,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-call deadline.
    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    async fn call<T, F>(&self, operation: &'static str, fut: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, CarRepositoryError>>,
    {
        match tokio::time::timeout(self.request_timeout, fut).await {
            Ok(result) => result.map_err(|err| map_repository_error(operation, err)),
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "car store deadline elapsed"
                );
                Err(Error::service_unavailable(
                    "car store did not respond in time",
                ))
            }
        }
    }
}

fn map_repository_error(operation: &'static str, error: CarRepositoryError) -> Error {
    warn!(operation, error = %error, "car store operation failed");
    match error {
        CarRepositoryError::Connection { message } => {
            Error::internal(format!("car store unavailable: {message}"))
        }
        CarRepositoryError::Query { message } => {
            Error::internal(format!("car store error: {message}"))
        }
    }
}

fn car_not_found(id: CarId) -> Error {
    Error::not_found(CAR_NOT_FOUND_MESSAGE).with_details(json!({ "id": id.get() }))
}

#[async_trait]
impl CarQuery for CarService {
    async fn list_cars(&self) -> Result<Vec<Car>, Error> {
        self.call("list", self.repository.list()).await
    }

    async fn fetch_car(&self, id: CarId) -> Result<Car, Error> {
        self.call("find_by_id", self.repository.find_by_id(id))
            .await?
            .ok_or_else(|| car_not_found(id))
    }
}

#[async_trait]
impl CarCommand for CarService {
    async fn create_car(&self, draft: CarDraft) -> Result<Car, Error> {
        self.call("save", self.repository.save(&draft)).await
    }

    async fn replace_car(&self, id: CarId, draft: CarDraft) -> Result<Car, Error> {
        let replacement = Car::new(id, draft);
        self.call("update", self.repository.update(&replacement))
            .await?
            .ok_or_else(|| car_not_found(id))
    }

    async fn remove_car(&self, id: CarId) -> Result<Car, Error> {
        self.call("delete", self.repository.delete(id))
            .await?
            .ok_or_else(|| car_not_found(id))
    }
}
