//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see the driving ports, so
//! they can be exercised against any store or a mock.

use std::sync::Arc;

use crate::domain::CarService;
use crate::domain::ports::{CarCommand, CarQuery};

/// Dependency bundle for the `/cars` handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cars_query: Arc<dyn CarQuery>,
    pub cars: Arc<dyn CarCommand>,
}

impl HttpState {
    pub fn new(cars_query: Arc<dyn CarQuery>, cars: Arc<dyn CarCommand>) -> Self {
        Self { cars_query, cars }
    }

    /// Serve both ports from one service instance.
    pub fn from_service(service: CarService) -> Self {
        let service = Arc::new(service);
        Self {
            cars_query: service.clone(),
            cars: service,
        }
    }
}
