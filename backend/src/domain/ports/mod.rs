//! Ports at the edges of the car hexagon.
//!
//! [`CarRepository`] is driven by the service and implemented by outbound
//! stores; [`CarQuery`] and [`CarCommand`] are driven by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod car_command;
mod car_query;
mod car_repository;

#[cfg(test)]
pub use car_command::MockCarCommand;
pub use car_command::CarCommand;
#[cfg(test)]
pub use car_query::MockCarQuery;
pub use car_query::CarQuery;
#[cfg(test)]
pub use car_repository::MockCarRepository;
pub use car_repository::{CarRepository, CarRepositoryError};
