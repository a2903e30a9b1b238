//! Car store adapters.
//!
//! Three implementations of [`crate::domain::ports::CarRepository`]:
//!
//! - [`InMemoryCarRepository`]: a mutex-guarded ordered map.
//! - [`PostgresCarRepository`]: hand-written SQL over the synchronous
//!   `postgres` driver, one connection per call.
//! - [`DieselCarRepository`]: Diesel queries over a `bb8` pool with
//!   transactions around mutations.
//!
//! Diesel row structs and the table definition stay private to this module.
//!
//! ```ignore
//! use cars_backend::outbound::persistence::{DbPool, DieselCarRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new(database_url)).await?;
//! let repository = DieselCarRepository::new(pool);
//! ```

mod car_columns;
mod diesel_car_repository;
mod diesel_error_mapping;
mod memory_car_repository;
mod models;
mod pool;
mod postgres_car_repository;
mod schema;

pub use car_columns::CAR_TABLE_DDL;
pub use diesel_car_repository::DieselCarRepository;
pub use memory_car_repository::InMemoryCarRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use postgres_car_repository::{DEFAULT_CONNECT_TIMEOUT, PostgresCarRepository};
