//! HTTP inbound adapter exposing the `/cars` endpoints and health probes.

pub mod cars;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
