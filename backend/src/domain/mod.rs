//! Domain types, ports and use cases for the car catalogue.
//!
//! Nothing here depends on Actix or a database driver; adapters in
//! `inbound` and `outbound` translate to and from these types.

pub mod car;
pub mod car_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::car::{Car, CarDraft, CarId, CarValidationError};
pub use self::car_service::{CAR_NOT_FOUND_MESSAGE, CarService, DEFAULT_REQUEST_TIMEOUT};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::TraceId;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
