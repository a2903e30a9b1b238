//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Only persistence lives here: three [`crate::domain::ports::CarRepository`]
//! implementations that translate between cars and their storage
//! representation without any business logic.

pub mod persistence;
