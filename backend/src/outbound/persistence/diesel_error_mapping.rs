//! Diesel and pool error mapping for the Diesel car store.

use tracing::debug;

use crate::domain::ports::CarRepositoryError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> CarRepositoryError {
    debug!(error = %error, "car pool operation failed");
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    CarRepositoryError::connection(message)
}

/// `ClosedConnection` is a transport failure; everything else is a query
/// failure. Driver text is logged, not propagated.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> CarRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel car operation failed");
        }
        other => debug!(error = %other, "diesel car operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CarRepositoryError::connection("database connection closed")
        }
        DieselError::NotFound => CarRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => CarRepositoryError::query("invalid car query"),
        DieselError::RollbackTransaction | DieselError::RollbackErrorOnCommit { .. } => {
            CarRepositoryError::query("car transaction rolled back")
        }
        _ => CarRepositoryError::query("database error"),
    }
}
