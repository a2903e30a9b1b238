//! Column-level helpers shared by the two SQL stores.

use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::ports::CarRepositoryError;
use crate::domain::{Car, CarDraft, CarId};

/// DDL of the `car` table used by both SQL stores.
///
/// Schema management is left to operators; tests apply this statement to a
/// scratch database before exercising the adapters.
pub const CAR_TABLE_DDL: &str = "CREATE TABLE IF NOT EXISTS car (
    id    SERIAL PRIMARY KEY,
    brand TEXT    NOT NULL,
    year  INTEGER NOT NULL,
    price NUMERIC NOT NULL
)";

/// Narrow a domain id to the `SERIAL` column width.
///
/// Ids beyond `i32::MAX` cannot exist in the table, so callers treat `None`
/// as not-found without issuing a statement.
pub(crate) fn column_id(id: CarId) -> Option<i32> {
    i32::try_from(id.get()).ok()
}

/// Rebuild a domain car from raw column values.
pub(crate) fn car_from_columns(
    id: i32,
    brand: String,
    year: i32,
    price: Decimal,
) -> Result<Car, CarRepositoryError> {
    let car_id = CarId::new(i64::from(id)).map_err(|err| invalid_row(id, &err))?;
    let draft = CarDraft::new(brand, year, price).map_err(|err| invalid_row(id, &err))?;
    Ok(Car::new(car_id, draft))
}

fn invalid_row(id: i32, err: &dyn std::error::Error) -> CarRepositoryError {
    warn!(row_id = id, error = %err, "stored car row violates domain invariants");
    CarRepositoryError::query(format!("stored car {id} is invalid: {err}"))
}
