//! Diesel row structs for the `car` table. Never exposed to the domain.

use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::ports::CarRepositoryError;
use crate::domain::{Car, CarDraft};

use super::car_columns::car_from_columns;
use super::schema::car;

/// Row read from `car`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = car)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CarRow {
    pub id: i32,
    pub brand: String,
    pub year: i32,
    pub price: Decimal,
}

impl TryFrom<CarRow> for Car {
    type Error = CarRepositoryError;

    fn try_from(row: CarRow) -> Result<Self, Self::Error> {
        car_from_columns(row.id, row.brand, row.year, row.price)
    }
}

/// Mutable columns, used both for inserts and full-overwrite updates.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = car)]
pub(crate) struct CarColumns<'a> {
    pub brand: &'a str,
    pub year: i32,
    pub price: Decimal,
}

impl<'a> From<&'a CarDraft> for CarColumns<'a> {
    fn from(draft: &'a CarDraft) -> Self {
        Self {
            brand: draft.brand(),
            year: draft.year(),
            price: draft.price(),
        }
    }
}
