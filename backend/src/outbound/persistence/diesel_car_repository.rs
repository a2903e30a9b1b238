//! PostgreSQL-backed `CarRepository` using Diesel over a `bb8` pool.
//!
//! Reads run directly on a pooled connection. `save`, `update` and `delete`
//! each run inside a transaction that commits on success and rolls back on
//! any error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{CarRepository, CarRepositoryError};
use crate::domain::{Car, CarDraft, CarId};

use super::car_columns::column_id;
use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CarColumns, CarRow};
use super::pool::DbPool;
use super::schema::car;

/// Diesel implementation of [`CarRepository`].
#[derive(Clone)]
pub struct DieselCarRepository {
    pool: DbPool,
}

impl DieselCarRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_car(row: Option<CarRow>) -> Result<Option<Car>, CarRepositoryError> {
    row.map(Car::try_from).transpose()
}

#[async_trait]
impl CarRepository for DieselCarRepository {
    async fn list(&self) -> Result<Vec<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CarRow> = car::table
            .order(car::id.asc())
            .select(CarRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(Car::try_from).collect()
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        let Some(row_id) = column_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = car::table
            .find(row_id)
            .select(CarRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        into_car(row)
    }

    async fn save(&self, draft: &CarDraft) -> Result<Car, CarRepositoryError> {
        let columns = CarColumns::from(draft);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<CarRow, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::insert_into(car::table)
                        .values(&columns)
                        .returning(CarRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Car::try_from(row)
    }

    async fn update(&self, replacement: &Car) -> Result<Option<Car>, CarRepositoryError> {
        let Some(row_id) = column_id(replacement.id()) else {
            return Ok(None);
        };
        let columns = CarColumns::from(replacement.draft());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<Option<CarRow>, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::update(car::table.find(row_id))
                        .set(&columns)
                        .returning(CarRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        into_car(row)
    }

    async fn delete(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        let Some(row_id) = column_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<Option<CarRow>, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::delete(car::table.find(row_id))
                        .returning(CarRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        into_car(row)
    }
}
