//! Direct-SQL `CarRepository` on the synchronous `postgres` driver.
//!
//! Each call opens its own connection from a pre-parsed [`postgres::Config`]
//! and runs on the blocking pool so Actix workers never wait on the driver.
//! All statements are parameterised.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use postgres::{Client, NoTls, Row};
use tracing::debug;

use crate::domain::ports::{CarRepository, CarRepositoryError};
use crate::domain::{Car, CarDraft, CarId, TraceId};

use super::car_columns::{car_from_columns, column_id};

/// Applied when the URL does not set `connect_timeout` itself.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_ALL: &str = "SELECT id, brand, year, price FROM car ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, brand, year, price FROM car WHERE id = $1";
const INSERT: &str =
    "INSERT INTO car (brand, year, price) VALUES ($1, $2, $3) RETURNING id, brand, year, price";
const UPDATE: &str = concat!(
    "UPDATE car SET brand = $1, year = $2, price = $3 ",
    "WHERE id = $4 RETURNING id, brand, year, price"
);
const DELETE: &str = "DELETE FROM car WHERE id = $1 RETURNING id, brand, year, price";

/// One-connection-per-call implementation of [`CarRepository`].
#[derive(Clone)]
pub struct PostgresCarRepository {
    config: Arc<postgres::Config>,
}

impl PostgresCarRepository {
    /// Parse a connection URL.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cars_backend::outbound::persistence::PostgresCarRepository;
    ///
    /// let repository = PostgresCarRepository::new("postgres://cars@localhost/cars")
    ///     .expect("valid URL");
    /// let _ = repository;
    /// ```
    pub fn new(database_url: &str) -> Result<Self, CarRepositoryError> {
        let config = database_url.parse::<postgres::Config>().map_err(|err| {
            CarRepositoryError::connection(format!("invalid database URL: {err}"))
        })?;
        Ok(Self::from_config(config))
    }

    /// Use an already parsed driver configuration.
    pub fn from_config(mut config: postgres::Config) -> Self {
        if config.get_connect_timeout().is_none() {
            config.connect_timeout(DEFAULT_CONNECT_TIMEOUT);
        }
        Self {
            config: Arc::new(config),
        }
    }

    /// Bound connecting and each statement by `deadline`.
    ///
    /// The server cancels statements that outlive it, so a call abandoned by
    /// the caller's deadline does not keep running indefinitely.
    #[must_use]
    pub fn with_deadline(self, deadline: Duration) -> Self {
        let mut config = (*self.config).clone();
        let statement_timeout = format!("-c statement_timeout={}", deadline.as_millis());
        let options = match config.get_options() {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{existing} {statement_timeout}")
            }
            _ => statement_timeout,
        };
        config.connect_timeout(deadline).options(&options);
        Self {
            config: Arc::new(config),
        }
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.config.get_connect_timeout().copied()
    }

    async fn run<T, F>(&self, operation: &'static str, work: F) -> Result<T, CarRepositoryError>
    where
        F: FnOnce(&mut Client) -> Result<T, postgres::Error> + Send + 'static,
        T: Send + 'static,
    {
        let config = Arc::clone(&self.config);
        let trace_id = TraceId::current();
        tokio::task::spawn_blocking(move || {
            TraceId::sync_scope(trace_id, || {
                let mut client = config
                    .connect(NoTls)
                    .map_err(|err| map_connect_error(operation, &err))?;
                work(&mut client).map_err(|err| map_statement_error(operation, &err))
            })
        })
        .await
        .map_err(|err| {
            debug!(operation, error = %err, "car store task did not complete");
            CarRepositoryError::query("car store task did not complete")
        })?
    }
}

fn map_connect_error(operation: &'static str, error: &postgres::Error) -> CarRepositoryError {
    debug!(operation, error = %error, "car store connect failed");
    CarRepositoryError::connection(error.to_string())
}

fn map_statement_error(operation: &'static str, error: &postgres::Error) -> CarRepositoryError {
    if error.is_closed() {
        debug!(operation, error = %error, "car store connection closed mid-statement");
        return CarRepositoryError::connection(error.to_string());
    }
    match error.as_db_error() {
        Some(db) => {
            debug!(
                operation,
                sqlstate = db.code().code(),
                message = db.message(),
                "car statement failed"
            );
            CarRepositoryError::query(format!("{}: {}", db.code().code(), db.message()))
        }
        None => {
            debug!(operation, error = %error, "car statement failed");
            CarRepositoryError::query(error.to_string())
        }
    }
}

fn car_from_row(row: &Row) -> Result<Car, CarRepositoryError> {
    let shape = |err: postgres::Error| {
        CarRepositoryError::query(format!("unexpected car row shape: {err}"))
    };
    car_from_columns(
        row.try_get("id").map_err(shape)?,
        row.try_get("brand").map_err(shape)?,
        row.try_get("year").map_err(shape)?,
        row.try_get("price").map_err(shape)?,
    )
}

fn optional_car(row: Option<Row>) -> Result<Option<Car>, CarRepositoryError> {
    row.as_ref().map(car_from_row).transpose()
}

#[async_trait]
impl CarRepository for PostgresCarRepository {
    async fn list(&self) -> Result<Vec<Car>, CarRepositoryError> {
        let rows = self
            .run("list", |client| client.query(SELECT_ALL, &[]))
            .await?;
        rows.iter().map(car_from_row).collect()
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        let Some(row_id) = column_id(id) else {
            return Ok(None);
        };
        let row = self
            .run("find_by_id", move |client| {
                client.query_opt(SELECT_BY_ID, &[&row_id])
            })
            .await?;
        optional_car(row)
    }

    async fn save(&self, draft: &CarDraft) -> Result<Car, CarRepositoryError> {
        let brand = draft.brand().to_owned();
        let year = draft.year();
        let price = draft.price();
        let row = self
            .run("save", move |client| {
                client.query_one(INSERT, &[&brand, &year, &price])
            })
            .await?;
        car_from_row(&row)
    }

    async fn update(&self, replacement: &Car) -> Result<Option<Car>, CarRepositoryError> {
        let Some(row_id) = column_id(replacement.id()) else {
            return Ok(None);
        };
        let brand = replacement.brand().to_owned();
        let year = replacement.year();
        let price = replacement.price();
        let row = self
            .run("update", move |client| {
                client.query_opt(UPDATE, &[&brand, &year, &price, &row_id])
            })
            .await?;
        optional_car(row)
    }

    async fn delete(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        let Some(row_id) = column_id(id) else {
            return Ok(None);
        };
        let row = self
            .run("delete", move |client| client.query_opt(DELETE, &[&row_id]))
            .await?;
        optional_car(row)
    }
}
