//! Contract tests for the SQL car stores against embedded PostgreSQL.
//!
//! Both the `postgres` driver store and the Diesel store run the same
//! scenarios against a fresh cluster with the `car` table applied. The suite
//! is opt-in: run `cargo test -- --ignored` with `RUN_PG_EMBEDDED=1`.

use std::str::FromStr;
use std::sync::Arc;

use cars_backend::domain::ports::{CarRepository, CarRepositoryError};
use cars_backend::domain::{Car, CarDraft, CarId};
use cars_backend::outbound::persistence::{
    CAR_TABLE_DDL, DbPool, DieselCarRepository, PoolConfig, PostgresCarRepository,
};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use rstest::rstest;
use rust_decimal::Decimal;
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{format_postgres_error, test_cluster};

const DATABASE: &str = "postgres";

#[derive(Debug, Clone, Copy)]
enum Store {
    Postgres,
    Diesel,
}

struct StoreContext {
    runtime: Runtime,
    repository: Arc<dyn CarRepository>,
    database_url: String,
    _cluster: TestCluster,
}

impl StoreContext {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn execute(&self, statement: &str) {
        let mut client = Client::connect(&self.database_url, NoTls)
            .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)));
        client
            .batch_execute(statement)
            .unwrap_or_else(|err| panic!("{statement}: {}", format_postgres_error(&err)));
    }
}

fn store_context(store: Store) -> Option<StoreContext> {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() != Ok("1") {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return None;
    }

    let cluster = test_cluster().expect("embedded Postgres should start");
    let database_url = cluster.connection().database_url(DATABASE);
    let runtime = Runtime::new().expect("tokio runtime");

    let repository: Arc<dyn CarRepository> = match store {
        Store::Postgres => Arc::new(
            PostgresCarRepository::new(&database_url).expect("driver accepts cluster URL"),
        ),
        Store::Diesel => {
            let config = PoolConfig::new(&database_url)
                .with_max_size(2)
                .with_min_idle(Some(1));
            let pool = runtime
                .block_on(DbPool::new(config))
                .expect("pool builds");
            Arc::new(DieselCarRepository::new(pool))
        }
    };

    let context = StoreContext {
        runtime,
        repository,
        database_url,
        _cluster: cluster,
    };
    context.execute(CAR_TABLE_DDL);
    Some(context)
}

fn draft(brand: &str, year: i32, price: &str) -> CarDraft {
    CarDraft::new(brand, year, Decimal::from_str(price).expect("decimal")).expect("valid draft")
}

#[rstest]
#[case::postgres(Store::Postgres)]
#[case::diesel(Store::Diesel)]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn save_then_find_round_trips_exact_prices(#[case] store: Store) {
    let Some(ctx) = store_context(store) else {
        return;
    };

    ctx.block_on(async {
        let first = ctx
            .repository
            .save(&draft("Toyota", 2020, "18000.00"))
            .await
            .expect("save");
        let second = ctx
            .repository
            .save(&draft("Kia", 2021, "0.01"))
            .await
            .expect("save");
        assert_ne!(first.id(), second.id());

        let found = ctx
            .repository
            .find_by_id(first.id())
            .await
            .expect("find")
            .expect("stored car");
        assert_eq!(found, first);
        assert_eq!(found.price().to_string(), "18000.00");

        let listed = ctx.repository.list().await.expect("list");
        assert_eq!(listed, vec![first, second]);
    });
}

#[rstest]
#[case::postgres(Store::Postgres)]
#[case::diesel(Store::Diesel)]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn update_overwrites_and_delete_removes(#[case] store: Store) {
    let Some(ctx) = store_context(store) else {
        return;
    };

    ctx.block_on(async {
        let saved = ctx
            .repository
            .save(&draft("Ford", 2016, "8000"))
            .await
            .expect("save");
        let replacement = Car::new(saved.id(), draft("Ford Focus", 2017, "9999.99"));

        let updated = ctx
            .repository
            .update(&replacement)
            .await
            .expect("update")
            .expect("known id");
        assert_eq!(updated, replacement);

        let deleted = ctx
            .repository
            .delete(saved.id())
            .await
            .expect("delete")
            .expect("known id");
        assert_eq!(deleted, replacement);
        assert!(ctx.repository.find_by_id(saved.id()).await.expect("find").is_none());
    });
}

#[rstest]
#[case::postgres(Store::Postgres)]
#[case::diesel(Store::Diesel)]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn unknown_ids_are_not_found(#[case] store: Store) {
    let Some(ctx) = store_context(store) else {
        return;
    };

    ctx.block_on(async {
        for raw in [1, 999_999, i64::MAX] {
            let id = CarId::new(raw).expect("positive id");
            assert!(ctx.repository.find_by_id(id).await.expect("find").is_none());
            assert!(ctx.repository.delete(id).await.expect("delete").is_none());
            let ghost = Car::new(id, draft("Ghost", 2000, "1"));
            assert!(ctx.repository.update(&ghost).await.expect("update").is_none());
        }
    });
}

#[rstest]
#[case::postgres(Store::Postgres)]
#[case::diesel(Store::Diesel)]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn missing_table_is_a_query_error(#[case] store: Store) {
    let Some(ctx) = store_context(store) else {
        return;
    };
    ctx.execute("DROP TABLE car");

    let result = ctx.block_on(ctx.repository.list());

    assert!(
        matches!(result, Err(CarRepositoryError::Query { .. })),
        "expected query error, got {result:?}"
    );
}
