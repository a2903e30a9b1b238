//! Diesel table definitions. Must match [`super::CAR_TABLE_DDL`].

diesel::table! {
    /// Stored cars; `id` comes from the `SERIAL` sequence.
    car (id) {
        id -> Int4,
        brand -> Text,
        year -> Int4,
        price -> Numeric,
    }
}
