//! OpenAPI schema wrappers for domain types.
//!
//! Domain types do not derive `ToSchema`; these mirrors carry the OpenAPI
//! shape in the adapter layer instead.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    code: ErrorCodeSchema,
    /// Human-readable message; redacted for internal errors.
    #[schema(example = "price must not be negative")]
    #[schema(rename = "error")]
    message: String,
    /// Correlation id, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "id", "code": "invalid_id"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Car`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Car)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CarSchema {
    #[schema(example = 1, minimum = 1)]
    id: i64,
    #[schema(example = "Mazda")]
    brand: String,
    #[schema(example = 2018)]
    year: i32,
    /// Exact decimal price, serialised as a JSON number.
    #[schema(value_type = f64, example = 12000)]
    price: String,
}

/// OpenAPI schema for the `POST`/`PUT` request body.
#[derive(ToSchema)]
#[schema(as = CarRequest)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CarRequestSchema {
    #[schema(example = "Toyota")]
    brand: String,
    #[schema(example = 2020)]
    year: i32,
    /// Zero or positive; digits are stored exactly.
    #[schema(value_type = f64, example = 18000.00, minimum = 0)]
    price: String,
}

/// Body of the legacy not-found response for `GET /cars?id=`.
#[derive(ToSchema)]
#[schema(as = CarNotFound)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CarNotFoundSchema {
    #[schema(rename = "Сообщение", example = "Модель автомобиля не найдена")]
    message: String,
}
