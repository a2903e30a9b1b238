//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the `/cars` and health handlers together with the
//! schema wrappers from [`crate::inbound::http::schemas`], so domain types
//! stay free of utoipa derives. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for tooling.

use crate::inbound::http::schemas::{
    CarNotFoundSchema, CarRequestSchema, CarSchema, ErrorCodeSchema, ErrorSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cars API",
        description = "CRUD over a fleet of cars backed by a memory, SQL or Diesel store."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::cars::get_cars,
        crate::inbound::http::cars::create_car,
        crate::inbound::http::cars::replace_car,
        crate::inbound::http::cars::delete_car,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CarSchema,
        CarRequestSchema,
        CarNotFoundSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "cars", description = "Create, read, replace and delete cars"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
