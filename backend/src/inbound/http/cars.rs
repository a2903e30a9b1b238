//! `/cars` CRUD handlers.
//!
//! ```text
//! GET    /cars           list every car
//! GET    /cars?id=1      one car, or 404 {"Сообщение": "..."}
//! POST   /cars           create from {brand, year, price}
//! PUT    /cars?id=1      replace brand, year and price
//! DELETE /cars?id=1      delete and return the removed car
//! ```
//!
//! Each handler calls exactly one driving-port operation.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::domain::{CarDraft, Error, ErrorCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CarNotFoundSchema, CarRequestSchema, CarSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    BRAND, PRICE, YEAR, car_validation_error, invalid_json_error, invalid_query_error,
    missing_field_error, parse_car_id, parse_price, require_car_id,
};

/// Optional `id` query parameter, parsed by hand so errors carry details.
#[derive(Debug, Default, Deserialize)]
pub struct CarIdQuery {
    pub id: Option<String>,
}

/// Body of `POST /cars` and `PUT /cars`.
///
/// Any `id` member is ignored; identifiers come from the store or the query.
#[derive(Debug, Deserialize)]
pub struct CarRequest {
    pub brand: Option<String>,
    pub year: Option<i32>,
    pub price: Option<Number>,
}

impl TryFrom<CarRequest> for CarDraft {
    type Error = Error;

    fn try_from(payload: CarRequest) -> Result<Self, Self::Error> {
        let brand = payload.brand.ok_or_else(|| missing_field_error(BRAND))?;
        let year = payload.year.ok_or_else(|| missing_field_error(YEAR))?;
        let price = payload
            .price
            .as_ref()
            .ok_or_else(|| missing_field_error(PRICE))
            .and_then(parse_price)?;
        CarDraft::new(brand, year, price).map_err(|err| car_validation_error(&err))
    }
}

/// Legacy body returned when `GET /cars?id=` does not resolve.
#[derive(Debug, Serialize)]
struct CarNotFoundBody<'a> {
    #[serde(rename = "Сообщение")]
    message: &'a str,
}

fn legacy_not_found(error: &Error) -> HttpResponse {
    HttpResponse::NotFound().json(CarNotFoundBody {
        message: error.message(),
    })
}

/// JSON extractor settings: malformed bodies become `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        invalid_json_error(format!("invalid JSON body: {err}")).into()
    })
}

/// Query extractor settings: malformed query strings become `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        invalid_query_error(format!("invalid query string: {err}")).into()
    })
}

/// Register the `/cars` handlers and their extractor settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(get_cars)
        .service(create_car)
        .service(replace_car)
        .service(delete_car);
}

/// List every car, or fetch one when `id` is given.
#[utoipa::path(
    get,
    path = "/cars",
    params(("id" = Option<i64>, Query, description = "Car id; omit to list every car")),
    responses(
        (status = 200, description = "Every car, or the car with `id`", body = [CarSchema]),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "No car with this id", body = CarNotFoundSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Car store timed out", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "getCars"
)]
#[get("/cars")]
pub async fn get_cars(
    state: web::Data<HttpState>,
    query: web::Query<CarIdQuery>,
) -> ApiResult<HttpResponse> {
    let Some(raw_id) = query.into_inner().id else {
        let cars = state.cars_query.list_cars().await?;
        return Ok(HttpResponse::Ok().json(cars));
    };

    let id = parse_car_id(&raw_id)?;
    match state.cars_query.fetch_car(id).await {
        Ok(car) => Ok(HttpResponse::Ok().json(car)),
        Err(err) if err.code() == ErrorCode::NotFound => Ok(legacy_not_found(&err)),
        Err(err) => Err(err),
    }
}

/// Create a car; the store assigns its id.
#[utoipa::path(
    post,
    path = "/cars",
    request_body = CarRequestSchema,
    responses(
        (status = 200, description = "Stored car", body = CarSchema),
        (status = 400, description = "Invalid body", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Car store timed out", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "createCar"
)]
#[post("/cars")]
pub async fn create_car(
    state: web::Data<HttpState>,
    payload: web::Json<CarRequest>,
) -> ApiResult<HttpResponse> {
    let draft = CarDraft::try_from(payload.into_inner())?;
    let car = state.cars.create_car(draft).await?;
    Ok(HttpResponse::Ok().json(car))
}

/// Replace brand, year and price of the car with `id`.
#[utoipa::path(
    put,
    path = "/cars",
    params(("id" = i64, Query, description = "Car id")),
    request_body = CarRequestSchema,
    responses(
        (status = 200, description = "Stored car", body = CarSchema),
        (status = 400, description = "Missing or invalid id or body", body = ErrorSchema),
        (status = 404, description = "No car with this id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Car store timed out", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "replaceCar"
)]
#[put("/cars")]
pub async fn replace_car(
    state: web::Data<HttpState>,
    query: web::Query<CarIdQuery>,
    payload: web::Json<CarRequest>,
) -> ApiResult<HttpResponse> {
    let id = require_car_id(query.id.as_deref())?;
    let draft = CarDraft::try_from(payload.into_inner())?;
    let car = state.cars.replace_car(id, draft).await?;
    Ok(HttpResponse::Ok().json(car))
}

/// Delete the car with `id` and return it.
#[utoipa::path(
    delete,
    path = "/cars",
    params(("id" = i64, Query, description = "Car id")),
    responses(
        (status = 200, description = "Deleted car", body = CarSchema),
        (status = 400, description = "Missing or invalid id", body = ErrorSchema),
        (status = 404, description = "No car with this id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Car store timed out", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "deleteCar"
)]
#[delete("/cars")]
pub async fn delete_car(
    state: web::Data<HttpState>,
    query: web::Query<CarIdQuery>,
) -> ApiResult<HttpResponse> {
    let id = require_car_id(query.id.as_deref())?;
    let car = state.cars.remove_car(id).await?;
    Ok(HttpResponse::Ok().json(car))
}

#[cfg(test)]
#[path = "cars_tests.rs"]
mod tests;
