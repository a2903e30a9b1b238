//! Request validation helpers for the car handlers.
//!
//! Every failure becomes an `invalid_request` error whose details name the
//! offending field and a machine-readable reason.

use rust_decimal::Decimal;
use serde_json::{Number, json};

use crate::domain::{CarId, CarValidationError, Error};

/// Validation reasons reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    InvalidPrice,
    InvalidJson,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidPrice => "invalid_price",
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidQuery => "invalid_query",
        }
    }
}

/// Field name of a request parameter or body member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const ID: FieldName = FieldName::new("id");
pub(crate) const BRAND: FieldName = FieldName::new("brand");
pub(crate) const YEAR: FieldName = FieldName::new("year");
pub(crate) const PRICE: FieldName = FieldName::new("price");

fn field_error(field: FieldName, code: &str, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

fn field_value_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
        "value": value,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField.as_str(),
        format!("missing required field: {name}"),
    )
}

pub(crate) fn invalid_id_error(value: &str) -> Error {
    field_value_error(
        ID,
        ErrorCode::InvalidId,
        "id must be a positive integer".to_owned(),
        value,
    )
}

pub(crate) fn invalid_json_error(message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "code": ErrorCode::InvalidJson.as_str() }))
}

pub(crate) fn invalid_query_error(message: impl Into<String>) -> Error {
    Error::invalid_request(message)
        .with_details(json!({ "code": ErrorCode::InvalidQuery.as_str() }))
}

/// Map a domain validation failure onto the field that caused it.
pub(crate) fn car_validation_error(error: &CarValidationError) -> Error {
    let field = match error {
        CarValidationError::NonPositiveId { .. } => ID,
        CarValidationError::EmptyBrand => BRAND,
        CarValidationError::NegativePrice => PRICE,
    };
    field_error(field, error.code(), error.to_string())
}

/// Parse the `id` query parameter.
pub(crate) fn parse_car_id(raw: &str) -> Result<CarId, Error> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|value| CarId::new(value).ok())
        .ok_or_else(|| invalid_id_error(raw))
}

/// Require and parse the `id` query parameter.
pub(crate) fn require_car_id(raw: Option<&str>) -> Result<CarId, Error> {
    raw.map_or_else(|| Err(missing_field_error(ID)), parse_car_id)
}

/// Convert a JSON number to an exact decimal.
///
/// Accepts plain and scientific notation; rejects values that would need
/// rounding.
pub(crate) fn parse_price(number: &Number) -> Result<Decimal, Error> {
    let raw = number.to_string();
    let parsed = match raw.split_once(['e', 'E']) {
        None => Decimal::from_str_exact(&raw).ok(),
        Some((base, _)) => Decimal::from_str_exact(base).ok().and_then(|base| {
            Decimal::from_scientific(&raw)
                .ok()
                .filter(|value| significant_digits(*value) == significant_digits(base))
        }),
    };
    parsed.ok_or_else(|| {
        field_value_error(
            PRICE,
            ErrorCode::InvalidPrice,
            "price must be a decimal number".to_owned(),
            &raw,
        )
    })
}

// Mantissa without trailing zeros; differs between two values when one was
// rounded.
fn significant_digits(value: Decimal) -> i128 {
    let mut mantissa = value.mantissa();
    while mantissa != 0 && mantissa % 10 == 0 {
        mantissa /= 10;
    }
    mantissa
}
