//! Car data model.
//!
//! A [`CarDraft`] holds the client-supplied fields before persistence; a
//! [`Car`] is a draft that a store has accepted and assigned a [`CarId`].
//! Prices are exact decimals and serialise as JSON numbers with their digits
//! preserved (`18000.00` stays `18000.00`).

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validation errors returned by the car constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarValidationError {
    NonPositiveId { value: i64 },
    EmptyBrand,
    NegativePrice,
}

impl CarValidationError {
    /// Name of the JSON field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveId { .. } => "id",
            Self::EmptyBrand => "brand",
            Self::NegativePrice => "price",
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonPositiveId { .. } => "invalid_id",
            Self::EmptyBrand => "brand_must_not_be_empty",
            Self::NegativePrice => "price_must_not_be_negative",
        }
    }
}

impl fmt::Display for CarValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId { value } => write!(f, "car id must be positive, got {value}"),
            Self::EmptyBrand => write!(f, "brand must not be empty"),
            Self::NegativePrice => write!(f, "price must not be negative"),
        }
    }
}

impl std::error::Error for CarValidationError {}

/// Store-assigned car identifier.
///
/// ## Invariants
/// - Always strictly positive.
///
/// # Examples
/// ```
/// use cars_backend::domain::CarId;
///
/// let id = CarId::new(3).expect("positive id");
/// assert_eq!(id.get(), 3);
/// assert!(CarId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct CarId(i64);

impl CarId {
    /// Validate and wrap a raw identifier.
    pub fn new(value: i64) -> Result<Self, CarValidationError> {
        if value <= 0 {
            return Err(CarValidationError::NonPositiveId { value });
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CarId> for i64 {
    fn from(value: CarId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for CarId {
    type Error = CarValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Car fields awaiting persistence.
///
/// ## Invariants
/// - `brand` is non-empty once trimmed.
/// - `price` is zero or positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDraft {
    brand: String,
    year: i32,
    price: Decimal,
}

impl CarDraft {
    /// Validate and construct a draft.
    ///
    /// # Examples
    /// ```
    /// use cars_backend::domain::CarDraft;
    /// use rust_decimal::Decimal;
    ///
    /// let draft = CarDraft::new("Toyota", 2020, Decimal::new(1_800_000, 2)).expect("valid");
    /// assert_eq!(draft.brand(), "Toyota");
    /// assert!(CarDraft::new("  ", 2020, Decimal::ONE).is_err());
    /// ```
    pub fn new(
        brand: impl Into<String>,
        year: i32,
        price: Decimal,
    ) -> Result<Self, CarValidationError> {
        let brand = brand.into();
        if brand.trim().is_empty() {
            return Err(CarValidationError::EmptyBrand);
        }
        if price.is_sign_negative() && !price.is_zero() {
            return Err(CarValidationError::NegativePrice);
        }
        Ok(Self { brand, year, price })
    }

    /// Manufacturer or model label.
    pub fn brand(&self) -> &str {
        self.brand.as_str()
    }

    /// Model year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Exact price.
    pub fn price(&self) -> Decimal {
        self.price
    }
}

/// Persisted car.
///
/// Serialises as `{"id": 1, "brand": "Mazda", "year": 2018, "price": 12000}`.
///
/// # Examples
/// ```
/// use cars_backend::domain::{Car, CarDraft, CarId};
/// use rust_decimal::Decimal;
///
/// let draft = CarDraft::new("Mazda", 2018, Decimal::from(12_000)).expect("valid draft");
/// let car = Car::new(CarId::new(1).expect("id"), draft);
/// let json = serde_json::to_string(&car).expect("serialise");
/// assert_eq!(json, r#"{"id":1,"brand":"Mazda","year":2018,"price":12000}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CarDto", into = "CarDto")]
pub struct Car {
    id: CarId,
    draft: CarDraft,
}

impl Car {
    /// Attach a store-assigned identifier to a draft.
    pub fn new(id: CarId, draft: CarDraft) -> Self {
        Self { id, draft }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> CarId {
        self.id
    }

    /// Manufacturer or model label.
    pub fn brand(&self) -> &str {
        self.draft.brand()
    }

    /// Model year.
    pub fn year(&self) -> i32 {
        self.draft.year()
    }

    /// Exact price.
    pub fn price(&self) -> Decimal {
        self.draft.price()
    }

    /// Borrow the mutable fields.
    pub fn draft(&self) -> &CarDraft {
        &self.draft
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CarDto {
    id: i64,
    brand: String,
    year: i32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    price: Decimal,
}

impl From<Car> for CarDto {
    fn from(value: Car) -> Self {
        let Car { id, draft } = value;
        Self {
            id: id.get(),
            brand: draft.brand,
            year: draft.year,
            price: draft.price,
        }
    }
}

impl TryFrom<CarDto> for Car {
    type Error = CarValidationError;

    fn try_from(value: CarDto) -> Result<Self, Self::Error> {
        let CarDto {
            id,
            brand,
            year,
            price,
        } = value;
        Ok(Self::new(CarId::new(id)?, CarDraft::new(brand, year, price)?))
    }
}
