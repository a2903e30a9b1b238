//! Process-local `CarRepository` backed by an ordered map.
//!
//! One mutex guards both the map and the id counter, so concurrent writers
//! never observe or assign the same id twice. Ids are never reused after a
//! delete.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::ports::{CarRepository, CarRepositoryError};
use crate::domain::{Car, CarDraft, CarId};

/// Demo fleet loaded by [`InMemoryCarRepository::with_seed_fleet`].
const SEED_FLEET: [(&str, i32, i64); 5] = [
    ("Mazda", 2018, 12_000),
    ("VW", 2021, 15_000),
    ("Ford", 2022, 14_000),
    ("BMW", 2023, 35_000),
    ("Opel", 2024, 21_000),
];

#[derive(Debug, Default)]
struct Garage {
    last_id: i64,
    cars: BTreeMap<CarId, Car>,
}

impl Garage {
    fn insert(&mut self, draft: CarDraft) -> Result<Car, CarRepositoryError> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| CarRepositoryError::query("car id sequence exhausted"))?;
        let id = CarId::new(next).map_err(|err| CarRepositoryError::query(err.to_string()))?;
        self.last_id = next;
        let car = Car::new(id, draft);
        self.cars.insert(id, car.clone());
        Ok(car)
    }
}

/// In-memory implementation of [`CarRepository`].
#[derive(Debug, Default)]
pub struct InMemoryCarRepository {
    garage: Mutex<Garage>,
}

impl InMemoryCarRepository {
    /// Empty store; the first saved car gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with five demo cars holding ids 1 to 5.
    pub fn with_seed_fleet() -> Self {
        let mut garage = Garage::default();
        for (brand, year, price) in SEED_FLEET {
            let seeded = CarDraft::new(brand, year, Decimal::from(price))
                .map_err(|err| CarRepositoryError::query(err.to_string()))
                .and_then(|draft| garage.insert(draft));
            if let Err(err) = seeded {
                warn!(brand, error = %err, "skipping seed car");
            }
        }
        Self {
            garage: Mutex::new(garage),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Garage>, CarRepositoryError> {
        self.garage.lock().map_err(|_| {
            warn!("in-memory car store lock poisoned");
            CarRepositoryError::query("in-memory car store lock poisoned")
        })
    }
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn list(&self) -> Result<Vec<Car>, CarRepositoryError> {
        Ok(self.lock()?.cars.values().cloned().collect())
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        Ok(self.lock()?.cars.get(&id).cloned())
    }

    async fn save(&self, draft: &CarDraft) -> Result<Car, CarRepositoryError> {
        self.lock()?.insert(draft.clone())
    }

    async fn update(&self, replacement: &Car) -> Result<Option<Car>, CarRepositoryError> {
        let mut garage = self.lock()?;
        Ok(garage.cars.get_mut(&replacement.id()).map(|stored| {
            *stored = replacement.clone();
            stored.clone()
        }))
    }

    async fn delete(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        Ok(self.lock()?.cars.remove(&id))
    }
}
