use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::domain::pet::model::{storage_timestamp, NewPet, Pet};
use crate::domain::pet::repository::PetRepository;
use crate::utils::errors::StoreError;

/// Process-local pet store.
///
/// Ids and timestamps follow the same rules as the MongoDB store. Calling
/// `set_available(false)` makes every operation fail as if the database
/// were unreachable.
pub struct InMemoryPetRepository {
    // Insertion order, oldest first.
    pets: RwLock<Vec<Pet>>,
    available: AtomicBool,
}

impl InMemoryPetRepository {
    pub fn new() -> Self {
        InMemoryPetRepository {
            pets: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.pets.read().map(|pets| pets.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store is offline".to_string()))
        }
    }
}

impl Default for InMemoryPetRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {

    async fn list_all(&self) -> Result<Vec<Pet>, StoreError> {
        self.check_available()?;

        let pets = self.pets.read().map_err(poisoned)?;
        let mut listed: Vec<Pet> = pets.iter().rev().cloned().collect();
        // Stable sort keeps later inserts ahead on equal timestamps.
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn create(&self, pet: NewPet) -> Result<Pet, StoreError> {
        pet.validate()?;
        self.check_available()?;

        let now = storage_timestamp(Utc::now());
        let created = Pet {
            id: ObjectId::new().to_hex(),
            name: pet.name,
            breed: pet.breed,
            age: pet.age,
            category: pet.category,
            gender: pet.gender,
            image: pet.image,
            created_at: now,
            updated_at: now,
        };

        self.pets.write().map_err(poisoned)?.push(created.clone());
        Ok(created)
    }
}
