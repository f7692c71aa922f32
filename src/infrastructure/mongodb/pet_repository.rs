use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};

use crate::domain::pet::model::{storage_timestamp, NewPet, Pet};
use crate::domain::pet::repository::PetRepository;
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::utils::errors::StoreError;

pub const PETS_COLLECTION: &str = "pets";

/// Stored form of a pet. Field names match the documents already in the collection.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct PetDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    updated_at: bson::DateTime,
}

impl PetDocument {
    fn new(pet: NewPet, now: DateTime<Utc>) -> Self {
        let stamp = bson::DateTime::from_millis(now.timestamp_millis());
        PetDocument {
            id: Some(ObjectId::new()),
            name: pet.name,
            breed: pet.breed,
            age: pet.age,
            category: pet.category,
            gender: pet.gender,
            image: pet.image,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn into_pet(self) -> Result<Pet, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::Corrupted("stored pet has no _id".to_string()))?;

        Ok(Pet {
            id: id.to_hex(),
            name: self.name,
            breed: self.breed,
            age: self.age,
            category: self.category,
            gender: self.gender,
            image: self.image,
            created_at: to_chrono(self.created_at)?,
            updated_at: to_chrono(self.updated_at)?,
        })
    }
}

fn to_chrono(stamp: bson::DateTime) -> Result<DateTime<Utc>, StoreError> {
    DateTime::<Utc>::from_timestamp_millis(stamp.timestamp_millis())
        .ok_or_else(|| StoreError::Corrupted(format!("stored timestamp out of range: {}", stamp)))
}

pub struct MongoPetRepository {
    pets: mongodb::Collection<PetDocument>
}

impl MongoPetRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self::with_collection(context, PETS_COLLECTION)
    }

    pub fn with_collection(context: &MongoContext, name: &str) -> Self {
        Self {
            pets: context.collection(name)
        }
    }

    /// Backs the newest-first listing with an index.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "createdAt": -1, "_id": -1 })
            .build();
        self.pets.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl PetRepository for MongoPetRepository {

    async fn list_all(&self) -> Result<Vec<Pet>, StoreError> {
        let mut cursor = self.pets
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await?;

        let mut pets = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            pets.push(document.into_pet()?);
        }
        Ok(pets)
    }

    async fn create(&self, pet: NewPet) -> Result<Pet, StoreError> {
        pet.validate()?;

        let document = PetDocument::new(pet, storage_timestamp(Utc::now()));
        self.pets.insert_one(&document).await?;

        document.into_pet()
    }
}
