use async_trait::async_trait;
use crate::{domain::pet::model::{NewPet, Pet}, utils::errors::StoreError};

#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Every stored pet, newest `createdAt` first.
    async fn list_all(&self) -> Result<Vec<Pet>, StoreError>;

    /// Validates and persists `pet`, assigning its id and timestamps.
    async fn create(&self, pet: NewPet) -> Result<Pet, StoreError>;
}
