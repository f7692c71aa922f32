pub mod model;
pub mod repository;

pub use model::{CreatePetRequest, NewPet, Pet};
pub use repository::PetRepository;
