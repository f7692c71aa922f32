pub mod database;
pub mod memory;
pub mod mongodb;

pub use self::database::mongo_context;
pub use self::memory::pet_repository::InMemoryPetRepository;
pub use self::mongodb::pet_repository::MongoPetRepository;
