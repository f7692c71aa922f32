use std::sync::Arc;

use crate::domain::pet::repository::PetRepository;

/// Handles shared by every worker; built once in `main` and injected.
#[derive(Clone)]
pub struct AppState {
    pub pets: Arc<dyn PetRepository>
}

impl AppState {
    pub fn new(pets: Arc<dyn PetRepository>) -> Self {
        AppState { pets }
    }
}
