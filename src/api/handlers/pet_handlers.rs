use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::{
    api::state::AppState,
    domain::pet::model::{CreatePetRequest, NewPet},
    utils::errors::ApiError,
};

pub const FETCH_FAILED: &str = "Failed to fetch pets";
pub const CREATE_FAILED: &str = "Failed to create pet";

pub async fn list_pets(
    state: web::Data<AppState>
) -> impl Responder {
    match state.pets.list_all().await {
        Ok(pets) => HttpResponse::Ok().json(pets),
        Err(e) => ApiError::from_store(e, FETCH_FAILED).error_response()
    }
}

pub async fn create_pet(
    state: web::Data<AppState>,
    pet: web::Json<CreatePetRequest>
) -> impl Responder {

    // Rejected here so an invalid body never reaches the store.
    let new_pet = match NewPet::try_from(pet.into_inner()) {
        Ok(new_pet) => new_pet,
        Err(e) => return ApiError::from_store(e, CREATE_FAILED).error_response()
    };

    match state.pets.create(new_pet).await {
        Ok(created) => {
            log::info!("Created pet {}", created.id);
            HttpResponse::Created().json(created)
        },
        Err(e) => ApiError::from_store(e, CREATE_FAILED).error_response()
    }
}
