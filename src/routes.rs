use actix_web::{get, middleware::NormalizePath, web, Responder};

use crate::api::handlers::auth_handlers::{login, register};
use crate::api::handlers::pet_handlers::{create_pet, list_pets};
use crate::utils::errors::ApiError;

pub const INVALID_BODY: &str = "Invalid request body";

#[get("/")]
async fn entry_point() -> impl Responder {
    "This is the Adopto API. Pets are listed and created at /api/pets."
}

/// Everything the service mounts, shared by `main` and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.service(entry_point);
    pet_routes(cfg);
    auth_routes(cfg);
}

pub fn pet_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/pets")
            .route(web::get().to(list_pets))
            .route(web::post().to(create_pet))
    );
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
    );
}

/// `/api/pets/` and `/api/pets` reach the same handlers.
pub fn normalize_path() -> NormalizePath {
    NormalizePath::trim()
}

/// Malformed bodies get the same `{message}` shape as every other error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected request body: {}", err);
        ApiError::BadRequest(INVALID_BODY.to_string()).into()
    })
}
