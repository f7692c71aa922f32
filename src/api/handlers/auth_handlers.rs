use actix_web::{HttpResponse, Responder, ResponseError};

use crate::utils::errors::ApiError;

pub const AUTH_UNAVAILABLE: &str = "Authentication is not available";

// The auth group is mounted so clients get a stable answer; no account logic exists yet.

pub async fn register() -> impl Responder {
    not_available()
}

pub async fn login() -> impl Responder {
    not_available()
}

fn not_available() -> HttpResponse {
    ApiError::NotImplemented(AUTH_UNAVAILABLE.to_string()).error_response()
}
