use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use mongodb::error::Error as MongoError;
use thiserror::Error;

/// Failures raised by a pet store.
///
/// `Validation` is the only client-caused variant; everything else means the
/// backing storage could not serve the operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupted record: {0}")]
    Corrupted(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Mongo(#[from] MongoError),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

impl ApiError {
    /// Maps a store failure onto the HTTP taxonomy.
    ///
    /// Validation messages reach the client as-is. Storage causes are logged
    /// and replaced by `public_message`.
    pub fn from_store(err: StoreError, public_message: &str) -> Self {
        match err {
            StoreError::Validation(message) => ApiError::BadRequest(message),
            other => {
                log::error!("{}: {}", public_message, other);
                ApiError::InternalServerError(public_message.to_string())
            }
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(message)
            | ApiError::InternalServerError(message)
            | ApiError::NotImplemented(message) => message,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.message()
        }))
    }
}

// ----------------------------- TESTS --------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{HttpResponse, ResponseError};
    use serde_json::Value;

    async fn extract_json_from_response(response: HttpResponse) -> Value {
        let body = response.into_body();
        let bytes = actix_web::body::to_bytes(body).await.unwrap();
        serde_json::from_slice(&bytes).expect("Failed to parse JSON response")
    }

    fn create_mock_mongo_error() -> MongoError {
        MongoError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused by 10.0.0.7:27017"
        ))
    }

    #[test]
    fn test_store_error_display() {
        let validation = StoreError::Validation("Name required".to_string());
        assert_eq!(validation.to_string(), "Validation error: Name required");

        let unavailable = StoreError::Unavailable("down".to_string());
        assert_eq!(unavailable.to_string(), "Storage unavailable: down");
    }

    #[test]
    fn test_from_mongo_error() {
        let store_error: StoreError = create_mock_mongo_error().into();
        assert!(matches!(store_error, StoreError::Mongo(_)));
    }

    #[test]
    fn test_from_store_hides_corrupted_record_detail() {
        let api_error = ApiError::from_store(
            StoreError::Corrupted("stored pet has no _id".to_string()),
            "Failed to fetch pets",
        );
        assert_eq!(api_error, ApiError::InternalServerError("Failed to fetch pets".to_string()));
    }

    #[test]
    fn test_from_store_keeps_validation_message() {
        let api_error = ApiError::from_store(
            StoreError::Validation("Name required".to_string()),
            "Failed to create pet",
        );
        assert_eq!(api_error, ApiError::BadRequest("Name required".to_string()));
    }

    #[test]
    fn test_from_store_hides_storage_cause() {
        let api_error = ApiError::from_store(
            StoreError::Mongo(create_mock_mongo_error()),
            "Failed to fetch pets",
        );
        assert_eq!(api_error, ApiError::InternalServerError("Failed to fetch pets".to_string()));
        assert!(!api_error.to_string().contains("10.0.0.7"));
    }

    #[actix_web::test]
    async fn test_bad_request_error_response() {
        let response = ApiError::BadRequest("Name required".to_string()).error_response();

        assert_eq!(response.status(), 400);

        let json = extract_json_from_response(response).await;
        assert_eq!(json, serde_json::json!({ "message": "Name required" }));
    }

    #[actix_web::test]
    async fn test_internal_server_error_response() {
        let response = ApiError::InternalServerError("Failed to fetch pets".to_string()).error_response();

        assert_eq!(response.status(), 500);

        let json = extract_json_from_response(response).await;
        assert_eq!(json["message"], "Failed to fetch pets");
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_not_implemented_error_response() {
        let response = ApiError::NotImplemented("Authentication is not available".to_string()).error_response();

        assert_eq!(response.status(), 501);

        let json = extract_json_from_response(response).await;
        assert_eq!(json["message"], "Authentication is not available");
    }

    #[actix_web::test]
    async fn test_special_characters_in_messages() {
        let special_message = "Error with \"quotes\" and \n newlines";
        let response = ApiError::BadRequest(special_message.to_string()).error_response();
        let json = extract_json_from_response(response).await;

        assert_eq!(json["message"], special_message);
    }

    #[actix_web::test]
    async fn test_content_type_header() {
        let response = ApiError::BadRequest("test".to_string()).error_response();

        let content_type = response.headers().get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.contains("application/json"));
    }
}
