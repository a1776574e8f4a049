use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No image data provided")]
    MissingImage,

    #[error("Invalid base64 image payload: {0}")]
    InvalidPayload(String),

    #[error("No images available")]
    NoImages,

    #[error("Album sync is not configured")]
    SyncNotConfigured,

    #[error("Album sync failed: {0}")]
    Sync(#[from] crate::services::album_sync::SyncError),

    #[error("Processing error: {0}")]
    Process(#[from] ProcessError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Image processing error: {0}")]
    Processing(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingImage => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NoImages => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::SyncNotConfigured => (StatusCode::CONFLICT, self.to_string()),
            ApiError::Sync(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Process(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
