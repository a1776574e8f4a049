use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{ImagePipeline, ImageRegistry};

/// Request body for the /upload endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadRequest {
    /// Base64-encoded image bytes (any container format the decoder supports)
    pub image: Option<String>,
    /// Optional display name; defaults to `image_{n}`
    pub name: Option<String>,
}

/// Response from the /upload endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    /// Total stored images after this upload
    pub total_images: usize,
}

/// Upload and process a new image
///
/// The payload is decoded, stretched to the panel size, dithered against
/// the 7-color palette and stored in the delivery queue. Nothing is
/// stored when any step fails.
#[utoipa::path(
    post,
    path = "/upload",
    request_body = UploadRequest,
    responses(
        (status = 200, description = "Image uploaded and processed", body = UploadResponse),
        (status = 400, description = "Missing or undecodable image payload"),
        (status = 500, description = "Image could not be processed"),
    ),
    tag = "Images"
)]
pub async fn handle_upload<R: ImageRegistry>(
    State(pipeline): State<Arc<ImagePipeline>>,
    State(registry): State<Arc<R>>,
    Json(request): Json<UploadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let encoded = request.image.ok_or(ApiError::MissingImage)?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;

    // Default name mirrors upload order
    let name = match request.name {
        Some(name) => name,
        None => format!("image_{}", registry.status().await.total + 1),
    };

    let pipeline = *pipeline;
    let pending = tokio::task::spawn_blocking(move || pipeline.process(&bytes, name))
        .await
        .map_err(|e| ApiError::Internal(format!("processing task failed: {e}")))??;

    let receipt = registry.store(pending).await;

    tracing::info!(
        id = receipt.id,
        total = receipt.total,
        "Image uploaded and processed"
    );

    Ok(Json(UploadResponse {
        message: "Image uploaded and processed successfully".to_string(),
        total_images: receipt.total,
    }))
}
