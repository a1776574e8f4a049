use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::services::ImageRegistry;

/// Response from the /clear-images endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ClearResponse {
    pub message: String,
}

/// Clear all stored images
///
/// Atomically resets the image sequence, the delivered set and the
/// round-robin cursor.
#[utoipa::path(
    post,
    path = "/clear-images",
    responses(
        (status = 200, description = "Registry cleared", body = ClearResponse),
    ),
    tag = "Images"
)]
pub async fn handle_clear<R: ImageRegistry>(State(registry): State<Arc<R>>) -> impl IntoResponse {
    registry.clear().await;
    tracing::info!("Cleared all stored images");
    Json(ClearResponse {
        message: "All images cleared".to_string(),
    })
}
