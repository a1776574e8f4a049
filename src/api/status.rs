use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::services::ImageRegistry;

/// Response from the /status endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Number of stored images
    pub total_images: usize,
    /// Number of distinct images delivered at least once
    pub sent_images: usize,
    /// Current round-robin cursor position
    pub current_index: usize,
    /// Liveness marker
    pub uptime: String,
}

/// Read the registry counters
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Registry counters", body = StatusResponse),
    ),
    tag = "Images"
)]
pub async fn handle_status<R: ImageRegistry>(State(registry): State<Arc<R>>) -> impl IntoResponse {
    let status = registry.status().await;
    Json(StatusResponse {
        total_images: status.total,
        sent_images: status.delivered,
        current_index: status.cursor,
        uptime: "running".to_string(),
    })
}
