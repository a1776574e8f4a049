use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{AlbumSync, ImagePipeline, ImageRegistry};

/// Response from the /sync-album endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct SyncResponse {
    pub message: String,
    /// Photos stored during this pass
    pub processed: usize,
}

/// Trigger one album sync pass
#[utoipa::path(
    post,
    path = "/sync-album",
    responses(
        (status = 200, description = "Sync pass completed", body = SyncResponse),
        (status = 409, description = "Album sync credentials are not configured"),
        (status = 500, description = "Sync pass failed"),
    ),
    tag = "Images"
)]
pub async fn handle_sync<R: ImageRegistry>(
    State(album_sync): State<Option<Arc<AlbumSync>>>,
    State(pipeline): State<Arc<ImagePipeline>>,
    State(registry): State<Arc<R>>,
) -> Result<impl IntoResponse, ApiError> {
    let album_sync = album_sync.ok_or(ApiError::SyncNotConfigured)?;
    let processed = album_sync.run_once(&pipeline, registry.as_ref()).await?;

    Ok(Json(SyncResponse {
        message: "Album sync complete".to_string(),
        processed,
    }))
}
