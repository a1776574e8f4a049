use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::ImageRegistry;

/// Retrieve the next image in the panel's wire format
///
/// Returns the image at the round-robin cursor as `text/plain`: one
/// `0xHH` token per pixel in row-major order, joined by `", "` —
/// 268,800 tokens for the 600x448 panel. The image stays stored and
/// comes around again on later polls.
#[utoipa::path(
    get,
    path = "/get-img-data",
    responses(
        (status = 200, description = "Pixel byte codes as comma-separated 0xHH tokens", body = String, content_type = "text/plain"),
        (status = 404, description = "No images available; the device should back off and retry"),
    ),
    tag = "Device"
)]
pub async fn handle_image_data<R: ImageRegistry>(
    State(registry): State<Arc<R>>,
) -> Result<Response, ApiError> {
    let image = registry.next().await.ok_or(ApiError::NoImages)?;

    tracing::debug!(id = image.id, name = %image.name, "Serving image data");

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        image.data.clone(),
    )
        .into_response())
}
