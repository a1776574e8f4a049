//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    http::header::CONNECTION,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::error::ApiError;
use crate::models::{AppConfig, DisplaySpec};
use crate::services::{AlbumSync, ImagePipeline, InMemoryRegistry};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub registry: Arc<InMemoryRegistry>,
    pub pipeline: Arc<ImagePipeline>,
    pub album_sync: Option<Arc<AlbumSync>>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: Arc<AppConfig>) -> AppState {
    let registry = Arc::new(InMemoryRegistry::new());
    let pipeline = Arc::new(ImagePipeline::new(DisplaySpec::ACEP_5_65));
    let album_sync = config.google_photos.clone().map(|google| {
        Arc::new(AlbumSync::new(
            google,
            DisplaySpec::ACEP_5_65,
            config.sync_max_photos,
        ))
    });

    AppState {
        config,
        registry,
        pipeline,
        album_sync,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// It includes the `Connection: close` header to prevent connection
/// accumulation from ESP32 clients.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Frame API endpoints
        .route("/upload", post(handle_upload))
        .route("/get-img-data", get(handle_image_data))
        .route("/status", get(handle_status))
        .route("/wakeup-interval", get(handle_wakeup))
        .route("/clear-images", post(handle_clear))
        .route("/sync-album", post(handle_sync))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Disable keep-alive: the ESP32 HTTPClient defaults to keep-alive
        // but never reuses connections, so orphaned connections accumulate.
        .layer(SetResponseHeaderLayer::overriding(
            CONNECTION,
            axum::http::HeaderValue::from_static("close"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_upload(
    axum::extract::State(state): axum::extract::State<AppState>,
    Json(request): Json<api::UploadRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    api::handle_upload(
        axum::extract::State(state.pipeline),
        axum::extract::State(state.registry),
        Json(request),
    )
    .await
}

async fn handle_image_data(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_image_data(axum::extract::State(state.registry)).await
}

async fn handle_status(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    api::handle_status(axum::extract::State(state.registry)).await
}

async fn handle_wakeup(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    api::handle_wakeup(axum::extract::State(state.config.schedule)).await
}

async fn handle_clear(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    api::handle_clear(axum::extract::State(state.registry)).await
}

async fn handle_sync(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    api::handle_sync(
        axum::extract::State(state.album_sync.clone()),
        axum::extract::State(state.pipeline),
        axum::extract::State(state.registry),
    )
    .await
}
