//! Google Photos album sync.
//!
//! Pulls photos from a shared album and pushes them through the same
//! pipeline as manual uploads. The album service already crops to the
//! panel size when asked, so downloads stay small.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::{DisplaySpec, GooglePhotosConfig};
use crate::services::{ImagePipeline, ImageRegistry};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Token refresh failed: {0}")]
    TokenRefresh(String),

    #[error("Album query failed: {0}")]
    AlbumQuery(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Debug, Deserialize)]
struct MediaSearchResponse {
    #[serde(default, rename = "mediaItems")]
    media_items: Vec<MediaItem>,
}

#[derive(Debug, Deserialize)]
struct MediaItem {
    id: String,
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(default)]
    filename: String,
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Fetches photos from a shared Google Photos album.
///
/// Access tokens are refreshed lazily and cached with a one-minute
/// safety margin. Media items already processed (by Google media id)
/// are skipped for the lifetime of the process.
pub struct AlbumSync {
    config: GooglePhotosConfig,
    spec: DisplaySpec,
    max_photos: usize,
    http: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
    synced: Mutex<HashSet<String>>,
}

impl AlbumSync {
    pub fn new(config: GooglePhotosConfig, spec: DisplaySpec, max_photos: usize) -> Self {
        Self {
            config,
            spec,
            max_photos,
            http: reqwest::Client::new(),
            token: Mutex::new(None),
            synced: Mutex::new(HashSet::new()),
        }
    }

    async fn access_token(&self) -> Result<String, SyncError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Utc::now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", self.config.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];
        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SyncError::TokenRefresh(format!(
                "status {}",
                response.status()
            )));
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SyncError::TokenRefresh(e.to_string()))?;

        // Refresh one minute before the token actually expires
        let expires_at = Utc::now() + Duration::seconds((token.expires_in - 60).max(0));
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at,
        });
        Ok(access_token)
    }

    async fn album_items(&self) -> Result<Vec<MediaItem>, SyncError> {
        let token = self.access_token().await?;
        let body = serde_json::json!({
            "albumId": self.config.album_id,
            // Google Photos API caps page size at 100
            "pageSize": self.max_photos.min(100),
        });
        let response = self
            .http
            .post(format!("{}/v1/mediaItems:search", self.config.api_base))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SyncError::AlbumQuery(format!(
                "status {}",
                response.status()
            )));
        }
        let parsed: MediaSearchResponse = response
            .json()
            .await
            .map_err(|e| SyncError::AlbumQuery(e.to_string()))?;
        Ok(parsed.media_items)
    }

    /// Run one sync pass: fetch album items, download and process new
    /// ones, store the results. Returns the number of photos stored.
    ///
    /// Per-item failures are logged and skipped; only token refresh and
    /// album query failures abort the pass.
    pub async fn run_once<R: ImageRegistry + ?Sized>(
        &self,
        pipeline: &ImagePipeline,
        registry: &R,
    ) -> Result<usize, SyncError> {
        let items = self.album_items().await?;
        tracing::info!(count = items.len(), "Fetched album media items");

        let mut processed = 0;
        for item in items {
            if self.synced.lock().await.contains(&item.id) {
                continue;
            }

            // Ask the photo service for a panel-sized crop
            let url = format!(
                "{}=w{}-h{}-c",
                item.base_url, self.spec.width, self.spec.height
            );
            let bytes = match self.download(&url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(media_id = %item.id, %e, "Failed to download photo");
                    continue;
                }
            };

            let name = if item.filename.is_empty() {
                item.id.clone()
            } else {
                item.filename.clone()
            };

            let pipeline = *pipeline;
            let task_name = name.clone();
            let result =
                tokio::task::spawn_blocking(move || pipeline.process(&bytes, task_name)).await;

            match result {
                Ok(Ok(pending)) => {
                    let receipt = registry.store(pending).await;
                    self.synced.lock().await.insert(item.id.clone());
                    processed += 1;
                    tracing::info!(media_id = %item.id, name = %name, id = receipt.id, "Synced album photo");
                }
                Ok(Err(e)) => {
                    tracing::warn!(media_id = %item.id, name = %name, %e, "Failed to process album photo");
                }
                Err(e) => {
                    tracing::warn!(media_id = %item.id, %e, "Album photo processing task failed");
                }
            }
        }

        Ok(processed)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SyncError::AlbumQuery(format!(
                "download status {}",
                response.status()
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
