//! Album sync tests against a mock Google Photos API.

mod common;

use common::{fixtures, TestApp};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inkframe::models::{AppConfig, DisplaySpec, GooglePhotosConfig};
use inkframe::services::{AlbumSync, ImagePipeline, ImageRegistry, InMemoryRegistry, SyncError};

fn google_config(server: &MockServer) -> GooglePhotosConfig {
    GooglePhotosConfig {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        refresh_token: "refresh".to_string(),
        album_id: "album-1".to_string(),
        token_url: format!("{}/token", server.uri()),
        api_base: server.uri(),
    }
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "expires_in": 3600,
        })))
        .mount(server)
        .await;
}

async fn mount_album(server: &MockServer, items: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/v1/mediaItems:search"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "mediaItems": items })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_sync_downloads_and_stores_new_photos() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_album(
        &server,
        json!([{
            "id": "media-1",
            "baseUrl": format!("{}/photo/media-1", server.uri()),
            "filename": "cat.jpg",
        }]),
    )
    .await;
    // The download URL carries the crop suffix in its path
    Mock::given(method("GET"))
        .and(path("/photo/media-1=w600-h448-c"))
        .respond_with(
            ResponseTemplate::new(200).set_body_bytes(fixtures::png_bytes(600, 448, [255, 0, 0])),
        )
        .mount(&server)
        .await;

    let sync = AlbumSync::new(google_config(&server), DisplaySpec::ACEP_5_65, 10);
    let pipeline = ImagePipeline::new(DisplaySpec::ACEP_5_65);
    let registry = InMemoryRegistry::new();

    let processed = sync.run_once(&pipeline, &registry).await.unwrap();
    assert_eq!(processed, 1);

    let image = registry.next().await.unwrap();
    assert_eq!(image.name, "cat.jpg");
    // Solid red is an exact palette color
    assert!(image.codes.iter().all(|&c| c == 0xE0));

    // A second pass sees the same media id and skips it
    let processed = sync.run_once(&pipeline, &registry).await.unwrap();
    assert_eq!(processed, 0);
    assert_eq!(registry.status().await.total, 1);
}

#[tokio::test]
async fn test_sync_skips_broken_photo_but_keeps_going() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_album(
        &server,
        json!([
            {
                "id": "bad",
                "baseUrl": format!("{}/photo/bad", server.uri()),
                "filename": "broken.jpg",
            },
            {
                "id": "good",
                "baseUrl": format!("{}/photo/good", server.uri()),
                "filename": "ok.jpg",
            }
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/photo/bad=w600-h448-c"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not an image".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/photo/good=w600-h448-c"))
        .respond_with(
            ResponseTemplate::new(200).set_body_bytes(fixtures::png_bytes(80, 60, [0, 0, 255])),
        )
        .mount(&server)
        .await;

    let sync = AlbumSync::new(google_config(&server), DisplaySpec::ACEP_5_65, 10);
    let pipeline = ImagePipeline::new(DisplaySpec::ACEP_5_65);
    let registry = InMemoryRegistry::new();

    let processed = sync.run_once(&pipeline, &registry).await.unwrap();
    assert_eq!(processed, 1);
    assert_eq!(registry.next().await.unwrap().name, "ok.jpg");
}

#[tokio::test]
async fn test_sync_surfaces_token_refresh_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let sync = AlbumSync::new(google_config(&server), DisplaySpec::ACEP_5_65, 10);
    let pipeline = ImagePipeline::new(DisplaySpec::ACEP_5_65);
    let registry = InMemoryRegistry::new();

    let result = sync.run_once(&pipeline, &registry).await;
    assert!(matches!(result, Err(SyncError::TokenRefresh(_))));
}

#[tokio::test]
async fn test_sync_surfaces_album_query_failure() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/v1/mediaItems:search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let sync = AlbumSync::new(google_config(&server), DisplaySpec::ACEP_5_65, 10);
    let pipeline = ImagePipeline::new(DisplaySpec::ACEP_5_65);
    let registry = InMemoryRegistry::new();

    let result = sync.run_once(&pipeline, &registry).await;
    assert!(matches!(result, Err(SyncError::AlbumQuery(_))));
}

#[tokio::test]
async fn test_sync_album_endpoint_end_to_end() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_album(
        &server,
        json!([{
            "id": "media-9",
            "baseUrl": format!("{}/photo/media-9", server.uri()),
            "filename": "holiday.jpg",
        }]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/photo/media-9=w600-h448-c"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(fixtures::png_bytes(600, 448, [255, 255, 255])),
        )
        .mount(&server)
        .await;

    let config = AppConfig {
        google_photos: Some(google_config(&server)),
        ..AppConfig::default()
    };
    let app = TestApp::with_config(config);

    let response = app.post("/sync-album").await;
    common::assert_ok(&response);
    let parsed: serde_json::Value = response.json();
    assert_eq!(parsed["message"], "Album sync complete");
    assert_eq!(parsed["processed"], 1);

    // The synced photo is now served to the device
    let response = app.get("/get-img-data").await;
    common::assert_ok(&response);
    assert!(response.text().starts_with("0xFF, 0xFF"));
}
