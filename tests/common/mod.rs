//! Shared helpers for integration tests.

// Each integration test binary compiles this module separately, so not
// every helper is used everywhere.
#![allow(dead_code)]

pub mod app;
pub mod fixtures;

pub use app::{TestApp, TestResponse};

use axum::http::StatusCode;

pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "unexpected status, body: {}",
        response.text()
    );
}
