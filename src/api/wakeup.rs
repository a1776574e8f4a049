use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::WakeSchedule;

/// Response from the /wakeup-interval endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct WakeupResponse {
    /// Seconds until the device should poll again
    pub interval: u64,
}

/// Tell the device how long to sleep before the next poll
///
/// Inside the configured day window the interval is fixed (one hour by
/// default); at night it is the number of seconds until the window
/// opens again.
#[utoipa::path(
    get,
    path = "/wakeup-interval",
    responses(
        (status = 200, description = "Sleep interval in seconds", body = WakeupResponse),
    ),
    tag = "Device"
)]
pub async fn handle_wakeup(State(schedule): State<WakeSchedule>) -> impl IntoResponse {
    let interval = schedule.interval_at(chrono::Local::now().naive_local());
    Json(WakeupResponse { interval })
}
