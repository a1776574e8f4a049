use std::str::FromStr;

use crate::models::WakeSchedule;

/// Google Photos album sync credentials and endpoints.
#[derive(Debug, Clone)]
pub struct GooglePhotosConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub album_id: String,
    /// OAuth token endpoint (overridable so tests can point at a mock).
    pub token_url: String,
    /// Photos Library API base URL (overridable so tests can point at a mock).
    pub api_base: String,
}

impl GooglePhotosConfig {
    pub const DEFAULT_TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";
    pub const DEFAULT_API_BASE: &'static str = "https://photoslibrary.googleapis.com";

    /// Build from `GOOGLE_*` environment variables. Sync stays inactive
    /// unless all four credentials are present.
    fn from_env() -> Option<Self> {
        let client_id = std::env::var("GOOGLE_CLIENT_ID").ok()?;
        let client_secret = std::env::var("GOOGLE_CLIENT_SECRET").ok()?;
        let refresh_token = std::env::var("GOOGLE_REFRESH_TOKEN").ok()?;
        let album_id = std::env::var("GOOGLE_ALBUM_ID").ok()?;
        Some(Self {
            client_id,
            client_secret,
            refresh_token,
            album_id,
            token_url: Self::DEFAULT_TOKEN_URL.to_string(),
            api_base: Self::DEFAULT_API_BASE.to_string(),
        })
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Device polling schedule.
    pub schedule: WakeSchedule,
    /// Album sync credentials, if configured.
    pub google_photos: Option<GooglePhotosConfig>,
    /// Seconds between background album sync passes.
    pub sync_interval_secs: u64,
    /// Maximum photos fetched per sync pass.
    pub sync_max_photos: usize,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let schedule = WakeSchedule {
            day_start_hour: env_parsed_filtered("DAY_START_HOUR", 8, |&h| h < 24),
            day_end_hour: env_parsed_filtered("DAY_END_HOUR", 20, |&h| h < 24),
            day_interval_secs: env_parsed("DAY_INTERVAL_SECS", 3600),
        };

        let google_photos = GooglePhotosConfig::from_env();
        let sync_interval_secs = env_parsed("SYNC_INTERVAL_SECS", 1800);
        let sync_max_photos = env_parsed("SYNC_MAX_PHOTOS", 10);

        tracing::info!(
            bind_addr = %bind_addr,
            album_sync = google_photos.is_some(),
            day_window = format!("{:02}:00-{:02}:00", schedule.day_start_hour, schedule.day_end_hour),
            "Loaded configuration"
        );

        Self {
            bind_addr,
            schedule,
            google_photos,
            sync_interval_secs,
            sync_max_photos,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            schedule: WakeSchedule::default(),
            google_photos: None,
            sync_interval_secs: 1800,
            sync_max_photos: 10,
        }
    }
}

fn env_parsed<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_parsed_filtered<T: FromStr>(name: &str, default: T, filter: impl FnOnce(&T) -> bool) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(filter)
        .unwrap_or(default)
}
