pub mod config;
pub mod display_spec;
pub mod image;
pub mod schedule;

pub use config::{AppConfig, GooglePhotosConfig};
pub use display_spec::DisplaySpec;
pub use image::{PendingImage, ProcessedImage};
pub use schedule::WakeSchedule;
