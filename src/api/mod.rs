pub mod clear;
pub mod image_data;
pub mod status;
pub mod sync;
pub mod upload;
pub mod wakeup;

pub use clear::{handle_clear, ClearResponse, __path_handle_clear};
pub use image_data::{handle_image_data, __path_handle_image_data};
pub use status::{handle_status, StatusResponse, __path_handle_status};
pub use sync::{handle_sync, SyncResponse, __path_handle_sync};
pub use upload::{handle_upload, UploadRequest, UploadResponse, __path_handle_upload};
pub use wakeup::{handle_wakeup, WakeupResponse, __path_handle_wakeup};
