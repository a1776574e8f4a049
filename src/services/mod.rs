pub mod album_sync;
pub mod image_pipeline;
pub mod image_registry;

pub use album_sync::{AlbumSync, SyncError};
pub use image_pipeline::ImagePipeline;
pub use image_registry::{ImageRegistry, InMemoryRegistry, RegistryStatus, StoreReceipt};
