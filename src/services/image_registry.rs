//! Round-robin delivery queue for processed images.
//!
//! The registry is the only shared mutable state in the server. Every
//! operation takes the single internal mutex for one bounded critical
//! section, so a poller computing the cursor advance always observes a
//! length consistent with the element it just read.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::models::{PendingImage, ProcessedImage};

/// Read-only snapshot of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStatus {
    /// Number of stored images.
    pub total: usize,
    /// Number of distinct images returned by `next` at least once.
    pub delivered: usize,
    /// Current round-robin read position.
    pub cursor: usize,
}

/// Receipt returned by `store`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreReceipt {
    /// Identity assigned to the stored image.
    pub id: u64,
    /// Total stored images after the append.
    pub total: usize,
}

/// Trait for the image delivery queue
#[async_trait]
pub trait ImageRegistry: Send + Sync {
    /// Append a processed image. No content dedup — identical uploads
    /// get distinct identities.
    async fn store(&self, image: PendingImage) -> StoreReceipt;

    /// Return the image at the cursor and advance it, or `None` when
    /// the registry is empty. The image stays stored and will come
    /// around again on the next cycle.
    async fn next(&self) -> Option<Arc<ProcessedImage>>;

    /// Read-only counters.
    async fn status(&self) -> RegistryStatus;

    /// Drop all images, the delivered set and the cursor.
    async fn clear(&self);
}

struct RegistryState {
    images: Vec<Arc<ProcessedImage>>,
    cursor: usize,
    delivered: HashSet<u64>,
    next_id: u64,
}

/// In-memory image delivery queue.
///
/// Lifetime is the process lifetime; nothing persists across restarts.
pub struct InMemoryRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                images: Vec::new(),
                cursor: 0,
                delivered: HashSet::new(),
                next_id: 0,
            }),
        }
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageRegistry for InMemoryRegistry {
    async fn store(&self, image: PendingImage) -> StoreReceipt {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;
        state
            .images
            .push(Arc::new(ProcessedImage::from_pending(id, image)));
        StoreReceipt {
            id,
            total: state.images.len(),
        }
    }

    async fn next(&self) -> Option<Arc<ProcessedImage>> {
        let mut state = self.state.lock().await;
        if state.images.is_empty() {
            return None;
        }
        let image = state.images[state.cursor].clone();
        state.cursor = (state.cursor + 1) % state.images.len();
        state.delivered.insert(image.id);
        Some(image)
    }

    async fn status(&self) -> RegistryStatus {
        let state = self.state.lock().await;
        RegistryStatus {
            total: state.images.len(),
            delivered: state.delivered.len(),
            cursor: state.cursor,
        }
    }

    async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.images.clear();
        state.delivered.clear();
        state.cursor = 0;
        // next_id keeps advancing so identities never repeat across clears
    }
}
