use chrono::{DateTime, Utc};

/// Pipeline output before the registry has assigned an identity.
#[derive(Debug, Clone)]
pub struct PendingImage {
    /// Panel byte codes, one per pixel, row-major.
    pub codes: Vec<u8>,
    /// Textual wire format served to the device.
    pub data: String,
    /// Display name shown in logs and status output.
    pub name: String,
    /// When the pipeline produced this image.
    pub created_at: DateTime<Utc>,
}

/// A fully processed image held by the delivery registry.
///
/// Immutable once stored. `id` is the identity used by the delivered
/// set — repeated uploads of identical content get distinct ids and are
/// tracked independently.
#[derive(Debug)]
pub struct ProcessedImage {
    pub id: u64,
    pub codes: Vec<u8>,
    pub data: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl ProcessedImage {
    pub fn from_pending(id: u64, pending: PendingImage) -> Self {
        Self {
            id,
            codes: pending.codes,
            data: pending.data,
            name: pending.name,
            created_at: pending.created_at,
        }
    }
}
