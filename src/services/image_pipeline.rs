//! Photo-to-panel conversion pipeline.
//!
//! Decode -> resize -> dither -> encode. Decoding and resizing use the
//! `image` crate; quantization, dithering and byte encoding live in the
//! `epd-image` core crate.

use image::imageops::FilterType;

use epd_image::{encode, floyd_steinberg, to_data_string, Raster, Rgb, EPD_7_COLOR};

use crate::error::ProcessError;
use crate::models::{DisplaySpec, PendingImage};

/// Converts uploaded photos into the panel's byte-code wire format.
///
/// Processing is CPU-bound and synchronous; async callers run
/// [`process`](Self::process) under `tokio::task::spawn_blocking`.
/// Separate images can be processed concurrently — the pipeline holds
/// no mutable state.
#[derive(Debug, Clone, Copy)]
pub struct ImagePipeline {
    spec: DisplaySpec,
}

impl ImagePipeline {
    pub fn new(spec: DisplaySpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> DisplaySpec {
        self.spec
    }

    /// Decode raw image bytes and convert them to the display format.
    ///
    /// Nothing is stored on failure; the caller only sees the typed
    /// error.
    pub fn process(&self, bytes: &[u8], name: String) -> Result<PendingImage, ProcessError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| ProcessError::Decode(e.to_string()))?;

        // Stretch to the exact panel size (bicubic), dropping alpha.
        let resized = decoded
            .resize_exact(self.spec.width, self.spec.height, FilterType::CatmullRom)
            .to_rgb8();

        let raster = Raster::from_fn(
            self.spec.width as usize,
            self.spec.height as usize,
            |x, y| {
                let p = resized.get_pixel(x as u32, y as u32);
                Rgb::new(p[0], p[1], p[2])
            },
        );

        let dithered = floyd_steinberg(&raster, &EPD_7_COLOR);
        let encoded = encode(&dithered, &EPD_7_COLOR);
        if encoded.fallback_pixels > 0 {
            // Unreachable for a correctly dithered raster; a hit here is
            // a regression signal, not expected behavior.
            tracing::warn!(
                pixels = encoded.fallback_pixels,
                name = %name,
                "Encoder fell back to the white code for non-palette pixels"
            );
        }

        let data = to_data_string(&encoded.codes);

        Ok(PendingImage {
            codes: encoded.codes,
            data,
            name,
            created_at: chrono::Utc::now(),
        })
    }
}
