//! epd-image: palette quantization, dithering and byte encoding for
//! ACeP e-paper panels.
//!
//! This crate holds the display-format pipeline for 7-color panels:
//!
//! 1. [`Palette`] — the fixed 7-color table with nearest-color lookup
//!    (squared Euclidean distance in RGB, ties to canonical order).
//! 2. [`floyd_steinberg`] — error diffusion over a signed
//!    extended-precision working buffer, producing a raster whose every
//!    pixel is exactly one palette color.
//! 3. [`encode`] / [`to_data_string`] — the per-pixel byte codes and the
//!    `0xXX, 0xXX, …` text form the panel firmware consumes.
//!
//! # Example
//!
//! ```
//! use epd_image::{encode, floyd_steinberg, to_data_string, Raster, Rgb, EPD_7_COLOR};
//!
//! let raster = Raster::filled(4, 4, Rgb::new(200, 30, 40));
//! let dithered = floyd_steinberg(&raster, &EPD_7_COLOR);
//! let encoded = encode(&dithered, &EPD_7_COLOR);
//!
//! assert_eq!(encoded.codes.len(), 16);
//! assert!(to_data_string(&encoded.codes).starts_with("0x"));
//! ```
//!
//! The crate is dependency-free; image container decoding and resizing
//! live with the caller.

pub mod dither;
pub mod encode;
pub mod palette;
pub mod raster;

pub use dither::floyd_steinberg;
pub use encode::{encode, to_data_string, EncodedRaster};
pub use palette::{Palette, PaletteEntry, Rgb, EPD_7_COLOR};
pub use raster::{Raster, RasterError};
