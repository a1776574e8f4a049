//! Test image fixtures.

use base64::Engine;
use std::io::Cursor;

/// Encode a solid-color PNG of the given size.
pub fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode test png");
    buf.into_inner()
}

/// Encode a solid-color PNG and base64 it for the upload endpoint.
pub fn png_base64(width: u32, height: u32, rgb: [u8; 3]) -> String {
    base64::engine::general_purpose::STANDARD.encode(png_bytes(width, height, rgb))
}

/// Number of pixels (and wire-format tokens) in one panel frame.
pub const FRAME_PIXELS: usize = 600 * 448;
