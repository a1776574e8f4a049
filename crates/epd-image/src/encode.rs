//! Display byte-code encoding and the textual wire format.

use std::fmt::Write;

use crate::palette::Palette;
use crate::raster::Raster;

/// A raster encoded as panel byte codes.
///
/// `codes` holds one byte per pixel in row-major order (length equals
/// `width * height` of the source raster). `fallback_pixels` counts
/// pixels that had no exact palette match and were encoded as White —
/// a correctly dithered raster never produces any, so a non-zero count
/// is a regression signal worth logging upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRaster {
    pub codes: Vec<u8>,
    pub fallback_pixels: usize,
}

/// Encode a palette-exact raster into panel byte codes.
pub fn encode(raster: &Raster, palette: &Palette) -> EncodedRaster {
    let mut codes = Vec::with_capacity(raster.len());
    let mut fallback_pixels = 0;
    for &pixel in raster.pixels() {
        match palette.code_for(pixel) {
            Some(code) => codes.push(code),
            None => {
                codes.push(palette.fallback_code());
                fallback_pixels += 1;
            }
        }
    }
    EncodedRaster {
        codes,
        fallback_pixels,
    }
}

/// Render byte codes as the textual wire format consumed by the device:
/// `0xXX` tokens (uppercase hex, zero-padded) joined by `", "`.
pub fn to_data_string(codes: &[u8]) -> String {
    // "0xXX, " is 6 characters per token
    let mut out = String::with_capacity(codes.len() * 6);
    for (i, code) in codes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing to a String cannot fail
        let _ = write!(out, "0x{code:02X}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::floyd_steinberg;
    use crate::palette::{Rgb, EPD_7_COLOR};

    #[test]
    fn test_encode_length_equals_pixel_count() {
        let raster = Raster::filled(600, 448, Rgb::new(255, 255, 255));
        let encoded = encode(&raster, &EPD_7_COLOR);
        assert_eq!(encoded.codes.len(), 600 * 448);
        assert_eq!(encoded.fallback_pixels, 0);
    }

    #[test]
    fn test_encode_row_major_codes() {
        let raster = Raster::from_pixels(
            2,
            2,
            vec![
                Rgb::new(255, 255, 255), // white
                Rgb::new(255, 0, 0),     // red
                Rgb::new(0, 0, 255),     // blue
                Rgb::new(0, 0, 0),       // black
            ],
        )
        .unwrap();
        let encoded = encode(&raster, &EPD_7_COLOR);
        assert_eq!(encoded.codes, vec![0xFF, 0xE0, 0x2B, 0x00]);
    }

    #[test]
    fn test_encode_counts_fallback_pixels() {
        let raster = Raster::from_pixels(
            2,
            1,
            vec![Rgb::new(7, 7, 7), Rgb::new(0, 0, 0)],
        )
        .unwrap();
        let encoded = encode(&raster, &EPD_7_COLOR);
        // Non-palette pixel falls back to the White code
        assert_eq!(encoded.codes, vec![0xFF, 0x00]);
        assert_eq!(encoded.fallback_pixels, 1);
    }

    #[test]
    fn test_dithered_raster_never_hits_fallback() {
        let raster = Raster::from_fn(24, 24, |x, y| {
            Rgb::new((x * 10) as u8, (y * 10) as u8, 128)
        });
        let dithered = floyd_steinberg(&raster, &EPD_7_COLOR);
        let encoded = encode(&dithered, &EPD_7_COLOR);
        assert_eq!(encoded.fallback_pixels, 0);
    }

    #[test]
    fn test_to_data_string_format() {
        assert_eq!(to_data_string(&[0xFF, 0x00, 0x2B]), "0xFF, 0x00, 0x2B");
        assert_eq!(to_data_string(&[0x05]), "0x05");
        assert_eq!(to_data_string(&[]), "");
    }

    #[test]
    fn test_to_data_string_uppercase_zero_padded() {
        let text = to_data_string(&[0xEC, 0x0A]);
        assert_eq!(text, "0xEC, 0x0A");
    }

    #[test]
    fn test_wire_format_token_count() {
        let raster = Raster::filled(600, 448, Rgb::new(0, 0, 0));
        let encoded = encode(&raster, &EPD_7_COLOR);
        let text = to_data_string(&encoded.codes);
        assert_eq!(text.split(", ").count(), 268_800);
        assert!(text.split(", ").all(|t| t == "0x00"));
    }
}
