//! Floyd-Steinberg error diffusion dithering.
//!
//! Transforms an arbitrary-color raster into one where every pixel is
//! exactly one of the palette colors, approximating the original by
//! diffusing each pixel's quantization error to its not-yet-processed
//! neighbors:
//!
//! ```text
//!        X   7
//!    3   5   1      (weights over a divisor of 16)
//! ```
//!
//! The scan is row-major, top-to-bottom, left-to-right. Every diffusion
//! target lies strictly later in scan order, so once a pixel is assigned
//! its palette color nothing overwrites it — after the full pass the
//! raster is closed over the palette. The scan has a strict sequential
//! data dependency (each pixel's input includes error from earlier
//! pixels) and cannot be parallelized within one raster without a
//! wavefront restructuring; independent rasters can be dithered on
//! separate threads freely.

use crate::palette::{Palette, Rgb};
use crate::raster::Raster;

/// Floyd-Steinberg kernel: `(dx, dy, weight)` per neighbor.
const KERNEL: [(i32, i32, i32); 4] = [
    (1, 0, 7),  // right
    (-1, 1, 3), // bottom-left
    (0, 1, 5),  // bottom
    (1, 1, 1),  // bottom-right
];

/// Weight divisor; the kernel propagates 16/16 of the error.
const KERNEL_DIVISOR: i32 = 16;

/// Dither a raster against the palette.
///
/// Works on a signed 16-bit copy of the pixels so accumulated error can
/// transiently push channels outside `[0, 255]`; quantization reads those
/// raw values without pre-clamping. Division happens before accumulation
/// (truncating toward zero), and the final clamp to `[0, 255]` is purely
/// defensive — step order guarantees every pixel already holds an exact
/// palette color by then.
///
/// The result depends only on the input raster: no randomness, byte-for-
/// byte reproducible.
pub fn floyd_steinberg(input: &Raster, palette: &Palette) -> Raster {
    let width = input.width();
    let height = input.height();

    let mut work: Vec<[i16; 3]> = input
        .pixels()
        .iter()
        .map(|p| [p.r as i16, p.g as i16, p.b as i16])
        .collect();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let current = work[idx];

            let entry = palette.nearest(current[0] as i32, current[1] as i32, current[2] as i32);
            let chosen = entry.color;
            work[idx] = [chosen.r as i16, chosen.g as i16, chosen.b as i16];

            let error = [
                current[0] as i32 - chosen.r as i32,
                current[1] as i32 - chosen.g as i32,
                current[2] as i32 - chosen.b as i32,
            ];

            for &(dx, dy, weight) in &KERNEL {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || nx >= width as i32 || ny >= height as i32 {
                    continue;
                }
                let nidx = ny as usize * width + nx as usize;
                for c in 0..3 {
                    work[nidx][c] += (error[c] * weight / KERNEL_DIVISOR) as i16;
                }
            }
        }
    }

    let pixels = work
        .iter()
        .map(|p| {
            Rgb::new(
                clamp_channel(p[0]),
                clamp_channel(p[1]),
                clamp_channel(p[2]),
            )
        })
        .collect();

    Raster::from_vec(width, height, pixels)
}

#[inline]
fn clamp_channel(value: i16) -> u8 {
    value.clamp(0, 255) as u8
}
