//! Fixed 7-color ACeP palette with nearest-color matching.
//!
//! The panel can only render seven pigment colors, each addressed by a
//! controller byte code. The palette is a fixed ordered table; order is
//! canonical and matters only for deterministic tie-breaking in the
//! nearest-color search (first-listed entry wins an exact distance tie).

use std::fmt;

/// An 8-bit RGB color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel values as a `[r, g, b]` array.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// One palette slot: a renderable color and the byte code the panel
/// controller expects for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: Rgb,
    pub code: u8,
    pub name: &'static str,
}

/// The fixed palette of a 7-color ACeP e-paper panel.
///
/// Wraps exactly seven entries in canonical order. Nearest-color search
/// is a linear scan — seven squared-distance comparisons per pixel is
/// cheaper than any index structure at this size.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    entries: [PaletteEntry; 7],
}

/// The 5.65" ACeP panel palette.
///
/// Canonical order: White, Yellow, Orange, Red, Green, Blue, Black.
/// Byte codes are the values the panel firmware expects per pixel.
pub const EPD_7_COLOR: Palette = Palette {
    entries: [
        PaletteEntry {
            color: Rgb::new(255, 255, 255),
            code: 0xFF,
            name: "white",
        },
        PaletteEntry {
            color: Rgb::new(255, 255, 0),
            code: 0xFC,
            name: "yellow",
        },
        PaletteEntry {
            color: Rgb::new(255, 165, 0),
            code: 0xEC,
            name: "orange",
        },
        PaletteEntry {
            color: Rgb::new(255, 0, 0),
            code: 0xE0,
            name: "red",
        },
        PaletteEntry {
            color: Rgb::new(0, 128, 0),
            code: 0x35,
            name: "green",
        },
        PaletteEntry {
            color: Rgb::new(0, 0, 255),
            code: 0x2B,
            name: "blue",
        },
        PaletteEntry {
            color: Rgb::new(0, 0, 0),
            code: 0x00,
            name: "black",
        },
    ],
};

impl Palette {
    /// Number of colors in the palette.
    #[inline]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// All entries in canonical order.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Find the palette entry nearest to the given color by squared
    /// Euclidean distance in RGB space.
    ///
    /// Channels are taken as signed `i32` because the dithering pass
    /// quantizes error-carrying values that may transiently lie outside
    /// `[0, 255]`; the search is defined over the full signed range.
    /// Ties resolve to the earlier entry in canonical order.
    pub fn nearest(&self, r: i32, g: i32, b: i32) -> &PaletteEntry {
        let mut best = &self.entries[0];
        let mut best_dist = i64::MAX;
        for entry in &self.entries {
            let dr = r as i64 - entry.color.r as i64;
            let dg = g as i64 - entry.color.g as i64;
            let db = b as i64 - entry.color.b as i64;
            let dist = dr * dr + dg * dg + db * db;
            if dist < best_dist {
                best_dist = dist;
                best = entry;
            }
        }
        best
    }

    /// Exact byte-code lookup for a color that equals a palette color.
    ///
    /// Returns `None` for non-palette colors; callers decide the
    /// fallback (see [`fallback_code`](Self::fallback_code)).
    pub fn code_for(&self, color: Rgb) -> Option<u8> {
        self.entries
            .iter()
            .find(|entry| entry.color == color)
            .map(|entry| entry.code)
    }

    /// True if the color exactly matches a palette entry.
    pub fn contains(&self, color: Rgb) -> bool {
        self.code_for(color).is_some()
    }

    /// Byte code used for pixels that reach the encoder without an
    /// exact palette match: White, the first canonical entry.
    #[inline]
    pub const fn fallback_code(&self) -> u8 {
        self.entries[0].code
    }
}
