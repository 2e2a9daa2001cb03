//! Accent color palette
//!
//! Up to three accent colors, each cached as RGB (for display and
//! reporting) and HSV (for blending). Both forms are only ever written
//! together through [`PaletteEntry::from_rgb`].

use heapless::Vec;

use super::{HsvColor, Rgb, rgb_to_hsv};

/// Number of accent slots
pub const PALETTE_SIZE: usize = 3;

/// Palette slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSlot {
    Primary = 0,
    Secondary = 1,
    Tertiary = 2,
}

/// One accent color in both representations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaletteEntry {
    rgb: Rgb,
    hsv: HsvColor,
}

impl PaletteEntry {
    pub const OFF: Self = Self {
        rgb: Rgb { r: 0, g: 0, b: 0 },
        hsv: HsvColor::BLACK,
    };

    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            rgb,
            hsv: rgb_to_hsv(rgb),
        }
    }

    pub const fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub const fn hsv(&self) -> HsvColor {
        self.hsv
    }

    /// Entries with zero value take no part in blending
    pub const fn is_active(&self) -> bool {
        self.hsv.val != 0
    }
}

/// Up to three accent colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    entries: [PaletteEntry; PALETTE_SIZE],
}

impl Palette {
    pub const fn new() -> Self {
        Self {
            entries: [PaletteEntry::OFF; PALETTE_SIZE],
        }
    }

    /// Build a palette from already parsed colors
    ///
    /// Colors past the third are ignored, missing slots stay off.
    pub fn from_colors(colors: &[Rgb]) -> Self {
        let mut palette = Self::new();
        palette.configure(colors);
        palette
    }

    /// Replace every slot at once
    pub fn configure(&mut self, colors: &[Rgb]) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            *entry = colors
                .get(i)
                .copied()
                .map_or(PaletteEntry::OFF, PaletteEntry::from_rgb);
        }
    }

    /// Replace a single slot
    pub fn set(&mut self, slot: PaletteSlot, color: Rgb) {
        self.entries[slot as usize] = PaletteEntry::from_rgb(color);
    }

    pub const fn entry(&self, slot: PaletteSlot) -> PaletteEntry {
        self.entries[slot as usize]
    }

    pub const fn primary(&self) -> PaletteEntry {
        self.entry(PaletteSlot::Primary)
    }

    /// Active colors in slot order
    pub fn active(&self) -> Vec<HsvColor, PALETTE_SIZE> {
        self.entries
            .iter()
            .filter(|entry| entry.is_active())
            .map(PaletteEntry::hsv)
            .collect()
    }

    /// Active colors in their RGB form, in slot order
    pub fn active_rgb(&self) -> Vec<Rgb, PALETTE_SIZE> {
        self.entries
            .iter()
            .filter(|entry| entry.is_active())
            .map(PaletteEntry::rgb)
            .collect()
    }
}
