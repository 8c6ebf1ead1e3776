//! The fixed 16-color palette.
//!
//! Foreground/background indices in [`crate::Character`] point into this
//! table; backends translate entries to whatever color model they output.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Palette entries in index order. Index 0 is white, index 1 black.
pub const PALETTE: [Rgb; 16] = [
    Rgb::new(255, 255, 255),
    Rgb::new(0, 0, 0),
    Rgb::new(189, 189, 189),
    Rgb::new(253, 231, 2),
    Rgb::new(81, 247, 22),
    Rgb::new(35, 123, 0),
    Rgb::new(251, 206, 165),
    Rgb::new(249, 165, 3),
    Rgb::new(148, 90, 41),
    Rgb::new(58, 189, 255),
    Rgb::new(123, 58, 255),
    Rgb::new(6, 57, 247),
    Rgb::new(246, 90, 185),
    Rgb::new(245, 24, 5),
    Rgb::new(57, 57, 57),
    Rgb::new(239, 239, 239),
];
