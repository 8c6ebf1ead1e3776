//! Core types shared across the room runtime.
//!
//! This crate contains pure data types: glyphs and text runs, grid cells,
//! music directives, the button bitmask and the fixed 16-color palette.
//! No I/O and no runtime logic lives here.

mod buttons;
mod glyph;
mod grid;
mod palette;

pub use buttons::Buttons;
pub use glyph::{Glyph, IntoText, Text, TextError, MAX_GLYPH};
pub use grid::{Character, Frame, Music};
pub use palette::{Rgb, PALETTE};

use std::time::Duration;

/// Grid dimensions, fixed for every backend.
pub const GRID_WIDTH: u16 = 32;
pub const GRID_HEIGHT: u16 = 24;

/// Target scheduler rate (ticks per second).
pub const FPS: u64 = 60;

/// Wall-clock length of one frame at [`FPS`].
pub const FRAME_INTERVAL: Duration = Duration::from_micros(1_000_000 / FPS);
