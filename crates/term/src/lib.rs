//! Terminal rendering backend for the room runtime.

mod backend;
mod glyphs;
mod music;

pub use backend::{enter, restore, TerminalBackend};
pub use glyphs::glyph_char;
pub use music::{MusicTracker, MusicTransition};
