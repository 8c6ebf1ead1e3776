//! Input sources for the room runtime.
//!
//! Every source answers `button()` with the bitmask of currently pressed
//! logical buttons. Sources can be combined (bitwise union) and scripted
//! for tests and demos.

mod combined;
mod keyboard;
mod scripted;

pub use combined::CombinedSource;
pub use keyboard::{is_quit, map_key, KeyboardSource, QuitRequested};
pub use scripted::ScriptedSource;
