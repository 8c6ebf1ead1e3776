//! TUI Rooms (workspace facade crate).
//!
//! This package keeps the `tui_rooms::{core,games,input,term,types}`
//! public API in one place while the implementation lives in dedicated
//! crates under `crates/`.

pub use tui_rooms_core as core;
pub use tui_rooms_games as games;
pub use tui_rooms_input as input;
pub use tui_rooms_term as term;
pub use tui_rooms_types as types;
