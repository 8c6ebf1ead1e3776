//! The room runtime.
//!
//! A single-threaded reactive engine that re-executes the active room's
//! draw+react function once per scheduled tick, keeps per-room state slots
//! alive across re-renders, sequences one-shot effects (with cleanups)
//! against every-frame loops, and drives everything from a coalescing
//! event queue. See [`Runtime`] for the drain loop and [`Ctx`] for the
//! API exposed to room scripts.

mod context;
mod error;
mod event;
mod io;
mod room;
mod runtime;
mod state;
mod wait;

pub use context::{Ctx, StateSetter};
pub use error::{RoomError, RoomResult};
pub use io::{Backend, BoxFuture, InputSource};
pub use room::{Cleanup, Room};
pub use runtime::Runtime;
pub use wait::wait;
