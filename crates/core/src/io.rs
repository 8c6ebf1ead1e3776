//! External collaborator contracts: rendering backends and input sources.

use std::future::Future;
use std::pin::Pin;

use tui_rooms_types::{Buttons, Frame};

/// Boxed single-threaded future, the await currency of the runtime.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Something that samples the currently pressed logical buttons.
///
/// `button` is a poll, not an edge-triggered event: it resolves with
/// whatever is held right now, and an empty set means no input. Sources
/// may be combined by taking the bitwise union of their reports.
pub trait InputSource {
    fn button(&self) -> BoxFuture<'_, anyhow::Result<Buttons>>;
}

/// Something that can present a completed frame.
///
/// Dimensions are fixed at construction; `render` is called exactly once
/// per completed render pass and must apply every cell. The backend owns
/// music playback: it compares the frame's directive against the previous
/// one by value and starts/stops/continues accordingly.
pub trait Backend {
    fn dims(&self) -> (u16, u16);

    fn render<'a>(&'a mut self, frame: &'a Frame) -> BoxFuture<'a, anyhow::Result<()>>;
}
