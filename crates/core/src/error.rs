//! Error taxonomy for the room runtime.
//!
//! Usage errors (invalid characters, state-slot misuse, drawing out of
//! bounds) are programmer errors in a room script and abort the render
//! pass. Resource errors from backends and input sources are wrapped and
//! propagated; the scheduler halts on either kind rather than running a
//! tick with violated invariants.

use thiserror::Error;
use tui_rooms_types::TextError;

pub type RoomResult = Result<(), RoomError>;

#[derive(Debug, Error)]
pub enum RoomError {
    /// A print primitive was handed a character the font cannot represent.
    #[error("invalid character in room {room:?}: {source}")]
    InvalidCharacter {
        room: &'static str,
        #[source]
        source: TextError,
    },

    /// A state slot was registered twice in one render pass, or a queued
    /// state update carried a value of the wrong type.
    #[error("invalid state slot {key:?} in room {room:?}: {reason}")]
    InvalidState {
        room: &'static str,
        key: &'static str,
        reason: &'static str,
    },

    /// A drawing call landed outside the character grid.
    #[error("room {room:?} drew outside the {width}x{height} grid at ({x}, {y})")]
    OutOfBounds {
        room: &'static str,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    /// The rendering backend failed to present a frame.
    #[error("rendering backend failed: {0}")]
    Backend(anyhow::Error),

    /// An input source failed while sampling buttons.
    #[error("input source failed: {0}")]
    Input(anyhow::Error),
}
