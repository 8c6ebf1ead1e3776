//! Frame-timed waits for pacing animations inside effects and loops.

use tui_rooms_types::FRAME_INTERVAL;

/// Suspend for `frames` frames' worth of wall-clock time at the fixed
/// tick rate. This is a plain timed suspension; it does not go through
/// the event queue.
pub async fn wait(frames: u32) {
    tokio::time::sleep(FRAME_INTERVAL * frames).await;
}
