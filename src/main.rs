//! Arcade runner (default binary).
//!
//! Picks a game from argv, puts the terminal into raw mode and drives the
//! room runtime at 60 FPS until the event queue drains or the player
//! quits (Esc / q / Ctrl-C).

use std::env;
use std::fs::File;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};

use tui_rooms::core::{Room, RoomError, Runtime};
use tui_rooms::games::{brick_game, road_rage};
use tui_rooms::input::{is_quit, KeyboardSource};
use tui_rooms::term::{self, TerminalBackend};
use tui_rooms::types::{GRID_HEIGHT, GRID_WIDTH};

fn main() -> Result<()> {
    init_logging()?;

    let game = env::args().nth(1).unwrap_or_else(|| "bricks".to_owned());
    let room = select_room(&game)?;

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    if cols < GRID_WIDTH || rows < GRID_HEIGHT + 1 {
        bail!(
            "terminal too small: the grid needs {GRID_WIDTH}x{GRID_HEIGHT} \
             plus a status line, have {cols}x{rows}"
        );
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    tracing::info!(game, "starting");
    term::enter()?;

    let result = runtime.block_on(async {
        let input = Rc::new(KeyboardSource::new());
        let backend = Box::new(TerminalBackend::new(GRID_WIDTH, GRID_HEIGHT));
        Runtime::new(room, input, backend).run().await
    });

    // Always try to restore terminal state.
    let _ = term::restore();

    match result {
        Ok(()) => Ok(()),
        Err(RoomError::Input(err)) if is_quit(&err) => {
            tracing::info!("quit requested");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn select_room(game: &str) -> Result<Room> {
    // Seed from the clock; each launch gets a different run.
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0x9E37_79B9);

    match game {
        "bricks" => Ok(brick_game(seed)),
        "road" => Ok(road_rage(seed)),
        other => bail!("unknown game {other:?} (available: bricks, road)"),
    }
}

/// Log to the file named by `TUI_ROOMS_LOG`, filtered by `RUST_LOG`.
/// Stdout belongs to the renderer, so without the variable logging stays
/// off entirely.
fn init_logging() -> Result<()> {
    let Ok(path) = env::var("TUI_ROOMS_LOG") else {
        return Ok(());
    };
    let file =
        File::create(&path).with_context(|| format!("creating log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
