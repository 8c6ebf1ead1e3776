//! Keyboard input source for terminal environments.
//!
//! Most terminals do not emit key release events, so a held key is
//! modeled as "pressed within the last N milliseconds": every press
//! refreshes a timestamp and expired keys drop out of the mask. Terminals
//! that do emit releases (kitty protocol) clear keys immediately.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;

use tui_rooms_core::{BoxFuture, InputSource};
use tui_rooms_types::Buttons;

// A single tap should read as pressed for a few polls, but not turn into
// a sustained hold.
const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

/// Raised through the input contract when the player asks to quit.
#[derive(Debug, Clone, Copy, Error)]
#[error("quit requested")]
pub struct QuitRequested;

/// True when `err` (or anything in its chain) is a [`QuitRequested`].
pub fn is_quit(err: &anyhow::Error) -> bool {
    err.chain().any(|e| e.downcast_ref::<QuitRequested>().is_some())
}

/// Map a key code to its logical button.
pub fn map_key(code: KeyCode) -> Buttons {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Buttons::UP,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Buttons::DOWN,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Buttons::LEFT,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Buttons::RIGHT,
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char(' ') => Buttons::A,
        KeyCode::Char('x') | KeyCode::Char('X') => Buttons::X,
        KeyCode::Char('c') | KeyCode::Char('C') => Buttons::B,
        KeyCode::Enter => Buttons::START,
        _ => Buttons::empty(),
    }
}

fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        _ => false,
    }
}

/// Crossterm-backed keyboard source.
pub struct KeyboardSource {
    held: RefCell<HashMap<KeyCode, Instant>>,
    release_timeout: Duration,
}

impl KeyboardSource {
    pub fn new() -> Self {
        Self {
            held: RefCell::new(HashMap::new()),
            release_timeout: DEFAULT_RELEASE_TIMEOUT,
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    /// Drain pending terminal events into the held-key table.
    fn pump(&self) -> anyhow::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Err(QuitRequested.into());
                        }
                        self.held.borrow_mut().insert(key.code, Instant::now());
                    }
                    KeyEventKind::Release => {
                        self.held.borrow_mut().remove(&key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn sample(&self) -> Buttons {
        let mut held = self.held.borrow_mut();
        held.retain(|_, pressed_at| pressed_at.elapsed() <= self.release_timeout);
        held.keys().fold(Buttons::empty(), |acc, code| acc | map_key(*code))
    }
}

impl Default for KeyboardSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for KeyboardSource {
    fn button(&self) -> BoxFuture<'_, anyhow::Result<Buttons>> {
        Box::pin(async move {
            self.pump()?;
            Ok(self.sample())
        })
    }
}
