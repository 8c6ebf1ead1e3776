//! Shared fixtures for the workspace tests.

use std::cell::RefCell;
use std::rc::Rc;

use tui_rooms::core::{Backend, BoxFuture};
use tui_rooms::types::{Character, Frame};

/// Backend that records every frame it is handed.
pub struct CaptureBackend {
    width: u16,
    height: u16,
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl CaptureBackend {
    pub fn new(width: u16, height: u16) -> (Self, Rc<RefCell<Vec<Frame>>>) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                width,
                height,
                frames: frames.clone(),
            },
            frames,
        )
    }
}

impl Backend for CaptureBackend {
    fn dims(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn render<'a>(&'a mut self, frame: &'a Frame) -> BoxFuture<'a, anyhow::Result<()>> {
        self.frames.borrow_mut().push(frame.clone());
        Box::pin(async { Ok(()) })
    }
}

/// Printable view of one grid row, for assertions. Non-ASCII tile glyphs
/// come out as '#'.
pub fn row_text(frame: &Frame, y: u16) -> String {
    (0..frame.width())
        .map(|x| {
            let cell = frame.get(x, y).unwrap_or(Character::EMPTY);
            match cell.glyph {
                0 => ' ',
                32..=126 => (cell.glyph as u8) as char,
                _ => '#',
            }
        })
        .collect()
}
