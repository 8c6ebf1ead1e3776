//! TerminalBackend: flushes a frame to a real terminal.
//!
//! Cells are diffed against the previous frame and repainted in runs, so
//! the steady-state cost of a mostly-static room is a handful of cursor
//! moves. Music directives are tracked by value; since a terminal has no
//! audio device, transitions surface on a status line under the grid and
//! in the log.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use tui_rooms_core::{Backend, BoxFuture};
use tui_rooms_types::{Character, Frame, Rgb, PALETTE};

use crate::glyphs::glyph_char;
use crate::music::{MusicTracker, MusicTransition};

pub struct TerminalBackend {
    stdout: io::Stdout,
    width: u16,
    height: u16,
    last: Option<Frame>,
    music: MusicTracker,
}

/// Put the terminal into raw mode on the alternate screen.
pub fn enter() -> Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.queue(terminal::EnterAlternateScreen)?;
    stdout.queue(cursor::Hide)?;
    stdout.queue(terminal::DisableLineWrap)?;
    stdout.flush()?;
    Ok(())
}

/// Undo [`enter`]. Safe to call on an already-restored terminal, so the
/// caller can run it unconditionally on the way out.
pub fn restore() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.queue(ResetColor)?;
    stdout.queue(SetAttribute(Attribute::Reset))?;
    stdout.queue(terminal::EnableLineWrap)?;
    stdout.queue(cursor::Show)?;
    stdout.queue(terminal::LeaveAlternateScreen)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

impl TerminalBackend {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            stdout: io::stdout(),
            width,
            height,
            last: None,
            music: MusicTracker::default(),
        }
    }

    fn draw(&mut self, frame: &Frame) -> Result<()> {
        match self.last.take() {
            Some(prev) => self.diff_redraw(frame, &prev)?,
            None => self.full_redraw(frame)?,
        }
        self.last = Some(frame.clone());

        self.update_music(frame)?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn full_redraw(&mut self, frame: &Frame) -> Result<()> {
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;

        let mut colors: Option<(u8, u8)> = None;
        for y in 0..frame.height() {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            for x in 0..frame.width() {
                let cell = frame.get(x, y).unwrap_or_default();
                self.put_cell(cell, &mut colors)?;
            }
        }
        Ok(())
    }

    fn diff_redraw(&mut self, next: &Frame, prev: &Frame) -> Result<()> {
        let mut colors: Option<(u8, u8)> = None;

        for_each_changed_run(prev, next, |x, y, len| {
            self.stdout.queue(cursor::MoveTo(x, y))?;
            for dx in 0..len {
                let cell = next.get(x + dx, y).unwrap_or_default();
                self.put_cell(cell, &mut colors)?;
            }
            Ok(())
        })
    }

    fn put_cell(&mut self, cell: Character, colors: &mut Option<(u8, u8)>) -> Result<()> {
        if *colors != Some((cell.fg, cell.bg)) {
            self.stdout
                .queue(SetForegroundColor(palette_color(cell.fg)))?;
            self.stdout
                .queue(SetBackgroundColor(palette_color(cell.bg)))?;
            *colors = Some((cell.fg, cell.bg));
        }
        self.stdout.queue(Print(glyph_char(cell.glyph)))?;
        Ok(())
    }

    /// Track the music directive and repaint the status line on change.
    fn update_music(&mut self, frame: &Frame) -> Result<()> {
        let transition = self.music.observe(frame.music());
        let status = match transition {
            MusicTransition::Start(music) => {
                tracing::info!(song = music.song, looping = music.looping, "music start");
                if music.looping {
                    format!("♪ song {} (loop)", music.song)
                } else {
                    format!("♪ song {}", music.song)
                }
            }
            MusicTransition::Stop => {
                tracing::info!("music stop");
                String::new()
            }
            MusicTransition::Continue => return Ok(()),
        };

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(cursor::MoveTo(0, self.height))?;
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        self.stdout.queue(Print(status))?;
        Ok(())
    }
}

impl Backend for TerminalBackend {
    fn dims(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn render<'a>(&'a mut self, frame: &'a Frame) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.draw(frame) })
    }
}

fn palette_color(index: u8) -> Color {
    let Rgb { r, g, b } = PALETTE[(index as usize) % PALETTE.len()];
    Color::Rgb { r, g, b }
}

fn for_each_changed_run(
    prev: &Frame,
    next: &Frame,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
