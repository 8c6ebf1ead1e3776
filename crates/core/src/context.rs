//! The context handle exposed to room scripts.
//!
//! `Ctx` is a cheap clone over the runtime's single-threaded interior.
//! Drawing calls mutate only the in-progress frame and the cursor/color
//! state, which the runtime resets at the start of every render pass.
//! State setters and `set_room` never mutate synchronously; they enqueue
//! events for the drain loop.

use std::cell::RefCell;
use std::future::Future;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use tui_rooms_types::{Buttons, Character, Frame, IntoText, Music, Text, TextError, MAX_GLYPH};

use crate::error::{RoomError, RoomResult};
use crate::event::{Event, EventQueue};
use crate::io::{BoxFuture, InputSource};
use crate::room::{Cleanup, Room};
use crate::state::{StateStore, REASON_TYPE_MISMATCH};

pub(crate) type EffectFn = Box<dyn FnOnce(Ctx) -> BoxFuture<'static, Result<Option<Cleanup>, RoomError>>>;
pub(crate) type LoopFn = Box<dyn FnMut(Ctx) -> BoxFuture<'static, RoomResult>>;

pub(crate) struct Inner {
    pub(crate) frame: Frame,
    pub(crate) x: u16,
    pub(crate) y: u16,
    pub(crate) fg: u8,
    pub(crate) bg: u8,
    pub(crate) room: Room,
    pub(crate) events: EventQueue,
    pub(crate) states: StateStore,
    pub(crate) effects: Vec<EffectFn>,
    pub(crate) loops: Vec<LoopFn>,
    pub(crate) generation: u64,
}

impl Inner {
    /// Reset per-pass state before re-running the room function.
    pub(crate) fn begin_pass(&mut self) {
        self.states.reset_pass();
        self.effects.clear();
        self.loops.clear();
        self.x = 0;
        self.y = 0;
        self.fg = 0;
        self.bg = 1;
    }
}

/// Handle to the room runtime, threaded through every room function,
/// effect, loop and cleanup invocation.
#[derive(Clone)]
pub struct Ctx {
    pub(crate) inner: Rc<RefCell<Inner>>,
    pub(crate) input: Rc<dyn InputSource>,
}

impl Ctx {
    pub(crate) fn new(room: Room, input: Rc<dyn InputSource>, width: u16, height: u16) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                frame: Frame::new(width, height),
                x: 0,
                y: 0,
                fg: 0,
                bg: 1,
                room,
                events: EventQueue::default(),
                states: StateStore::default(),
                effects: Vec::new(),
                loops: Vec::new(),
                generation: 0,
            })),
            input,
        }
    }

    pub fn width(&self) -> u16 {
        self.inner.borrow().frame.width()
    }

    pub fn height(&self) -> u16 {
        self.inner.borrow().frame.height()
    }

    /// Name of the currently active room.
    pub fn room(&self) -> &'static str {
        self.inner.borrow().room.name()
    }

    // --- state ----------------------------------------------------------

    /// Register (or re-read) the keyed state slot `key`.
    ///
    /// Returns the slot's current value and a setter. The setter enqueues
    /// a state-change event; the mutation is fully visible by the next
    /// render, never mid-pass. Registering the same key twice in one
    /// render pass is a usage error.
    pub fn state<T: Clone + 'static>(
        &self,
        key: &'static str,
        initial: T,
    ) -> Result<(T, StateSetter<T>), RoomError> {
        let mut inner = self.inner.borrow_mut();
        let room = inner.room.name();
        let generation = inner.generation;

        let stored = inner
            .states
            .register(key, Rc::new(initial))
            .map_err(|reason| RoomError::InvalidState { room, key, reason })?;
        drop(inner);

        let value = stored
            .downcast::<T>()
            .map_err(|_| RoomError::InvalidState {
                room,
                key,
                reason: REASON_TYPE_MISMATCH,
            })?;

        let setter = StateSetter {
            inner: Rc::downgrade(&self.inner),
            key,
            generation,
            _marker: PhantomData,
        };
        Ok(((*value).clone(), setter))
    }

    // --- effects and loops ----------------------------------------------

    /// Register a one-shot effect for this render pass, with no cleanup.
    pub fn effect<F, Fut>(&self, f: F)
    where
        F: FnOnce(Ctx) -> Fut + 'static,
        Fut: Future<Output = RoomResult> + 'static,
    {
        self.effect_with_cleanup(move |ctx| {
            let fut = f(ctx);
            async move {
                fut.await?;
                Ok(None)
            }
        });
    }

    /// Register a one-shot effect that may return a [`Cleanup`], invoked
    /// in registration order at the next room change.
    pub fn effect_with_cleanup<F, Fut>(&self, f: F)
    where
        F: FnOnce(Ctx) -> Fut + 'static,
        Fut: Future<Output = Result<Option<Cleanup>, RoomError>> + 'static,
    {
        self.inner
            .borrow_mut()
            .effects
            .push(Box::new(move |ctx| Box::pin(f(ctx))));
    }

    /// Register an every-tick loop callback for this render pass. Loops
    /// run after effects on every tick where the room stays active.
    pub fn loop_fn<F, Fut>(&self, mut f: F)
    where
        F: FnMut(Ctx) -> Fut + 'static,
        Fut: Future<Output = RoomResult> + 'static,
    {
        self.inner
            .borrow_mut()
            .loops
            .push(Box::new(move |ctx| Box::pin(f(ctx))));
    }

    /// Request a transition to `room`. Pending cleanups run before the
    /// switch; the incoming room starts with a fresh state store.
    pub fn set_room(&self, room: Room) {
        self.inner
            .borrow_mut()
            .events
            .enqueue_significant(Event::SetRoom(room));
    }

    // --- drawing --------------------------------------------------------

    pub fn fg(&self, color: u8) {
        self.inner.borrow_mut().fg = color;
    }

    pub fn bg(&self, color: u8) {
        self.inner.borrow_mut().bg = color;
    }

    pub fn locate(&self, x: u16, y: u16) {
        let mut inner = self.inner.borrow_mut();
        inner.x = x;
        inner.y = y;
    }

    /// Print a text run at the cursor and advance to the next row.
    pub fn print(&self, text: impl IntoText) -> RoomResult {
        self.print_part(text)?;
        let mut inner = self.inner.borrow_mut();
        inner.x = 0;
        inner.y += 1;
        Ok(())
    }

    /// Print without the trailing newline, for composing one row from
    /// several segments.
    pub fn print_part(&self, text: impl IntoText) -> RoomResult {
        let text = self.validate(text)?;
        for glyph in text {
            self.print_glyph(glyph.code())?;
        }
        Ok(())
    }

    /// Stencil print: stamp `pattern`'s non-space characters with
    /// `replacement`, spaces with true blanks, then newline.
    pub fn printf(&self, pattern: &str, replacement: u16) -> RoomResult {
        let text = Text::stencil(pattern, replacement)
            .map_err(|source| self.invalid_character(source))?;
        self.print(text)
    }

    /// Write one glyph at the cursor and advance one column. Drawing
    /// outside the grid is fatal to the render pass.
    pub fn print_glyph(&self, code: u16) -> RoomResult {
        if code > MAX_GLYPH {
            return Err(self.invalid_character(TextError::InvalidCode(code)));
        }

        let mut inner = self.inner.borrow_mut();
        let (x, y) = (inner.x, inner.y);
        if !inner.frame.in_bounds(x, y) {
            return Err(RoomError::OutOfBounds {
                room: inner.room.name(),
                x,
                y,
                width: inner.frame.width(),
                height: inner.frame.height(),
            });
        }

        let character = Character {
            glyph: code,
            fg: inner.fg,
            bg: inner.bg,
        };
        inner.frame.set(x, y, character);
        inner.x += 1;
        Ok(())
    }

    /// Set the music directive presented with this frame.
    pub fn play(&self, music: Music) {
        self.inner.borrow_mut().frame.set_music(Some(music));
    }

    /// Drop the pending music directive (the backend stops playback).
    pub fn pause(&self) {
        self.inner.borrow_mut().frame.set_music(None);
    }

    // --- input ----------------------------------------------------------

    /// Suspend until the input source reports the currently pressed
    /// buttons. An empty set means no input.
    pub async fn button(&self) -> Result<Buttons, RoomError> {
        let input = self.input.clone();
        input.button().await.map_err(RoomError::Input)
    }

    fn validate(&self, text: impl IntoText) -> Result<Text, RoomError> {
        text.into_text().map_err(|source| self.invalid_character(source))
    }

    fn invalid_character(&self, source: TextError) -> RoomError {
        RoomError::InvalidCharacter {
            room: self.room(),
            source,
        }
    }
}

/// Setter half of a state slot.
///
/// Enqueues a state-change event, coalescing any pending updates at the
/// queue's front. Setters captured by tasks of a replaced room become
/// inert: the queued event carries the room generation it was created
/// under, and the drain loop drops events from stale generations.
#[derive(Debug)]
pub struct StateSetter<T> {
    inner: Weak<RefCell<Inner>>,
    key: &'static str,
    generation: u64,
    _marker: PhantomData<fn(T)>,
}

impl<T> Clone for StateSetter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            key: self.key,
            generation: self.generation,
            _marker: PhantomData,
        }
    }
}

impl<T: Clone + 'static> StateSetter<T> {
    pub fn set(&self, value: T) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        inner.borrow_mut().events.enqueue_significant(Event::SetState {
            key: self.key,
            value: Rc::new(value),
            generation: self.generation,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoInput;

    impl InputSource for NoInput {
        fn button(&self) -> BoxFuture<'_, anyhow::Result<Buttons>> {
            Box::pin(async { Ok(Buttons::empty()) })
        }
    }

    fn ctx() -> Ctx {
        let room = Room::new("test", |_ctx| async { Ok(()) });
        Ctx::new(room, Rc::new(NoInput), 8, 4)
    }

    fn cell(ctx: &Ctx, x: u16, y: u16) -> Character {
        ctx.inner.borrow().frame.get(x, y).unwrap()
    }

    #[test]
    fn print_advances_the_cursor_and_wraps_to_column_zero() {
        let c = ctx();
        c.fg(7);
        c.print("AB").unwrap();
        c.print_part("C").unwrap();

        assert_eq!(cell(&c, 0, 0).glyph, 65);
        assert_eq!(cell(&c, 1, 0).glyph, 66);
        assert_eq!(cell(&c, 0, 0).fg, 7);
        // print_part stays on the row it wrote.
        assert_eq!(cell(&c, 0, 1).glyph, 67);
        let inner = c.inner.borrow();
        assert_eq!((inner.x, inner.y), (1, 1));
    }

    #[test]
    fn printf_stamps_non_space_characters() {
        let c = ctx();
        c.printf("X X", 3).unwrap();

        assert_eq!(cell(&c, 0, 0).glyph, 3);
        assert_eq!(cell(&c, 1, 0).glyph, 32);
        assert_eq!(cell(&c, 2, 0).glyph, 3);
    }

    #[test]
    fn drawing_past_the_grid_is_a_fatal_bounds_error() {
        let c = ctx();
        c.locate(8, 0);
        let err = c.print_glyph(3).unwrap_err();
        match err {
            RoomError::OutOfBounds { room, x, y, .. } => {
                assert_eq!(room, "test");
                assert_eq!((x, y), (8, 0));
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn invalid_glyph_code_names_the_room() {
        let c = ctx();
        let err = c.print_glyph(1000).unwrap_err();
        assert!(matches!(
            err,
            RoomError::InvalidCharacter { room: "test", .. }
        ));
    }

    #[test]
    fn state_slots_register_and_reject_duplicates() {
        let c = ctx();
        let (x, _set_x) = c.state("x", 15u16).unwrap();
        assert_eq!(x, 15);

        let err = c.state("x", 0u16).unwrap_err();
        assert!(matches!(err, RoomError::InvalidState { key: "x", .. }));
    }

    #[test]
    fn setter_enqueues_instead_of_mutating() {
        let c = ctx();
        let (_, set_x) = c.state("x", 15u16).unwrap();
        set_x.set(20);

        // The slot itself is untouched until the drain applies the event.
        c.inner.borrow_mut().states.reset_pass();
        let (x, _) = c.state("x", 15u16).unwrap();
        assert_eq!(x, 15);
    }

    #[test]
    fn play_and_pause_update_the_pending_directive() {
        let c = ctx();
        c.play(Music::new(21, true));
        assert_eq!(c.inner.borrow().frame.music(), Some(Music::new(21, true)));
        c.pause();
        assert_eq!(c.inner.borrow().frame.music(), None);
    }
}
