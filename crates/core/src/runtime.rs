//! The drain loop: one event per tick, strictly sequential phases.
//!
//! Each tick classifies the drained event into "should render" and
//! "should run effects", then performs, in order: cleanup (on a room
//! change), the render pass, the effects phase, the loops phase, and
//! finally re-enqueues a non-rendering update while any loop is
//! registered so an active room keeps ticking without redrawing.

use std::rc::Rc;

use tokio::time::MissedTickBehavior;

use tui_rooms_types::{Frame, FRAME_INTERVAL};

use crate::context::Ctx;
use crate::error::RoomError;
use crate::event::Event;
use crate::io::{Backend, InputSource};
use crate::room::{Cleanup, Room};

/// The room runtime. Owns the context, the backend and the pending
/// cleanups; everything it drives is awaited to completion in sequence,
/// so no two room functions, effects or loops ever overlap.
pub struct Runtime {
    ctx: Ctx,
    backend: Box<dyn Backend>,
    cleanups: Vec<Cleanup>,
}

impl Runtime {
    pub fn new(room: Room, input: Rc<dyn InputSource>, backend: Box<dyn Backend>) -> Self {
        let (width, height) = backend.dims();
        Self {
            ctx: Ctx::new(room, input, width, height),
            backend,
            cleanups: Vec::new(),
        }
    }

    /// Clone of the context handle, mainly for tests and embedding.
    pub fn context(&self) -> Ctx {
        self.ctx.clone()
    }

    /// Seed the queue with one rendering update so the next tick draws.
    pub fn seed(&mut self) {
        self.ctx.inner.borrow_mut().events.enqueue_update(true);
    }

    /// Drive the scheduler at the display refresh rate until the queue
    /// runs dry or a tick fails. A failed tick halts the scheduler:
    /// state/effect invariants may be violated, so no re-seeding happens.
    pub async fn run(&mut self) -> Result<(), RoomError> {
        self.seed();

        let mut ticker = tokio::time::interval(FRAME_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match self.step().await {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(err) => {
                    tracing::error!(room = self.ctx.room(), %err, "tick failed; halting");
                    return Err(err);
                }
            }
        }
    }

    /// Drain and process one event. Returns false when the queue was
    /// empty, which stops scheduling until re-seeded.
    pub async fn step(&mut self) -> Result<bool, RoomError> {
        let event = self.ctx.inner.borrow_mut().events.pop();
        let Some(event) = event else {
            return Ok(false);
        };

        let (should_run_effects, should_render) = match event {
            Event::Update { render } => (render, render),
            Event::SetRoom(room) => {
                // Outgoing room's cleanups complete, in registration
                // order, before the incoming room's first render.
                for cleanup in self.cleanups.drain(..) {
                    cleanup.run(self.ctx.clone()).await?;
                }

                let mut inner = self.ctx.inner.borrow_mut();
                tracing::info!(from = inner.room.name(), to = room.name(), "room change");
                inner.room = room;
                inner.states.clear();
                inner.generation += 1;
                (true, true)
            }
            Event::SetState {
                key,
                value,
                generation,
            } => {
                let mut inner = self.ctx.inner.borrow_mut();
                if generation == inner.generation {
                    inner.states.apply(key, value);
                    // State changes redraw but never re-trigger effects.
                    (false, true)
                } else {
                    tracing::debug!(key, "dropped state update from a replaced room");
                    (false, false)
                }
            }
        };

        if should_render {
            let room = {
                let mut inner = self.ctx.inner.borrow_mut();
                inner.begin_pass();
                inner.room.clone()
            };
            room.call(self.ctx.clone()).await?;

            // Swap the finished frame out for a blank one, so the grid and
            // pending music are already reset when effects and loops run.
            let frame = {
                let mut inner = self.ctx.inner.borrow_mut();
                let blank = Frame::new(inner.frame.width(), inner.frame.height());
                std::mem::replace(&mut inner.frame, blank)
            };
            self.backend
                .render(&frame)
                .await
                .map_err(RoomError::Backend)?;
        }

        if should_run_effects {
            let effects = std::mem::take(&mut self.ctx.inner.borrow_mut().effects);
            for effect in effects {
                if let Some(cleanup) = effect(self.ctx.clone()).await? {
                    self.cleanups.push(cleanup);
                }
            }
        }

        // Loops always run, after effects, in registration order.
        let mut loops = std::mem::take(&mut self.ctx.inner.borrow_mut().loops);
        for f in loops.iter_mut() {
            f(self.ctx.clone()).await?;
        }

        {
            let mut inner = self.ctx.inner.borrow_mut();
            // A loop body may itself have registered loops; keep them.
            let mut added = std::mem::take(&mut inner.loops);
            loops.append(&mut added);
            let keep_ticking = !loops.is_empty();
            inner.loops = loops;
            if keep_ticking {
                inner.events.enqueue_update(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BoxFuture;
    use std::cell::RefCell;
    use tui_rooms_types::Buttons;

    struct NoInput;

    impl InputSource for NoInput {
        fn button(&self) -> BoxFuture<'_, anyhow::Result<Buttons>> {
            Box::pin(async { Ok(Buttons::empty()) })
        }
    }

    /// Records every frame it is handed.
    struct CaptureBackend {
        frames: Rc<RefCell<Vec<Frame>>>,
    }

    impl Backend for CaptureBackend {
        fn dims(&self) -> (u16, u16) {
            (8, 4)
        }

        fn render<'a>(&'a mut self, frame: &'a Frame) -> BoxFuture<'a, anyhow::Result<()>> {
            self.frames.borrow_mut().push(frame.clone());
            Box::pin(async { Ok(()) })
        }
    }

    fn runtime(room: Room) -> (Runtime, Rc<RefCell<Vec<Frame>>>) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let backend = CaptureBackend {
            frames: frames.clone(),
        };
        (
            Runtime::new(room, Rc::new(NoInput), Box::new(backend)),
            frames,
        )
    }

    #[tokio::test]
    async fn empty_queue_stops_the_scheduler() {
        let room = Room::new("static", |ctx| async move { ctx.print("HI") });
        let (mut rt, frames) = runtime(room);

        rt.seed();
        assert!(rt.step().await.unwrap());
        // The room registered no loops, so nothing was re-enqueued.
        assert!(!rt.step().await.unwrap());
        assert_eq!(frames.borrow().len(), 1);
    }

    #[tokio::test]
    async fn grid_is_blank_again_before_effects_run() {
        let room = Room::new("draw", |ctx| async move {
            ctx.play(tui_rooms_types::Music::new(21, true));
            ctx.print("HELLO")?;
            ctx.effect(|ctx| async move {
                // By the time the effect runs the frame has been cleared.
                assert!(ctx.inner.borrow().frame.is_blank());
                Ok(())
            });
            Ok(())
        });
        let (mut rt, frames) = runtime(room);

        rt.seed();
        assert!(rt.step().await.unwrap());
        // The backend still saw the drawn frame with its music directive.
        let seen = frames.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].music(), Some(tui_rooms_types::Music::new(21, true)));
        assert_eq!(seen[0].get(0, 0).unwrap().glyph, 72);
    }

    #[tokio::test]
    async fn room_failure_is_fatal_to_the_tick() {
        let room = Room::new("broken", |ctx| async move {
            ctx.locate(100, 100);
            ctx.print_glyph(3)
        });
        let (mut rt, _) = runtime(room);

        rt.seed();
        let err = rt.step().await.unwrap_err();
        assert!(matches!(err, RoomError::OutOfBounds { room: "broken", .. }));
    }

    #[tokio::test]
    async fn stale_generation_state_updates_are_dropped() {
        let second = Room::new("second", |ctx| async move {
            let (v, _set) = ctx.state("v", 0u32)?;
            assert_eq!(v, 0, "stale setter must not leak into the new room");
            Ok(())
        });
        let first = {
            let second = second.clone();
            Room::new("first", move |ctx| {
                let second = second.clone();
                async move {
                    let (_, set_v) = ctx.state("v", 0u32)?;
                    ctx.effect(move |ctx| {
                        let second = second.clone();
                        let set_v = set_v.clone();
                        async move {
                            ctx.set_room(second);
                            // Fires after the room change was queued; the
                            // generation check must discard it.
                            set_v.set(99);
                            Ok(())
                        }
                    });
                    Ok(())
                }
            })
        };
        let (mut rt, _) = runtime(first);

        rt.seed();
        // Tick 1: render "first", effect queues SetRoom then SetState.
        assert!(rt.step().await.unwrap());
        // Tick 2: SetRoom drains, renders "second".
        assert!(rt.step().await.unwrap());
        // Tick 3: the stale SetState drains and is dropped without error.
        assert!(rt.step().await.unwrap());
        assert_eq!(rt.context().room(), "second");
    }
}
