//! End-to-end scheduler behavior through the public API.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use tui_rooms::core::{Cleanup, Room, Runtime};
use tui_rooms::input::ScriptedSource;
use tui_rooms::types::{Buttons, Frame, Music};

use common::{row_text, CaptureBackend};

fn runtime(
    room: Room,
    presses: impl IntoIterator<Item = Buttons>,
) -> (Runtime, Rc<RefCell<Vec<Frame>>>) {
    let (backend, frames) = CaptureBackend::new(16, 8);
    let input = Rc::new(ScriptedSource::new(presses));
    (Runtime::new(room, input, Box::new(backend)), frames)
}

#[tokio::test]
async fn state_updates_apply_one_per_tick() {
    let room = Room::new("counter", |ctx| async move {
        let (n, set_n) = ctx.state("n", 0u32)?;
        ctx.print(format!("{n}"))?;
        ctx.loop_fn(move |_ctx| {
            let set_n = set_n.clone();
            async move {
                if n < 3 {
                    set_n.set(n + 1);
                }
                Ok(())
            }
        });
        Ok(())
    });
    let (mut rt, frames) = runtime(room, []);

    rt.seed();
    for _ in 0..4 {
        assert!(rt.step().await.unwrap());
    }

    let frames = frames.borrow();
    assert_eq!(frames.len(), 4);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(row_text(frame, 0).trim_end(), i.to_string());
    }
}

#[tokio::test]
async fn cleanups_run_in_order_before_the_next_room() {
    let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

    let next = {
        let order = order.clone();
        Room::new("next", move |ctx| {
            let order = order.clone();
            async move {
                ctx.effect(move |_ctx| async move {
                    order.borrow_mut().push("next-effect");
                    Ok(())
                });
                Ok(())
            }
        })
    };

    let first = {
        let order = order.clone();
        Room::new("first", move |ctx| {
            let order = order.clone();
            let next = next.clone();
            async move {
                let o1 = order.clone();
                ctx.effect_with_cleanup(move |_ctx| async move {
                    Ok(Some(Cleanup::new(move |_ctx| async move {
                        o1.borrow_mut().push("cleanup-1");
                        Ok(())
                    })))
                });
                let o2 = order.clone();
                ctx.effect_with_cleanup(move |_ctx| async move {
                    Ok(Some(Cleanup::new(move |_ctx| async move {
                        o2.borrow_mut().push("cleanup-2");
                        Ok(())
                    })))
                });
                ctx.loop_fn(move |ctx| {
                    let next = next.clone();
                    async move {
                        ctx.set_room(next);
                        Ok(())
                    }
                });
                Ok(())
            }
        })
    };
    let (mut rt, _) = runtime(first, []);

    rt.seed();
    assert!(rt.step().await.unwrap());
    assert!(rt.step().await.unwrap());

    assert_eq!(
        *order.borrow(),
        vec!["cleanup-1", "cleanup-2", "next-effect"]
    );
    assert_eq!(rt.context().room(), "next");
}

#[tokio::test]
async fn loops_keep_ticking_without_redrawing() {
    let ticks = Rc::new(RefCell::new(0u32));
    let room = {
        let ticks = ticks.clone();
        Room::new("static", move |ctx| {
            let ticks = ticks.clone();
            async move {
                ctx.print("HI")?;
                ctx.loop_fn(move |_ctx| {
                    let ticks = ticks.clone();
                    async move {
                        *ticks.borrow_mut() += 1;
                        Ok(())
                    }
                });
                Ok(())
            }
        })
    };
    let (mut rt, frames) = runtime(room, []);

    rt.seed();
    for _ in 0..3 {
        assert!(rt.step().await.unwrap());
    }

    // One render, three loop ticks.
    assert_eq!(frames.borrow().len(), 1);
    assert_eq!(*ticks.borrow(), 3);
}

#[tokio::test]
async fn a_press_after_idle_frames_switches_rooms() {
    let game = Room::new("game", |ctx| async move { ctx.print("GO") });
    let title = {
        let game = game.clone();
        Room::new("title", move |ctx| {
            let game = game.clone();
            async move {
                ctx.print("TITLE")?;
                ctx.loop_fn(move |ctx| {
                    let game = game.clone();
                    async move {
                        if !ctx.button().await?.is_empty() {
                            ctx.set_room(game);
                        }
                        Ok(())
                    }
                });
                Ok(())
            }
        })
    };
    let (mut rt, frames) = runtime(
        title,
        [
            Buttons::empty(),
            Buttons::empty(),
            Buttons::empty(),
            Buttons::A,
        ],
    );

    rt.seed();
    for _ in 0..5 {
        assert!(rt.step().await.unwrap());
    }

    assert_eq!(rt.context().room(), "game");
    // Three idle ticks in between never redrew.
    let frames = frames.borrow();
    assert_eq!(frames.len(), 2);
    assert_eq!(row_text(&frames[0], 0).trim_end(), "TITLE");
    assert_eq!(row_text(&frames[1], 0).trim_end(), "GO");
}

#[tokio::test]
async fn the_grid_and_cursor_reset_between_renders() {
    let room = Room::new("redraw", |ctx| async move {
        let (phase, set_phase) = ctx.state("phase", 0u8)?;
        if phase == 0 {
            ctx.print("AAAA")?;
        } else {
            ctx.locate(1, 1);
            ctx.print("BB")?;
        }
        ctx.loop_fn(move |_ctx| {
            let set_phase = set_phase.clone();
            async move {
                if phase == 0 {
                    set_phase.set(1);
                }
                Ok(())
            }
        });
        Ok(())
    });
    let (mut rt, frames) = runtime(room, []);

    rt.seed();
    assert!(rt.step().await.unwrap());
    assert!(rt.step().await.unwrap());

    let frames = frames.borrow();
    assert_eq!(row_text(&frames[0], 0).trim_end(), "AAAA");
    // Nothing from the first pass survives into the second.
    assert_eq!(row_text(&frames[1], 0).trim_end(), "");
    assert_eq!(row_text(&frames[1], 1).trim_end(), " BB");
}

#[tokio::test]
async fn music_directives_ride_along_with_frames() {
    let room = Room::new("jukebox", |ctx| async move {
        let (on, set_on) = ctx.state("on", true)?;
        if on {
            ctx.play(Music::new(7, true));
        } else {
            ctx.pause();
        }
        ctx.loop_fn(move |_ctx| {
            let set_on = set_on.clone();
            async move {
                if on {
                    set_on.set(false);
                }
                Ok(())
            }
        });
        Ok(())
    });
    let (mut rt, frames) = runtime(room, []);

    rt.seed();
    assert!(rt.step().await.unwrap());
    assert!(rt.step().await.unwrap());

    let frames = frames.borrow();
    assert_eq!(frames[0].music(), Some(Music::new(7, true)));
    assert_eq!(frames[1].music(), None);
}
