//! The brick-touching game.
//!
//! Walk the face onto one of the two highlighted bricks; most touches
//! clear the stage, an unlucky one ends the run. Score milestones unlock
//! better bricks in the store, which change the odds, the colors and the
//! points per stage.

use std::cell::RefCell;
use std::rc::Rc;

use tui_rooms_core::{wait, Room, RoomResult};
use tui_rooms_types::{Buttons, Music, Text};

use crate::rng::SimpleRng;

const BRICK: u16 = 3;
const FACE: u16 = 8;
const X_BUTTON: u16 = 24;
const RULE: u16 = 149;
const HOUSE: u16 = 232;

/// The two touchable bricks sit at these coordinates.
const BRICK_XS: (u16, u16) = (9, 16);
const BRICK_Y: u16 = 7;

/// Progress carried across rooms for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct BrickSave {
    pub stage: u32,
    pub high_score: u32,
    pub brick_type: u8,
    pub new_brick_type: u8,
}

struct Shared {
    save: RefCell<BrickSave>,
    rng: RefCell<SimpleRng>,
}

/// Entry room for the brick game.
pub fn brick_game(seed: u32) -> Room {
    title_room(Rc::new(Shared {
        save: RefCell::new(BrickSave::default()),
        rng: RefCell::new(SimpleRng::new(seed)),
    }))
}

fn title_room(shared: Rc<Shared>) -> Room {
    Room::new("title", move |ctx| {
        let shared = shared.clone();
        async move {
            let width = ctx.width() as usize;

            ctx.play(Music::new(21, true));
            ctx.fg(8);
            ctx.print(Text::repeat(BRICK, width))?;
            ctx.print(Text::repeat(BRICK, width))?;
            ctx.print("")?;
            ctx.fg(13);
            ctx.print("     (C) 2014 Wilson Gramer")?;
            ctx.fg(7);

            ctx.printf("     XXXXXX XXXX X XXX X  X", BRICK)?;
            ctx.printf("     X    X X  X X X   X X", BRICK)?;
            ctx.printf("     X    X X  X X X   XX", BRICK)?;
            ctx.printf("     XXXXX  X  X X X   XX", BRICK)?;
            ctx.printf("     X    X XXXX X X   X X", BRICK)?;
            ctx.printf("     X    X X X  X X   X  X", BRICK)?;
            ctx.printf("     XXXXXX X  X X XXX X   X", BRICK)?;
            ctx.print("")?;
            ctx.printf("      XXXX XXXXX XXXXX XXXX", BRICK)?;
            ctx.printf("      X    X   X X X X X", BRICK)?;
            ctx.printf("      X    X   X X X X X", BRICK)?;
            ctx.printf("      X XX XXXXX X X X XXXX", BRICK)?;
            ctx.printf("      X  X X   X X   X X", BRICK)?;
            ctx.printf("      XXXX X   X X   X XXXX", BRICK)?;
            ctx.print("")?;

            let title_text = match shared.rng.borrow_mut().next_range(5) {
                0 => Text::from_str("      GET THE RIGHT BRICK!"),
                1 => Text::from_str("        IT'S ADDICTIVE!"),
                2 => Text::from_str("      MADE BY WILSONATOR!"),
                3 => Text::from_str("       BEAT MY HIGHSCORE!"),
                _ => Text::from_str("       PRESS ")
                    .and_then(|t| t.raw(X_BUTTON))
                    .and_then(|t| t.str(" FOR STORE!")),
            };

            ctx.fg(9);
            ctx.print(title_text)?;
            ctx.print("        Push any button")?;
            ctx.print("")?;

            ctx.fg(8);
            ctx.print(Text::repeat(BRICK, width))?;
            ctx.print(format!("HIGHSCORE: {}", shared.save.borrow().high_score))?;

            let shared_effect = shared.clone();
            ctx.effect(move |_ctx| async move {
                {
                    let mut save = shared_effect.save.borrow_mut();
                    save.stage = if save.brick_type >= 2 { 4 } else { 0 };
                }
                wait(60).await;
                Ok(())
            });

            let shared_loop = shared.clone();
            ctx.loop_fn(move |ctx| {
                let shared = shared_loop.clone();
                async move {
                    let button = ctx.button().await?;

                    if button.contains(Buttons::X) {
                        ctx.set_room(store_room(shared));
                    } else if !button.is_empty() {
                        ctx.set_room(start_room(shared));
                    }
                    Ok(())
                }
            });

            Ok(())
        }
    })
}

fn start_room(shared: Rc<Shared>) -> Room {
    interstitial_room("start", "HERE WE GO!", shared)
}

fn next_stage_room(shared: Rc<Shared>) -> Room {
    interstitial_room("next-stage", "NEXT STAGE!", shared)
}

/// A banner screen that holds for three seconds, then enters the stage.
fn interstitial_room(name: &'static str, banner: &'static str, shared: Rc<Shared>) -> Room {
    Room::new(name, move |ctx| {
        let shared = shared.clone();
        async move {
            ctx.locate(10, 12);
            ctx.print(banner)?;

            ctx.effect(move |ctx| async move {
                wait(180).await;
                ctx.set_room(bricks_room(shared));
                Ok(())
            });

            Ok(())
        }
    })
}

fn bricks_room(shared: Rc<Shared>) -> Room {
    Room::new("bricks", move |ctx| {
        let shared = shared.clone();
        async move {
            let (x, set_x) = ctx.state("x", 15u16)?;
            let (y, set_y) = ctx.state("y", 15u16)?;
            let (width, height) = (ctx.width(), ctx.height());

            ctx.play(Music::new(27, true));

            let (brick_type, stage) = {
                let save = shared.save.borrow();
                (save.brick_type, save.stage)
            };

            if brick_type >= 3 {
                // Purple brick perk: purple background.
                ctx.bg(10);
                for _ in 0..height {
                    ctx.print(" ".repeat(width as usize))?;
                }
                ctx.locate(0, 0);
            }

            let brick_color = match brick_type {
                1 => 9,
                2 => 4,
                3 => 10,
                4 => 13,
                _ => 7,
            };

            ctx.fg(8);
            ctx.print_part(HOUSE)?;
            ctx.print(Text::repeat(BRICK, width as usize - 1))?;
            ctx.print(Text::repeat(BRICK, width as usize))?;
            for _ in 0..5 {
                ctx.print("")?;
            }
            ctx.fg(brick_color);
            ctx.print_part(" ".repeat(BRICK_XS.0 as usize))?;
            ctx.print_part(BRICK)?;
            ctx.print_part(" ".repeat((BRICK_XS.1 - BRICK_XS.0 - 1) as usize))?;
            ctx.print(BRICK)?;
            for _ in 0..12 {
                ctx.print("")?;
            }
            ctx.print("        TOUCH A BRICK...")?;
            ctx.locate(0, 22);
            ctx.fg(0);
            ctx.print(format!("SCORE: {stage}"))?;
            ctx.locate(x, y);
            ctx.fg(13);
            ctx.print_glyph(FACE)?;

            let shared_loop = shared.clone();
            ctx.loop_fn(move |ctx| {
                let shared = shared_loop.clone();
                let set_x = set_x.clone();
                let set_y = set_y.clone();
                async move {
                    let button = ctx.button().await?;

                    if button.contains(Buttons::UP) {
                        set_y.set(y.saturating_sub(1));
                        wait(10).await;
                    } else if button.contains(Buttons::DOWN) {
                        set_y.set((y + 1).min(height - 1));
                        wait(10).await;
                    } else if button.contains(Buttons::LEFT) {
                        set_x.set(x.saturating_sub(1));
                        wait(10).await;
                    } else if button.contains(Buttons::RIGHT) {
                        set_x.set((x + 1).min(width - 1));
                        wait(10).await;
                    }

                    if (x == BRICK_XS.0 || x == BRICK_XS.1) && y == BRICK_Y {
                        // Blue brick perk: five in six touches clear
                        // instead of two in three.
                        let brick_type = shared.save.borrow().brick_type;
                        let chance = if brick_type >= 1 { 5 } else { 2 };
                        let cleared = shared.rng.borrow_mut().next_range(chance + 1) > 0;
                        ctx.set_room(if cleared {
                            clear_room(shared.clone())
                        } else {
                            game_over_room(shared.clone())
                        });
                    }
                    Ok(())
                }
            });

            Ok(())
        }
    })
}

fn clear_room(shared: Rc<Shared>) -> Room {
    Room::new("clear", move |ctx| {
        let shared = shared.clone();
        async move {
            ctx.play(Music::new(15, true));
            ctx.locate(12, 12);
            ctx.print("CLEAR!")?;

            let shared_effect = shared.clone();
            ctx.effect(move |_ctx| async move {
                {
                    // Red brick perk: double points.
                    let mut save = shared_effect.save.borrow_mut();
                    save.stage += if save.brick_type >= 4 { 2 } else { 1 };
                }
                wait(60).await;
                Ok(())
            });

            let shared_loop = shared.clone();
            ctx.loop_fn(move |ctx| {
                let shared = shared_loop.clone();
                async move {
                    if !ctx.button().await?.is_empty() {
                        ctx.set_room(next_stage_room(shared));
                    }
                    Ok(())
                }
            });

            Ok(())
        }
    })
}

fn game_over_room(shared: Rc<Shared>) -> Room {
    Room::new("game-over", move |ctx| {
        let shared = shared.clone();
        async move {
            ctx.play(Music::new(6, false));
            ctx.locate(12, 12);
            ctx.print("GAME OVER")?;

            ctx.effect(|_ctx| async {
                wait(60).await;
                Ok(())
            });

            let shared_loop = shared.clone();
            ctx.loop_fn(move |ctx| {
                let shared = shared_loop.clone();
                async move {
                    if ctx.button().await?.is_empty() {
                        return Ok(());
                    }
                    wait(40).await;

                    let next = {
                        let mut save = shared.save.borrow_mut();
                        save.new_brick_type = match save.stage {
                            s if s >= 30 => 4,
                            s if s >= 20 => 3,
                            s if s >= 15 => 2,
                            s if s > 9 => 1,
                            _ => save.new_brick_type,
                        };

                        if save.new_brick_type > save.brick_type {
                            NextScreen::NewBrick
                        } else if save.stage > save.high_score {
                            NextScreen::HighScore
                        } else {
                            NextScreen::Title
                        }
                    };

                    ctx.set_room(match next {
                        NextScreen::NewBrick => new_brick_room(shared),
                        NextScreen::HighScore => high_score_room(shared),
                        NextScreen::Title => title_room(shared),
                    });
                    Ok(())
                }
            });

            Ok(())
        }
    })
}

enum NextScreen {
    NewBrick,
    HighScore,
    Title,
}

fn new_brick_room(shared: Rc<Shared>) -> Room {
    Room::new("new-brick", move |ctx| {
        let shared = shared.clone();
        async move {
            ctx.play(Music::new(12, true));
            ctx.locate(6, 10);
            ctx.print("YOU GOT A NEW BRICK!")?;
            ctx.locate(3, 11);
            ctx.print("CHECK IT OUT IN THE STORE!")?;

            let shared_effect = shared.clone();
            ctx.effect(move |_ctx| async move {
                let mut save = shared_effect.save.borrow_mut();
                save.brick_type = save.new_brick_type;
                save.new_brick_type = 0;
                Ok(())
            });

            let shared_loop = shared.clone();
            ctx.loop_fn(move |ctx| {
                let shared = shared_loop.clone();
                async move {
                    if !ctx.button().await?.is_empty() {
                        wait(30).await;
                        let beat_high_score = {
                            let save = shared.save.borrow();
                            save.stage > save.high_score
                        };
                        ctx.set_room(if beat_high_score {
                            high_score_room(shared)
                        } else {
                            title_room(shared)
                        });
                    }
                    Ok(())
                }
            });

            Ok(())
        }
    })
}

fn high_score_room(shared: Rc<Shared>) -> Room {
    Room::new("high-score", move |ctx| {
        let shared = shared.clone();
        async move {
            ctx.play(Music::new(12, true));
            ctx.locate(6, 10);
            ctx.print("YOU GOT A HIGH SCORE!")?;

            let shared_effect = shared.clone();
            ctx.effect(move |_ctx| async move {
                {
                    let mut save = shared_effect.save.borrow_mut();
                    save.high_score = save.stage;
                }
                wait(120).await;
                Ok(())
            });

            let shared_loop = shared.clone();
            ctx.loop_fn(move |ctx| {
                let shared = shared_loop.clone();
                async move {
                    if !ctx.button().await?.is_empty() {
                        ctx.set_room(title_room(shared));
                    }
                    Ok(())
                }
            });

            Ok(())
        }
    })
}

fn store_room(shared: Rc<Shared>) -> Room {
    Room::new("store", move |ctx| {
        let shared = shared.clone();
        async move {
            ctx.play(Music::new(14, true));
            ctx.fg(0);

            ctx.printf("    XXXXXXXXXXXXXXXXXXXXXXX    ", BRICK)?;
            ctx.printf("    XXXXXXXXXXXXXXXXXXXXXXX    ", BRICK)?;
            ctx.print("")?;
            ctx.print(" Items to buy...")?;
            ctx.print("")?;
            ctx.fg(9);
            ctx.print_part(" ")?;
            ctx.print_part(BRICK)?;
            ctx.print(" BLUE BRICK Increases your")?;
            ctx.print("              chances of winning")?;
            ctx.print("")?;
            ctx.fg(4);
            ctx.print_part(" ")?;
            ctx.print_part(BRICK)?;
            ctx.print(" GREEN BRICK Start on Level 5")?;
            ctx.print("")?;
            ctx.fg(10);
            ctx.print_part(" ")?;
            ctx.print_part(BRICK)?;
            ctx.print(" PURPLE BRICK Purple BG! :)")?;
            ctx.print("")?;
            ctx.fg(13);
            ctx.print_part(" ")?;
            ctx.print_part(BRICK)?;
            ctx.print(" RED BRICK Double points")?;
            ctx.print("")?;
            ctx.fg(0);
            ctx.print(
                Text::from_str("         ")
                    .and_then(|t| t.raw(RULE))
                    .and_then(|t| t.raw(RULE))
                    .and_then(|t| t.str(" Prices "))
                    .and_then(|t| t.raw(RULE))
                    .and_then(|t| t.raw(RULE)),
            )?;
            ctx.print("")?;

            let brick_type = shared.save.borrow().brick_type;
            let print_price = |min: i16, price: u32| -> RoomResult {
                ctx.print_part(" ")?;
                ctx.print_part(BRICK)?;
                if i16::from(brick_type) > min {
                    ctx.print(" - OWNED")
                } else {
                    ctx.print(format!(" - lvl. {price}"))
                }
            };

            ctx.fg(7);
            print_price(-1, 0)?;

            ctx.fg(9);
            print_price(0, 10)?;

            ctx.fg(4);
            print_price(1, 15)?;

            ctx.fg(10);
            print_price(2, 20)?;

            ctx.fg(13);
            print_price(3, 30)?;

            ctx.effect(|_ctx| async {
                wait(30).await;
                Ok(())
            });

            let shared_loop = shared.clone();
            ctx.loop_fn(move |ctx| {
                let shared = shared_loop.clone();
                async move {
                    if !ctx.button().await?.is_empty() {
                        wait(30).await;
                        ctx.set_room(title_room(shared));
                    }
                    Ok(())
                }
            });

            Ok(())
        }
    })
}
