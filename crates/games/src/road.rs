//! The lane-dodging driving game.
//!
//! Steer the car across seven lanes while oncoming traffic scrolls down.
//! The road speeds up and spawns denser traffic as time passes; one
//! collision ends the run.

use std::cell::RefCell;
use std::rc::Rc;

use tui_rooms_core::{wait, Ctx, Room, RoomResult};
use tui_rooms_types::{Buttons, Music};

use crate::rng::SimpleRng;

const BLOCK: u16 = 143;
const LINE: u16 = 150;
const ONCOMING_CAR: u16 = 238;
const CAR: u16 = 236;
const EXPLOSION: u16 = 254;

const YELLOW_LINE_LENGTH: i32 = 3;
const CAR_LEFT_X: u16 = 22;
const NUMBER_OF_CARS: u16 = 6;
const MAX_CAR_SPAWN_PROBABILITY: f32 = 0.4;
const CAR_SPAWN_PROBABILITY_CHANGE: f32 = 0.0125;
const MIN_CAR_SPAWN_PROBABILITY: f32 = 0.3;
const SPEED_INTERVAL: u32 = 35;
const MIN_WAIT: u32 = 3;
const MAX_WAIT: u32 = 10;
const WAIT_CHANGE: u32 = 1;
const TEXT_Y: u16 = 10;

struct Shared {
    high_score: RefCell<u32>,
    rng: RefCell<SimpleRng>,
}

/// Everything the game room tracks between ticks.
#[derive(Debug, Clone)]
struct RoadState {
    time: u32,
    wait: u32,
    x: u16,
    yellow_line_offset: i32,
    car_spawn_probability: f32,
    /// Oncoming cars as (lane, row) pairs.
    cars: Vec<(u16, u16)>,
    hit_car: bool,
    game_over: bool,
    score: u32,
}

impl RoadState {
    fn initial() -> Self {
        Self {
            time: 0,
            wait: MAX_WAIT,
            x: 3,
            yellow_line_offset: 0,
            car_spawn_probability: MAX_CAR_SPAWN_PROBABILITY,
            cars: Vec::new(),
            hit_car: false,
            game_over: false,
            score: 0,
        }
    }
}

/// Entry room for the driving game.
pub fn road_rage(seed: u32) -> Room {
    title_room(Rc::new(Shared {
        high_score: RefCell::new(0),
        rng: RefCell::new(SimpleRng::new(seed)),
    }))
}

struct Background {
    /// Shows the live score when set, the high score otherwise.
    score: Option<u32>,
    yellow_line_color: u8,
    yellow_line_offset: i32,
}

/// Draw the title art, the score line and the road.
fn draw_background(ctx: &Ctx, bg: &Background, high_score: u32) -> RoomResult {
    ctx.print("")?;
    ctx.print("")?;
    ctx.print("")?;
    ctx.fg(13);
    ctx.printf("  XXX XXX XXX XX  ", BLOCK)?;
    ctx.printf("  X X X X X X X X ", BLOCK)?;
    ctx.printf("  XXX X X XXX X X ", BLOCK)?;
    ctx.printf("  XX  X X X X X X ", BLOCK)?;
    ctx.printf("  X X XXX X X XX  ", BLOCK)?;
    ctx.printf("                   ", BLOCK)?;
    ctx.printf("  XXX XXX XXX XXX X", BLOCK)?;
    ctx.printf("  X X X X X   X   X", BLOCK)?;
    ctx.printf("  XXX XXX X X XXX X", BLOCK)?;
    ctx.printf("  XX  X X X X X    ", BLOCK)?;
    ctx.printf("  X X X X XXX XXX X", BLOCK)?;
    ctx.print("")?;
    ctx.fg(8);
    ctx.print("  (C) 2022")?;
    ctx.print("  Wilson Gramer")?;
    ctx.fg(15);
    ctx.print("")?;

    match bg.score {
        Some(score) => ctx.print(format!("  Score: {score}"))?,
        None => ctx.print(format!("  High score: {high_score}"))?,
    }

    let height = ctx.height();
    for y in 0..height {
        ctx.fg(15);
        ctx.locate(21, y);
        ctx.print_glyph(LINE)?;
        ctx.locate(29, y);
        ctx.print_glyph(LINE)?;
    }

    // The dashed center line scrolls by drawing one period past the top
    // edge; segments that land above the grid are clipped.
    ctx.fg(bg.yellow_line_color);
    for y in 0..height as i32 + YELLOW_LINE_LENGTH {
        if (y - bg.yellow_line_offset) % YELLOW_LINE_LENGTH > 0 && y >= YELLOW_LINE_LENGTH {
            ctx.locate(25, (y - YELLOW_LINE_LENGTH) as u16);
            ctx.print_glyph(LINE)?;
        }
    }

    Ok(())
}

fn title_room(shared: Rc<Shared>) -> Room {
    Room::new("road-title", move |ctx| {
        let shared = shared.clone();
        async move {
            let background = Background {
                score: None,
                yellow_line_color: 8,
                yellow_line_offset: -1,
            };
            draw_background(&ctx, &background, *shared.high_score.borrow())?;

            ctx.play(Music::new(1, true));

            ctx.fg(14);
            ctx.locate(2, 20);
            ctx.print("Press any button")?;
            ctx.locate(2, 21);
            ctx.print("to start")?;

            ctx.effect(|_ctx| async {
                wait(60).await;
                Ok(())
            });

            let shared_loop = shared.clone();
            ctx.loop_fn(move |ctx| {
                let shared = shared_loop.clone();
                async move {
                    if !ctx.button().await?.is_empty() {
                        ctx.set_room(countdown_room(shared));
                    }
                    Ok(())
                }
            });

            Ok(())
        }
    })
}

fn countdown_room(shared: Rc<Shared>) -> Room {
    Room::new("road-countdown", move |ctx| {
        let shared = shared.clone();
        async move {
            let background = Background {
                score: None,
                yellow_line_color: 8,
                yellow_line_offset: -1,
            };
            draw_background(&ctx, &background, *shared.high_score.borrow())?;

            let (countdown, set_countdown) = ctx.state("countdown", 2u8)?;

            ctx.fg(0);
            ctx.locate(22, 9);
            ctx.print("Ready!!")?;

            if countdown <= 1 {
                ctx.locate(22, 11);
                ctx.print(" Set!!")?;
            }

            if countdown == 0 {
                ctx.locate(22, 13);
                ctx.print(" GO!!!")?;
            }

            let shared_loop = shared.clone();
            ctx.loop_fn(move |ctx| {
                let shared = shared_loop.clone();
                let set_countdown = set_countdown.clone();
                async move {
                    wait(60).await;

                    if countdown == 0 {
                        ctx.set_room(game_room(shared));
                    } else {
                        set_countdown.set(countdown - 1);
                    }
                    Ok(())
                }
            });

            Ok(())
        }
    })
}

fn game_room(shared: Rc<Shared>) -> Room {
    Room::new("road-game", move |ctx| {
        let shared = shared.clone();
        async move {
            let (state, set_state) = ctx.state("road", RoadState::initial())?;
            let height = ctx.height();
            let character_y = height - 4;

            let background = Background {
                score: Some(state.score),
                yellow_line_color: if state.hit_car { 8 } else { 7 },
                yellow_line_offset: state.yellow_line_offset,
            };
            draw_background(&ctx, &background, *shared.high_score.borrow())?;

            ctx.play(if state.hit_car {
                Music::new(6, false)
            } else {
                Music::new(2, true)
            });

            for &(x, y) in &state.cars {
                if y >= height {
                    continue;
                }
                ctx.locate(CAR_LEFT_X + x, y);
                ctx.fg(if y > character_y || state.hit_car { 14 } else { 15 });
                ctx.print_glyph(ONCOMING_CAR)?;
            }

            if state.hit_car {
                ctx.fg(15);
                ctx.locate(CAR_LEFT_X + 1, TEXT_Y);
                ctx.print("GAME")?;
                ctx.locate(CAR_LEFT_X + 1, TEXT_Y + 2);
                ctx.print("OVER!")?;
            }

            ctx.locate(CAR_LEFT_X + state.x, character_y);
            ctx.fg(13);
            ctx.print_glyph(if state.hit_car { EXPLOSION } else { CAR })?;

            let shared_loop = shared.clone();
            ctx.loop_fn(move |ctx| {
                let shared = shared_loop.clone();
                let set_state = set_state.clone();
                let state = state.clone();
                async move {
                    if state.game_over {
                        if !ctx.button().await?.is_empty() {
                            ctx.set_room(title_room(shared));
                        }
                        return Ok(());
                    }

                    if state.hit_car {
                        let mut next = state;
                        next.game_over = true;
                        set_state.set(next);
                        wait(120).await;
                        return Ok(());
                    }

                    if state
                        .cars
                        .iter()
                        .any(|&(x, y)| x == state.x && y == character_y)
                    {
                        let mut high_score = shared.high_score.borrow_mut();
                        *high_score = (*high_score).max(state.score);
                        drop(high_score);

                        let mut next = state;
                        next.hit_car = true;
                        set_state.set(next);
                        return Ok(());
                    }

                    let button = ctx.button().await?;
                    let new_x = if button.contains(Buttons::LEFT) {
                        state.x.saturating_sub(1)
                    } else if button.contains(Buttons::RIGHT) {
                        (state.x + 1).min(NUMBER_OF_CARS)
                    } else {
                        state.x
                    };

                    let mut cars: Vec<(u16, u16)> = state
                        .cars
                        .iter()
                        .filter(|&&(_, y)| y < height)
                        .map(|&(x, y)| (x, y + 1))
                        .collect();

                    {
                        let mut rng = shared.rng.borrow_mut();
                        if rng.next_f32() < state.car_spawn_probability {
                            cars.push((rng.next_range(u32::from(NUMBER_OF_CARS) + 1) as u16, 0));
                        }
                    }

                    let reached_wait = state.time % SPEED_INTERVAL == 0;
                    let passed = cars.iter().filter(|&&(_, y)| y == character_y + 1).count();

                    let next = RoadState {
                        time: state.time + 1,
                        wait: if reached_wait {
                            (state.wait - WAIT_CHANGE).max(MIN_WAIT)
                        } else {
                            state.wait
                        },
                        x: new_x,
                        yellow_line_offset: (state.yellow_line_offset + 1) % YELLOW_LINE_LENGTH,
                        car_spawn_probability: if reached_wait {
                            (state.car_spawn_probability - CAR_SPAWN_PROBABILITY_CHANGE)
                                .max(MIN_CAR_SPAWN_PROBABILITY)
                        } else {
                            state.car_spawn_probability
                        },
                        cars,
                        hit_car: false,
                        game_over: false,
                        score: state.score + passed as u32,
                    };

                    let frame_wait = next.wait;
                    set_state.set(next);
                    wait(frame_wait).await;
                    Ok(())
                }
            });

            Ok(())
        }
    })
}
