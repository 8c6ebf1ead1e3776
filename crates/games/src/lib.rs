//! Room scripts: the games the runtime drives.
//!
//! Each game exposes one constructor returning its entry room; everything
//! else (stage counters, high scores, RNG) lives in game-owned shared
//! state threaded through the room constructors, never in globals.

mod brick;
mod rng;
mod road;

pub use brick::brick_game;
pub use rng::SimpleRng;
pub use road::road_rage;
