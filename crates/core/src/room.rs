//! Rooms: the unit of behavior the runtime schedules.

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use crate::context::Ctx;
use crate::error::RoomResult;
use crate::io::BoxFuture;

/// A screen/behavior unit. Exactly one room is active at a time.
///
/// A room is a value wrapping a draw+react function: it paints the grid
/// through the [`Ctx`] drawing primitives and registers effects and loops
/// for the runtime to sequence. Two rooms compare equal only when they
/// share the same underlying function value.
#[derive(Clone)]
pub struct Room {
    name: &'static str,
    run: Rc<dyn Fn(Ctx) -> BoxFuture<'static, RoomResult>>,
}

impl Room {
    pub fn new<F, Fut>(name: &'static str, f: F) -> Self
    where
        F: Fn(Ctx) -> Fut + 'static,
        Fut: Future<Output = RoomResult> + 'static,
    {
        Self {
            name,
            run: Rc::new(move |ctx| Box::pin(f(ctx))),
        }
    }

    /// Name used in diagnostics for usage errors.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn call(&self, ctx: Ctx) -> BoxFuture<'static, RoomResult> {
        (self.run)(ctx)
    }
}

impl PartialEq for Room {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.run, &other.run)
    }
}

impl fmt::Debug for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Room").field("name", &self.name).finish()
    }
}

/// Teardown logic returned by an effect, invoked in registration order
/// when the room changes, before the incoming room's first render.
pub struct Cleanup(Box<dyn FnOnce(Ctx) -> BoxFuture<'static, RoomResult>>);

impl Cleanup {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce(Ctx) -> Fut + 'static,
        Fut: Future<Output = RoomResult> + 'static,
    {
        Self(Box::new(move |ctx| Box::pin(f(ctx))))
    }

    pub(crate) fn run(self, ctx: Ctx) -> BoxFuture<'static, RoomResult> {
        (self.0)(ctx)
    }
}

impl fmt::Debug for Cleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Cleanup")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(name: &'static str) -> Room {
        Room::new(name, |_ctx| async { Ok(()) })
    }

    #[test]
    fn rooms_compare_by_identity_not_name() {
        let a = noop("title");
        let b = noop("title");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn debug_shows_the_room_name() {
        let room = noop("store");
        assert_eq!(format!("{room:?}"), "Room { name: \"store\" }");
    }
}
