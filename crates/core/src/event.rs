//! The coalescing event queue that drives all scheduling.
//!
//! Events are the only mutation path into the runtime: nothing is applied
//! synchronously from outside the drain loop. Enqueuing a significant
//! event (`SetRoom`/`SetState`) first drops any `Update` events sitting at
//! the queue's front, so a flurry of state changes between ticks collapses
//! onto the latest state and the next render never shows an intermediate
//! frame. Updates behind a significant event are left alone: several
//! queued mutations all apply before the next render.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::room::Room;

pub(crate) enum Event {
    /// A scheduled tick. `render: false` re-runs only the loops.
    Update { render: bool },
    /// Request a transition to another room.
    SetRoom(Room),
    /// Apply a value to a state slot of the room generation that queued it.
    SetState {
        key: &'static str,
        value: Rc<dyn Any>,
        generation: u64,
    },
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Update { render } => f.debug_struct("Update").field("render", render).finish(),
            Event::SetRoom(room) => f.debug_tuple("SetRoom").field(&room.name()).finish(),
            Event::SetState {
                key, generation, ..
            } => f
                .debug_struct("SetState")
                .field("key", key)
                .field("generation", generation)
                .finish(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub(crate) fn enqueue_update(&mut self, render: bool) {
        self.events.push_back(Event::Update { render });
    }

    /// Enqueue a `SetRoom`/`SetState`, dropping `Update`s at the front
    /// first so the next drained event reflects the mutation.
    pub(crate) fn enqueue_significant(&mut self, event: Event) {
        while matches!(self.events.front(), Some(Event::Update { .. })) {
            let dropped = self.events.pop_front();
            tracing::trace!(?dropped, "coalesced pending update");
        }
        self.events.push_back(event);
    }

    pub(crate) fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    #[cfg(test)]
    fn snapshot(&self) -> Vec<String> {
        self.events.iter().map(|e| format!("{e:?}")).collect()
    }
}
