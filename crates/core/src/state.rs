//! Keyed state slots owned by the active room.
//!
//! Slots are created on the first render of a room, survive re-renders of
//! the same room, and are discarded wholesale when the room changes. Keys
//! are explicit strings, so rooms are free to branch and reorder their
//! `state` calls between passes; the only misuse left is registering the
//! same key twice in one pass.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

pub(crate) const REASON_DUPLICATE: &str = "registered twice in one render pass";
pub(crate) const REASON_TYPE_MISMATCH: &str = "stored value has a different type";

#[derive(Default)]
pub(crate) struct StateStore {
    slots: HashMap<&'static str, Rc<dyn Any>>,
    seen: HashSet<&'static str>,
}

impl StateStore {
    /// Register `key` for this render pass, storing `initial` if the slot
    /// is new, and return the current value.
    pub(crate) fn register(
        &mut self,
        key: &'static str,
        initial: Rc<dyn Any>,
    ) -> Result<Rc<dyn Any>, &'static str> {
        if !self.seen.insert(key) {
            return Err(REASON_DUPLICATE);
        }
        Ok(self.slots.entry(key).or_insert(initial).clone())
    }

    /// Apply a queued state mutation (last write wins per key).
    pub(crate) fn apply(&mut self, key: &'static str, value: Rc<dyn Any>) {
        self.slots.insert(key, value);
    }

    /// Start a new render pass: keys may be registered again.
    pub(crate) fn reset_pass(&mut self) {
        self.seen.clear();
    }

    /// Drop every slot (room change).
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.seen.clear();
    }
}
