//! Scripted input source for tests and demos.

use std::cell::RefCell;
use std::collections::VecDeque;

use tui_rooms_core::{BoxFuture, InputSource};
use tui_rooms_types::Buttons;

/// Replays a fixed sequence of button samples, then reports no input.
pub struct ScriptedSource {
    script: RefCell<VecDeque<Buttons>>,
}

impl ScriptedSource {
    pub fn new(presses: impl IntoIterator<Item = Buttons>) -> Self {
        Self {
            script: RefCell::new(presses.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }
}

impl InputSource for ScriptedSource {
    fn button(&self) -> BoxFuture<'_, anyhow::Result<Buttons>> {
        Box::pin(async move {
            Ok(self
                .script
                .borrow_mut()
                .pop_front()
                .unwrap_or(Buttons::empty()))
        })
    }
}
