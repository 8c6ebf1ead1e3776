//! Combining input source: the union of whatever each source reports.

use std::rc::Rc;

use tui_rooms_core::{BoxFuture, InputSource};
use tui_rooms_types::Buttons;

/// Polls every wrapped source and ORs their button masks, so e.g. a
/// gamepad and the keyboard can drive the same game.
#[derive(Default)]
pub struct CombinedSource {
    sources: Vec<Rc<dyn InputSource>>,
}

impl CombinedSource {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn with(mut self, source: Rc<dyn InputSource>) -> Self {
        self.sources.push(source);
        self
    }
}

impl InputSource for CombinedSource {
    fn button(&self) -> BoxFuture<'_, anyhow::Result<Buttons>> {
        Box::pin(async move {
            let mut buttons = Buttons::empty();
            for source in &self.sources {
                buttons |= source.button().await?;
            }
            Ok(buttons)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSource;

    #[tokio::test]
    async fn reports_the_union_of_all_sources() {
        let combined = CombinedSource::new()
            .with(Rc::new(ScriptedSource::new([Buttons::UP])))
            .with(Rc::new(ScriptedSource::new([Buttons::A])));

        assert_eq!(combined.button().await.unwrap(), Buttons::UP | Buttons::A);
        // Both scripts exhausted: no input.
        assert_eq!(combined.button().await.unwrap(), Buttons::empty());
    }
}
