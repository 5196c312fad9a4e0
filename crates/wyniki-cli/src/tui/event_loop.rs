use std::io;

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Alternates between rendering and blocking on terminal input: every
/// terminal event marks the screen dirty, and a dirty screen renders before
/// the next read. The initial render happens before any input.
#[derive(Debug)]
pub(super) struct EventLoop {
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        // Initial render is required on startup
        Self { dirty: true }
    }

    /// Returns the next event, blocking until terminal input arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        if self.dirty {
            self.dirty = false;
            return Ok(TuiEvent::Render);
        }
        let event = event::read()?;
        self.dirty = true;
        Ok(event.into())
    }
}
