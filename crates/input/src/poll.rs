//! Non-blocking command polling.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};

use crate::map::command_for_key;
use crate::types::Command;

/// Source of at most one command per control loop iteration.
///
/// Implementations must not block: "no key pressed" is `Ok(None)`.
pub trait CommandSource {
    fn poll_command(&mut self) -> io::Result<Option<Command>>;
}

/// Reads key presses from the terminal via crossterm.
///
/// Echo is suppressed by raw mode, which the renderer enables.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }
}

impl CommandSource for CrosstermInput {
    fn poll_command(&mut self) -> io::Result<Option<Command>> {
        // Drain pending events until one maps to a command, never waiting.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                // Release/repeat events only show up on terminals with
                // enhanced keyboard reporting; act on presses alone.
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = command_for_key(key) {
                    return Ok(Some(command));
                }
            }
        }
        Ok(None)
    }
}

/// Replays a fixed list of commands, one per poll (for tests and demos).
impl CommandSource for VecDeque<Command> {
    fn poll_command(&mut self) -> io::Result<Option<Command>> {
        Ok(self.pop_front())
    }
}
