//! Input abstraction
//!
//! The engine only needs discrete events: a quit request and key presses.
//! Platform code implements `InputSource`; `ScriptedInput` replays a fixed
//! schedule for headless runs and tests.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Space,
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
}

impl InputEvent {
    /// Quit, or a press of the escape key.
    pub fn requests_quit(&self) -> bool {
        matches!(self, InputEvent::Quit | InputEvent::KeyDown(Key::Escape))
    }
}

pub trait InputSource {
    /// Events that arrived since the previous poll.
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Events delivered on chosen frames (one poll per frame).
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frame: u64,
    script: VecDeque<(u64, InputEvent)>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` on the poll for `frame` (1-based).
    pub fn at(mut self, frame: u64, event: InputEvent) -> Self {
        let position = self
            .script
            .iter()
            .position(|(at, _)| *at > frame)
            .unwrap_or(self.script.len());
        self.script.insert(position, (frame, event));
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frame += 1;
        let mut events = Vec::new();
        while let Some(&(at, event)) = self.script.front() {
            if at > self.frame {
                break;
            }
            self.script.pop_front();
            events.push(event);
        }
        events
    }
}
