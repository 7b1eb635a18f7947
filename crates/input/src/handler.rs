//! Key event handler for terminal environments.
//!
//! Turns press/repeat/release events into commands and keeps the soft drop
//! held only while its key is down. Terminals that never emit release events
//! get a grace timeout instead: the drop ends once no press or auto-repeat has
//! arrived for that long.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::{is_soft_drop_key, map_key};
use crate::types::{Command, SOFT_DROP_GRACE_MS};

/// Commands produced by one key event
pub type Commands = ArrayVec<Command, 2>;

#[derive(Debug, Clone)]
pub struct InputHandler {
    down_held: bool,
    /// Time since the last soft-drop press or repeat
    since_down_ms: u32,
    /// Set once the terminal has delivered any release event
    saw_release: bool,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            down_held: false,
            since_down_ms: 0,
            saw_release: false,
            key_release_timeout_ms: SOFT_DROP_GRACE_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Dispatch a raw key event by kind
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Commands {
        let mut commands = Commands::new();
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if let Some(command) = self.handle_key_press(key) {
                    commands.push(command);
                }
            }
            KeyEventKind::Release => {
                if let Some(command) = self.handle_key_release(key.code) {
                    commands.push(command);
                }
            }
        }
        commands
    }

    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<Command> {
        let command = map_key(key)?;
        if command != Command::SoftDropStart {
            return Some(command);
        }

        self.since_down_ms = 0;
        if self.down_held {
            None
        } else {
            self.down_held = true;
            Some(Command::SoftDropStart)
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<Command> {
        self.saw_release = true;
        if is_soft_drop_key(code) {
            return self.release_soft_drop();
        }
        None
    }

    /// Advance the release timeout; returns `SoftDropEnd` when it fires
    pub fn update(&mut self, elapsed_ms: u32) -> Option<Command> {
        if !self.down_held || self.saw_release {
            return None;
        }
        self.since_down_ms = self.since_down_ms.saturating_add(elapsed_ms);
        if self.since_down_ms > self.key_release_timeout_ms {
            return self.release_soft_drop();
        }
        None
    }

    pub fn reset(&mut self) {
        self.down_held = false;
        self.since_down_ms = 0;
    }

    fn release_soft_drop(&mut self) -> Option<Command> {
        if !self.down_held {
            return None;
        }
        self.reset();
        Some(Command::SoftDropEnd)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
