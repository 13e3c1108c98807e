//! Held-direction tracking for terminal environments.
//!
//! The scroll loop wants "which directions are held right now", sampled once per frame.
//! Terminals report presses, auto-repeats and (only sometimes) releases, so each axis keeps
//! the time of its last press or repeat and is released automatically after a timeout.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::map::handle_key_event;
use crate::types::{HeldDirections, ScrollAction};

/// Direction held on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Direction held on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDirection {
    Up,
    Down,
    None,
}

/// Tracks held camera directions across key events.
#[derive(Debug, Clone)]
pub struct HeldInput {
    horizontal: HorizontalDirection,
    vertical: VerticalDirection,
    horizontal_key_time: Instant,
    vertical_key_time: Instant,
    key_release_timeout_ms: u32,
}

// Long enough to bridge the initial auto-repeat delay of common terminals, so a held key
// keeps scrolling between the first press and the first repeat event.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 550;

impl HeldInput {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            horizontal: HorizontalDirection::None,
            vertical: VerticalDirection::None,
            horizontal_key_time: now,
            vertical_key_time: now,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Register a key press or auto-repeat.
    ///
    /// Returns the movement action when the key starts a new hold. Pressing the opposite
    /// direction takes over the axis immediately.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<ScrollAction> {
        let action = handle_key_event(KeyEvent::from(code))?;
        let now = Instant::now();
        let started = match action {
            ScrollAction::MoveLeft => {
                self.horizontal_key_time = now;
                std::mem::replace(&mut self.horizontal, HorizontalDirection::Left)
                    != HorizontalDirection::Left
            }
            ScrollAction::MoveRight => {
                self.horizontal_key_time = now;
                std::mem::replace(&mut self.horizontal, HorizontalDirection::Right)
                    != HorizontalDirection::Right
            }
            ScrollAction::MoveUp => {
                self.vertical_key_time = now;
                std::mem::replace(&mut self.vertical, VerticalDirection::Up)
                    != VerticalDirection::Up
            }
            ScrollAction::MoveDown => {
                self.vertical_key_time = now;
                std::mem::replace(&mut self.vertical, VerticalDirection::Down)
                    != VerticalDirection::Down
            }
            ScrollAction::ToggleBufferView | ScrollAction::JumpHome => false,
        };
        started.then_some(action)
    }

    /// Register a key release (only on terminals that report them).
    pub fn handle_key_release(&mut self, code: KeyCode) {
        match handle_key_event(KeyEvent::from(code)) {
            Some(ScrollAction::MoveLeft) if self.horizontal == HorizontalDirection::Left => {
                self.horizontal = HorizontalDirection::None;
            }
            Some(ScrollAction::MoveRight) if self.horizontal == HorizontalDirection::Right => {
                self.horizontal = HorizontalDirection::None;
            }
            Some(ScrollAction::MoveUp) if self.vertical == VerticalDirection::Up => {
                self.vertical = VerticalDirection::None;
            }
            Some(ScrollAction::MoveDown) if self.vertical == VerticalDirection::Down => {
                self.vertical = VerticalDirection::None;
            }
            _ => {}
        }
    }

    /// Directions held this frame, after applying the release timeout.
    pub fn sample(&mut self) -> HeldDirections {
        // Auto-release when terminal does not emit release events.
        if self.horizontal_key_time.elapsed().as_millis() as u32 > self.key_release_timeout_ms {
            self.horizontal = HorizontalDirection::None;
        }
        if self.vertical_key_time.elapsed().as_millis() as u32 > self.key_release_timeout_ms {
            self.vertical = VerticalDirection::None;
        }

        HeldDirections {
            left: self.horizontal == HorizontalDirection::Left,
            right: self.horizontal == HorizontalDirection::Right,
            up: self.vertical == VerticalDirection::Up,
            down: self.vertical == VerticalDirection::Down,
        }
    }

    pub fn reset(&mut self) {
        let now = Instant::now();
        self.horizontal = HorizontalDirection::None;
        self.vertical = VerticalDirection::None;
        self.horizontal_key_time = now;
        self.vertical_key_time = now;
    }
}

impl Default for HeldInput {
    fn default() -> Self {
        Self::new()
    }
}
