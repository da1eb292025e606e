//! Input state tracking with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` is true every tick the key is
//!   down. Movement intent is built only from held state.
//!
//! - **Edge-triggered (just_pressed):** true only during the tick the key went
//!   down, cleared by `end_frame()`. The jump latch in the controller does its
//!   own edge handling from held state; this is for counting presses.

use std::collections::HashSet;

use crate::controller::MovementIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Presses or releases `key` so its held state matches `down`.
    pub fn set_key(&mut self, key: Key, down: bool) {
        if down {
            self.key_down(key);
        } else {
            self.key_up(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Snapshot for one simulation tick. Left and right together cancel out.
    pub fn intent(&self) -> MovementIntent {
        let horizontal = i8::from(self.is_held(Key::Right)) - i8::from(self.is_held(Key::Left));
        MovementIntent::new(horizontal, self.is_held(Key::Jump))
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}
