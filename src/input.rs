//! Key polling
//!
//! The windowing layer owns the real keyboard. It only has to answer two
//! questions per key: is it held, and did it go down since the last tick.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Skill,
    Start,
}

pub trait InputPoller {
    /// Key is currently down
    fn is_held(&self, key: Key) -> bool;
    /// Key went down since the previous tick
    fn just_pressed(&self, key: Key) -> bool;
}

impl TickInput {
    /// Sample one tick of input
    pub fn poll(poller: &impl InputPoller) -> Self {
        Self {
            left: poller.is_held(Key::Left),
            right: poller.is_held(Key::Right),
            up: poller.is_held(Key::Up),
            down: poller.is_held(Key::Down),
            fire: poller.just_pressed(Key::Fire),
            skill: poller.just_pressed(Key::Skill),
            start: poller.just_pressed(Key::Start),
        }
    }
}

/// Key state fed by press/release events
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl KeyboardState {
    pub fn press(&mut self, key: Key) {
        // Auto-repeat does not count as a fresh press
        if self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Clear one-shot presses after a tick consumed them
    pub fn end_tick(&mut self) {
        self.pressed.clear();
    }
}

impl InputPoller for KeyboardState {
    fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}
