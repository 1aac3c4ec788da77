//! Keyboard input tracking
//!
//! The host feeds in the set of held keys once per frame. `InputManager` keeps
//! the previous frame around so "just pressed" can be told apart from "held".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Keys the game can bind
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Key {
    /// Unbound
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    Escape,
    Enter,
    Space,
    A,
    D,
    E,
    I,
    J,
    K,
    L,
    S,
    W,
}

impl Key {
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::None => "None",
            Key::Up => "Up",
            Key::Down => "Down",
            Key::Left => "Left",
            Key::Right => "Right",
            Key::Escape => "Escape",
            Key::Enter => "Enter",
            Key::Space => "Space",
            Key::A => "A",
            Key::D => "D",
            Key::E => "E",
            Key::I => "I",
            Key::J => "J",
            Key::K => "K",
            Key::L => "L",
            Key::S => "S",
            Key::W => "W",
        }
    }
}

/// Answers "is this key held right now"
pub trait KeyInput {
    fn is_key_down(&self, key: Key) -> bool;
}

/// Keys held during one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pressed: BTreeSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        if key != Key::None {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.pressed.iter().copied()
    }
}

impl FromIterator<Key> for KeyboardState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut state = Self::new();
        for key in iter {
            state.press(key);
        }
        state
    }
}

impl KeyInput for KeyboardState {
    fn is_key_down(&self, key: Key) -> bool {
        KeyboardState::is_key_down(self, key)
    }
}

/// Current and previous keyboard state
#[derive(Debug, Clone, Default)]
pub struct InputManager {
    current: KeyboardState,
    previous: KeyboardState,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame with `state` as the held keys
    pub fn update(&mut self, state: KeyboardState) {
        self.previous = std::mem::replace(&mut self.current, state);
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.current.is_key_down(key)
    }

    pub fn is_key_up(&self, key: Key) -> bool {
        !self.current.is_key_down(key)
    }

    /// Held now, not held last frame
    pub fn is_new_key_down(&self, key: Key) -> bool {
        self.current.is_key_down(key) && !self.previous.is_key_down(key)
    }

    /// Released this frame
    pub fn is_new_key_up(&self, key: Key) -> bool {
        !self.current.is_key_down(key) && self.previous.is_key_down(key)
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.current.pressed_keys()
    }

    pub fn new_pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.current
            .pressed_keys()
            .filter(|key| !self.previous.is_key_down(*key))
    }
}

impl KeyInput for InputManager {
    fn is_key_down(&self, key: Key) -> bool {
        InputManager::is_key_down(self, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_key_down_lasts_one_frame() {
        let mut input = InputManager::new();
        input.update([Key::W].into_iter().collect());
        assert!(input.is_new_key_down(Key::W));
        assert!(input.is_key_down(Key::W));

        input.update([Key::W, Key::S].into_iter().collect());
        assert!(!input.is_new_key_down(Key::W));
        assert!(input.is_new_key_down(Key::S));
        assert_eq!(input.new_pressed_keys().collect::<Vec<_>>(), vec![Key::S]);
        assert_eq!(input.pressed_keys().count(), 2);
    }

    #[test]
    fn test_new_key_up() {
        let mut input = InputManager::new();
        input.update([Key::Escape].into_iter().collect());
        input.update(KeyboardState::new());
        assert!(input.is_new_key_up(Key::Escape));
        assert!(input.is_key_up(Key::Escape));

        input.update(KeyboardState::new());
        assert!(!input.is_new_key_up(Key::Escape));
    }

    #[test]
    fn test_none_is_never_held() {
        let mut state = KeyboardState::new();
        state.press(Key::None);
        assert!(!state.is_key_down(Key::None));

        state.press(Key::Up);
        state.release(Key::Up);
        assert!(!state.is_key_down(Key::Up));
    }
}
