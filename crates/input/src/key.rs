use serde::{Deserialize, Serialize};

/// One of the four directional keys the arena listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

    /// Parse a key name. Accepts both the short form (`up`) and the
    /// browser-style key name (`ArrowUp`), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Some(Key::Up),
            "down" | "arrowdown" => Some(Key::Down),
            "left" | "arrowleft" => Some(Key::Left),
            "right" | "arrowright" => Some(Key::Right),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
        }
    }
}

/// Held/released state of the directional keys.
///
/// Written by key events, read once per frame by the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input with exactly the given keys held.
    pub fn holding(keys: &[Key]) -> Self {
        let mut state = Self::default();
        for key in keys {
            state.press(*key);
        }
        state
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Apply a raw key event. Returns `false` when the key is not one of
    /// ours and the event was ignored.
    pub fn handle(&mut self, key: Option<Key>, pressed: bool) -> bool {
        match key {
            Some(key) => {
                self.set(key, pressed);
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    fn set(&mut self, key: Key, held: bool) {
        let flag = match key {
            Key::Up => &mut self.up,
            Key::Down => &mut self.down,
            Key::Left => &mut self.left,
            Key::Right => &mut self.right,
        };
        if *flag != held {
            tracing::trace!(key = key.name(), held, "key state changed");
        }
        *flag = held;
    }
}

impl std::fmt::Display for InputState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let held: Vec<&str> = Key::ALL
            .iter()
            .filter(|k| self.is_held(**k))
            .map(|k| k.name())
            .collect();
        if held.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&held.join("+"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_arrow_names() {
        assert_eq!(Key::from_name("up"), Some(Key::Up));
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name(" RIGHT "), Some(Key::Right));
        assert_eq!(Key::from_name("space"), None);
    }

    #[test]
    fn press_and_release_toggle_flags() {
        let mut input = InputState::new();
        input.press(Key::Up);
        assert!(input.up);
        assert!(input.any());
        input.release(Key::Up);
        assert!(!input.up);
        assert!(!input.any());
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let mut input = InputState::new();
        input.press(Key::Down);
        input.press(Key::Down);
        assert_eq!(input, InputState::holding(&[Key::Down]));
    }

    #[test]
    fn unrecognized_key_is_ignored() {
        let mut input = InputState::holding(&[Key::Left]);
        assert!(!input.handle(None, true));
        assert_eq!(input, InputState::holding(&[Key::Left]));
        assert!(input.handle(Key::from_name("ArrowLeft"), false));
        assert!(!input.any());
    }

    #[test]
    fn display_lists_held_keys() {
        assert_eq!(InputState::new().to_string(), "none");
        assert_eq!(
            InputState::holding(&[Key::Right, Key::Up]).to_string(),
            "up+right"
        );
    }
}
