use std::fmt;

/// Keyboard key identifier.
///
/// The runtime maps physical key codes into these variants where possible.
/// Unsupported keys become `Key::Unknown(u32)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

impl Key {
    /// Parses a physical key code name (`"ArrowLeft"`, `"KeyA"`, `"Digit1"`,
    /// `"Space"`, ...). Left/right modifier codes collapse to one key.
    pub fn from_code(code: &str) -> Option<Key> {
        let key = match code {
            "Escape" => Key::Escape,
            "Enter" | "NumpadEnter" => Key::Enter,
            "Tab" => Key::Tab,
            "Backspace" => Key::Backspace,
            "Space" => Key::Space,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ShiftLeft" | "ShiftRight" => Key::Shift,
            "ControlLeft" | "ControlRight" => Key::Control,
            "AltLeft" | "AltRight" => Key::Alt,
            "MetaLeft" | "MetaRight" | "SuperLeft" | "SuperRight" => Key::Meta,
            _ => {
                if let Some(letter) = code.strip_prefix("Key") {
                    return single_index(letter, b'A', 26).map(|i| LETTERS[i]);
                }
                if let Some(digit) = code.strip_prefix("Digit") {
                    return single_index(digit, b'0', 10).map(|i| DIGITS[i]);
                }
                return None;
            }
        };
        Some(key)
    }

    /// The digit value for `Digit0..=Digit9`.
    pub fn digit(self) -> Option<u8> {
        DIGITS.iter().position(|k| *k == self).map(|i| i as u8)
    }
}

fn single_index(s: &str, base: u8, len: u8) -> Option<usize> {
    match s.as_bytes() {
        [b] if (base..base + len).contains(b) => Some((b - base) as usize),
        _ => None,
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event, carrying the pointer position at the time of the press.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_physical_codes() {
        assert_eq!(Key::from_code("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_code("KeyA"), Some(Key::A));
        assert_eq!(Key::from_code("KeyZ"), Some(Key::Z));
        assert_eq!(Key::from_code("Digit4"), Some(Key::Digit4));
        assert_eq!(Key::from_code("Space"), Some(Key::Space));
        assert_eq!(Key::from_code("ShiftRight"), Some(Key::Shift));
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(Key::from_code("Keya"), None);
        assert_eq!(Key::from_code("KeyAB"), None);
        assert_eq!(Key::from_code("Digit"), None);
        assert_eq!(Key::from_code("F13"), None);
        assert_eq!(Key::from_code(""), None);
    }

    #[test]
    fn digit_values() {
        assert_eq!(Key::Digit0.digit(), Some(0));
        assert_eq!(Key::Digit9.digit(), Some(9));
        assert_eq!(Key::A.digit(), None);
    }
}
