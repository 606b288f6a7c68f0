use std::collections::HashSet;

use crate::coords::Viewport;

use super::frame::InputFrame;
use super::types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Held keys would otherwise stay down after focus returns.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Pointer position mapped to `[-1, 1]` on both axes, +Y up.
    pub fn pointer_normalized(&self, viewport: Viewport) -> Option<(f32, f32)> {
        let (x, y) = self.pointer_pos?;
        viewport.normalize(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, repeat: false }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Released, repeat: false }
    }

    #[test]
    fn press_is_recorded_once_while_held() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Space));
        assert!(frame.key_pressed(Key::Space));

        frame.clear();
        state.apply_event(&mut frame, press(Key::Space));
        assert!(!frame.key_pressed(Key::Space));
        assert!(state.key_down(Key::Space));

        state.apply_event(&mut frame, release(Key::Space));
        assert!(frame.keys_released.contains(&Key::Space));
        assert!(!state.key_down(Key::Space));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(Key::A));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.keys_down.is_empty());
    }

    #[test]
    fn pointer_normalizes_with_y_up() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(state.pointer_normalized(viewport), None);

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 0.0, y: 0.0 }));
        assert_eq!(state.pointer_normalized(viewport), Some((-1.0, 1.0)));

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 400.0, y: 450.0 }));
        assert_eq!(state.pointer_normalized(viewport), Some((0.0, -0.5)));

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_normalized(viewport), None);
    }
}
