//! Per-frame driving of the active scene.

use glam::Vec2;
use prism_engine::coords::Viewport;
use prism_engine::input::{
    InputEvent, InputFrame, InputState, Key, KeyState, MouseButton, MouseButtonState,
    PointerButtonEvent,
};

use crate::device::SceneDevice;
use crate::error::SceneError;
use crate::lifecycle::{SceneManager, SwitchOutcome};
use crate::program::PipelineFlavor;
use crate::variant::SceneVariant;

/// Owns the scene manager and the input state fed into the active scene.
///
/// Commands (variant selection, resize, pointer, keys) apply immediately;
/// [`FrameDriver::frame`] advances and draws.
pub struct FrameDriver<D: SceneDevice> {
    manager: SceneManager<D>,
    input: InputState,
    input_frame: InputFrame,
}

impl<D: SceneDevice> FrameDriver<D> {
    pub fn new(device: D, flavor: PipelineFlavor) -> Self {
        Self {
            manager: SceneManager::new(device, flavor),
            input: InputState::default(),
            input_frame: InputFrame::default(),
        }
    }

    pub fn manager(&self) -> &SceneManager<D> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut SceneManager<D> {
        &mut self.manager
    }

    pub fn active(&self) -> SceneVariant {
        self.manager.current()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn select(&mut self, variant: SceneVariant) -> Result<SwitchOutcome, SceneError> {
        self.manager.switch_to(variant)
    }

    /// Parses a command tag and switches. Unknown tags are logged and leave
    /// the active scene untouched.
    pub fn select_variant(&mut self, tag: &str) -> Result<SwitchOutcome, SceneError> {
        let variant = tag.parse::<SceneVariant>().inspect_err(|e| log::warn!("{e}"))?;
        self.select(variant)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.manager.resize(Viewport::new(width as f32, height as f32));
    }

    /// Pointer position in `[-1, 1]`, +Y up.
    pub fn pointer_move(&mut self, nx: f32, ny: f32) -> bool {
        self.manager.pointer_move(Vec2::new(nx, ny))
    }

    pub fn pointer_down(&mut self) -> bool {
        self.manager.pointer_down()
    }

    /// Key by physical code name (`"ArrowLeft"`, `"KeyF"`, ...).
    pub fn key_state(&mut self, code: &str, down: bool) {
        match Key::from_code(code) {
            Some(key) => self.key(key, down),
            None => log::debug!("ignoring unknown key code {code:?}"),
        }
    }

    pub fn key(&mut self, key: Key, down: bool) {
        let state = if down { KeyState::Pressed } else { KeyState::Released };
        self.input
            .apply_event(&mut self.input_frame, InputEvent::Key { key, state, repeat: false });
    }

    /// Applies a runtime input event; pointer events also reach the scene.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.input.apply_event(&mut self.input_frame, event.clone());

        match event {
            InputEvent::PointerMoved(_) => {
                if let Some((nx, ny)) = self.input.pointer_normalized(self.manager.viewport()) {
                    self.pointer_move(nx, ny);
                }
            }
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                ..
            }) => {
                if let Some((nx, ny)) = self.input.pointer_normalized(self.manager.viewport()) {
                    self.pointer_move(nx, ny);
                }
                self.pointer_down();
            }
            _ => {}
        }
    }

    /// Updates the active scene by `dt` seconds, uploads its uniforms and
    /// draws it into `pass`, then clears this frame's input deltas.
    ///
    /// Returns whether anything was drawn.
    pub fn frame(&mut self, dt: f32, pass: &mut D::Pass<'_>) -> bool {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.manager.update(dt, &self.input, &self.input_frame);
        let drawn = self.manager.draw(pass);
        self.input_frame.clear();
        drawn
    }

    pub fn shutdown(&mut self) {
        self.manager.shutdown();
    }
}
