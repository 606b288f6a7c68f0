//! Exclusive scene ownership.
//!
//! [`SceneManager`] holds at most one live scene: its state, the device
//! resources built for it and the uniform block uploaded each frame.
//! Switching always releases the old scene before composing the new one.

use glam::Vec2;
use prism_engine::coords::Viewport;
use prism_engine::input::{InputFrame, InputState};

use crate::device::SceneDevice;
use crate::error::SceneError;
use crate::program::{compose, PipelineFlavor};
use crate::scenes::{Scene, Subscriptions};
use crate::uniforms::UniformBlock;
use crate::variant::SceneVariant;

/// Result of a successful [`SceneManager::switch_to`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SwitchOutcome {
    /// Requested variant was already active; nothing happened.
    Unchanged,
    /// The previous scene (if any) was released; nothing is active.
    Cleared,
    Activated(SceneVariant),
}

struct ActiveScene<R> {
    scene: Scene,
    resources: R,
    uniforms: UniformBlock,
}

pub struct SceneManager<D: SceneDevice> {
    device: D,
    flavor: PipelineFlavor,
    viewport: Viewport,
    active: Option<ActiveScene<D::Resources>>,
}

impl<D: SceneDevice> SceneManager<D> {
    pub fn new(device: D, flavor: PipelineFlavor) -> Self {
        Self { device, flavor, viewport: Viewport::new(1.0, 1.0), active: None }
    }

    pub fn current(&self) -> SceneVariant {
        self.active.as_ref().map_or(SceneVariant::None, |a| a.scene.variant())
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.active.as_ref().map(|a| &a.scene)
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.active.as_mut().map(|a| &mut a.scene)
    }

    /// Number of scenes holding device resources (0 or 1).
    pub fn live_scenes(&self) -> usize {
        usize::from(self.active.is_some())
    }

    pub fn flavor(&self) -> PipelineFlavor {
        self.flavor
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn subscriptions(&self) -> Subscriptions {
        self.scene().map(Scene::subscriptions).unwrap_or_default()
    }

    /// Makes `variant` the active scene.
    ///
    /// Order: no-op if already active, release the current scene, stop for
    /// `None`, otherwise compose and create. A failed construction leaves
    /// the manager idle and returns the error.
    pub fn switch_to(&mut self, variant: SceneVariant) -> Result<SwitchOutcome, SceneError> {
        if variant == self.current() {
            return Ok(SwitchOutcome::Unchanged);
        }

        self.teardown();

        if variant.is_none() {
            log::info!("scene cleared");
            return Ok(SwitchOutcome::Cleared);
        }

        let composed = compose(variant, self.flavor).inspect_err(|e| log::warn!("{e}"))?;
        let resources = self
            .device
            .create(&composed.program, &composed.mesh)
            .inspect_err(|e| log::warn!("{e}"))?;

        let mut scene = composed.scene;
        scene.resize(self.viewport);

        self.active = Some(ActiveScene { scene, resources, uniforms: UniformBlock::default() });
        log::info!("scene switched to {variant} ({} pipeline)", self.flavor);
        Ok(SwitchOutcome::Activated(variant))
    }

    /// Releases the active scene's resources, if any.
    fn teardown(&mut self) {
        if let Some(active) = self.active.take() {
            let variant = active.scene.variant();
            self.device.destroy(active.resources);
            log::debug!("released {variant} scene");
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.device.resize(viewport);
        if let Some(active) = self.active.as_mut() {
            active.scene.resize(viewport);
        }
    }

    /// Forwards a normalized pointer position to a pointer-subscribed scene.
    /// Returns whether a scene consumed it.
    pub fn pointer_move(&mut self, ndc: Vec2) -> bool {
        let viewport = self.viewport;
        let Some(active) = self.active.as_mut() else { return false };
        if !active.scene.subscriptions().pointer {
            return false;
        }
        let Some(field) = active.scene.pointer_to_field(viewport, ndc) else { return false };
        active.scene.pointer_move(field);
        true
    }

    pub fn pointer_down(&mut self) -> bool {
        let Some(active) = self.active.as_mut() else { return false };
        if !active.scene.subscriptions().pointer {
            return false;
        }
        active.scene.pointer_down();
        true
    }

    pub fn update(&mut self, dt: f32, input: &InputState, frame: &InputFrame) {
        if let Some(active) = self.active.as_mut() {
            active.scene.update(dt, input, frame);
        }
    }

    /// Uploads uniforms and records the active scene. Returns `false` when
    /// idle.
    pub fn draw(&mut self, pass: &mut D::Pass<'_>) -> bool {
        let Some(active) = self.active.as_mut() else { return false };
        active.scene.write_uniforms(&mut active.uniforms, self.viewport);
        self.device.update(&active.resources, &active.uniforms);
        self.device.draw(&active.resources, pass);
        true
    }

    pub fn shutdown(&mut self) {
        self.teardown();
    }
}

impl<D: SceneDevice> Drop for SceneManager<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}
