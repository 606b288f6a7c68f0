//! Per-variant scene state.
//!
//! [`Scene`] is a tagged union with one strongly-typed parameter struct per
//! variant. Lifecycle and driver code dispatch on the tag; nothing looks
//! parameters up by name.

pub mod gallery;
pub mod raymarch;
pub mod vehicle;
pub mod wave;

use glam::Vec2;
use prism_engine::coords::Viewport;
use prism_engine::input::{InputFrame, InputState};

use crate::camera::Camera;
use crate::mesh::PlaneSpec;
use crate::uniforms::UniformBlock;
use crate::variant::SceneVariant;

pub use gallery::{GalleryParam, GalleryParams, GalleryScene};
pub use raymarch::{RaymarchParam, RaymarchParams, RaymarchScene};
pub use vehicle::{VehicleParam, VehicleParams, VehicleScene};
pub use wave::{WaveParam, WaveParams, WaveScene};

/// Input sources a scene listens to while active.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Subscriptions {
    pub pointer: bool,
    pub keyboard: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    Wave(WaveScene),
    SdfGallery(GalleryScene),
    ParallaxVehicle(VehicleScene),
    Raymarch(RaymarchScene),
}

impl Scene {
    /// Fresh scene state for `variant`; `None` has no scene.
    pub fn new(variant: SceneVariant) -> Option<Scene> {
        match variant {
            SceneVariant::None => None,
            SceneVariant::Wave => Some(Scene::Wave(WaveScene::new())),
            SceneVariant::SdfGallery => Some(Scene::SdfGallery(GalleryScene::new())),
            SceneVariant::ParallaxVehicle => Some(Scene::ParallaxVehicle(VehicleScene::new())),
            SceneVariant::Raymarch => Some(Scene::Raymarch(RaymarchScene::activated())),
        }
    }

    pub fn variant(&self) -> SceneVariant {
        match self {
            Scene::Wave(_) => SceneVariant::Wave,
            Scene::SdfGallery(_) => SceneVariant::SdfGallery,
            Scene::ParallaxVehicle(_) => SceneVariant::ParallaxVehicle,
            Scene::Raymarch(_) => SceneVariant::Raymarch,
        }
    }

    pub fn plane(&self) -> PlaneSpec {
        match self {
            Scene::Wave(_) => WaveScene::PLANE,
            Scene::SdfGallery(_) => GalleryScene::PLANE,
            Scene::ParallaxVehicle(_) => VehicleScene::PLANE,
            Scene::Raymarch(_) => RaymarchScene::PLANE,
        }
    }

    /// Plane units to field units.
    pub fn domain_scale(&self) -> f32 {
        match self {
            Scene::Wave(_) => 1.0,
            Scene::SdfGallery(_) => GalleryScene::DOMAIN_SCALE,
            Scene::ParallaxVehicle(_) => VehicleScene::DOMAIN_SCALE,
            Scene::Raymarch(_) => RaymarchScene::DOMAIN_SCALE,
        }
    }

    pub fn camera(&self) -> Camera {
        match self {
            Scene::Wave(_) => WaveScene::camera(),
            Scene::SdfGallery(_) => GalleryScene::camera(),
            Scene::ParallaxVehicle(_) => VehicleScene::camera(),
            Scene::Raymarch(_) => RaymarchScene::camera(),
        }
    }

    pub fn subscriptions(&self) -> Subscriptions {
        match self {
            Scene::Raymarch(_) => Subscriptions { pointer: true, keyboard: false },
            Scene::ParallaxVehicle(_) => Subscriptions { pointer: false, keyboard: true },
            Scene::Wave(_) | Scene::SdfGallery(_) => Subscriptions::default(),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        match self {
            Scene::Wave(s) => s.is_well_formed(),
            Scene::SdfGallery(s) => s.is_well_formed(),
            Scene::ParallaxVehicle(s) => s.is_well_formed(),
            Scene::Raymarch(s) => s.is_well_formed(),
        }
    }

    /// Variant-specific WGSL: parameter accessors plus the field functions.
    pub(crate) fn generated_wgsl(&self) -> String {
        match self {
            Scene::Wave(s) => s.generated_wgsl(),
            Scene::SdfGallery(s) => s.generated_wgsl(),
            Scene::ParallaxVehicle(s) => s.generated_wgsl(),
            Scene::Raymarch(s) => s.generated_wgsl(),
        }
    }

    /// Advances time and applies held/pressed input.
    pub fn update(&mut self, dt: f32, input: &InputState, frame: &InputFrame) {
        match self {
            Scene::Wave(s) => s.update(dt),
            Scene::SdfGallery(s) => s.update(dt),
            Scene::ParallaxVehicle(s) => s.update(dt, input, frame),
            Scene::Raymarch(s) => s.update(dt),
        }
    }

    /// Applies a viewport change to resolution-dependent parameters.
    pub fn resize(&mut self, viewport: Viewport) {
        if let Scene::ParallaxVehicle(s) = self {
            s.resize(viewport.width, viewport.height);
        }
    }

    /// Maps a normalized pointer position (`[-1, 1]`, +Y up) into field
    /// coordinates. `None` for scenes without a flat field view.
    pub fn pointer_to_field(&self, viewport: Viewport, ndc: Vec2) -> Option<Vec2> {
        self.camera()
            .unproject(viewport.aspect(), ndc)
            .map(|plane| plane * self.domain_scale())
    }

    pub fn pointer_move(&mut self, field: Vec2) {
        if let Scene::Raymarch(s) = self {
            s.pointer_move(field);
        }
    }

    pub fn pointer_down(&mut self) {
        if let Scene::Raymarch(s) = self {
            s.pointer_down();
        }
    }

    /// Signed distance of the 2D field at `p`; `None` for the wave.
    pub fn distance(&self, p: Vec2) -> Option<f32> {
        match self {
            Scene::Wave(_) => None,
            Scene::SdfGallery(s) => Some(s.distance(p)),
            Scene::ParallaxVehicle(s) => Some(s.distance(p)),
            Scene::Raymarch(s) => Some(s.distance(p)),
        }
    }

    /// Fills `block` for the next draw.
    pub fn write_uniforms(&self, block: &mut UniformBlock, viewport: Viewport) {
        block.set_view_proj(self.camera().view_proj(viewport.aspect()));
        block.set_resolution(Vec2::new(viewport.width, viewport.height));
        block.domain_scale = self.domain_scale();
        match self {
            Scene::Wave(s) => block.write_params(|p| s.params.get(p)),
            Scene::SdfGallery(s) => block.write_params(|p| s.params.get(p)),
            Scene::ParallaxVehicle(s) => block.write_params(|p| s.params.get(p)),
            Scene::Raymarch(s) => block.write_params(|p| s.params.get(p)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::ParamSlot;

    #[test]
    fn none_has_no_scene() {
        assert!(Scene::new(SceneVariant::None).is_none());
        for v in SceneVariant::SCENES {
            assert_eq!(Scene::new(v).map(|s| s.variant()), Some(v));
        }
    }

    #[test]
    fn only_raymarch_and_vehicle_subscribe() {
        let subs = |v| Scene::new(v).map(|s| s.subscriptions()).unwrap_or_default();
        assert!(subs(SceneVariant::Raymarch).pointer);
        assert!(subs(SceneVariant::ParallaxVehicle).keyboard);
        assert_eq!(subs(SceneVariant::Wave), Subscriptions::default());
        assert_eq!(subs(SceneVariant::SdfGallery), Subscriptions::default());
    }

    #[test]
    fn uniforms_carry_typed_params() {
        let scene = Scene::new(SceneVariant::Raymarch).unwrap();
        let mut block = UniformBlock::default();
        scene.write_uniforms(&mut block, Viewport::new(800.0, 600.0));

        assert_eq!(block.resolution, [800.0, 600.0]);
        assert_eq!(block.domain_scale, RaymarchScene::DOMAIN_SCALE);
        assert_eq!(block.get(RaymarchParam::Radius.slot()), Some(0.2));
        assert_eq!(block.get(RaymarchParam::MaxSteps.slot()), Some(25.0));
        assert_eq!(block.get(RaymarchParam::TargetY.slot()), Some(0.6));
    }

    #[test]
    fn pointer_maps_into_field_domain() {
        let scene = Scene::new(SceneVariant::Raymarch).unwrap();
        let square = Viewport::new(600.0, 600.0);
        let corner = scene.pointer_to_field(square, Vec2::ONE).unwrap();
        assert!((corner - Vec2::ONE).length() < 1e-4);

        let wave = Scene::new(SceneVariant::Wave).unwrap();
        assert_eq!(wave.pointer_to_field(square, Vec2::ZERO), None);
    }

    #[test]
    fn pointer_only_reaches_raymarch() {
        let mut gallery = Scene::new(SceneVariant::SdfGallery).unwrap();
        let before = gallery.clone();
        gallery.pointer_move(Vec2::new(0.5, 0.5));
        gallery.pointer_down();
        assert_eq!(gallery, before);
    }
}
