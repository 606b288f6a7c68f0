//! Animated obstacle field with a sphere-traced ray.
//!
//! The field domain is `[-1, 1]²`. A ray runs from the origin marker toward
//! the target marker; the pointer moves the target, a press moves the
//! origin to the latest pointer sample.

use prism_sdf::march::{march, March, MarchSettings, MAX_MARCH_STEPS};
use prism_sdf::{Node, Value, Vec2, V2};

use crate::camera::Camera;
use crate::mesh::PlaneSpec;
use crate::program::layers::{self, Backdrop, Layer};
use crate::uniforms::{accessors, ParamSlot};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RaymarchParam {
    Time,
    Radius,
    Fade,
    MaxSteps,
    SurfaceDistance,
    MaxDistance,
    TimeMultiplier,
    OriginX,
    OriginY,
    TargetX,
    TargetY,
}

impl ParamSlot for RaymarchParam {
    const ALL: &'static [Self] = &[
        RaymarchParam::Time,
        RaymarchParam::Radius,
        RaymarchParam::Fade,
        RaymarchParam::MaxSteps,
        RaymarchParam::SurfaceDistance,
        RaymarchParam::MaxDistance,
        RaymarchParam::TimeMultiplier,
        RaymarchParam::OriginX,
        RaymarchParam::OriginY,
        RaymarchParam::TargetX,
        RaymarchParam::TargetY,
    ];

    fn slot(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            RaymarchParam::Time => "time",
            RaymarchParam::Radius => "radius",
            RaymarchParam::Fade => "fade",
            RaymarchParam::MaxSteps => "max_steps",
            RaymarchParam::SurfaceDistance => "surface_distance",
            RaymarchParam::MaxDistance => "max_distance",
            RaymarchParam::TimeMultiplier => "time_multiplier",
            RaymarchParam::OriginX => "origin_x",
            RaymarchParam::OriginY => "origin_y",
            RaymarchParam::TargetX => "target_x",
            RaymarchParam::TargetY => "target_y",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RaymarchParams {
    pub time: f32,
    pub radius: f32,
    pub fade: f32,
    pub max_steps: f32,
    pub surface_distance: f32,
    pub max_distance: f32,
    pub time_multiplier: f32,
    pub ray_origin: Vec2,
    pub ray_target: Vec2,
}

impl Default for RaymarchParams {
    fn default() -> Self {
        Self {
            time: 0.0,
            radius: 0.15,
            fade: 1.0,
            max_steps: 20.0,
            surface_distance: 0.0001,
            max_distance: 3.0,
            time_multiplier: 1.0,
            ray_origin: Vec2::new(-0.8, -0.8),
            ray_target: Vec2::new(0.8, 0.6),
        }
    }
}

impl RaymarchParams {
    /// Values applied every time the scene is activated.
    pub fn activated() -> Self {
        Self { radius: 0.2, max_steps: 25.0, time_multiplier: 0.5, ..Self::default() }
    }

    pub fn get(&self, p: RaymarchParam) -> f32 {
        match p {
            RaymarchParam::Time => self.time,
            RaymarchParam::Radius => self.radius,
            RaymarchParam::Fade => self.fade,
            RaymarchParam::MaxSteps => self.max_steps,
            RaymarchParam::SurfaceDistance => self.surface_distance,
            RaymarchParam::MaxDistance => self.max_distance,
            RaymarchParam::TimeMultiplier => self.time_multiplier,
            RaymarchParam::OriginX => self.ray_origin.x,
            RaymarchParam::OriginY => self.ray_origin.y,
            RaymarchParam::TargetX => self.ray_target.x,
            RaymarchParam::TargetY => self.ray_target.y,
        }
    }

    pub fn march_settings(&self) -> MarchSettings {
        let steps = if self.max_steps.is_finite() { self.max_steps.max(0.0) } else { 0.0 };
        MarchSettings {
            max_steps: (steps as u32).min(MAX_MARCH_STEPS),
            surface_distance: self.surface_distance,
            max_distance: self.max_distance,
        }
    }
}

/// Scaled animation clock: `time * time_multiplier`.
fn clock() -> Value<RaymarchParam> {
    Value::param(RaymarchParam::Time) * Value::param(RaymarchParam::TimeMultiplier)
}

fn obstacles() -> Node<RaymarchParam> {
    let r = || Value::param(RaymarchParam::Radius);
    let orbit = Node::circle(r()).at(V2::new(clock().sin() * 0.3, 0.1));
    let spinner = Node::rect(V2::new(0.15, 0.1), clock()).at(V2::new(-0.4, 0.35));
    let drifter = Node::ellipse(V2::new(0.2, 0.1), clock() * -0.5)
        .at(V2::new(0.45, (clock() * 0.7).cos() * 0.1 + -0.3));
    let crescent = Node::moon(r() * 0.8, clock()).at(V2::new(-0.35, -0.35));
    orbit.union(spinner).union(drifter).union(crescent)
}

const BACKDROP: Backdrop = Backdrop {
    bottom: [0.05, 0.05, 0.08],
    top: [0.1, 0.1, 0.16],
    y_range: (-1.0, 1.0),
};

#[derive(Debug, Clone, PartialEq)]
pub struct RaymarchScene {
    pub params: RaymarchParams,
    /// Latest pointer sample in field coordinates.
    pointer: Option<Vec2>,
    layers: Vec<Layer<RaymarchParam>>,
}

impl Default for RaymarchScene {
    fn default() -> Self {
        Self::new()
    }
}

impl RaymarchScene {
    pub const PLANE: PlaneSpec = PlaneSpec::new(8.0, 8.0, 64, 64);
    pub const DOMAIN_SCALE: f32 = 0.25;

    /// Scene with the declared parameter defaults.
    pub fn new() -> Self {
        Self {
            params: RaymarchParams::default(),
            pointer: None,
            layers: vec![Layer::isolines(
                "obstacles",
                obstacles(),
                Value::param(RaymarchParam::Fade),
            )],
        }
    }

    /// Scene as it starts when selected.
    pub fn activated() -> Self {
        Self { params: RaymarchParams::activated(), ..Self::new() }
    }

    pub fn camera() -> Camera {
        Camera::contain(Self::PLANE.width, Self::PLANE.height)
    }

    pub fn is_well_formed(&self) -> bool {
        layers::is_well_formed(&self.layers)
    }

    pub fn update(&mut self, dt: f32) {
        self.params.time += dt;
    }

    /// Last write wins.
    pub fn pointer_move(&mut self, p: Vec2) {
        self.pointer = Some(p);
        self.params.ray_target = p;
    }

    pub fn pointer_down(&mut self) {
        if let Some(p) = self.pointer {
            self.params.ray_origin = p;
        }
    }

    pub fn distance(&self, p: Vec2) -> f32 {
        layers::scene_distance(&self.layers, p, &|q| self.params.get(q))
    }

    /// CPU twin of the per-pixel march.
    pub fn march(&self) -> March {
        march(
            self.params.ray_origin,
            self.params.ray_target,
            self.params.march_settings(),
            |p| self.distance(p),
        )
    }

    pub(crate) fn generated_wgsl(&self) -> String {
        let mut out = accessors::<RaymarchParam>();
        out.push_str(&layers::emit(&self.layers, &BACKDROP));
        out
    }
}
