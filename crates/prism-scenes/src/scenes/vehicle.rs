//! Side-scrolling vehicle over parallax hills.
//!
//! The field domain is `[-20, 20] × [-15, 15]`. The ground top sits at
//! `y = -12`; `wheel_offset` moves the whole vehicle, with `y = 0` resting
//! on the ground.

use prism_engine::input::{InputFrame, InputState, Key};
use prism_sdf::{Node, Value, Vec2, V2};

use crate::camera::Camera;
use crate::mesh::PlaneSpec;
use crate::program::layers::{self, Backdrop, Layer};
use crate::uniforms::{accessors, ParamSlot};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VehicleParam {
    Time,
    WheelX,
    WheelY,
    BulletOffset,
    ShellOffset,
    ResolutionX,
    ResolutionY,
}

impl ParamSlot for VehicleParam {
    const ALL: &'static [Self] = &[
        VehicleParam::Time,
        VehicleParam::WheelX,
        VehicleParam::WheelY,
        VehicleParam::BulletOffset,
        VehicleParam::ShellOffset,
        VehicleParam::ResolutionX,
        VehicleParam::ResolutionY,
    ];

    fn slot(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            VehicleParam::Time => "time",
            VehicleParam::WheelX => "wheel_x",
            VehicleParam::WheelY => "wheel_y",
            VehicleParam::BulletOffset => "bullet_offset",
            VehicleParam::ShellOffset => "shell_offset",
            VehicleParam::ResolutionX => "resolution_x",
            VehicleParam::ResolutionY => "resolution_y",
        }
    }
}

/// Offset at which the bullet counts as parked (off screen).
pub const BULLET_PARKED: f32 = 20.0;
/// Offset at which the shell counts as parked (below the ground).
pub const SHELL_PARKED: f32 = 25.0;

/// Wheel x positions relative to the vehicle center.
pub const WHEEL_SPACING: [f32; 4] = [-3.0, -1.0, 1.0, 3.0];

const DRIVE_SPEED: f32 = 8.0;
const TRAVEL_LIMIT: f32 = 16.0;
const JUMP_VELOCITY: f32 = 12.0;
const GRAVITY: f32 = -30.0;
const BULLET_SPEED: f32 = 15.0;
const SHELL_SPEED: f32 = 10.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VehicleParams {
    pub time: f32,
    pub wheel_offset: Vec2,
    pub bullet_offset: f32,
    pub shell_offset: f32,
    pub resolution: Vec2,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            time: 0.0,
            wheel_offset: Vec2::new(-10.0, 0.0),
            bullet_offset: BULLET_PARKED,
            shell_offset: SHELL_PARKED,
            resolution: Vec2::ONE,
        }
    }
}

impl VehicleParams {
    pub fn get(&self, p: VehicleParam) -> f32 {
        match p {
            VehicleParam::Time => self.time,
            VehicleParam::WheelX => self.wheel_offset.x,
            VehicleParam::WheelY => self.wheel_offset.y,
            VehicleParam::BulletOffset => self.bullet_offset,
            VehicleParam::ShellOffset => self.shell_offset,
            VehicleParam::ResolutionX => self.resolution.x,
            VehicleParam::ResolutionY => self.resolution.y,
        }
    }
}

fn time() -> Value<VehicleParam> {
    Value::param(VehicleParam::Time)
}

fn wx() -> Value<VehicleParam> {
    Value::param(VehicleParam::WheelX)
}

fn wy() -> Value<VehicleParam> {
    Value::param(VehicleParam::WheelY)
}

/// Vehicle-relative position.
fn on_vehicle(dx: f32, dy: f32) -> V2<VehicleParam> {
    V2::new(wx() + dx, wy() + dy)
}

/// One term per wheel. The count is fixed, so the emitted field is a flat
/// chain of `min` calls with no loop.
fn wheels() -> Node<VehicleParam> {
    let [w0, w1, w2, w3] = WHEEL_SPACING.map(|s| {
        Node::circle(1.0)
            .subtract(Node::circle(0.35))
            .at(on_vehicle(s, -11.0))
    });
    w0.union(w1).union(w2).union(w3)
}

fn hull() -> Node<VehicleParam> {
    let body = Node::rect(V2::new(4.2, 1.2), 0.0).at(on_vehicle(0.0, -8.8));
    let turret = Node::circle(1.5).at(on_vehicle(-0.6, -7.4));
    let barrel = Node::line(on_vehicle(0.4, -7.2), on_vehicle(4.4, -6.2), 0.3);
    body.smooth_union(turret, 0.8).union(barrel)
}

fn build_layers() -> Vec<Layer<VehicleParam>> {
    let far_scroll = -time() + wx() * -0.2;
    let near_scroll = time() * -2.5 + wx() * -0.5;

    let shell = Value::param(VehicleParam::ShellOffset);
    let shell_pos = V2::new(
        wx() - 0.6 + shell.clone() * -0.4,
        wy() - 7.4 + shell.clone() * 1.2 + shell.clone() * shell * -0.06,
    );
    let bullet_pos = V2::new(
        wx() + 4.4 + Value::param(VehicleParam::BulletOffset) * 2.0,
        wy() - 6.2,
    );

    vec![
        Layer::fill("moon", Node::moon(2.5, 0.6).at(V2::new(12.0, 10.0)), [0.95, 0.93, 0.8]),
        Layer::fill(
            "far_hills",
            Node::circle(14.0).repeat_x(18.0).at(V2::new(far_scroll, -22.0)),
            [0.45, 0.4, 0.55],
        ),
        Layer::fill(
            "near_hills",
            Node::circle(9.0).repeat_x(13.0).at(V2::new(near_scroll, -18.0)),
            [0.3, 0.28, 0.4],
        ),
        // Drawn before the ground so a parked shell is hidden beneath it.
        Layer::fill("shell", Node::circle(0.25).at(shell_pos), [0.85, 0.7, 0.3]),
        Layer::fill("ground", Node::rect(V2::new(40.0, 4.0), 0.0).at(V2::new(0.0, -16.0)), [0.2, 0.18, 0.22]),
        Layer::fill("bullet", Node::circle(0.35).at(bullet_pos), [1.0, 0.85, 0.4]),
        Layer::fill("body", hull(), [0.35, 0.5, 0.35]),
        Layer::fill("wheels", wheels(), [0.12, 0.12, 0.14]),
    ]
}

const BACKDROP: Backdrop = Backdrop {
    bottom: [0.95, 0.7, 0.45],
    top: [0.25, 0.35, 0.65],
    y_range: (-12.0, 15.0),
};

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleScene {
    pub params: VehicleParams,
    velocity_y: f32,
    layers: Vec<Layer<VehicleParam>>,
}

impl Default for VehicleScene {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleScene {
    pub const PLANE: PlaneSpec = PlaneSpec::new(4.0, 3.0, 64, 64);
    pub const DOMAIN_SCALE: f32 = 10.0;

    pub fn new() -> Self {
        Self { params: VehicleParams::default(), velocity_y: 0.0, layers: build_layers() }
    }

    pub fn camera() -> Camera {
        Camera::contain(Self::PLANE.width, Self::PLANE.height)
    }

    pub fn is_well_formed(&self) -> bool {
        layers::is_well_formed(&self.layers)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.params.resolution = Vec2::new(width, height);
    }

    pub fn bullet_parked(&self) -> bool {
        self.params.bullet_offset >= BULLET_PARKED
    }

    pub fn shell_parked(&self) -> bool {
        self.params.shell_offset >= SHELL_PARKED
    }

    pub fn grounded(&self) -> bool {
        self.params.wheel_offset.y <= 0.0
    }

    /// Drive, jump, fire, then advance projectiles.
    pub fn update(&mut self, dt: f32, input: &InputState, frame: &InputFrame) {
        let p = &mut self.params;
        p.time += dt;

        let left = input.key_down(Key::ArrowLeft) || input.key_down(Key::A);
        let right = input.key_down(Key::ArrowRight) || input.key_down(Key::D);
        let drive = f32::from(u8::from(right)) - f32::from(u8::from(left));
        p.wheel_offset.x = (p.wheel_offset.x + drive * DRIVE_SPEED * dt).clamp(-TRAVEL_LIMIT, TRAVEL_LIMIT);

        let jump = input.key_down(Key::ArrowUp) || input.key_down(Key::W) || input.key_down(Key::Space);
        if jump && p.wheel_offset.y <= 0.0 && self.velocity_y <= 0.0 {
            self.velocity_y = JUMP_VELOCITY;
        }
        self.velocity_y += GRAVITY * dt;
        p.wheel_offset.y += self.velocity_y * dt;
        if p.wheel_offset.y <= 0.0 {
            p.wheel_offset.y = 0.0;
            self.velocity_y = 0.0;
        }

        let fire = frame.key_pressed(Key::F) || frame.key_pressed(Key::Enter);
        if fire && p.bullet_offset >= BULLET_PARKED && p.shell_offset >= SHELL_PARKED {
            p.bullet_offset = 0.0;
            p.shell_offset = 0.0;
            log::debug!("vehicle fired at x = {:.1}", p.wheel_offset.x);
        }

        if p.bullet_offset < BULLET_PARKED {
            p.bullet_offset = (p.bullet_offset + BULLET_SPEED * dt).min(BULLET_PARKED);
        }
        if p.shell_offset < SHELL_PARKED {
            p.shell_offset = (p.shell_offset + SHELL_SPEED * dt).min(SHELL_PARKED);
        }
    }

    pub fn distance(&self, p: Vec2) -> f32 {
        layers::scene_distance(&self.layers, p, &|q| self.params.get(q))
    }

    pub(crate) fn generated_wgsl(&self) -> String {
        let mut out = accessors::<VehicleParam>();
        out.push_str(&layers::emit(&self.layers, &BACKDROP));
        out
    }
}
