//! Displaced wave field.

use glam::{Vec2, Vec3};
use prism_sdf::wgsl::literal;

use crate::camera::Camera;
use crate::mesh::PlaneSpec;
use crate::uniforms::{accessors, ParamSlot};

/// One sine term of the height field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WaveOctave {
    pub direction: [f32; 2],
    pub frequency: f32,
    pub speed: f32,
    pub weight: f32,
}

/// Fixed octave set. Weights sum to 1, so heights stay within `±amplitude`.
pub const OCTAVES: [WaveOctave; 4] = [
    WaveOctave { direction: [1.0, 0.0], frequency: 1.1, speed: 1.0, weight: 0.5 },
    WaveOctave { direction: [0.6, 0.8], frequency: 1.9, speed: 1.4, weight: 0.25 },
    WaveOctave { direction: [-0.8, 0.6], frequency: 3.2, speed: 2.1, weight: 0.15 },
    WaveOctave { direction: [0.28, -0.96], frequency: 5.3, speed: 2.9, weight: 0.1 },
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WaveParam {
    Time,
    Amplitude,
    Speed,
}

impl ParamSlot for WaveParam {
    const ALL: &'static [Self] = &[WaveParam::Time, WaveParam::Amplitude, WaveParam::Speed];

    fn slot(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            WaveParam::Time => "time",
            WaveParam::Amplitude => "amplitude",
            WaveParam::Speed => "speed",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WaveParams {
    pub time: f32,
    pub amplitude: f32,
    pub speed: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self { time: 0.0, amplitude: 0.25, speed: 1.0 }
    }
}

impl WaveParams {
    pub fn get(&self, p: WaveParam) -> f32 {
        match p {
            WaveParam::Time => self.time,
            WaveParam::Amplitude => self.amplitude,
            WaveParam::Speed => self.speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WaveScene {
    pub params: WaveParams,
}

impl WaveScene {
    pub const PLANE: PlaneSpec = PlaneSpec::new(8.0, 8.0, 128, 128);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera() -> Camera {
        Camera::Perspective {
            eye: Vec3::new(0.0, 6.0, 8.0),
            target: Vec3::ZERO,
            fov_y: 45f32.to_radians(),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.params.time += dt;
    }

    pub fn is_well_formed(&self) -> bool {
        OCTAVES
            .iter()
            .all(|o| o.frequency.is_finite() && o.speed.is_finite() && o.weight.is_finite())
    }

    /// CPU twin of the vertex-stage height at plane position `p`.
    pub fn height(&self, p: Vec2) -> f32 {
        let t = self.params.time * self.params.speed;
        let sum: f32 = OCTAVES
            .iter()
            .map(|o| o.weight * (p.dot(Vec2::from(o.direction)) * o.frequency + t * o.speed).sin())
            .sum();
        sum * self.params.amplitude
    }

    /// Accessors plus `wave_height`, with one statement per octave.
    pub(crate) fn generated_wgsl(&self) -> String {
        let mut out = accessors::<WaveParam>();
        out.push_str("fn wave_height(p: vec2<f32>) -> f32 {\n");
        out.push_str("    let t = param_time() * param_speed();\n");
        out.push_str("    var h: f32 = 0.0;\n");
        for o in &OCTAVES {
            out.push_str(&format!(
                "    h = h + {} * sin(dot(p, vec2<f32>({}, {})) * {} + t * {});\n",
                literal(o.weight),
                literal(o.direction[0]),
                literal(o.direction[1]),
                literal(o.frequency),
                literal(o.speed),
            ));
        }
        out.push_str("    return h * param_amplitude();\n}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::assert_slots_distinct;

    #[test]
    fn defaults() {
        let w = WaveScene::new();
        assert_eq!(w.params.amplitude, 0.25);
        assert_eq!(w.params.speed, 1.0);
        assert_eq!(w.params.time, 0.0);
        assert_slots_distinct::<WaveParam>();
    }

    #[test]
    fn heights_stay_within_amplitude() {
        let mut w = WaveScene::new();
        for step in 0..50 {
            w.update(0.07);
            let p = Vec2::new(step as f32 * 0.31 - 4.0, 4.0 - step as f32 * 0.17);
            assert!(w.height(p).abs() <= w.params.amplitude + 1e-6);
        }
    }

    #[test]
    fn octaves_are_unrolled() {
        let src = WaveScene::new().generated_wgsl();
        assert_eq!(src.matches("h = h + ").count(), OCTAVES.len());
        assert!(!src.contains("for ("));
        assert!(!src.contains("loop"));
    }

    #[test]
    fn origin_is_flat_at_time_zero() {
        assert_eq!(WaveScene::new().height(Vec2::ZERO), 0.0);
    }
}
