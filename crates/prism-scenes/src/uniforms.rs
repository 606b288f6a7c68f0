//! Uniform block layout.
//!
//! Every scene shader binds one block at `@group(0) @binding(0)`:
//!
//! ```text
//! offset   0  view_proj     mat4x4<f32>
//! offset  64  resolution    vec2<f32>
//! offset  72  domain_scale  f32
//! offset  76  _pad          f32
//! offset  80  params        array<vec4<f32>, 4>   (16 scalar slots)
//! ```
//!
//! Variants name their parameters with an enum implementing [`ParamSlot`];
//! the enum decides which of the 16 slots each parameter occupies.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Number of scalar parameter slots.
pub const PARAM_SLOTS: usize = 16;

const LANES: [&str; 4] = ["x", "y", "z", "w"];

/// CPU mirror of the WGSL `SceneUniforms` struct (144 bytes, std140).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct UniformBlock {
    pub view_proj: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub domain_scale: f32,
    pub _pad: f32,
    pub params: [[f32; 4]; 4],
}

impl Default for UniformBlock {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            resolution: [1.0, 1.0],
            domain_scale: 1.0,
            _pad: 0.0,
            params: [[0.0; 4]; 4],
        }
    }
}

impl UniformBlock {
    pub const SIZE: u64 = std::mem::size_of::<UniformBlock>() as u64;

    pub fn set_view_proj(&mut self, m: Mat4) {
        self.view_proj = m.to_cols_array_2d();
    }

    pub fn set_resolution(&mut self, r: Vec2) {
        self.resolution = r.to_array();
    }

    /// Out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize, value: f32) {
        if slot < PARAM_SLOTS {
            self.params[slot / 4][slot % 4] = value;
        }
    }

    pub fn get(&self, slot: usize) -> Option<f32> {
        (slot < PARAM_SLOTS).then(|| self.params[slot / 4][slot % 4])
    }

    /// Writes every parameter of `P` using `value` to read it.
    pub fn write_params<P: ParamSlot>(&mut self, value: impl Fn(P) -> f32) {
        for p in P::ALL {
            self.set(p.slot(), value(*p));
        }
    }
}

/// A scene parameter stored in one uniform slot.
pub trait ParamSlot: Copy + Eq + 'static {
    /// Every parameter, in slot order.
    const ALL: &'static [Self];

    /// Slot index in `0..PARAM_SLOTS`.
    fn slot(self) -> usize;

    /// snake_case name; the WGSL accessor is `param_{name}()`.
    fn name(self) -> &'static str;
}

/// WGSL read of a raw slot, e.g. `u.params[2].z`.
pub fn slot_expr(slot: usize) -> String {
    format!("u.params[{}].{}", slot / 4, LANES[slot % 4])
}

/// WGSL call of a parameter accessor, e.g. `param_radius()`.
pub fn accessor_call<P: ParamSlot>(p: P) -> String {
    format!("param_{}()", p.name())
}

/// Emits one accessor function per parameter of `P`.
pub fn accessors<P: ParamSlot>() -> String {
    P::ALL
        .iter()
        .map(|p| format!("fn param_{}() -> f32 {{ return {}; }}\n", p.name(), slot_expr(p.slot())))
        .collect()
}

#[cfg(test)]
pub(crate) fn assert_slots_distinct<P: ParamSlot + std::fmt::Debug>() {
    let mut seen = [false; PARAM_SLOTS];
    for p in P::ALL {
        let s = p.slot();
        assert!(s < PARAM_SLOTS, "{p:?} uses slot {s}");
        assert!(!seen[s], "{p:?} shares slot {s}");
        seen[s] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Demo {
        Time,
        Radius,
    }

    impl ParamSlot for Demo {
        const ALL: &'static [Self] = &[Demo::Time, Demo::Radius];

        fn slot(self) -> usize {
            match self {
                Demo::Time => 0,
                Demo::Radius => 5,
            }
        }

        fn name(self) -> &'static str {
            match self {
                Demo::Time => "time",
                Demo::Radius => "radius",
            }
        }
    }

    #[test]
    fn block_is_std140_sized() {
        assert_eq!(UniformBlock::SIZE, 144);
        assert_eq!(std::mem::align_of::<UniformBlock>(), 4);
    }

    #[test]
    fn slots_map_to_vec4_lanes() {
        assert_eq!(slot_expr(0), "u.params[0].x");
        assert_eq!(slot_expr(5), "u.params[1].y");
        assert_eq!(slot_expr(15), "u.params[3].w");
    }

    #[test]
    fn write_params_fills_named_slots() {
        let mut block = UniformBlock::default();
        block.write_params(|p: Demo| match p {
            Demo::Time => 1.5,
            Demo::Radius => 0.25,
        });
        assert_eq!(block.get(0), Some(1.5));
        assert_eq!(block.params[1][1], 0.25);
        assert_eq!(block.get(16), None);
        assert_slots_distinct::<Demo>();
    }

    #[test]
    fn accessors_read_their_slot() {
        let src = accessors::<Demo>();
        assert!(src.contains("fn param_radius() -> f32 { return u.params[1].y; }"));
        assert_eq!(accessor_call(Demo::Time), "param_time()");
    }
}
