//! Bounded 2D sphere tracing.
//!
//! Steps along a ray by the field value until the surface is reached, the
//! ray escapes, or the step budget runs out. The budget is capped at
//! [`MAX_MARCH_STEPS`], matching the constant loop bound used on the GPU.

use glam::Vec2;

/// Hard upper bound on march iterations, shared with the WGSL loop.
pub const MAX_MARCH_STEPS: u32 = 64;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarchSettings {
    pub max_steps: u32,
    pub surface_distance: f32,
    pub max_distance: f32,
}

/// How a march ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MarchOutcome {
    /// A sample came within `surface_distance` of the surface.
    Hit,
    /// The ray travelled past `max_distance`.
    Escaped,
    /// The step budget ran out first.
    Exhausted,
}

/// One step of a march: where the field was sampled and its value there.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarchSample {
    pub position: Vec2,
    pub distance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct March {
    pub samples: Vec<MarchSample>,
    pub travelled: f32,
    pub outcome: MarchOutcome,
}

impl March {
    /// Final sample position (the origin if nothing was sampled).
    pub fn end(&self, origin: Vec2) -> Vec2 {
        self.samples.last().map_or(origin, |s| s.position)
    }
}

/// Marches from `origin` toward `target` through `field`.
///
/// A zero-length ray marches along +X.
pub fn march<F>(origin: Vec2, target: Vec2, settings: MarchSettings, field: F) -> March
where
    F: Fn(Vec2) -> f32,
{
    let dir = (target - origin).normalize_or(Vec2::X);
    let steps = settings.max_steps.min(MAX_MARCH_STEPS);

    let mut samples = Vec::with_capacity(steps as usize);
    let mut travelled = 0.0f32;

    for _ in 0..steps {
        let position = origin + dir * travelled;
        let distance = field(position);
        samples.push(MarchSample { position, distance });

        if distance < settings.surface_distance {
            return March { samples, travelled, outcome: MarchOutcome::Hit };
        }

        travelled += distance;
        if travelled > settings.max_distance {
            return March { samples, travelled, outcome: MarchOutcome::Escaped };
        }
    }

    March { samples, travelled, outcome: MarchOutcome::Exhausted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{sdf_box, sdf_circle};

    fn settings(max_steps: u32) -> MarchSettings {
        MarchSettings { max_steps, surface_distance: 1e-4, max_distance: 10.0 }
    }

    #[test]
    fn hits_circle_straight_ahead() {
        let field = |p: Vec2| sdf_circle(p - Vec2::new(3.0, 0.0), 1.0);
        let m = march(Vec2::ZERO, Vec2::new(1.0, 0.0), settings(25), field);
        assert_eq!(m.outcome, MarchOutcome::Hit);
        // A circle dead ahead is reached in one exact step.
        assert_eq!(m.samples.len(), 2);
        assert!((m.travelled - 2.0).abs() < 1e-5);
        assert!((m.end(Vec2::ZERO).x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn grazing_ray_needs_several_steps() {
        let field = |p: Vec2| sdf_box(p - Vec2::new(2.0, 0.6), Vec2::splat(0.5), 0.0);
        let m = march(Vec2::ZERO, Vec2::new(1.0, 0.05), settings(25), field);
        assert!(m.samples.len() > 2);
        assert!(m.samples.len() <= 25);
    }

    #[test]
    fn escapes_when_nothing_is_there() {
        let field = |p: Vec2| sdf_circle(p - Vec2::new(0.0, 50.0), 1.0);
        let m = march(Vec2::ZERO, Vec2::new(1.0, 0.0), settings(25), field);
        assert_eq!(m.outcome, MarchOutcome::Escaped);
        assert!(m.travelled > 10.0);
    }

    #[test]
    fn step_budget_is_respected_and_capped() {
        // Tangent approach: distances shrink but never cross the threshold quickly.
        let field = |p: Vec2| sdf_circle(p - Vec2::new(5.0, 1.0), 0.999);
        let m = march(Vec2::ZERO, Vec2::new(1.0, 0.0), settings(3), field);
        assert_eq!(m.outcome, MarchOutcome::Exhausted);
        assert_eq!(m.samples.len(), 3);

        let capped = march(Vec2::ZERO, Vec2::new(1.0, 0.0), settings(10_000), |_| 0.01);
        assert_eq!(capped.samples.len(), MAX_MARCH_STEPS as usize);
    }

    #[test]
    fn starting_inside_is_an_immediate_hit() {
        let field = |p: Vec2| sdf_circle(p, 1.0);
        let m = march(Vec2::ZERO, Vec2::new(1.0, 1.0), settings(25), field);
        assert_eq!(m.outcome, MarchOutcome::Hit);
        assert_eq!(m.samples.len(), 1);
    }
}
