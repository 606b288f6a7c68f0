//! View projections for scene planes.

use glam::{Mat4, Vec2, Vec3};

/// Camera of one scene. Projections produce wgpu clip space (depth 0..1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Camera {
    /// Orthographic view of an XY plane, scaled so the whole plane stays
    /// visible at any aspect ratio.
    Contain { plane: Vec2 },
    /// Perspective view.
    Perspective { eye: Vec3, target: Vec3, fov_y: f32 },
}

impl Camera {
    pub fn contain(width: f32, height: f32) -> Self {
        Camera::Contain { plane: Vec2::new(width.max(1e-3), height.max(1e-3)) }
    }

    /// Half extents of the visible region for a `Contain` camera.
    fn visible_half_extents(plane: Vec2, aspect: f32) -> Vec2 {
        let half = plane * 0.5;
        if aspect >= plane.x / plane.y {
            Vec2::new(half.y * aspect, half.y)
        } else {
            Vec2::new(half.x, half.x / aspect)
        }
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        match *self {
            Camera::Contain { plane } => {
                let h = Self::visible_half_extents(plane, aspect);
                Mat4::orthographic_rh(-h.x, h.x, -h.y, h.y, -1.0, 1.0)
            }
            Camera::Perspective { eye, target, fov_y } => {
                let proj = Mat4::perspective_rh(fov_y, aspect, 0.1, 100.0);
                proj * Mat4::look_at_rh(eye, target, Vec3::Y)
            }
        }
    }

    /// Maps normalized device coordinates onto the plane (`z = 0`).
    ///
    /// Only meaningful for `Contain`; perspective cameras return `None`.
    pub fn unproject(&self, aspect: f32, ndc: Vec2) -> Option<Vec2> {
        match self {
            Camera::Contain { .. } => {
                let inv = self.view_proj(aspect).inverse();
                Some(inv.project_point3(ndc.extend(0.5)).truncate())
            }
            Camera::Perspective { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn square_viewport_maps_square_plane_exactly() {
        let cam = Camera::contain(8.0, 8.0);
        assert!(approx(cam.unproject(1.0, Vec2::new(1.0, 1.0)).unwrap(), Vec2::new(4.0, 4.0)));
        assert!(approx(cam.unproject(1.0, Vec2::new(-0.5, 0.25)).unwrap(), Vec2::new(-2.0, 1.0)));
    }

    #[test]
    fn wide_viewport_letterboxes_horizontally() {
        let cam = Camera::contain(4.0, 3.0);
        // 800x600 has the plane's own aspect: edges line up.
        assert!(approx(cam.unproject(800.0 / 600.0, Vec2::ONE).unwrap(), Vec2::new(2.0, 1.5)));
        // A wider viewport shows more along x, never less along y.
        let corner = cam.unproject(2.0, Vec2::ONE).unwrap();
        assert!(approx(corner, Vec2::new(3.0, 1.5)));
    }

    #[test]
    fn tall_viewport_keeps_full_width() {
        let cam = Camera::contain(4.0, 3.0);
        let corner = cam.unproject(0.5, Vec2::ONE).unwrap();
        assert!(approx(corner, Vec2::new(2.0, 4.0)));
    }

    #[test]
    fn perspective_projects_target_to_center() {
        let cam = Camera::Perspective {
            eye: Vec3::new(0.0, 6.0, 8.0),
            target: Vec3::ZERO,
            fov_y: 45f32.to_radians(),
        };
        let clip = cam.view_proj(16.0 / 9.0) * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
        assert_eq!(cam.unproject(1.0, Vec2::ZERO), None);
    }
}
