//! 2D primitive distance functions.
//!
//! All primitives are centered on the origin; placement is done by the
//! composition tree (`Node::Translate`). Angles are in radians and rotate
//! the shape counter-clockwise, which means the sample point is rotated by
//! the negated angle.

use glam::Vec2;

/// Smallest scale accepted by the ellipse family. Keeps the division total.
const MIN_SCALE: f32 = 1e-6;

/// Rotates `p` by `-angle` about the origin.
#[inline]
pub fn rotate(p: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * p.x + s * p.y, -s * p.x + c * p.y)
}

/// Circle of radius `r`.
#[inline]
pub fn sdf_circle(p: Vec2, r: f32) -> f32 {
    p.length() - r
}

/// Rotated box with half-extents `b`.
#[inline]
pub fn sdf_box(p: Vec2, b: Vec2, angle: f32) -> f32 {
    let d = rotate(p, angle).abs() - b;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Rotated ellipse with radii `s`, scaled back to an approximate distance
/// by the minor radius.
#[inline]
pub fn sdf_ellipse(p: Vec2, s: Vec2, angle: f32) -> f32 {
    let s = s.max(Vec2::splat(MIN_SCALE));
    sdf_ellipse_unscaled(p, s, angle) * s.x.min(s.y)
}

/// Ellipse in normalized space: `|q| - 1` with `q = rotate(p) / s`.
///
/// Only the sign and the zero set are meaningful.
#[inline]
pub fn sdf_ellipse_unscaled(p: Vec2, s: Vec2, angle: f32) -> f32 {
    let s = s.max(Vec2::splat(MIN_SCALE));
    (rotate(p, angle) / s).length() - 1.0
}

/// Crescent: an outer circle with an offset, rotated inner circle removed.
#[inline]
pub fn sdf_moon(p: Vec2, r: f32, angle: f32) -> f32 {
    let inner = (rotate(p, angle) / 0.8 - Vec2::new(0.15, 0.0)).length() - r;
    let outer = p.length() - r;
    (-inner).max(outer)
}

/// Flower with `petals` lobes of height `amplitude` around radius `r`.
#[inline]
pub fn sdf_flower(p: Vec2, r: f32, petals: f32, amplitude: f32) -> f32 {
    let phi = p.y.atan2(p.x);
    p.length() - (r + amplitude * (petals * phi).cos())
}

/// Mirrored butterfly: two wing ellipses per side plus a body.
///
/// `flap` scales the wing width; values near zero close the wings.
#[inline]
pub fn sdf_butterfly(p: Vec2, size: f32, flap: f32) -> f32 {
    let q = Vec2::new(p.x.abs(), p.y);
    let f = flap.max(0.05);
    let upper = sdf_ellipse(
        q - Vec2::new(0.55, 0.35) * size,
        Vec2::new(0.5 * f, 0.38) * size,
        0.5,
    );
    let lower = sdf_ellipse(
        q - Vec2::new(0.4, -0.35) * size,
        Vec2::new(0.35 * f, 0.28) * size,
        -0.5,
    );
    let body = sdf_ellipse(p, Vec2::new(0.08, 0.55) * size, 0.0);
    upper.min(lower).min(body)
}

/// Segment from `a` to `b` inflated by `thickness`.
#[inline]
pub fn sdf_line(p: Vec2, a: Vec2, b: Vec2, thickness: f32) -> f32 {
    let pa = p - a;
    let ba = b - a;
    let h = (pa.dot(ba) / ba.length_squared().max(1e-12)).clamp(0.0, 1.0);
    (pa - ba * h).length() - thickness
}

/// Folds `p.x` into one period centered on zero.
#[inline]
pub fn repeat_x(p: Vec2, period: f32) -> Vec2 {
    Vec2::new(p.x - period * (p.x / period).round(), p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn circle_boundary_center_and_outside() {
        let r = 0.75;
        assert!(close(sdf_circle(Vec2::new(r, 0.0), r), 0.0));
        assert!(close(sdf_circle(Vec2::new(0.0, -r), r), 0.0));
        assert!(close(sdf_circle(Vec2::ZERO, r), -r));
        assert!(close(sdf_circle(Vec2::new(0.0, 2.0 * r), r), r));
    }

    #[test]
    fn box_axis_aligned() {
        let b = Vec2::new(1.0, 0.5);
        assert!(close(sdf_box(Vec2::new(1.0, 0.0), b, 0.0), 0.0));
        assert!(close(sdf_box(Vec2::ZERO, b, 0.0), -0.5));
        assert!(close(sdf_box(Vec2::new(3.0, 0.0), b, 0.0), 2.0));
        // Corner region measures to the corner, not the edge.
        let d = sdf_box(Vec2::new(2.0, 1.5), b, 0.0);
        assert!(close(d, 2.0f32.sqrt()));
    }

    #[test]
    fn box_rotation_quarter_turn_swaps_extents() {
        let b = Vec2::new(1.0, 0.25);
        let d = sdf_box(Vec2::new(0.0, 1.0), b, std::f32::consts::FRAC_PI_2);
        assert!(close(d, 0.0));
    }

    #[test]
    fn ellipse_variants_share_the_zero_set() {
        let s = Vec2::new(2.0, 0.5);
        let on_major = Vec2::new(2.0, 0.0);
        assert!(close(sdf_ellipse(on_major, s, 0.0), 0.0));
        assert!(close(sdf_ellipse_unscaled(on_major, s, 0.0), 0.0));
        // Scaled variant is multiplied by the minor radius.
        let inside = sdf_ellipse(Vec2::ZERO, s, 0.0);
        assert!(close(inside, -0.5));
        assert!(close(sdf_ellipse_unscaled(Vec2::ZERO, s, 0.0), -1.0));
    }

    #[test]
    fn ellipse_with_zero_scale_stays_finite() {
        assert!(sdf_ellipse(Vec2::new(0.3, 0.1), Vec2::ZERO, 0.0).is_finite());
        assert!(sdf_butterfly(Vec2::new(0.3, 0.1), 0.0, 0.0).is_finite());
    }

    #[test]
    fn moon_is_carved_out_of_outer_circle() {
        let r = 1.0;
        // Far outside behaves like the outer circle.
        assert!(close(sdf_moon(Vec2::new(0.0, 5.0), r, 0.0), 4.0));
        // Near the center the inner circle removes material.
        assert!(sdf_moon(Vec2::ZERO, r, 0.0) > 0.0);
        // The left rim survives the carve.
        assert!(sdf_moon(Vec2::new(-0.95, 0.0), r, 0.0) < 0.0);
    }

    #[test]
    fn flower_lobes_follow_cosine() {
        let d_tip = sdf_flower(Vec2::new(1.3, 0.0), 1.0, 5.0, 0.3);
        assert!(close(d_tip, 0.0));
        assert!(sdf_flower(Vec2::ZERO, 1.0, 5.0, 0.3) < 0.0);
    }

    #[test]
    fn butterfly_is_mirror_symmetric() {
        let a = sdf_butterfly(Vec2::new(0.4, 0.2), 1.0, 0.8);
        let b = sdf_butterfly(Vec2::new(-0.4, 0.2), 1.0, 0.8);
        assert!(close(a, b));
        assert!(sdf_butterfly(Vec2::ZERO, 1.0, 0.8) < 0.0);
    }

    #[test]
    fn line_measures_to_segment_and_caps() {
        let a = Vec2::new(-1.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        assert!(close(sdf_line(Vec2::new(0.0, 0.5), a, b, 0.1), 0.4));
        assert!(close(sdf_line(Vec2::new(2.0, 0.0), a, b, 0.0), 1.0));
        // Degenerate segment collapses to a circle.
        assert!(close(sdf_line(Vec2::new(0.0, 1.0), Vec2::ZERO, Vec2::ZERO, 0.25), 0.75));
    }

    #[test]
    fn repeat_folds_into_one_period() {
        let q = repeat_x(Vec2::new(10.5, 1.0), 4.0);
        assert!(close(q.x, -1.5));
        assert!(close(q.y, 1.0));
    }
}
