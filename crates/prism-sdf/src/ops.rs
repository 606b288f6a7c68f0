//! Boolean and blend combinators over distances.

/// Nearest surface of `a` and `b`.
#[inline]
pub fn union(a: f32, b: f32) -> f32 {
    a.min(b)
}

/// Region inside both `a` and `b`.
#[inline]
pub fn intersection(a: f32, b: f32) -> f32 {
    a.max(b)
}

/// `a` with `b` removed.
#[inline]
pub fn subtraction(a: f32, b: f32) -> f32 {
    a.max(-b)
}

/// Polynomial smooth minimum with blend radius `k`.
///
/// `k` is clamped to a tiny epsilon so `k = 0` degrades to a hard union.
#[inline]
pub fn smooth_union(a: f32, b: f32, k: f32) -> f32 {
    let k = k.max(1e-10);
    let h = (k - (a - b).abs()).max(0.0) / k;
    a.min(b) - h * h * k * 0.25
}

/// Smooth counterpart of [`subtraction`].
#[inline]
pub fn smooth_subtraction(a: f32, b: f32, k: f32) -> f32 {
    -smooth_union(-a, b, k)
}

/// Union of any number of distances. Empty input is "nothing": `+inf`.
#[inline]
pub fn union_all<I: IntoIterator<Item = f32>>(distances: I) -> f32 {
    distances.into_iter().fold(f32::INFINITY, union)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{sdf_box, sdf_circle, sdf_moon};
    use glam::Vec2;

    #[test]
    fn union_is_commutative_for_sampled_primitives() {
        let samples = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.3, -0.2),
            Vec2::new(-1.5, 2.0),
            Vec2::new(4.0, 0.1),
            Vec2::new(-0.05, 0.9),
        ];
        for p in samples {
            let a = sdf_circle(p - Vec2::new(0.5, 0.0), 0.4);
            let b = sdf_box(p, Vec2::new(0.3, 0.6), 0.7);
            let c = sdf_moon(p + Vec2::new(0.2, 0.2), 0.5, 1.1);
            assert_eq!(union(a, b), union(b, a));
            assert_eq!(union(a, c), union(c, a));
            assert_eq!(union(b, c), union(c, b));
        }
    }

    #[test]
    fn repeated_union_ignores_insertion_order() {
        let ds = [0.7f32, -0.1, 2.5, 0.05, -0.3];
        let forward = union_all(ds);
        let backward = union_all(ds.iter().rev().copied());
        let nested = union(union(ds[2], ds[4]), union(union(ds[0], ds[3]), ds[1]));
        assert_eq!(forward, -0.3);
        assert_eq!(forward, backward);
        assert_eq!(forward, nested);
    }

    #[test]
    fn union_all_of_nothing_is_empty_space() {
        assert_eq!(union_all(std::iter::empty()), f32::INFINITY);
    }

    #[test]
    fn intersection_and_subtraction() {
        assert_eq!(intersection(-0.5, 0.2), 0.2);
        assert_eq!(subtraction(-0.5, -0.2), 0.2);
        assert_eq!(subtraction(-0.5, 0.7), -0.5);
    }

    #[test]
    fn smooth_union_blends_only_near_the_seam() {
        // Far apart: identical to a hard union.
        assert_eq!(smooth_union(0.1, 3.0, 0.5), 0.1);
        // Equal inputs dip by k / 4.
        let d = smooth_union(0.2, 0.2, 0.4);
        assert!((d - 0.1).abs() < 1e-6);
        // Never above the hard union.
        assert!(smooth_union(0.3, 0.35, 0.5) <= 0.3);
        // k = 0 is a hard union.
        assert_eq!(smooth_union(0.3, 0.35, 0.0), 0.3);
    }

    #[test]
    fn smooth_subtraction_matches_hard_result_away_from_seam() {
        assert_eq!(smooth_subtraction(-0.4, 0.1, 0.2), subtraction(-0.4, 0.1));
        // Near the seam the blend widens the cut.
        assert!(smooth_subtraction(-0.1, -0.05, 0.3) >= subtraction(-0.1, -0.05));
    }
}
