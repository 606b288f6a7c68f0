/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height; 1.0 for a degenerate viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    /// Maps a window position to `[-1, 1]` with +Y up. `None` when the
    /// viewport is degenerate.
    pub fn normalize(self, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.is_valid() {
            return None;
        }
        Some((x / self.width * 2.0 - 1.0, 1.0 - y / self.height * 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_corners() {
        let v = Viewport::new(200.0, 100.0);
        assert_eq!(v.normalize(0.0, 100.0), Some((-1.0, -1.0)));
        assert_eq!(v.normalize(200.0, 0.0), Some((1.0, 1.0)));
        assert_eq!(Viewport::new(0.0, 10.0).normalize(1.0, 1.0), None);
    }

    #[test]
    fn aspect_falls_back_for_degenerate() {
        assert_eq!(Viewport::new(800.0, 400.0).aspect(), 2.0);
        assert_eq!(Viewport::new(800.0, 0.0).aspect(), 1.0);
    }
}
