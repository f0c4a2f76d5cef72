//! Drawable area in logical units

/// Rectangle described by its center and size.
///
/// Matches nannou's window coordinates: origin at the center, y pointing up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_w_h(w: f32, h: f32) -> Self {
        Self { x: 0.0, y: 0.0, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x - self.w * 0.5
    }

    pub fn right(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn top(&self) -> f32 {
        self.y + self.h * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.y - self.h * 0.5
    }

    pub fn min_side(&self) -> f32 {
        self.w.min(self.h)
    }

    /// Distance from the center to a corner
    pub fn half_diagonal(&self) -> f32 {
        (self.w * self.w + self.h * self.h).sqrt() * 0.5
    }

    /// True when there is nothing to draw into
    pub fn is_empty(&self) -> bool {
        !(self.w.is_finite() && self.h.is_finite()) || self.w <= 0.0 || self.h <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let b = Bounds::new(10.0, -5.0, 100.0, 50.0);
        assert_eq!(b.left(), -40.0);
        assert_eq!(b.right(), 60.0);
        assert_eq!(b.top(), 20.0);
        assert_eq!(b.bottom(), -30.0);
    }

    #[test]
    fn test_empty() {
        assert!(Bounds::from_w_h(0.0, 100.0).is_empty());
        assert!(Bounds::from_w_h(f32::NAN, 100.0).is_empty());
        assert!(!Bounds::from_w_h(300.0, 400.0).is_empty());
        assert_eq!(Bounds::from_w_h(300.0, 400.0).half_diagonal(), 250.0);
    }
}
