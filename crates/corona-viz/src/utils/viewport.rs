//! Viewport tracking: logical size, pixel density and the backing resolution.

use corona_api::Bounds;

/// Drawable area as seen by the renderer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Logical width
    pub width: f32,
    /// Logical height
    pub height: f32,
    /// Physical pixels per logical unit
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Build a viewport, replacing unusable values: negative or non-finite sizes
    /// become 0 and a bad pixel ratio becomes 1.
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let size = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            width: size(width),
            height: size(height),
            pixel_ratio,
        }
    }

    /// Logical bounds centered on the origin
    pub fn bounds(&self) -> Bounds {
        Bounds::from_w_h(self.width, self.height)
    }

    /// Backing buffer resolution: logical size times pixel ratio
    pub fn backing_size(&self) -> [u32; 2] {
        [
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Watches resize notifications and reports real changes.
#[derive(Debug, Default)]
pub struct ViewportManager {
    current: Option<Viewport>,
    detached: bool,
}

impl ViewportManager {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn current(&self) -> Option<Viewport> {
        self.current
    }

    /// Record an observed size. Returns the new viewport when it differs from
    /// the last one, `None` when nothing changed or the manager is detached.
    pub fn observe(&mut self, width: f32, height: f32, pixel_ratio: f32) -> Option<Viewport> {
        if self.detached {
            return None;
        }
        let viewport = Viewport::new(width, height, pixel_ratio);
        if self.current == Some(viewport) {
            return None;
        }
        log::info!(
            "Viewport {}x{} @{}x (backing {:?})",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            viewport.backing_size()
        );
        self.current = Some(viewport);
        Some(viewport)
    }

    /// Stop reacting to resizes, used on teardown
    pub fn detach(&mut self) {
        self.detached = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_size_scales_with_ratio() {
        let viewport = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(viewport.backing_size(), [1600, 1200]);
        assert_eq!(Viewport::new(333.0, 100.0, 1.5).backing_size(), [500, 150]);
    }

    #[test]
    fn test_invalid_values_are_replaced() {
        let viewport = Viewport::new(-10.0, f32::NAN, 0.0);
        assert_eq!(viewport.width, 0.0);
        assert_eq!(viewport.height, 0.0);
        assert_eq!(viewport.pixel_ratio, 1.0);
        assert!(viewport.is_empty());
    }

    #[test]
    fn test_observe_reports_only_changes() {
        let mut manager = ViewportManager::new();
        assert!(manager.observe(640.0, 480.0, 1.0).is_some());
        assert!(manager.observe(640.0, 480.0, 1.0).is_none());
        // Moving to a denser display is a change even at the same logical size
        assert!(manager.observe(640.0, 480.0, 2.0).is_some());
        assert_eq!(manager.current().map(|v| v.backing_size()), Some([1280, 960]));
    }

    #[test]
    fn test_detached_ignores_resizes() {
        let mut manager = ViewportManager::new();
        manager.observe(640.0, 480.0, 1.0);
        manager.detach();
        assert!(manager.observe(1024.0, 768.0, 1.0).is_none());
        assert_eq!(manager.current().map(|v| v.width), Some(640.0));
    }
}
