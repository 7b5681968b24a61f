use glam::Vec2;

use super::size::Size;

/// Axis-aligned rectangle in pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect at the origin covering `size`
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width as f32, size.height as f32)
    }

    /// Rect of `size` whose center sits at `center`
    pub fn align_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x * 0.5, center.y - size.y * 0.5, size.x, size.y)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Same size, moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Intersection with the surface `[0, bounds)`; empty if disjoint
    pub fn clipped_to(&self, bounds: Size) -> Self {
        let x0 = self.x.max(0.0);
        let y0 = self.y.max(0.0);
        let x1 = self.right().min(bounds.width as f32);
        let y1 = self.bottom().min(bounds.height as f32);
        Self::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_center_direct_scenario() {
        let rect = Rect::align_center(Vec2::new(512.0, 384.0), Vec2::new(800.0, 600.0));
        assert_eq!(rect, Rect::new(112.0, 84.0, 800.0, 600.0));
        assert_eq!(rect.right(), 912.0);
        assert_eq!(rect.bottom(), 684.0);
    }

    #[test]
    fn test_from_size() {
        let rect = Rect::from_size(Size::new(640, 480));
        assert_eq!(rect, Rect::new(0.0, 0.0, 640.0, 480.0));
        assert_eq!(rect.center(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_translated() {
        let rect = Rect::new(10.0, 20.0, 5.0, 5.0).translated(Vec2::new(1.0, -2.0));
        assert_eq!(rect, Rect::new(11.0, 18.0, 5.0, 5.0));
    }

    #[test]
    fn test_clipped_to_bounds() {
        let rect = Rect::new(-10.0, 5.0, 100.0, 100.0).clipped_to(Size::new(50, 50));
        assert_eq!(rect, Rect::new(0.0, 5.0, 50.0, 45.0));
    }

    #[test]
    fn test_clipped_disjoint_is_empty() {
        let rect = Rect::new(100.0, 100.0, 10.0, 10.0).clipped_to(Size::new(50, 50));
        assert!(rect.is_empty());
    }
}
