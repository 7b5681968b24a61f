use glam::Vec2;
use std::fmt;

/// Integer size in pixels - used for target sizes and display areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    /// Create new size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either axis is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Size as float vector
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// Whether `target` can be shown at 1:1 scale inside `area`
pub fn fits(target: Size, area: Size) -> bool {
    target.width <= area.width && target.height <= area.height
}
