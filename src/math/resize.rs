use glam::Vec2;

/// How a base size is adjusted to a target area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetResize {
    /// Keep the base size unchanged
    #[default]
    None,
    /// Use the target area exactly (may distort)
    Stretch,
    /// Uniform scale so the whole base is visible (letterbox / pillarbox)
    Fit,
    /// Uniform scale so the whole target area is covered (may crop)
    Fill,
}

impl TargetResize {
    /// Apply the resize policy to `base` against `target`
    pub fn apply(&self, base: Vec2, target: Vec2) -> Vec2 {
        match self {
            TargetResize::None => base,
            TargetResize::Stretch => target,
            TargetResize::Fit => base * Self::scale(base, target, f32::min),
            TargetResize::Fill => base * Self::scale(base, target, f32::max),
        }
    }

    fn scale(base: Vec2, target: Vec2, pick: fn(f32, f32) -> f32) -> f32 {
        if base.x <= 0.0 || base.y <= 0.0 {
            return 0.0;
        }
        pick(target.x / base.x, target.y / base.y)
    }
}
