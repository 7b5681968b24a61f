use glam::Vec2;

use super::game_viewport::{calculate_game_viewport, ExternalTarget};
use crate::math::{fits, Rect, Size, TargetResize};

/// How a frame reaches the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// Scene rendered straight into a centered window rect at 1:1
    Direct,
    /// Scene rendered offscreen at target size, then scaled into the display
    Buffered,
}

/// Everything one frame needs, derived from target size and display area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlan {
    pub path: RenderPath,
    pub target_size: Size,
    pub display_area: Size,
    /// Where the game image lands in the display area. For `Buffered`
    /// frames this is the blit destination.
    pub window_rect: Rect,
    /// Scene viewport. Offscreen-relative for `Buffered`, display-relative
    /// for `Direct`.
    pub scene_viewport: Rect,
    pub image_size: Vec2,
}

impl FramePlan {
    pub fn is_buffered(&self) -> bool {
        self.path == RenderPath::Buffered
    }
}

/// Centered rect of the game image inside the display area
pub fn window_rect(target_size: Size, display_area: Size) -> Rect {
    let resize = if fits(target_size, display_area) {
        TargetResize::None
    } else {
        TargetResize::Fit
    };

    let area = Rect::from_size(display_area);
    let size = resize.apply(target_size.as_vec2(), area.size());
    Rect::align_center(area.center(), size)
}

/// Decide the render path and rectangles for one frame
pub fn plan_frame(target_size: Size, display_area: Size, external: &ExternalTarget) -> FramePlan {
    let path = if fits(target_size, display_area) {
        RenderPath::Direct
    } else {
        RenderPath::Buffered
    };
    let window_rect = window_rect(target_size, display_area);
    let game = calculate_game_viewport(target_size, external);

    let scene_viewport = match path {
        RenderPath::Buffered => game.viewport,
        RenderPath::Direct => game.viewport.translated(window_rect.pos()),
    };

    FramePlan {
        path,
        target_size,
        display_area,
        window_rect,
        scene_viewport,
        image_size: game.image_size,
    }
}
