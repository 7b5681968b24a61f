use glam::Vec2;

use crate::math::{Rect, Size, TargetResize};

/// Size configuration of the external game being displayed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExternalTarget {
    /// Window size the game is configured to run at
    pub window_size: Size,
    /// Fixed internal resolution the game renders at, if any
    pub forced_render_size: Option<Size>,
    /// How the forced resolution is resized into the output
    pub forced_resize: TargetResize,
}

impl ExternalTarget {
    pub fn new(window_size: Size) -> Self {
        Self {
            window_size,
            forced_render_size: None,
            forced_resize: TargetResize::Fit,
        }
    }

    pub fn with_forced_render_size(mut self, size: Size, resize: TargetResize) -> Self {
        self.forced_render_size = Some(size);
        self.forced_resize = resize;
        self
    }

    /// Forced render size if set on both axes
    pub fn forced(&self) -> Option<Size> {
        self.forced_render_size.filter(|s| !s.is_empty())
    }

    /// Size the game view should use when matching the external target
    pub fn game_target_size(&self) -> Size {
        self.forced().unwrap_or(self.window_size)
    }
}

/// Scene viewport inside a render target plus the logical image size the
/// scene is rendered at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameViewport {
    pub viewport: Rect,
    pub image_size: Vec2,
}

/// Compute where the scene goes inside a target of `target_size`
///
/// Without a forced render size the scene covers the whole target. With
/// one, the forced size is resized into the target and centered.
pub fn calculate_game_viewport(target_size: Size, external: &ExternalTarget) -> GameViewport {
    let base = Rect::from_size(target_size);

    match external.forced() {
        Some(forced) if forced != target_size => {
            let forced = forced.as_vec2();
            let adjusted = external.forced_resize.apply(forced, base.size());
            GameViewport {
                viewport: Rect::align_center(base.center(), adjusted),
                image_size: forced,
            }
        }
        _ => GameViewport {
            viewport: base,
            image_size: base.size(),
        },
    }
}
