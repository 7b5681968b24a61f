//! Parsing and clamping of user-entered render sizes.

use crate::math::Size;

pub const MIN_RENDER_WIDTH: u32 = 1;
pub const MAX_RENDER_WIDTH: u32 = 3840;
pub const MIN_RENDER_HEIGHT: u32 = 1;
pub const MAX_RENDER_HEIGHT: u32 = 2160;

/// Parse one size component; `fallback` when the text isn't an integer
pub fn parse_component(text: &str, fallback: i64) -> i64 {
    text.trim().parse::<i64>().unwrap_or(fallback)
}

/// Clamp raw components into the supported render size range
pub fn clamp_size(width: i64, height: i64) -> Size {
    Size::new(
        width.clamp(MIN_RENDER_WIDTH as i64, MAX_RENDER_WIDTH as i64) as u32,
        height.clamp(MIN_RENDER_HEIGHT as i64, MAX_RENDER_HEIGHT as i64) as u32,
    )
}

/// Validate width/height text against the current size
pub fn parse_size(width_text: &str, height_text: &str, current: Size) -> Size {
    let width = parse_component(width_text, current.width as i64);
    let height = parse_component(height_text, current.height as i64);
    clamp_size(width, height)
}
