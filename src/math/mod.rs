mod color;
mod rect;
mod resize;
mod size;

pub use color::{hsv_to_rgb, Color};
pub use rect::Rect;
pub use resize::TargetResize;
pub use size::{fits, Size};
