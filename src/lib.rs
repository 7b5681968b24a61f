pub mod cli;
pub mod core;
pub mod error;
pub mod math;
pub mod traits;

pub use crate::core::{
    plan_frame, ExternalTarget, FramePlan, RenderPath, SizeHint, SizeMode, ViewportRenderer,
};
pub use error::{Result, ViewportError};
pub use math::{fits, Rect, Size, TargetResize};
pub use traits::{GraphicsBackend, NullBackend, NullHost, ViewHost};
