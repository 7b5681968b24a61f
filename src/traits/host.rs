use crate::core::SizeHint;
use crate::math::Size;

/// Host surface embedding a viewport renderer - handles refresh requests
/// and displays the current target size
pub trait ViewHost {
    /// Target size or its fit state changed; refresh any size display
    fn target_size_changed(&self, size: Size, hint: SizeHint);

    /// The previous frame is stale; schedule a redraw
    fn request_redraw(&self);
}

/// Host that ignores all notifications
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl ViewHost for NullHost {
    fn target_size_changed(&self, _size: Size, _hint: SizeHint) {}

    fn request_redraw(&self) {}
}
