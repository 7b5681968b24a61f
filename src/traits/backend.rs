use glam::Vec2;

use crate::error::Result;
use crate::math::{Color, Rect, Size};

/// Graphics layer the viewport renderer draws through
///
/// All calls for one displayed frame happen between `begin_frame` and
/// `end_frame`. Rectangles are in pixels of the surface being drawn to:
/// the visible display area, or the offscreen target when one is passed.
pub trait GraphicsBackend {
    /// Offscreen color target that can be rendered into and sampled from
    type Target;

    /// Start a frame presenting into a display area of `area`
    fn begin_frame(&mut self, area: Size) -> Result<()>;

    /// Submit and present the frame
    fn end_frame(&mut self) -> Result<()>;

    /// Allocate an offscreen target of `size`
    fn create_target(&mut self, size: Size) -> Result<Self::Target>;

    /// Reallocate `target` storage at `size`, keeping the handle
    fn resize_target(&mut self, target: &mut Self::Target, size: Size) -> Result<()>;

    /// Free the target's device resources
    fn release_target(&mut self, target: Self::Target);

    /// Fill `rect` of the visible display area with `color`
    fn clear(&mut self, rect: Rect, color: Color) -> Result<()>;

    /// Render the scene into `viewport` of `target`, or of the visible
    /// display area when `target` is `None`, at a logical `image_size`
    fn render_scene(
        &mut self,
        target: Option<&Self::Target>,
        viewport: Rect,
        image_size: Vec2,
    ) -> Result<()>;

    /// Draw `source` scaled into `dest` of the visible display area
    fn blit(&mut self, source: &Self::Target, dest: Rect) -> Result<()>;
}

/// Backend that accepts every call and draws nothing
///
/// Useful for driving a renderer headless, e.g. to measure planning cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl GraphicsBackend for NullBackend {
    type Target = Size;

    fn begin_frame(&mut self, _area: Size) -> Result<()> {
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        Ok(())
    }

    fn create_target(&mut self, size: Size) -> Result<Size> {
        Ok(size)
    }

    fn resize_target(&mut self, target: &mut Size, size: Size) -> Result<()> {
        *target = size;
        Ok(())
    }

    fn release_target(&mut self, _target: Size) {}

    fn clear(&mut self, _rect: Rect, _color: Color) -> Result<()> {
        Ok(())
    }

    fn render_scene(
        &mut self,
        _target: Option<&Size>,
        _viewport: Rect,
        _image_size: Vec2,
    ) -> Result<()> {
        Ok(())
    }

    fn blit(&mut self, _source: &Size, _dest: Rect) -> Result<()> {
        Ok(())
    }
}
