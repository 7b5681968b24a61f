use log::debug;

use crate::error::Result;
use crate::math::Size;
use crate::traits::GraphicsBackend;

/// Lazily allocated offscreen target owned by one renderer
pub struct OffscreenBuffer<T> {
    slot: Option<(T, Size)>,
}

impl<T> OffscreenBuffer<T> {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Allocate, resize, or keep the target so it matches `size`
    ///
    /// Reallocation only happens when `size` differs from the current size.
    pub fn ensure_sized<B>(&mut self, backend: &mut B, size: Size) -> Result<&T>
    where
        B: GraphicsBackend<Target = T>,
    {
        let target = match self.slot.take() {
            Some((target, current)) if current == size => target,
            Some((mut target, current)) => {
                debug!("Resizing offscreen buffer {} -> {}", current, size);
                if let Err(e) = backend.resize_target(&mut target, size) {
                    // keep the old target reachable so cleanup can free it
                    self.slot = Some((target, current));
                    return Err(e);
                }
                target
            }
            None => {
                debug!("Allocating offscreen buffer {}", size);
                backend.create_target(size)?
            }
        };

        Ok(&self.slot.insert((target, size)).0)
    }

    /// Free the target if one exists; safe to call repeatedly
    pub fn release<B>(&mut self, backend: &mut B)
    where
        B: GraphicsBackend<Target = T>,
    {
        if let Some((target, size)) = self.slot.take() {
            debug!("Releasing offscreen buffer {}", size);
            backend.release_target(target);
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.slot.is_some()
    }

    /// Size of the allocated target
    pub fn size(&self) -> Option<Size> {
        self.slot.as_ref().map(|(_, size)| *size)
    }
}

impl<T> Default for OffscreenBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewportError;
    use crate::math::{Color, Rect};
    use glam::Vec2;

    #[derive(Default)]
    struct CountingBackend {
        created: usize,
        resized: usize,
        released: usize,
        fail_alloc: bool,
        fail_resize: bool,
    }

    impl GraphicsBackend for CountingBackend {
        type Target = Size;

        fn begin_frame(&mut self, _area: Size) -> Result<()> {
            Ok(())
        }

        fn end_frame(&mut self) -> Result<()> {
            Ok(())
        }

        fn create_target(&mut self, size: Size) -> Result<Size> {
            if self.fail_alloc {
                return Err(ViewportError::Allocation {
                    size,
                    reason: "out of memory".into(),
                });
            }
            self.created += 1;
            Ok(size)
        }

        fn resize_target(&mut self, target: &mut Size, size: Size) -> Result<()> {
            if self.fail_resize {
                return Err(ViewportError::Allocation {
                    size,
                    reason: "out of memory".into(),
                });
            }
            self.resized += 1;
            *target = size;
            Ok(())
        }

        fn release_target(&mut self, _target: Size) {
            self.released += 1;
        }

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

    #[test]
    fn test_ensure_sized_allocates_once() {
        let mut backend = CountingBackend::default();
        let mut buffer = OffscreenBuffer::new();

        for _ in 0..5 {
            buffer.ensure_sized(&mut backend, Size::new(1920, 1080)).unwrap();
        }

        assert_eq!(backend.created, 1);
        assert_eq!(backend.resized, 0);
        assert_eq!(buffer.size(), Some(Size::new(1920, 1080)));
    }

    #[test]
    fn test_ensure_sized_resizes_on_change() {
        let mut backend = CountingBackend::default();
        let mut buffer = OffscreenBuffer::new();

        buffer.ensure_sized(&mut backend, Size::new(1920, 1080)).unwrap();
        let target = *buffer.ensure_sized(&mut backend, Size::new(2560, 1440)).unwrap();

        assert_eq!(backend.created, 1);
        assert_eq!(backend.resized, 1);
        assert_eq!(target, Size::new(2560, 1440));
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut backend = CountingBackend::default();
        let mut buffer: OffscreenBuffer<Size> = OffscreenBuffer::new();

        buffer.release(&mut backend);
        buffer.ensure_sized(&mut backend, Size::new(10, 10)).unwrap();
        buffer.release(&mut backend);
        buffer.release(&mut backend);

        assert_eq!(backend.released, 1);
        assert!(!buffer.is_allocated());
    }

    #[test]
    fn test_allocation_failure_propagates_and_leaves_empty() {
        let mut backend = CountingBackend {
            fail_alloc: true,
            ..Default::default()
        };
        let mut buffer = OffscreenBuffer::new();

        let result = buffer.ensure_sized(&mut backend, Size::new(4096, 4096));
        assert!(matches!(result, Err(ViewportError::Allocation { .. })));
        assert!(!buffer.is_allocated());
    }

    #[test]
    fn test_resize_failure_keeps_old_target_for_release() {
        let mut backend = CountingBackend::default();
        let mut buffer = OffscreenBuffer::new();
        buffer.ensure_sized(&mut backend, Size::new(1920, 1080)).unwrap();

        backend.fail_resize = true;
        let result = buffer.ensure_sized(&mut backend, Size::new(3840, 2160));
        assert!(matches!(result, Err(ViewportError::Allocation { .. })));
        assert_eq!(buffer.size(), Some(Size::new(1920, 1080)));

        buffer.release(&mut backend);
        assert_eq!(backend.released, 1);
        assert!(!buffer.is_allocated());
    }
}
