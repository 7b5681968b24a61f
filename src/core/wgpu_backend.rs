use glam::Vec2;
use log::{debug, warn};
use wgpu::{
    Adapter, BindGroup, CommandEncoder, Surface, SurfaceConfiguration, SurfaceTexture, Texture,
    TextureView,
};

use super::blit::BlitPipeline;
use super::gpu_context::GpuContext;
use crate::error::{Result, ViewportError};
use crate::math::{Color, Rect, Size};
use crate::traits::GraphicsBackend;

/// Scene content drawn by the game view
pub trait GpuScene {
    /// Record draw commands into `view` (`bounds` pixels in size), restricted
    /// to `viewport`, for an image of logical size `image_size`
    fn render(
        &mut self,
        gpu: &GpuContext,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        bounds: Size,
        viewport: Rect,
        image_size: Vec2,
    );
}

/// Offscreen color texture, renderable and sampleable
pub struct OffscreenTarget {
    texture: Texture,
    view: TextureView,
    bind_group: BindGroup,
    size: Size,
}

struct ActiveFrame {
    surface_texture: SurfaceTexture,
    view: TextureView,
    encoder: CommandEncoder,
    area: Size,
}

/// `GraphicsBackend` presenting to a window surface through wgpu
pub struct WgpuBackend {
    gpu: GpuContext,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    blit: BlitPipeline,
    scene: Box<dyn GpuScene>,
    frame: Option<ActiveFrame>,
}

impl WgpuBackend {
    pub fn new(
        gpu: GpuContext,
        surface: Surface<'static>,
        adapter: &Adapter,
        size: Size,
        scene: Box<dyn GpuScene>,
    ) -> Result<Self> {
        let surface_format = Self::surface_format(&surface, adapter)?;
        let surface_caps = surface.get_capabilities(adapter);
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(gpu.device(), &surface_config);

        let blit = BlitPipeline::new(gpu.device(), surface_format);

        Ok(Self {
            gpu,
            surface,
            surface_config,
            blit,
            scene,
            frame: None,
        })
    }

    /// Color format used for `surface`, preferring sRGB
    pub fn surface_format(surface: &Surface<'_>, adapter: &Adapter) -> Result<wgpu::TextureFormat> {
        let formats = surface.get_capabilities(adapter).formats;
        formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| formats.first())
            .copied()
            .ok_or_else(|| {
                ViewportError::Adapter("adapter cannot present to this surface".into())
            })
    }

    /// Color format shared by the surface and offscreen targets
    fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    fn configure(&mut self, size: Size) {
        if size.is_empty() {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(self.gpu.device(), &self.surface_config);
    }

    fn acquire(&mut self, area: Size) -> Result<SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                self.configure(area);
                Ok(self.surface.get_current_texture()?)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn allocate(&self, size: Size) -> Result<OffscreenTarget> {
        let format = self.format();
        let ((texture, view, bind_group), error) = self.gpu.catch_errors(|device| {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Game View Offscreen Texture"),
                size: wgpu::Extent3d {
                    width: size.width,
                    height: size.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            let bind_group = self.blit.bind_group(device, &view);
            (texture, view, bind_group)
        });

        if let Some(error) = error {
            return Err(ViewportError::Allocation {
                size,
                reason: error.to_string(),
            });
        }

        Ok(OffscreenTarget {
            texture,
            view,
            bind_group,
            size,
        })
    }
}

impl GraphicsBackend for WgpuBackend {
    type Target = OffscreenTarget;

    fn begin_frame(&mut self, area: Size) -> Result<()> {
        if self.frame.take().is_some() {
            debug!("Dropping unfinished frame");
        }
        if area.width != self.surface_config.width || area.height != self.surface_config.height {
            self.configure(area);
        }

        let surface_texture = self.acquire(area)?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Game View Encoder"),
            });

        self.frame = Some(ActiveFrame {
            surface_texture,
            view,
            encoder,
            area,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        let frame = self.frame.take().ok_or(ViewportError::NoActiveFrame)?;
        self.gpu.queue().submit(Some(frame.encoder.finish()));
        frame.surface_texture.present();
        Ok(())
    }

    fn create_target(&mut self, size: Size) -> Result<OffscreenTarget> {
        self.allocate(size)
    }

    fn resize_target(&mut self, target: &mut OffscreenTarget, size: Size) -> Result<()> {
        let replacement = self.allocate(size)?;
        let old = std::mem::replace(target, replacement);
        old.texture.destroy();
        Ok(())
    }

    fn release_target(&mut self, target: OffscreenTarget) {
        target.texture.destroy();
    }

    fn clear(&mut self, rect: Rect, color: Color) -> Result<()> {
        let blit = &self.blit;
        let frame = self.frame.as_mut().ok_or(ViewportError::NoActiveFrame)?;

        if rect == Rect::from_size(frame.area) {
            blit.clear(&mut frame.encoder, &frame.view, color);
        } else {
            blit.fill(&mut frame.encoder, &frame.view, rect, frame.area, color);
        }
        Ok(())
    }

    fn render_scene(
        &mut self,
        target: Option<&OffscreenTarget>,
        viewport: Rect,
        image_size: Vec2,
    ) -> Result<()> {
        let frame = self.frame.as_mut().ok_or(ViewportError::NoActiveFrame)?;

        let (view, bounds) = match target {
            Some(target) => {
                self.blit.clear(&mut frame.encoder, &target.view, Color::BLACK);
                (&target.view, target.size)
            }
            None => (&frame.view, frame.area),
        };

        self.scene
            .render(&self.gpu, &mut frame.encoder, view, bounds, viewport, image_size);
        Ok(())
    }

    fn blit(&mut self, source: &OffscreenTarget, dest: Rect) -> Result<()> {
        let blit = &self.blit;
        let frame = self.frame.as_mut().ok_or(ViewportError::NoActiveFrame)?;
        blit.draw(&mut frame.encoder, &frame.view, &source.bind_group, dest, frame.area);
        Ok(())
    }
}
