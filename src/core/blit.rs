use wgpu::{
    BindGroup, BindGroupLayout, CommandEncoder, Device, RenderPipeline, Sampler, TextureView,
};

use crate::math::{Color, Rect, Size};

/// Pipelines for drawing an offscreen texture into a rect of the display,
/// and for filling a rect with a flat color
pub struct BlitPipeline {
    blit: RenderPipeline,
    fill: RenderPipeline,
    layout: BindGroupLayout,
    sampler: Sampler,
    srgb: bool,
}

impl BlitPipeline {
    pub fn new(device: &Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/blit.wgsl").into()),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Blit Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let blit_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });
        let fill_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Fill Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        // fill output (1,1,1,1) times the blend constant = the fill color
        let constant_blend = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::Constant,
            dst_factor: wgpu::BlendFactor::Zero,
            operation: wgpu::BlendOperation::Add,
        };

        let blit = Self::create_pipeline(
            device,
            &shader,
            &blit_layout,
            "fs_blit",
            format,
            wgpu::BlendState::REPLACE,
        );
        let fill = Self::create_pipeline(
            device,
            &shader,
            &fill_layout,
            "fs_fill",
            format,
            wgpu::BlendState {
                color: constant_blend,
                alpha: constant_blend,
            },
        );

        // Magnified pixels stay crisp, minified ones are smoothed
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Blit Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            blit,
            fill,
            layout,
            sampler,
            srgb: format.is_srgb(),
        }
    }

    /// Bind group sampling `view` through this pipeline
    pub fn bind_group(&self, device: &Device, view: &TextureView) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Blit Source Bind Group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    /// Clear the whole of `view`
    pub fn clear(&self, encoder: &mut CommandEncoder, view: &TextureView, color: Color) {
        let load = wgpu::LoadOp::Clear(color.to_wgpu(self.srgb));
        let _pass = Self::begin_pass(encoder, "Clear Pass", view, load);
    }

    /// Fill `rect` of a `bounds`-sized `view` with `color`
    pub fn fill(
        &self,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        rect: Rect,
        bounds: Size,
        color: Color,
    ) {
        let mut pass = Self::begin_pass(encoder, "Fill Pass", view, wgpu::LoadOp::Load);
        if !set_viewport(&mut pass, rect, bounds) {
            return;
        }
        pass.set_pipeline(&self.fill);
        pass.set_blend_constant(color.to_wgpu(self.srgb));
        pass.draw(0..3, 0..1);
    }

    /// Draw the texture behind `source` scaled into `rect`
    pub fn draw(
        &self,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        source: &BindGroup,
        rect: Rect,
        bounds: Size,
    ) {
        let mut pass = Self::begin_pass(encoder, "Blit Pass", view, wgpu::LoadOp::Load);
        if !set_viewport(&mut pass, rect, bounds) {
            return;
        }
        pass.set_pipeline(&self.blit);
        pass.set_bind_group(0, source, &[]);
        pass.draw(0..3, 0..1);
    }

    /// Start a single-color-attachment pass on `view`
    pub fn begin_pass<'e>(
        encoder: &'e mut CommandEncoder,
        label: &str,
        view: &TextureView,
        load: wgpu::LoadOp<wgpu::Color>,
    ) -> wgpu::RenderPass<'e> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }

    fn create_pipeline(
        device: &Device,
        shader: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        fragment_entry: &str,
        format: wgpu::TextureFormat,
        blend: wgpu::BlendState,
    ) -> RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(fragment_entry),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }
}

/// Restrict `pass` to `rect`, clipped to `bounds`. False if nothing is left.
pub fn set_viewport(pass: &mut wgpu::RenderPass<'_>, rect: Rect, bounds: Size) -> bool {
    let rect = rect.clipped_to(bounds);
    if rect.is_empty() {
        return false;
    }

    pass.set_viewport(rect.x, rect.y, rect.w, rect.h, 0.0, 1.0);

    let x0 = rect.x.floor() as u32;
    let y0 = rect.y.floor() as u32;
    let x1 = (rect.right().ceil() as u32).min(bounds.width);
    let y1 = (rect.bottom().ceil() as u32).min(bounds.height);
    if x1 <= x0 || y1 <= y0 {
        return false;
    }
    pass.set_scissor_rect(x0, y0, x1 - x0, y1 - y0);
    true
}
