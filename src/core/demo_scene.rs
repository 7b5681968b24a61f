use std::time::Instant;

use glam::Vec2;
use wgpu::util::DeviceExt;
use wgpu::{BindGroup, Buffer, CommandEncoder, RenderPipeline, TextureView};

use super::blit::{set_viewport, BlitPipeline};
use super::gpu_context::GpuContext;
use super::wgpu_backend::GpuScene;
use crate::math::{hsv_to_rgb, Rect, Size};

const CELL_SIZE: f32 = 64.0;

/// Scene uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniform {
    viewport: [f32; 4],
    image_size: [f32; 2],
    time: f32,
    cell_size: f32,
    color_a: [f32; 4],
    color_b: [f32; 4],
}

impl SceneUniform {
    fn new(viewport: Rect, image_size: Vec2, time: f32) -> Self {
        let hue = time * 0.05;
        let [ar, ag, ab] = hsv_to_rgb(hue, 0.6, 0.9);
        let [br, bg, bb] = hsv_to_rgb(hue + 0.5, 0.6, 0.3);
        Self {
            viewport: [viewport.x, viewport.y, viewport.w, viewport.h],
            image_size: image_size.to_array(),
            time,
            cell_size: CELL_SIZE,
            color_a: [ar, ag, ab, 1.0],
            color_b: [br, bg, bb, 1.0],
        }
    }
}

/// Animated test pattern standing in for game content
///
/// Draws a checkerboard measured in image pixels, so a 1:1 frame and a
/// scaled frame are easy to tell apart.
pub struct DemoScene {
    pipeline: RenderPipeline,
    uniform_buffer: Buffer,
    bind_group: BindGroup,
    started: Instant,
}

impl DemoScene {
    pub fn new(gpu: &GpuContext, format: wgpu::TextureFormat) -> Self {
        let device = gpu.device();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Demo Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/scene.wgsl").into()),
        });

        let uniform = SceneUniform::new(Rect::default(), Vec2::ZERO, 0.0);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Demo Scene Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Demo Scene Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Demo Scene Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Demo Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Demo Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
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
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            started: Instant::now(),
        }
    }
}

impl GpuScene for DemoScene {
    fn render(
        &mut self,
        gpu: &GpuContext,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        bounds: Size,
        viewport: Rect,
        image_size: Vec2,
    ) {
        let time = self.started.elapsed().as_secs_f32();
        let uniform = SceneUniform::new(viewport, image_size, time);
        gpu.queue()
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));

        let mut pass =
            BlitPipeline::begin_pass(encoder, "Demo Scene Pass", view, wgpu::LoadOp::Load);
        if !set_viewport(&mut pass, viewport, bounds) {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}
