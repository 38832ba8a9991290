//! wgpu surface backend for the point-sprite renderer

use crate::backend::RenderBackend;
use crate::device::GpuContext;
use crate::renderer::SceneUniforms;
use bytemuck::Zeroable;
use nalgebra::Matrix4;
use scatterview_core::{Error, PointRecord, Result};
use std::mem::size_of;

/// Four strip vertices per point instance
const SPRITE_CORNERS: u32 = 4;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Remaps OpenGL clip depth [-1, 1] to wgpu's [0, 1]
#[rustfmt::skip]
fn opengl_to_wgpu() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

const POINT_ATTRIBUTES: [wgpu::VertexAttribute; 4] = [
    // Position
    wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    },
    // Size
    wgpu::VertexAttribute {
        offset: size_of::<[f32; 3]>() as wgpu::BufferAddress,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32,
    },
    // Foreground color
    wgpu::VertexAttribute {
        offset: size_of::<[f32; 4]>() as wgpu::BufferAddress,
        shader_location: 2,
        format: wgpu::VertexFormat::Float32x4,
    },
    // Background color
    wgpu::VertexAttribute {
        offset: size_of::<[f32; 8]>() as wgpu::BufferAddress,
        shader_location: 3,
        format: wgpu::VertexFormat::Float32x4,
    },
];

/// Per-instance vertex layout of [`PointRecord`]
pub fn point_record_layout<'a>() -> wgpu::VertexBufferLayout<'a> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<PointRecord>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &POINT_ATTRIBUTES,
    }
}

/// Renders point sprites into a wgpu surface
pub struct WgpuBackend<'window> {
    gpu_context: GpuContext,
    surface: wgpu::Surface<'window>,
    surface_config: wgpu::SurfaceConfiguration,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group_layout: wgpu::BindGroupLayout,
    uniform_bind_group: wgpu::BindGroup,
    depth_view: Option<wgpu::TextureView>,
    pipeline: Option<wgpu::RenderPipeline>,
    vertex_buffer: Option<wgpu::Buffer>,
}

impl<'window> WgpuBackend<'window> {
    /// Create a backend presenting to `target` at `width` x `height` pixels
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'window>>,
        width: u32,
        height: u32,
        enable_depth_test: bool,
    ) -> Result<Self> {
        let (gpu_context, surface) = GpuContext::with_surface(target).await?;

        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("Surface reports no supported formats".to_string()))?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu_context.device, &surface_config);

        let uniform_buffer = gpu_context.create_buffer_init(
            "Scene Uniform Buffer",
            &[SceneUniforms::zeroed()],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let uniform_bind_group_layout =
            gpu_context
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                    label: Some("scene_bind_group_layout"),
                });

        let uniform_bind_group = gpu_context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("scene_bind_group"),
        });

        let depth_view = enable_depth_test
            .then(|| gpu_context.create_depth_view(surface_config.width, surface_config.height));

        Ok(Self {
            gpu_context,
            surface,
            surface_config,
            uniform_buffer,
            uniform_bind_group_layout,
            uniform_bind_group,
            depth_view,
            pipeline: None,
            vertex_buffer: None,
        })
    }

    fn build_pipeline(&self, source: &str) -> wgpu::RenderPipeline {
        let device = &self.gpu_context.device;
        let shader = self.gpu_context.create_shader_module("Scatter Point Shader", source);

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scatter Point Pipeline Layout"),
            bind_group_layouts: &[&self.uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scatter Point Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[point_record_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: self.depth_view.as_ref().map(|_| wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        })
    }

    fn acquire_frame(&mut self) -> Result<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost, reconfiguring");
                self.surface.configure(&self.gpu_context.device, &self.surface_config);
                self.surface
                    .get_current_texture()
                    .map_err(|e| Error::Gpu(format!("Failed to get surface texture: {:?}", e)))
            }
            Err(e) => Err(Error::Gpu(format!("Failed to get surface texture: {:?}", e))),
        }
    }
}

impl<'window> RenderBackend for WgpuBackend<'window> {
    fn compile_program(&mut self, source: &str) -> Result<()> {
        self.gpu_context
            .device
            .push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = self.build_pipeline(source);
        if let Some(error) = pollster::block_on(self.gpu_context.device.pop_error_scope()) {
            return Err(Error::ShaderCompilation(error.to_string()));
        }
        self.pipeline = Some(pipeline);
        Ok(())
    }

    fn upload_points(&mut self, points: &[PointRecord]) -> Result<()> {
        // Swap only after the new buffer exists so a frame never sees a partial upload.
        let buffer = self.gpu_context.create_buffer_init(
            "Scatter Point Buffer",
            points,
            wgpu::BufferUsages::VERTEX,
        );
        self.vertex_buffer = Some(buffer);
        Ok(())
    }

    fn write_uniforms(&mut self, uniforms: &SceneUniforms) {
        let projection = opengl_to_wgpu() * Matrix4::from(uniforms.projection);
        let corrected = SceneUniforms {
            projection: projection.into(),
            ..*uniforms
        };
        self.gpu_context
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&corrected));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.gpu_context.device, &self.surface_config);
        if self.depth_view.is_some() {
            self.depth_view = Some(self.gpu_context.create_depth_view(width, height));
        }
    }

    fn draw(&mut self, clear_color: [f64; 4], point_count: u32) -> Result<()> {
        if self.pipeline.is_none() {
            return Err(Error::InvalidState("draw before program compiled".to_string()));
        }

        let output = self.acquire_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.gpu_context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Scatter Render Encoder"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scatter Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear_color[0],
                            g: clear_color[1],
                            b: clear_color[2],
                            a: clear_color[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: self.depth_view.as_ref().map(|depth_view| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view: depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let (Some(pipeline), Some(buffer)) = (&self.pipeline, &self.vertex_buffer) {
                if point_count > 0 {
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(0..SPRITE_CORNERS, 0..point_count);
                }
            }
        }

        self.gpu_context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(&mut self) {
        self.vertex_buffer = None;
        self.pipeline = None;
        self.depth_view = None;
        self.uniform_buffer.destroy();
    }
}
