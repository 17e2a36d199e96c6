//! The cube surface view: shader program bootstrap, GPU buffers and per-frame draw.

use wgpu::util::DeviceExt;

use tumble_engine::render::{
    ShaderProgram, ShaderStage, UniformLocation, compile_shader, link_program,
};
use tumble_ui::prelude::*;

use crate::config::CubeConfig;
use crate::mesh::{CUBE_VERTEX_COUNT, CUBE_VERTICES, Vertex};
use crate::scene::{CubeScene, CubeUniforms};

const VERTEX_SRC: &str = include_str!("shaders/cube.vert.wgsl");
const FRAGMENT_SRC: &str = include_str!("shaders/cube.frag.wgsl");

const MAT4_SIZE: u64 = std::mem::size_of::<glam::Mat4>() as u64;

/// Compiles and links the cube's two shader stages.
///
/// `None` if either stage fails to compile or the pair fails to link; the
/// cause has already been logged.
pub fn build_cube_program() -> Option<ShaderProgram> {
    let vertex = compile_shader(ShaderStage::Vertex, "cube.vert", VERTEX_SRC);
    let fragment = compile_shader(ShaderStage::Fragment, "cube.frag", FRAGMENT_SRC);
    link_program("cube", vertex, fragment)
}

// ── GPU resources ─────────────────────────────────────────────────────────

struct CubeGpu {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    model_view_ubo: wgpu::Buffer,
    projection_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Resolved attribute and uniform locations of a linked cube program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CubeBindings {
    position: u32,
    normal: u32,
    model_view: UniformLocation,
    projection: UniformLocation,
}

impl CubeBindings {
    fn resolve(program: &ShaderProgram) -> Option<Self> {
        let bindings = Self {
            position: program.attrib_location("position")?,
            normal: program.attrib_location("normal")?,
            model_view: program.uniform_location("model_view")?,
            projection: program.uniform_location("projection")?,
        };
        // Both matrices live in a single bind group.
        (bindings.model_view.group == bindings.projection.group).then_some(bindings)
    }
}

fn uniform_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(MAT4_SIZE),
        },
        count: None,
    }
}

impl CubeGpu {
    fn new(ctx: &RenderCtx<'_>, program: &ShaderProgram, bindings: CubeBindings) -> Self {
        let vs = program.create_module(ctx.device, ShaderStage::Vertex);
        let fs = program.create_module(ctx.device, ShaderStage::Fragment);

        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("cube vbo"),
                contents: bytemuck::cast_slice(&CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let make_ubo = |label: &'static str| {
            ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: MAT4_SIZE,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let model_view_ubo = make_ubo("cube model_view ubo");
        let projection_ubo = make_ubo("cube projection ubo");

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("cube bgl"),
                    entries: &[
                        uniform_layout_entry(bindings.model_view.binding),
                        uniform_layout_entry(bindings.projection.binding),
                    ],
                });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cube bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: bindings.model_view.binding,
                    resource: model_view_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: bindings.projection.binding,
                    resource: projection_ubo.as_entire_binding(),
                },
            ],
        });

        // Groups below the one in use stay empty.
        let empty_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("cube empty bgl"),
                entries: &[],
            });
        let group = bindings.model_view.group as usize;
        let mut layouts: Vec<&wgpu::BindGroupLayout> = vec![&empty_layout; group];
        layouts.push(&bind_group_layout);

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("cube pipeline layout"),
                bind_group_layouts: &layouts,
                immediate_size: 0,
            });

        let attributes = Vertex::attributes(bindings.position, bindings.normal);

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cube pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(program.vertex().entry_point()),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout(&attributes)],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(program.fragment().entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            vertex_buffer,
            model_view_ubo,
            projection_ubo,
            bind_group,
        }
    }

    fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        group: u32,
        uniforms: &CubeUniforms,
    ) {
        ctx.queue
            .write_buffer(&self.model_view_ubo, 0, bytemuck::bytes_of(&uniforms.model_view));
        ctx.queue
            .write_buffer(&self.projection_ubo, 0, bytemuck::bytes_of(&uniforms.projection));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cube pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(group, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..CUBE_VERTEX_COUNT, 0..1);
    }
}

// ── CubeView ──────────────────────────────────────────────────────────────

/// Full-screen GPU surface content: one rotating, shaded cube.
///
/// Rendering degrades to clear-only when the program is unavailable; the
/// rotation keeps advancing either way.
pub struct CubeView {
    config: CubeConfig,
    scene: Option<CubeScene>,
    program: Option<ShaderProgram>,
    bindings: Option<CubeBindings>,
    gpu: Option<CubeGpu>,
    warned_missing_program: bool,
}

impl CubeView {
    pub fn new(config: CubeConfig) -> Self {
        Self {
            config,
            scene: None,
            program: None,
            bindings: None,
            gpu: None,
            warned_missing_program: false,
        }
    }
}

impl Default for CubeView {
    fn default() -> Self {
        Self::new(CubeConfig::default())
    }
}

impl SurfaceView for CubeView {
    fn on_context_create(&mut self, ctx: &RenderCtx<'_>) {
        self.scene = Some(CubeScene::new(self.config, ctx.aspect_ratio()));

        self.program = build_cube_program();
        let Some(program) = self.program.as_ref() else {
            return;
        };

        self.bindings = CubeBindings::resolve(program);
        match self.bindings {
            Some(bindings) => {
                self.gpu = Some(CubeGpu::new(ctx, program, bindings));
                log::debug!("cube program `{}` ready: {bindings:?}", program.label());
            }
            None => log::warn!(
                "cube program `{}` lacks the expected attributes or uniforms",
                program.label()
            ),
        }
    }

    fn update(&mut self, _time: &FrameTime) {
        if let Some(scene) = self.scene.as_mut() {
            scene.tick();
        }
    }

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let (Some(gpu), Some(bindings)) = (self.gpu.as_ref(), self.bindings) else {
            if !self.warned_missing_program {
                log::warn!("cube program unavailable; drawing nothing");
                self.warned_missing_program = true;
            }
            return;
        };
        gpu.draw(ctx, target, bindings.model_view.group, &scene.uniforms());
    }
}
