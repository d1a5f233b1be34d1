use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::scene::DrawList;

use super::{RenderCtx, RenderTarget};

/// Policy for shader/pipeline validation failures at setup.
///
/// The GL program this pipeline descends from printed the compiler diagnostic
/// and kept running with whatever program object resulted. `Permissive`
/// reproduces that behavior; `Strict` turns the failure into a setup error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderPolicy {
    /// Validation failure aborts setup with an error.
    Strict,
    /// Validation failure is logged; setup continues with the resulting
    /// pipeline, which may render incorrectly or not at all.
    Permissive,
}

/// Vertex of the shared quad mesh: a 3D position, nothing else.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    position: [f32; 3],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Base quad: half-extent 0.25 about the origin, CCW winding via the index
/// list. Immutable after upload.
const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [0.25, 0.25, 0.0] },   // top right
    QuadVertex { position: [0.25, -0.25, 0.0] },  // bottom right
    QuadVertex { position: [-0.25, -0.25, 0.0] }, // bottom left
    QuadVertex { position: [-0.25, 0.25, 0.0] },  // top left
];

/// Two triangles over the 4 shared vertices. Immutable after upload.
const QUAD_INDICES: [u16; 6] = [0, 1, 3, 1, 2, 3];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ProjectionUniform {
    matrix: [[f32; 4]; 4],
}

/// Per-draw uniform slot: model transform + solid color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniforms {
    transform: [[f32; 4]; 4],
    color: [f32; 4],
}

fn round_up_to(v: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    (v + (align - 1)) & !(align - 1)
}

/// Decides whether pipeline setup proceeds after the validation error scope.
///
/// `error` carries the compiler/linker diagnostic when validation failed.
/// Strict turns the failure into a setup error; Permissive logs it and keeps
/// whatever pipeline resulted.
fn apply_shader_policy(error: Option<String>, policy: ShaderPolicy) -> Result<()> {
    let Some(err) = error else {
        return Ok(());
    };

    log::error!("quad shader/pipeline validation failed: {err}");

    match policy {
        ShaderPolicy::Strict => anyhow::bail!("quad pipeline setup failed: {err}"),
        ShaderPolicy::Permissive => {
            log::warn!("continuing with a possibly-invalid pipeline (permissive mode)");
            Ok(())
        }
    }
}

/// Renders instances of the shared quad mesh as outlines.
///
/// One pipeline, one vertex/index buffer pair, one projection UBO uploaded per
/// frame, and a dynamic-offset uniform buffer holding one (transform, color)
/// slot per descriptor. Each frame issues one indexed draw of 6 indices per
/// descriptor, in list order.
pub struct QuadRenderer {
    projection: Mat4,

    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,

    projection_ubo: wgpu::Buffer,
    draw_ubo: wgpu::Buffer,
    slot_stride: u64,
    slot_capacity: usize,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
}

impl QuadRenderer {
    /// Creates the pipeline and all static GPU resources.
    ///
    /// Shader compilation and pipeline linking happen here, wrapped in a
    /// validation error scope. On failure the diagnostic is logged with the
    /// failing stage; `policy` decides whether setup proceeds.
    pub fn new(ctx: &RenderCtx<'_>, projection: Mat4, policy: ShaderPolicy) -> Result<Self> {
        let error_scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quadrille quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("quadrille quad bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: std::num::NonZeroU64::new(
                                    std::mem::size_of::<ProjectionUniform>() as u64,
                                ),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::VERTEX
                                | wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: true,
                                min_binding_size: std::num::NonZeroU64::new(
                                    std::mem::size_of::<DrawUniforms>() as u64,
                                ),
                            },
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("quadrille quad pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quadrille quad pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
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
                // Outlined, not filled; requires Features::POLYGON_MODE_LINE.
                polygon_mode: wgpu::PolygonMode::Line,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let validation = pollster::block_on(error_scope.pop());
        apply_shader_policy(validation.map(|e| e.to_string()), policy)?;

        let quad_vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadrille quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadrille quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let projection_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quadrille projection ubo"),
            size: std::mem::size_of::<ProjectionUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Dynamic offsets have to land on the device's uniform alignment.
        let align = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        let slot_stride = round_up_to(std::mem::size_of::<DrawUniforms>() as u64, align);

        let slot_capacity = 8;
        let draw_ubo = Self::create_draw_ubo(ctx.device, slot_stride, slot_capacity);
        let bind_group = Self::create_bind_group(
            ctx.device,
            &bind_group_layout,
            &projection_ubo,
            &draw_ubo,
        );

        Ok(Self {
            projection,
            pipeline,
            bind_group_layout,
            bind_group,
            projection_ubo,
            draw_ubo,
            slot_stride,
            slot_capacity,
            quad_vbo,
            quad_ibo,
        })
    }

    /// Renders `draw_list` into `target`.
    ///
    /// The mesh, pipeline and projection are bound once; each descriptor gets
    /// its own uniform slot and one indexed draw, in list order.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        if draw_list.is_empty() {
            return;
        }

        self.ensure_slot_capacity(ctx, draw_list.len());

        // Projection does not change across draws; once per frame is enough.
        let proj = ProjectionUniform {
            matrix: self.projection.to_cols_array_2d(),
        };
        ctx.queue
            .write_buffer(&self.projection_ubo, 0, bytemuck::bytes_of(&proj));

        for (i, descriptor) in draw_list.iter().enumerate() {
            let slot = DrawUniforms {
                transform: descriptor.transform.to_cols_array_2d(),
                color: descriptor.color.to_array(),
            };
            ctx.queue.write_buffer(
                &self.draw_ubo,
                i as u64 * self.slot_stride,
                bytemuck::bytes_of(&slot),
            );
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("quadrille quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for i in 0..draw_list.len() {
            let offset = (i as u64 * self.slot_stride) as u32;
            rpass.set_bind_group(0, &self.bind_group, &[offset]);
            rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
        }
    }

    fn ensure_slot_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.slot_capacity {
            return;
        }

        let new_cap = required.next_power_of_two();
        self.draw_ubo = Self::create_draw_ubo(ctx.device, self.slot_stride, new_cap);
        self.bind_group = Self::create_bind_group(
            ctx.device,
            &self.bind_group_layout,
            &self.projection_ubo,
            &self.draw_ubo,
        );
        self.slot_capacity = new_cap;
    }

    fn create_draw_ubo(device: &wgpu::Device, stride: u64, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quadrille draw ubo"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        projection_ubo: &wgpu::Buffer,
        draw_ubo: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quadrille quad bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: projection_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: draw_ubo,
                        offset: 0,
                        size: std::num::NonZeroU64::new(
                            std::mem::size_of::<DrawUniforms>() as u64
                        ),
                    }),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── GPU struct layout ─────────────────────────────────────────────────

    #[test]
    fn draw_uniforms_layout_matches_wgsl() {
        // mat4x4<f32> (64) + vec4<f32> (16)
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 80);
        assert_eq!(std::mem::align_of::<DrawUniforms>(), 4);
    }

    #[test]
    fn projection_uniform_is_one_mat4() {
        assert_eq!(std::mem::size_of::<ProjectionUniform>(), 64);
    }

    #[test]
    fn quad_vertex_is_three_floats() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 12);
    }

    // ── mesh constants ────────────────────────────────────────────────────

    #[test]
    fn indices_reference_all_four_vertices() {
        let mut seen = [false; 4];
        for &i in &QUAD_INDICES {
            seen[i as usize] = true;
        }
        assert_eq!(seen, [true; 4]);
        assert_eq!(QUAD_INDICES.len(), 6);
    }

    #[test]
    fn quad_has_quarter_half_extent() {
        for v in &QUAD_VERTICES {
            assert_eq!(v.position[0].abs(), 0.25);
            assert_eq!(v.position[1].abs(), 0.25);
            assert_eq!(v.position[2], 0.0);
        }
    }

    // ── shader policy ─────────────────────────────────────────────────────

    #[test]
    fn strict_policy_aborts_setup_on_validation_failure() {
        let res = apply_shader_policy(
            Some("vertex stage: unknown identifier".to_string()),
            ShaderPolicy::Strict,
        );
        let err = res.unwrap_err();
        // The diagnostic text is preserved in the setup error.
        assert!(err.to_string().contains("unknown identifier"));
    }

    #[test]
    fn permissive_policy_continues_after_validation_failure() {
        let res = apply_shader_policy(
            Some("vertex stage: unknown identifier".to_string()),
            ShaderPolicy::Permissive,
        );
        assert!(res.is_ok());
    }

    #[test]
    fn clean_validation_scope_proceeds_under_both_policies() {
        assert!(apply_shader_policy(None, ShaderPolicy::Strict).is_ok());
        assert!(apply_shader_policy(None, ShaderPolicy::Permissive).is_ok());
    }

    // ── slot stride ───────────────────────────────────────────────────────

    #[test]
    fn slot_stride_respects_uniform_alignment() {
        // Typical device alignment.
        assert_eq!(round_up_to(80, 256), 256);
        // Already aligned values pass through.
        assert_eq!(round_up_to(256, 256), 256);
        assert_eq!(round_up_to(80, 16), 80);
    }
}
