//! Shared GPU types and utilities used by all passes.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── tint uniform ──────────────────────────────────────────────────────────

/// View matrix plus one color; used by the edge and category-marker passes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct TintUniform {
    pub view: [[f32; 4]; 4],
    pub tint: [f32; 4],
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1, +y down
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── pipeline ──────────────────────────────────────────────────────────────

/// Everything that differs between the passes' pipelines.
pub(super) struct PipelineDesc<'a> {
    pub label: &'a str,
    pub source: &'a str,
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub topology: wgpu::PrimitiveTopology,
}

/// Pipeline, single uniform buffer and its bind group, rebuilt when the
/// surface format changes.
pub(super) struct PassCore<U> {
    label: &'static str,
    visibility: wgpu::ShaderStages,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    ubo: Option<wgpu::Buffer>,

    _uniform: std::marker::PhantomData<U>,
}

impl<U: Pod> PassCore<U> {
    pub(super) fn new(label: &'static str, visibility: wgpu::ShaderStages) -> Self {
        Self {
            label,
            visibility,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            ubo: None,
            _uniform: std::marker::PhantomData,
        }
    }

    pub(super) fn ensure(&mut self, ctx: &RenderCtx<'_>, desc: &PipelineDesc<'_>) {
        self.ensure_pipeline(ctx, desc);
        self.ensure_bindings(ctx);
    }

    pub(super) fn write_uniform(&self, ctx: &RenderCtx<'_>, uniform: &U) {
        let Some(ubo) = self.ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(uniform));
    }

    /// Sets pipeline and bind group. Returns `false` if not yet prepared.
    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) -> bool {
        let Some(pipeline) = self.pipeline.as_ref() else { return false };
        let Some(bind_group) = self.bind_group.as_ref() else { return false };
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        true
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, desc: &PipelineDesc<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(desc.source.into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(self.label),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: self.visibility,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: uniform_min_binding_size::<U>(),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(self.label),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: desc.buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("{}: pipeline built for {:?}", self.label, ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.label),
            size: std::mem::size_of::<U>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(self.label),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }
}

/// Minimum binding size for a uniform of type `U`; `None` only for ZSTs.
pub(super) fn uniform_min_binding_size<U>() -> Option<wgpu::BufferSize> {
    wgpu::BufferSize::new(std::mem::size_of::<U>() as u64)
}

// ── static quad ───────────────────────────────────────────────────────────

/// Unit quad shared by the instanced point passes.
#[derive(Default)]
pub(super) struct QuadBuffers {
    vbo: Option<wgpu::Buffer>,
    ibo: Option<wgpu::Buffer>,
}

impl QuadBuffers {
    pub(super) fn ensure(&mut self, ctx: &RenderCtx<'_>, label: &str) {
        if self.vbo.is_some() && self.ibo.is_some() {
            return;
        }

        self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    /// Binds the quad at vertex slot 0 plus the index buffer.
    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) -> bool {
        let Some(vbo) = self.vbo.as_ref() else { return false };
        let Some(ibo) = self.ibo.as_ref() else { return false };
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        true
    }
}

// ── streamed vertex data ──────────────────────────────────────────────────

/// Growable GPU buffer that skips the upload when the bytes did not change.
///
/// Keeps a CPU shadow of the last upload and compares it byte for byte.
pub(super) struct StreamBuffer {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
    shadow: Vec<u8>,
}

impl StreamBuffer {
    pub(super) fn new(label: &'static str) -> Self {
        Self { label, buffer: None, capacity: 0, shadow: Vec::new() }
    }

    /// Makes `bytes` the buffer contents. Returns `true` if a write was issued.
    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>, bytes: &[u8]) -> bool {
        let grown = self.ensure_capacity(ctx, bytes.len() as u64);
        if !needs_upload(&self.shadow, bytes, grown) {
            return false;
        }
        let Some(buffer) = self.buffer.as_ref() else { return false };

        if !bytes.is_empty() {
            ctx.queue.write_buffer(buffer, 0, bytes);
        }
        self.shadow.clear();
        self.shadow.extend_from_slice(bytes);
        true
    }

    /// Bytes currently valid in the buffer.
    #[inline]
    pub(super) fn len(&self) -> u64 {
        self.shadow.len() as u64
    }

    /// Slice covering the valid bytes; `None` when empty.
    pub(super) fn slice(&self) -> Option<wgpu::BufferSlice<'_>> {
        if self.shadow.is_empty() {
            return None;
        }
        self.buffer.as_ref().map(|b| b.slice(..self.len()))
    }

    fn ensure_capacity(&mut self, ctx: &RenderCtx<'_>, required: u64) -> bool {
        if required <= self.capacity && self.buffer.is_some() {
            return false;
        }
        let new_cap = grown_capacity(required);
        self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.label),
            size: new_cap,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.capacity = new_cap;
        log::trace!("{}: grown to {new_cap} bytes", self.label);
        true
    }
}

/// Buffer size for at least `required` bytes; aligned to wgpu's copy size.
fn grown_capacity(required: u64) -> u64 {
    let bytes = required.next_power_of_two().max(256);
    bytes.div_ceil(wgpu::COPY_BUFFER_ALIGNMENT) * wgpu::COPY_BUFFER_ALIGNMENT
}

#[inline]
fn needs_upload(shadow: &[u8], bytes: &[u8], reallocated: bool) -> bool {
    reallocated || shadow != bytes
}

// ── per-frame diagnostics ─────────────────────────────────────────────────

/// Suppresses repeats of a per-frame warning while its count stays the same.
#[derive(Debug, Default)]
pub(super) struct IssueLog {
    last: usize,
}

impl IssueLog {
    /// Records this frame's count. Returns `true` when it is non-zero and
    /// differs from the previous frame.
    pub(super) fn note(&mut self, count: usize) -> bool {
        let changed = count != self.last;
        self.last = count;
        changed && count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_respect_16_byte_layout() {
        assert_eq!(std::mem::size_of::<TintUniform>(), 80);
        assert_eq!(std::mem::size_of::<TintUniform>() % 16, 0);
    }

    #[test]
    fn grown_capacity_is_power_of_two_and_copy_aligned() {
        assert_eq!(grown_capacity(0), 256);
        assert_eq!(grown_capacity(12), 256);
        assert_eq!(grown_capacity(257), 512);
        assert_eq!(grown_capacity(4096), 4096);
        assert_eq!(grown_capacity(4097) % wgpu::COPY_BUFFER_ALIGNMENT, 0);
    }

    #[test]
    fn unchanged_bytes_skip_upload() {
        assert!(!needs_upload(&[1, 2, 3], &[1, 2, 3], false));
        assert!(needs_upload(&[1, 2, 3], &[1, 2, 4], false));
        assert!(needs_upload(&[1, 2, 3], &[1, 2], false));
        assert!(needs_upload(&[1, 2, 3], &[1, 2, 3], true));
    }

    #[test]
    fn issue_log_reports_changes_only() {
        let mut log = IssueLog::default();
        assert!(!log.note(0));
        assert!(log.note(2));
        assert!(!log.note(2));
        assert!(log.note(3));
        assert!(!log.note(0));
        assert!(log.note(3));
    }

    #[test]
    fn quad_indices_form_two_triangles() {
        assert_eq!(QUAD_INDICES.len(), 6);
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }

    #[test]
    fn uniform_binding_size_is_non_zero() {
        assert_eq!(uniform_min_binding_size::<TintUniform>().map(|s| s.get()), Some(80));
    }
}
