use crate::coords::ViewTransform;
use crate::render::RenderCtx;
use crate::scene::{PrimitiveBatch, TexturedMarkerVertex};
use crate::shading::HIGHLIGHT_COLOR;

use super::common::{IssueLog, PassCore, PipelineDesc, StreamBuffer, TintUniform};

/// Vertices per marker quad (two triangles).
const QUAD_VERTICES: usize = 6;

/// Draws category markers: discs on pre-built quads whose interior is the
/// highlight color for category 0 and white otherwise.
///
/// Quads are sized in puzzle space, so they scale with the view transform.
/// Vertices are consumed six at a time; a trailing partial quad is ignored.
pub struct MarkerPass {
    shader: String,
    core: PassCore<TintUniform>,
    vertices: StreamBuffer,
    vertex_count: u32,

    partial: IssueLog,
}

impl Default for MarkerPass {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerPass {
    pub fn new() -> Self {
        Self {
            shader: super::marker_shader_source(),
            core: PassCore::new(
                "vertex marker pass",
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ),
            vertices: StreamBuffer::new("vertex marker vbo"),
            vertex_count: 0,
            partial: IssueLog::default(),
        }
    }

    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        transform: &ViewTransform,
        batch: &PrimitiveBatch<TexturedMarkerVertex>,
    ) {
        self.core.ensure(
            ctx,
            &PipelineDesc {
                label: "vertex marker shader",
                source: &self.shader,
                buffers: &[TexturedMarkerVertex::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );
        self.core.write_uniform(
            ctx,
            &TintUniform { view: transform.to_uniform(), tint: HIGHLIGHT_COLOR.to_array4() },
        );

        let (complete, leftover) = whole_quads(batch);
        if self.partial.note(leftover) {
            log::warn!("marker batch has {leftover} trailing vertices; ignored");
        }

        self.vertices.upload(ctx, bytemuck::cast_slice(complete));
        self.vertex_count = complete.len() as u32;
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        let Some(slice) = self.vertices.slice() else { return };
        if !self.core.bind(rpass) {
            return;
        }
        rpass.set_vertex_buffer(0, slice);
        rpass.draw(0..self.vertex_count, 0..1);
    }
}

/// The whole quads of `batch` and the number of trailing vertices dropped.
fn whole_quads(batch: &PrimitiveBatch<TexturedMarkerVertex>) -> (&[TexturedMarkerVertex], usize) {
    let complete = batch.complete(QUAD_VERTICES);
    (complete, batch.len() - complete.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_partial_quad_is_dropped() {
        let mut vertices = Vec::new();
        vertices.extend(TexturedMarkerVertex::quad([0.0, 0.0], 1.0, 0));
        vertices.extend(&TexturedMarkerVertex::quad([2.0, 0.0], 1.0, 1)[..3]);
        let batch = PrimitiveBatch::new(vertices);

        assert_eq!(batch.len(), 9);
        let (complete, leftover) = whole_quads(&batch);
        assert_eq!(complete.len(), 6);
        assert_eq!(leftover, 3);
        assert!(complete.iter().all(|v| v.category_index == 0));
    }

    #[test]
    fn whole_quads_keep_every_vertex() {
        let batch: PrimitiveBatch<TexturedMarkerVertex> = (0..2)
            .flat_map(|i| TexturedMarkerVertex::quad([i as f32, 0.0], 1.0, i))
            .collect();
        let (complete, leftover) = whole_quads(&batch);
        assert_eq!(complete.len(), 12);
        assert_eq!(leftover, 0);
    }

    #[test]
    fn partial_quad_warning_fires_once_per_count() {
        let mut log = IssueLog::default();
        assert!(log.note(3));
        assert!(!log.note(3));
        assert!(!log.note(0));
        assert!(log.note(3));
    }
}
