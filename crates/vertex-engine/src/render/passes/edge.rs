use crate::coords::ViewTransform;
use crate::paint::Color;
use crate::render::RenderCtx;
use crate::scene::{PrimitiveBatch, Vertex2D};

use super::common::{IssueLog, PassCore, PipelineDesc, StreamBuffer, TintUniform};

/// Edge color (mid gray, opaque).
pub const EDGE_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);

/// Draws puzzle edges as a line list in a single uniform color.
pub struct EdgePass {
    shader: String,
    core: PassCore<TintUniform>,
    vertices: StreamBuffer,
    vertex_count: u32,

    odd: IssueLog,
}

impl Default for EdgePass {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgePass {
    pub fn new() -> Self {
        Self {
            shader: super::edge_shader_source(),
            core: PassCore::new(
                "vertex edge pass",
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ),
            vertices: StreamBuffer::new("vertex edge vbo"),
            vertex_count: 0,
            odd: IssueLog::default(),
        }
    }

    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        transform: &ViewTransform,
        batch: &PrimitiveBatch<Vertex2D>,
    ) {
        self.core.ensure(
            ctx,
            &PipelineDesc {
                label: "vertex edge shader",
                source: &self.shader,
                buffers: &[Vertex2D::layout()],
                topology: wgpu::PrimitiveTopology::LineList,
            },
        );
        self.core.write_uniform(
            ctx,
            &TintUniform { view: transform.to_uniform(), tint: EDGE_COLOR.to_array() },
        );

        if self.odd.note(batch.len() % 2) {
            log::warn!("edge batch has an unpaired trailing vertex; ignored");
        }

        let complete = batch.complete(2);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_tinted_opaque_gray() {
        let u = TintUniform { view: ViewTransform::identity().to_uniform(), tint: EDGE_COLOR.to_array() };
        assert_eq!(u.tint, [0.5, 0.5, 0.5, 1.0]);
    }
}
