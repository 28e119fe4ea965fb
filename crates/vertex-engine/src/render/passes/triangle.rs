use bytemuck::{Pod, Zeroable};

use crate::coords::ViewTransform;
use crate::paint::{ColorPalette, PALETTE_CAPACITY};
use crate::render::RenderCtx;
use crate::scene::{ColoredVertex, PrimitiveBatch};

use super::common::{IssueLog, PassCore, PipelineDesc, StreamBuffer};

/// Draws filled triangles colored per vertex from the palette uniform.
///
/// Vertices are consumed three at a time; a trailing partial triangle is
/// ignored. Palette indices past the end clamp to the last entry.
pub struct TrianglePass {
    shader: String,
    core: PassCore<TriangleUniform>,
    vertices: StreamBuffer,
    vertex_count: u32,

    partial: IssueLog,
    out_of_range: IssueLog,
}

impl Default for TrianglePass {
    fn default() -> Self {
        Self::new()
    }
}

impl TrianglePass {
    pub fn new() -> Self {
        Self {
            shader: super::triangle_shader_source(),
            core: PassCore::new("vertex triangle pass", wgpu::ShaderStages::VERTEX),
            vertices: StreamBuffer::new("vertex triangle vbo"),
            vertex_count: 0,
            partial: IssueLog::default(),
            out_of_range: IssueLog::default(),
        }
    }

    /// Uploads the uniform and batch for this frame.
    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        transform: &ViewTransform,
        palette: &ColorPalette,
        batch: &PrimitiveBatch<ColoredVertex>,
    ) {
        self.core.ensure(
            ctx,
            &PipelineDesc {
                label: "vertex triangle shader",
                source: &self.shader,
                buffers: &[ColoredVertex::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );
        self.core.write_uniform(ctx, &TriangleUniform::new(transform, palette));

        let leftover = batch.len() % 3;
        if self.partial.note(leftover) {
            log::warn!("triangle batch has {leftover} trailing vertices; ignored");
        }

        let complete = batch.complete(3);
        let invalid = count_invalid_indices(palette, complete);
        if self.out_of_range.note(invalid) {
            log::warn!(
                "{invalid} triangle vertices use palette indices past {} entries; clamped",
                palette.len()
            );
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

fn count_invalid_indices(palette: &ColorPalette, vertices: &[ColoredVertex]) -> usize {
    vertices
        .iter()
        .filter(|v| palette.try_get(v.color_index).is_err())
        .count()
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Uniform layout (1680 bytes):
///
///  offset    0  view         mat4x4<f32>
///  offset   64  palette      array<vec4<f32>, 100>
///  offset 1664  palette_len  u32
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct TriangleUniform {
    view: [[f32; 4]; 4],
    palette: [[f32; 4]; PALETTE_CAPACITY],
    palette_len: u32,
    _pad: [u32; 3],
}

impl TriangleUniform {
    pub(super) fn new(transform: &ViewTransform, palette: &ColorPalette) -> Self {
        Self {
            view: transform.to_uniform(),
            palette: palette.to_uniform_array(),
            palette_len: palette.len() as u32,
            _pad: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Rgb;

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<TriangleUniform>(), 1680);
        assert_eq!(std::mem::offset_of!(TriangleUniform, palette), 64);
        assert_eq!(std::mem::offset_of!(TriangleUniform, palette_len), 1664);
    }

    #[test]
    fn uniform_carries_palette_and_length() {
        let palette =
            ColorPalette::from_colors(&[Rgb::new(1.0, 0.0, 0.0), Rgb::new(0.0, 1.0, 0.0)])
                .unwrap();
        let u = TriangleUniform::new(&ViewTransform::identity(), &palette);
        assert_eq!(u.palette_len, 2);
        assert_eq!(u.palette[1], [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(u.palette[2], [0.0; 4]);
        assert_eq!(u.view[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn counts_indices_past_palette_end() {
        let palette = ColorPalette::from_colors(&[Rgb::WHITE, Rgb::BLACK]).unwrap();
        let verts = [
            ColoredVertex::new(0.0, 0.0, 0),
            ColoredVertex::new(0.0, 0.0, 1),
            ColoredVertex::new(0.0, 0.0, 2),
            ColoredVertex::new(0.0, 0.0, 99),
        ];
        assert_eq!(count_invalid_indices(&palette, &verts), 2);
        assert_eq!(count_invalid_indices(&ColorPalette::new(), &verts), 4);
    }
}
