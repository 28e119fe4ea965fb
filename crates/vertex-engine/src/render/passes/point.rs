use bytemuck::{Pod, Zeroable};

use crate::coords::{ViewTransform, Viewport};
use crate::error::{EngineError, IndexKind};
use crate::render::RenderCtx;
use crate::scene::{MarkerVertex, PrimitiveBatch, Selection, MAX_MARKER_INDEX, SELECTION_SENTINEL};
use crate::shading::PointStyle;

use super::common::{IssueLog, PassCore, PipelineDesc, QuadBuffers, QuadVertex, StreamBuffer};

/// Draws puzzle points as fixed-pixel-size discs with a dark rim.
///
/// Each marker is one instance of a unit quad expanded in the vertex stage.
/// With [`PointStyle::Selectable`] markers whose index is in the selection
/// grow to the selected diameter; [`PointStyle::Fixed`] ignores selection.
pub struct PointPass {
    style: PointStyle,
    shader: String,
    core: PassCore<PointUniform>,
    quad: QuadBuffers,
    instances: StreamBuffer,
    instance_count: u32,

    scratch: Vec<MarkerVertex>,
    clamped: IssueLog,
}

impl PointPass {
    pub fn new(style: PointStyle) -> Self {
        Self {
            shader: super::point_shader_source(),
            style,
            core: PassCore::new("vertex point pass", wgpu::ShaderStages::VERTEX),
            quad: QuadBuffers::default(),
            instances: StreamBuffer::new("vertex point instances"),
            instance_count: 0,
            scratch: Vec::new(),
            clamped: IssueLog::default(),
        }
    }

    /// Markers 10 px across, 15 px when selected.
    pub fn selectable() -> Self {
        Self::new(PointStyle::SELECTABLE)
    }

    /// Markers 5 px across regardless of selection.
    pub fn plain() -> Self {
        Self::new(PointStyle::PLAIN)
    }

    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        transform: &ViewTransform,
        selection: Selection,
        batch: &PrimitiveBatch<MarkerVertex>,
    ) {
        self.core.ensure(
            ctx,
            &PipelineDesc {
                label: "vertex point shader",
                source: &self.shader,
                buffers: &[QuadVertex::layout(), MarkerVertex::instance_layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );
        self.quad.ensure(ctx, "vertex point quad");
        self.core
            .write_uniform(ctx, &PointUniform::new(transform, ctx.viewport, self.style, selection));

        let (clamped, first) = sanitize_into(&mut self.scratch, batch.vertices());
        if self.clamped.note(clamped) {
            if let Some(err) = first {
                log::warn!("{err}; {clamped} markers clamped to {MAX_MARKER_INDEX}");
            }
        }

        self.instances.upload(ctx, bytemuck::cast_slice(&self.scratch));
        self.instance_count = self.scratch.len() as u32;
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        let Some(slice) = self.instances.slice() else { return };
        if !self.core.bind(rpass) || !self.quad.bind(rpass) {
            return;
        }
        rpass.set_vertex_buffer(1, slice);
        rpass.draw_indexed(0..6, 0, 0..self.instance_count);
    }
}

/// Copies `src` into `dst` with marker indices clamped. Returns how many
/// were changed and the error for the first one.
fn sanitize_into(
    dst: &mut Vec<MarkerVertex>,
    src: &[MarkerVertex],
) -> (usize, Option<EngineError>) {
    dst.clear();
    dst.extend(src.iter().map(|m| m.sanitized()));

    let mut offending = src.iter().filter(|m| m.marker_index > MAX_MARKER_INDEX);
    let first = offending.next().map(|m| EngineError::InvalidIndex {
        kind: IndexKind::Marker,
        index: m.marker_index,
        limit: SELECTION_SENTINEL,
    });
    let count = usize::from(first.is_some()) + offending.count();
    (count, first)
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Uniform layout (96 bytes):
///
///  offset  0  view       mat4x4<f32>
///  offset 64  viewport   vec2<f32>   logical px
///  offset 72  diameters  vec2<f32>   (.x = unselected, .y = selected)
///  offset 80  selection  vec2<u32>   u32::MAX = empty slot
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct PointUniform {
    view: [[f32; 4]; 4],
    viewport: [f32; 2],
    diameters: [f32; 2],
    selection: [u32; 2],
    _pad: [u32; 2],
}

impl PointUniform {
    fn new(
        transform: &ViewTransform,
        viewport: Viewport,
        style: PointStyle,
        selection: Selection,
    ) -> Self {
        Self {
            view: transform.to_uniform(),
            viewport: viewport.to_uniform(),
            diameters: style.diameters(),
            selection: style.effective_selection(selection).slots(),
            _pad: [0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<PointUniform>(), 96);
        assert_eq!(std::mem::offset_of!(PointUniform, viewport), 64);
        assert_eq!(std::mem::offset_of!(PointUniform, diameters), 72);
        assert_eq!(std::mem::offset_of!(PointUniform, selection), 80);
    }

    #[test]
    fn selectable_uniform_carries_selection() {
        let u = PointUniform::new(
            &ViewTransform::identity(),
            Viewport::new(800.0, 600.0),
            PointStyle::SELECTABLE,
            Selection::pair(3, 7),
        );
        assert_eq!(u.diameters, [10.0, 15.0]);
        assert_eq!(u.selection, [3, 7]);
        assert_eq!(u.viewport, [800.0, 600.0]);
    }

    #[test]
    fn plain_uniform_never_matches() {
        let u = PointUniform::new(
            &ViewTransform::identity(),
            Viewport::new(0.0, 0.0),
            PointStyle::PLAIN,
            Selection::single(0),
        );
        assert_eq!(u.diameters, [5.0, 5.0]);
        assert_eq!(u.selection, [SELECTION_SENTINEL; 2]);
        assert_eq!(u.viewport, [1.0, 1.0]);
    }

    #[test]
    fn sentinel_marker_is_clamped_before_upload() {
        let mut out = Vec::new();
        let src = [MarkerVertex::new(0.0, 0.0, 4), MarkerVertex::new(1.0, 1.0, u32::MAX)];
        assert_eq!(sanitize_into(&mut out, &src).0, 1);
        assert_eq!(out[0].marker_index, 4);
        assert_eq!(out[1].marker_index, MAX_MARKER_INDEX);
        assert!(!Selection::empty().slots().contains(&out[1].marker_index));
    }

    #[test]
    fn clamp_warning_names_the_offending_marker() {
        let mut out = Vec::new();
        let src = [
            MarkerVertex::new(0.0, 0.0, 1),
            MarkerVertex::new(0.0, 0.0, u32::MAX),
            MarkerVertex::new(0.0, 0.0, u32::MAX),
        ];
        let (count, first) = sanitize_into(&mut out, &src);
        assert_eq!(count, 2);
        match first {
            Some(EngineError::InvalidIndex { kind, index, limit }) => {
                assert_eq!(kind, IndexKind::Marker);
                assert_eq!(index, u32::MAX);
                assert_eq!(limit, SELECTION_SENTINEL);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn valid_markers_report_nothing() {
        let mut out = Vec::new();
        let (count, first) = sanitize_into(&mut out, &[MarkerVertex::new(0.0, 0.0, MAX_MARKER_INDEX)]);
        assert_eq!(count, 0);
        assert!(first.is_none());
        assert_eq!(out[0].marker_index, MAX_MARKER_INDEX);
    }
}
