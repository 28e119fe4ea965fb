use crate::coords::{ViewTransform, Viewport};
use crate::paint::ColorPalette;

use super::{ColoredVertex, MarkerVertex, PrimitiveBatch, Selection, TexturedMarkerVertex, Vertex2D};

/// Everything the renderer consumes for one frame.
///
/// Borrowed from the collaborator; the renderer never keeps it past the
/// `render` call. Empty batches skip their pass.
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame<'a> {
    pub transform: &'a ViewTransform,
    pub palette: &'a ColorPalette,
    pub selection: Selection,

    /// Filled triangles, three vertices per triangle.
    pub triangles: &'a PrimitiveBatch<ColoredVertex>,
    /// Edge lines, two vertices per line.
    pub edges: &'a PrimitiveBatch<Vertex2D>,
    /// Fixed-size markers without selection feedback.
    pub plain_points: &'a PrimitiveBatch<MarkerVertex>,
    /// Markers that grow while selected.
    pub points: &'a PrimitiveBatch<MarkerVertex>,
    /// Category quads, six vertices per marker.
    pub markers: &'a PrimitiveBatch<TexturedMarkerVertex>,
}

/// Geometry/selection provider driven once per frame.
///
/// `prepare` runs first with the current viewport so the provider can rebuild
/// batches and recompute its transform (resizing is the provider's job);
/// `frame` then lends the result to the renderer.
pub trait SceneProvider {
    fn prepare(&mut self, viewport: Viewport, frame_index: u64);

    fn frame(&self) -> SceneFrame<'_>;
}
