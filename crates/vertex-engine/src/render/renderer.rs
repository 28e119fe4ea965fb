use crate::render::passes::{EdgePass, MarkerPass, PointPass, TrianglePass};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::SceneFrame;

/// Draws a whole [`SceneFrame`] with one pass per primitive kind.
///
/// Draw order, back to front: triangles, edges, plain points, selectable
/// points, category markers. All draws share one render pass that loads the
/// target, so the caller clears it beforehand.
pub struct SceneRenderer {
    triangles: TrianglePass,
    edges: EdgePass,
    plain_points: PointPass,
    points: PointPass,
    markers: MarkerPass,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            triangles: TrianglePass::new(),
            edges: EdgePass::new(),
            plain_points: PointPass::plain(),
            points: PointPass::selectable(),
            markers: MarkerPass::new(),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: &SceneFrame<'_>,
    ) {
        if !ctx.viewport.is_valid() {
            log::trace!("skipping scene render: viewport {:?}", ctx.viewport);
            return;
        }

        self.triangles.prepare(ctx, frame.transform, frame.palette, frame.triangles);
        self.edges.prepare(ctx, frame.transform, frame.edges);
        self.plain_points.prepare(ctx, frame.transform, frame.selection, frame.plain_points);
        self.points.prepare(ctx, frame.transform, frame.selection, frame.points);
        self.markers.prepare(ctx, frame.transform, frame.markers);

        let mut rpass = target.begin_load_pass("vertex scene pass");
        self.triangles.draw(&mut rpass);
        self.edges.draw(&mut rpass);
        self.plain_points.draw(&mut rpass);
        self.points.draw(&mut rpass);
        self.markers.draw(&mut rpass);
    }
}
