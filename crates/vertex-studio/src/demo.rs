//! Built-in demo geometry.
//!
//! Two concentric rings of puzzle points joined by edges. Palette triangles
//! between the rings are revealed one at a time, the selection walks around
//! the outer ring (every third step undoing its second pick), and each revealed triangle gets a category marker at its
//! centroid.

use std::f32::consts::TAU;

use glam::Vec2;
use vertex_engine::coords::{ViewTransform, Viewport};
use vertex_engine::paint::{ColorPalette, Rgb};
use vertex_engine::scene::{
    ColoredVertex, MarkerVertex, PrimitiveBatch, SceneFrame, SceneProvider, Selection,
    TexturedMarkerVertex, Vertex2D,
};

const OUTER: usize = 10;
const INNER: usize = 5;
const OUTER_RADIUS: f32 = 4.0;
const INNER_RADIUS: f32 = 2.0;

/// Frames between two revealed triangles.
const REVEAL_PERIOD: u64 = 30;
/// Frames between two selection steps.
const SELECT_PERIOD: u64 = 45;

const MARKER_SIZE: f32 = 0.6;
const MARGIN: f32 = 0.08;

const PALETTE: [Rgb; 6] = [
    Rgb::new(0.91, 0.30, 0.24),
    Rgb::new(0.95, 0.61, 0.07),
    Rgb::new(0.18, 0.80, 0.44),
    Rgb::new(0.20, 0.60, 0.86),
    Rgb::new(0.61, 0.35, 0.71),
    Rgb::new(0.10, 0.74, 0.61),
];

pub struct DemoScene {
    points: Vec<Vec2>,
    faces: Vec<[usize; 3]>,

    transform: ViewTransform,
    viewport: Viewport,
    palette: ColorPalette,
    selection: Selection,
    revealed: usize,

    triangles: PrimitiveBatch<ColoredVertex>,
    edges: PrimitiveBatch<Vertex2D>,
    plain_points: PrimitiveBatch<MarkerVertex>,
    markers_batch: PrimitiveBatch<MarkerVertex>,
    badges: PrimitiveBatch<TexturedMarkerVertex>,
}

impl DemoScene {
    pub fn new() -> Self {
        let points = ring_points();
        let faces = ring_faces();

        let edges = faces
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .flat_map(|(a, b)| [to_vertex(points[a]), to_vertex(points[b])])
            .collect();

        // Small dots halfway along each outer-ring edge.
        let plain_points = (0..OUTER)
            .map(|i| {
                let mid = (points[i] + points[(i + 1) % OUTER]) * 0.5;
                MarkerVertex::new(mid.x, mid.y, (points.len() + i) as u32)
            })
            .collect();

        let markers_batch = points
            .iter()
            .enumerate()
            .map(|(i, p)| MarkerVertex::new(p.x, p.y, i as u32))
            .collect();

        // The palette is a compile-time constant well under capacity.
        let palette = ColorPalette::from_colors(&PALETTE).unwrap_or_default();

        let mut scene = Self {
            points,
            faces,
            transform: ViewTransform::identity(),
            viewport: Viewport::default(),
            palette,
            selection: Selection::empty(),
            revealed: usize::MAX,
            triangles: PrimitiveBatch::empty(),
            edges,
            plain_points,
            markers_batch,
            badges: PrimitiveBatch::empty(),
        };
        scene.reveal(0);
        scene
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Rebuilds the triangle and badge batches for the first `count` faces.
    fn reveal(&mut self, count: usize) {
        let count = count.min(self.faces.len());
        if count == self.revealed {
            return;
        }
        self.revealed = count;

        let faces = &self.faces[..count];
        self.triangles = faces
            .iter()
            .enumerate()
            .flat_map(|(f, corners)| {
                corners.map(|i| {
                    let p = self.points[i];
                    ColoredVertex::new(p.x, p.y, ((f + i) % PALETTE.len()) as u32)
                })
            })
            .collect();

        self.badges = faces
            .iter()
            .enumerate()
            .flat_map(|(f, &[a, b, c])| {
                let centroid = (self.points[a] + self.points[b] + self.points[c]) / 3.0;
                TexturedMarkerVertex::quad(centroid.into(), MARKER_SIZE, (f % 3) as u32)
            })
            .collect();

        log::debug!("demo: {count}/{} triangles revealed", self.faces.len());
    }

    fn bounds(&self) -> (Vec2, Vec2) {
        self.points.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        )
    }
}

impl Default for DemoScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneProvider for DemoScene {
    fn prepare(&mut self, viewport: Viewport, frame_index: u64) {
        if viewport != self.viewport {
            let (min, max) = self.bounds();
            self.transform = ViewTransform::fit_bounds(min, max, viewport, MARGIN);
            self.viewport = viewport;
        }

        // Reveal 0..=N faces, then start over.
        let cycle = self.faces.len() as u64 + 1;
        self.reveal(((frame_index / REVEAL_PERIOD) % cycle) as usize);

        let step = (frame_index / SELECT_PERIOD) as usize;
        self.selection = if step % (OUTER + 1) == OUTER {
            Selection::empty()
        } else {
            let k = (step % (OUTER + 1)) as u32;
            let mut picked = Selection::pair(k, (k + 1) % OUTER as u32);
            // Every third step the second pick is undone.
            if k % 3 == 2 {
                picked.remove((k + 1) % OUTER as u32);
            }
            picked
        };
    }

    fn frame(&self) -> SceneFrame<'_> {
        SceneFrame {
            transform: &self.transform,
            palette: &self.palette,
            selection: self.selection,
            triangles: &self.triangles,
            edges: &self.edges,
            plain_points: &self.plain_points,
            points: &self.markers_batch,
            markers: &self.badges,
        }
    }
}

#[inline]
fn to_vertex(p: Vec2) -> Vertex2D {
    Vertex2D::new(p.x, p.y)
}

/// Outer ring first, then the inner ring, offset by half a step.
fn ring_points() -> Vec<Vec2> {
    let ring = |n: usize, r: f32, phase: f32| {
        (0..n).map(move |i| {
            let a = phase + TAU * i as f32 / n as f32;
            Vec2::new(a.cos(), a.sin()) * r
        })
    };
    ring(OUTER, OUTER_RADIUS, 0.0)
        .chain(ring(INNER, INNER_RADIUS, TAU / (2 * INNER) as f32))
        .collect()
}

/// Each inner point spans two outer edges; the remaining gaps are filled
/// with outer-inner-inner triangles.
fn ring_faces() -> Vec<[usize; 3]> {
    let mut faces = Vec::new();
    for j in 0..INNER {
        let inner = OUTER + j;
        let next_inner = OUTER + (j + 1) % INNER;
        let o = 2 * j;
        faces.push([o, o + 1, inner]);
        faces.push([o + 1, (o + 2) % OUTER, inner]);
        faces.push([inner, (o + 2) % OUTER, next_inner]);
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared(frame_index: u64) -> DemoScene {
        let mut scene = DemoScene::new();
        scene.prepare(Viewport::new(800.0, 600.0), frame_index);
        scene
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn faces_reference_existing_points() {
        let scene = DemoScene::new();
        assert_eq!(scene.face_count(), 3 * INNER);
        for face in &scene.faces {
            assert!(face.iter().all(|&i| i < scene.points.len()), "{face:?}");
        }
    }

    #[test]
    fn edges_come_in_pairs() {
        let scene = prepared(0);
        assert_eq!(scene.frame().edges.len() % 2, 0);
        assert_eq!(scene.frame().edges.len(), scene.face_count() * 6);
    }

    #[test]
    fn marker_indices_are_unique() {
        let scene = prepared(0);
        let frame = scene.frame();
        let mut ids: Vec<u32> = frame
            .points
            .vertices()
            .iter()
            .chain(frame.plain_points.vertices())
            .map(|m| m.marker_index)
            .collect();
        let n = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), n);
    }

    // ── animation ─────────────────────────────────────────────────────────

    #[test]
    fn triangles_reveal_over_time() {
        assert!(prepared(0).frame().triangles.is_empty());

        let scene = prepared(REVEAL_PERIOD * 2);
        let frame = scene.frame();
        assert_eq!(frame.triangles.len(), 6);
        assert_eq!(frame.markers.len(), 12);
        assert!(frame.triangles.vertices().iter().all(|v| (v.color_index as usize) < PALETTE.len()));
    }

    #[test]
    fn reveal_wraps_after_all_faces() {
        let n = DemoScene::new().face_count() as u64;
        assert_eq!(prepared(REVEAL_PERIOD * n).frame().triangles.len(), 3 * n as usize);
        assert!(prepared(REVEAL_PERIOD * (n + 1)).frame().triangles.is_empty());
    }

    #[test]
    fn selection_walks_outer_ring() {
        assert_eq!(prepared(0).selection, Selection::pair(0, 1));
        assert_eq!(prepared(SELECT_PERIOD * 9).selection, Selection::pair(9, 0));
        assert!(prepared(SELECT_PERIOD * 10).selection.is_empty());
    }

    #[test]
    fn every_third_step_undoes_the_second_pick() {
        assert_eq!(prepared(SELECT_PERIOD * 2).selection, Selection::single(2));
        assert_eq!(prepared(SELECT_PERIOD * 5).selection.slots(), Selection::single(5).slots());
        assert_eq!(prepared(SELECT_PERIOD * 3).selection, Selection::pair(3, 4));
    }

    #[test]
    fn transform_fits_every_point() {
        let scene = prepared(0);
        for p in &scene.points {
            let clip = scene.transform.apply(p.to_array(), 0.0);
            assert!(clip.x.abs() <= 1.0 && clip.y.abs() <= 1.0, "{p:?} -> {clip:?}");
        }
    }

    #[test]
    fn unchanged_reveal_keeps_batch_storage() {
        let mut scene = prepared(REVEAL_PERIOD);
        let before = scene.frame().triangles.vertices().as_ptr();
        scene.prepare(Viewport::new(800.0, 600.0), REVEAL_PERIOD + 1);
        assert!(std::ptr::eq(before, scene.frame().triangles.vertices().as_ptr()));
    }
}
