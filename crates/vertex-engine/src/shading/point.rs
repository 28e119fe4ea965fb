use glam::{Vec2, Vec4};

use crate::coords::{SCENE_DEPTH, ViewTransform, Viewport};
use crate::paint::{Color, Rgb};
use crate::scene::{MarkerVertex, Selection};

use super::shade_circle;

/// Interior color of category markers with `category_index == HIGHLIGHT_CATEGORY`.
pub const HIGHLIGHT_COLOR: Rgb = Rgb::new(1.0, 0.3, 0.3);

/// Category that selects [`HIGHLIGHT_COLOR`].
pub const HIGHLIGHT_CATEGORY: u32 = 0;

/// How a point pass sizes its markers, in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointStyle {
    /// Markers whose index is in the selection grow to `selected`.
    Selectable { base: f32, selected: f32 },
    /// Every marker uses `diameter`; the selection is ignored.
    Fixed { diameter: f32 },
}

impl PointStyle {
    pub const SELECTABLE: PointStyle = PointStyle::Selectable { base: 10.0, selected: 15.0 };
    pub const PLAIN: PointStyle = PointStyle::Fixed { diameter: 5.0 };

    /// `[unselected, selected]` diameters as uploaded to the point uniform.
    #[inline]
    pub fn diameters(self) -> [f32; 2] {
        match self {
            PointStyle::Selectable { base, selected } => [base, selected],
            PointStyle::Fixed { diameter } => [diameter, diameter],
        }
    }

    /// Selection as seen by the shader: fixed-size passes never match.
    #[inline]
    pub fn effective_selection(self, selection: Selection) -> Selection {
        match self {
            PointStyle::Selectable { .. } => selection,
            PointStyle::Fixed { .. } => Selection::empty(),
        }
    }

    /// On-screen diameter of a marker.
    #[inline]
    pub fn diameter(self, marker_index: u32, selection: &Selection) -> f32 {
        let [base, selected] = self.diameters();
        if self.effective_selection(*selection).contains(marker_index) { selected } else { base }
    }
}

/// Clip position of one quad corner of a point marker.
///
/// `corner` is the quad-local coordinate in `[0, 1]²` (origin top-left,
/// +Y down); the marker center sits at `(0.5, 0.5)`.
pub fn expand_marker_corner(
    transform: &ViewTransform,
    viewport: Viewport,
    marker: &MarkerVertex,
    diameter: f32,
    corner: Vec2,
) -> Vec4 {
    let center = transform.apply(marker.position, SCENE_DEPTH);
    let [vw, vh] = viewport.to_uniform();
    let offset = (corner - Vec2::splat(0.5)) * Vec2::new(1.0, -1.0) * diameter * 2.0
        / Vec2::new(vw, vh);
    center + Vec4::new(offset.x * center.w, offset.y * center.w, 0.0, 0.0)
}

/// Fragment of a point marker: white disc with a dark rim.
#[inline]
pub fn shade_point_fragment(local: Vec2) -> Option<Color> {
    shade_circle(local, Rgb::WHITE)
}

/// Interior color of a category marker.
#[inline]
pub fn category_core(category_index: u32) -> Rgb {
    if category_index == HIGHLIGHT_CATEGORY { HIGHLIGHT_COLOR } else { Rgb::WHITE }
}

/// Fragment of a category marker at quad coordinate `uv`.
#[inline]
pub fn shade_marker_fragment(uv: Vec2, category_index: u32) -> Option<Color> {
    shade_circle(uv, category_core(category_index))
}
