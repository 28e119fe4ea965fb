use glam::Vec2;

use crate::paint::{Color, Rgb};

/// Local-space distance at and beyond which a marker is transparent.
pub const CIRCLE_OUTER_RADIUS: f32 = 0.5;

/// Local-space distance at and beyond which a marker draws its dark rim.
pub const CIRCLE_RIM_RADIUS: f32 = 0.4;

const CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// Which band of a marker disc a local coordinate falls in.
///
/// The two thresholds are hard cutoffs; there is no gradient between bands.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CircleBand {
    Core,
    Rim,
    Outside,
}

/// Classifies a marker-local coordinate (`[0, 1]²`, center at `(0.5, 0.5)`).
#[inline]
pub fn circle_band(local: Vec2) -> CircleBand {
    let d = local.distance(CENTER);
    if d >= CIRCLE_OUTER_RADIUS {
        CircleBand::Outside
    } else if d >= CIRCLE_RIM_RADIUS {
        CircleBand::Rim
    } else {
        CircleBand::Core
    }
}

/// Fragment color of a marker disc with interior color `core`.
///
/// `None` means the fragment is discarded.
#[inline]
pub fn shade_circle(local: Vec2, core: Rgb) -> Option<Color> {
    match circle_band(local) {
        CircleBand::Outside => None,
        CircleBand::Rim => Some(Rgb::BLACK.with_alpha(1.0)),
        CircleBand::Core => Some(core.with_alpha(1.0)),
    }
}
