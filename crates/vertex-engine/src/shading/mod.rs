//! CPU mirror of the per-vertex and per-fragment rules the WGSL passes run.
//!
//! The GPU is the only consumer in production; these functions exist so the
//! shading contracts can be checked without an adapter, and they own the
//! constants (diameters, radii, highlight color) the passes upload.

pub mod circle;
pub mod point;
pub mod triangle;

pub use circle::{circle_band, shade_circle, CircleBand, CIRCLE_OUTER_RADIUS, CIRCLE_RIM_RADIUS};
pub use point::{
    category_core, expand_marker_corner, shade_marker_fragment, shade_point_fragment, PointStyle,
    HIGHLIGHT_CATEGORY, HIGHLIGHT_COLOR,
};
pub use triangle::{shade_triangle_fragment, shade_triangle_vertex, ShadedVertex};
