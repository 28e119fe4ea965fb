//! Coordinate spaces used by the renderer.
//!
//! - Puzzle space: the 2D coordinates carried by scene vertices.
//! - Clip space: `ViewTransform * vec4(x, y, depth, 1)`, consumed by the rasterizer.
//! - Logical pixels: the viewport basis point-marker diameters are measured in.

mod transform;
mod viewport;

pub use transform::{ViewTransform, SCENE_DEPTH};
pub use viewport::Viewport;
