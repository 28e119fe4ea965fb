//! Vertex engine crate.
//!
//! Rendering core for the vertex puzzle (palette-shaded triangles, edges and
//! antialiased point markers) plus the platform + GPU runtime that drives it.

pub mod core;
pub mod device;
pub mod error;
pub mod logging;
pub mod window;

pub mod coords;
pub mod paint;
pub mod render;
pub mod resource;
pub mod scene;
pub mod shading;

pub use error::{EngineError, IndexKind};
