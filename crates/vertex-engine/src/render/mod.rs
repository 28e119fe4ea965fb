//! GPU rendering subsystem.
//!
//! Passes consume `scene` batches and issue GPU commands via wgpu. Each pass
//! owns its GPU resources (pipeline, uniform buffer, vertex buffers).
//!
//! Convention:
//! - CPU geometry is in puzzle space; the view transform maps it to clip space.
//! - Point-marker diameters are logical pixels, converted with a viewport uniform.
//! - Every frame runs: upload uniforms, upload batches, then record draws.

mod ctx;
pub mod passes;
mod renderer;

pub use ctx::{RenderCtx, RenderTarget};
pub use renderer::SceneRenderer;
