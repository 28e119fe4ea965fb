//! Per-frame scene description handed to the renderer.
//!
//! Responsibilities:
//! - GPU vertex formats for every pass (`vertex`)
//! - immutable per-frame vertex batches (`batch`)
//! - the 0–2 entry marker selection (`selection`)
//! - the collaborator contract that produces a frame's worth of data (`frame`)

mod batch;
mod frame;
mod selection;
mod vertex;

pub use batch::PrimitiveBatch;
pub use frame::{SceneFrame, SceneProvider};
pub use selection::{Selection, SELECTION_CAPACITY, SELECTION_SENTINEL};
pub use vertex::{ColoredVertex, MarkerVertex, TexturedMarkerVertex, Vertex2D, MAX_MARKER_INDEX};
