//! Color model shared between the scene description and the passes.
//!
//! Scope:
//! - opaque RGB triples (palette entries) and RGBA colors (fragments, clears)
//! - the bounded color palette consumed by the triangle pass

pub mod color;
pub mod palette;

pub use color::{Color, Rgb};
pub use palette::{ColorPalette, PALETTE_CAPACITY};
