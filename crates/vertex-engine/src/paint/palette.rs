use crate::error::{EngineError, IndexKind};

use super::Rgb;

/// Maximum number of entries a palette can hold.
///
/// Matches the fixed-size uniform array in the triangle shader.
pub const PALETTE_CAPACITY: usize = 100;

/// Bounded, ordered table of palette colors.
///
/// The palette is replaced wholesale between frames with [`set`](Self::set)
/// and read by index while shading. Indices past the end clamp to the last
/// entry; an empty palette shades everything black.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorPalette {
    colors: Vec<Rgb>,
}

impl ColorPalette {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a palette, rejecting more than [`PALETTE_CAPACITY`] entries.
    pub fn from_colors(colors: &[Rgb]) -> Result<Self, EngineError> {
        let mut palette = Self::new();
        palette.set(colors)?;
        Ok(palette)
    }

    /// Replaces the palette contents.
    ///
    /// On `CapacityExceeded` the previous contents are kept untouched.
    pub fn set(&mut self, colors: &[Rgb]) -> Result<(), EngineError> {
        if colors.len() > PALETTE_CAPACITY {
            return Err(EngineError::CapacityExceeded {
                got: colors.len(),
                max: PALETTE_CAPACITY,
            });
        }

        self.colors.clear();
        self.colors.extend(colors.iter().map(|c| c.clamped()));
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Strict lookup.
    pub fn try_get(&self, index: u32) -> Result<Rgb, EngineError> {
        self.colors
            .get(index as usize)
            .copied()
            .ok_or(EngineError::InvalidIndex {
                kind: IndexKind::Palette,
                index,
                limit: self.colors.len() as u32,
            })
    }

    /// Shading lookup: out-of-range indices clamp to the last entry.
    #[inline]
    pub fn get(&self, index: u32) -> Rgb {
        let clamped = (index as usize).min(self.colors.len().saturating_sub(1));
        self.colors.get(clamped).copied().unwrap_or(Rgb::BLACK)
    }

    /// Packs the palette into the fixed-size uniform array.
    ///
    /// Unused slots are zero.
    pub fn to_uniform_array(&self) -> [[f32; 4]; PALETTE_CAPACITY] {
        let mut out = [[0.0f32; 4]; PALETTE_CAPACITY];
        for (slot, color) in out.iter_mut().zip(&self.colors) {
            *slot = color.to_array4();
        }
        out
    }
}
