//! Vertex formats uploaded by the passes.
//!
//! All types are `#[repr(C)]` + `Pod` so batches upload without conversion.

use bytemuck::{Pod, Zeroable};

use super::SELECTION_SENTINEL;

/// Largest marker index that can take part in selection matching.
///
/// One below the selection sentinel so an empty slot never matches a marker.
pub const MAX_MARKER_INDEX: u32 = SELECTION_SENTINEL - 1;

/// Plain position, used for edge lines.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex2D {
    pub position: [f32; 2],
}

impl Vertex2D {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex2D>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Triangle corner shaded by a palette entry.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ColoredVertex {
    pub position: [f32; 2],
    pub color_index: u32,
}

impl ColoredVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Uint32     // color_index
    ];

    #[inline]
    pub const fn new(x: f32, y: f32, color_index: u32) -> Self {
        Self { position: [x, y], color_index }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColoredVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Puzzle point; `marker_index` is its identity for selection matching.
///
/// Uploaded as per-instance data: each marker expands to a screen-aligned quad.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct MarkerVertex {
    pub position: [f32; 2],
    pub marker_index: u32,
}

impl MarkerVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        1 => Float32x2, // position
        2 => Uint32     // marker_index
    ];

    #[inline]
    pub const fn new(x: f32, y: f32, marker_index: u32) -> Self {
        Self { position: [x, y], marker_index }
    }

    /// Returns the vertex with `marker_index` clamped to [`MAX_MARKER_INDEX`].
    #[inline]
    pub fn sanitized(self) -> Self {
        Self { marker_index: self.marker_index.min(MAX_MARKER_INDEX), ..self }
    }

    pub fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Corner of a category-marker quad.
///
/// `uv` spans `[0, 1]²` across the quad; `category_index == 0` selects the
/// highlight interior, anything else the default white interior.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct TexturedMarkerVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub category_index: u32,
}

impl TexturedMarkerVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x2, // uv
        2 => Uint32     // category_index
    ];

    #[inline]
    pub const fn new(position: [f32; 2], uv: [f32; 2], category_index: u32) -> Self {
        Self { position, uv, category_index }
    }

    /// The six corners (two triangles) of an axis-aligned quad of side `size`
    /// centered on `center`, in puzzle space.
    pub fn quad(center: [f32; 2], size: f32, category_index: u32) -> [Self; 6] {
        let h = size * 0.5;
        let [cx, cy] = center;
        let tl = Self::new([cx - h, cy - h], [0.0, 0.0], category_index);
        let tr = Self::new([cx + h, cy - h], [1.0, 0.0], category_index);
        let br = Self::new([cx + h, cy + h], [1.0, 1.0], category_index);
        let bl = Self::new([cx - h, cy + h], [0.0, 1.0], category_index);
        [tl, tr, br, tl, br, bl]
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexturedMarkerVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_strides_match_attribute_offsets() {
        assert_eq!(std::mem::size_of::<Vertex2D>(), 8);
        assert_eq!(std::mem::size_of::<ColoredVertex>(), 12);
        assert_eq!(std::mem::size_of::<MarkerVertex>(), 12);
        assert_eq!(std::mem::size_of::<TexturedMarkerVertex>(), 20);

        let attrs = TexturedMarkerVertex::layout().attributes;
        assert_eq!(attrs[1].offset, 8);
        assert_eq!(attrs[2].offset, 16);
    }

    #[test]
    fn marker_layout_steps_per_instance() {
        assert_eq!(MarkerVertex::instance_layout().step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(MarkerVertex::instance_layout().attributes[0].shader_location, 1);
    }

    #[test]
    fn sanitized_clamps_sentinel_marker() {
        let v = MarkerVertex::new(1.0, 2.0, SELECTION_SENTINEL).sanitized();
        assert_eq!(v.marker_index, MAX_MARKER_INDEX);
        assert_eq!(v.position, [1.0, 2.0]);
        assert_eq!(MarkerVertex::new(0.0, 0.0, 9).sanitized().marker_index, 9);
    }

    #[test]
    fn quad_covers_unit_uv_square() {
        let q = TexturedMarkerVertex::quad([10.0, 20.0], 4.0, 3);
        assert_eq!(q[0].position, [8.0, 18.0]);
        assert_eq!(q[2].position, [12.0, 22.0]);
        assert_eq!(q[0].uv, [0.0, 0.0]);
        assert_eq!(q[2].uv, [1.0, 1.0]);
        assert!(q.iter().all(|v| v.category_index == 3));
    }
}
