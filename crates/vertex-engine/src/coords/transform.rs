use glam::{Mat4, Vec2, Vec4};

use super::Viewport;

/// Clip-space depth every pass places its primitives at.
///
/// Draw order, not depth testing, decides overlap between passes.
pub const SCENE_DEPTH: f32 = 0.0;

/// The single 4x4 transform shared by all passes in a frame.
///
/// Any matrix is accepted, including non-invertible ones. A renderer that has
/// never been given a transform uses the identity ("no transform" mode).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransform {
    matrix: Mat4,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    #[inline]
    pub const fn identity() -> Self {
        Self { matrix: Mat4::IDENTITY }
    }

    #[inline]
    pub const fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Column-major construction, the layout GPU uniforms use.
    #[inline]
    pub fn from_cols_array(cols: &[f32; 16]) -> Self {
        Self::from_matrix(Mat4::from_cols_array(cols))
    }

    #[inline]
    pub fn set(&mut self, matrix: Mat4) {
        self.matrix = matrix;
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// `matrix * vec4(position, depth, 1)`.
    #[inline]
    pub fn apply(&self, position: [f32; 2], depth: f32) -> Vec4 {
        self.matrix * Vec4::new(position[0], position[1], depth, 1.0)
    }

    /// Orthographic transform that fits the puzzle-space box `min..max` into
    /// the viewport, preserving aspect ratio and leaving `margin` (a fraction
    /// of the larger extent) free around it. Puzzle +Y maps to screen down.
    ///
    /// Degenerate boxes are widened to one unit so the result is always finite.
    pub fn fit_bounds(min: Vec2, max: Vec2, viewport: Viewport, margin: f32) -> Self {
        let center = (min + max) * 0.5;
        let extent = (max - min).abs().max(Vec2::splat(1.0e-6));
        let extent = if extent.max_element() <= 1.0e-6 { Vec2::ONE } else { extent };

        let padded = extent * (1.0 + 2.0 * margin.max(0.0));
        let aspect = viewport.aspect();

        // Grow the box along whichever axis is short relative to the viewport.
        let (half_w, half_h) = if padded.x / padded.y > aspect {
            (padded.x * 0.5, padded.x / aspect * 0.5)
        } else {
            (padded.y * aspect * 0.5, padded.y * 0.5)
        };

        let matrix = Mat4::orthographic_rh(
            center.x - half_w,
            center.x + half_w,
            center.y + half_h,
            center.y - half_h,
            0.0,
            1.0,
        );
        Self::from_matrix(matrix)
    }

    /// Column-major array for uniform upload.
    #[inline]
    pub fn to_uniform(&self) -> [[f32; 4]; 4] {
        self.matrix.to_cols_array_2d()
    }
}
