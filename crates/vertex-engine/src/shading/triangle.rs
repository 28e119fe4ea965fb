use glam::{Vec3, Vec4};

use crate::coords::{SCENE_DEPTH, ViewTransform};
use crate::paint::{Color, ColorPalette, Rgb};
use crate::scene::ColoredVertex;

/// Output of the triangle vertex stage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShadedVertex {
    pub clip: Vec4,
    pub color: Rgb,
}

/// Transforms the position and resolves the palette color (clamped lookup).
#[inline]
pub fn shade_triangle_vertex(
    vertex: &ColoredVertex,
    transform: &ViewTransform,
    palette: &ColorPalette,
) -> ShadedVertex {
    ShadedVertex {
        clip: transform.apply(vertex.position, SCENE_DEPTH),
        color: palette.get(vertex.color_index),
    }
}

/// Fragment color at barycentric coordinates `weights` (summing to 1).
///
/// Plain linear interpolation of the corner colors; always opaque.
pub fn shade_triangle_fragment(corners: &[ShadedVertex; 3], weights: Vec3) -> Color {
    let [a, b, c] = corners.map(|v| v.color);
    Rgb::new(
        a.r * weights.x + b.r * weights.y + c.r * weights.z,
        a.g * weights.x + b.g * weights.y + c.g * weights.z,
        a.b * weights.x + b.b * weights.y + c.b * weights.z,
    )
    .with_alpha(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
    const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);

    fn shade(indices: [u32; 3], palette: &ColorPalette) -> [ShadedVertex; 3] {
        let t = ViewTransform::identity();
        let pos = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        [0, 1, 2].map(|i| {
            shade_triangle_vertex(&ColoredVertex::new(pos[i][0], pos[i][1], indices[i]), &t, palette)
        })
    }

    fn samples() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::splat(1.0 / 3.0),
            Vec3::new(0.5, 0.25, 0.25),
        ]
    }

    #[test]
    fn constant_index_fills_uniformly() {
        let palette = ColorPalette::from_colors(&[RED, GREEN, BLUE]).unwrap();
        for i in 0..3u32 {
            let corners = shade([i; 3], &palette);
            let expected = palette.get(i);
            for w in samples() {
                let c = shade_triangle_fragment(&corners, w);
                assert!((c.rgb().r - expected.r).abs() < 1.0e-6);
                assert!((c.rgb().g - expected.g).abs() < 1.0e-6);
                assert!((c.rgb().b - expected.b).abs() < 1.0e-6);
                assert_eq!(c.a, 1.0);
            }
        }
    }

    #[test]
    fn editing_an_unused_entry_does_not_change_the_triangle() {
        let mut palette = ColorPalette::from_colors(&[RED, GREEN, BLUE]).unwrap();
        let before = shade([0; 3], &palette);

        palette.set(&[RED, Rgb::new(0.5, 0.5, 0.5), BLUE]).unwrap();
        let after = shade([0; 3], &palette);

        assert_eq!(before, after);
    }

    #[test]
    fn red_green_red_blend() {
        let palette = ColorPalette::from_colors(&[RED, GREEN]).unwrap();
        let corners = shade([0, 1, 0], &palette);

        assert_eq!(shade_triangle_fragment(&corners, Vec3::X), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(shade_triangle_fragment(&corners, Vec3::Y), Color::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(shade_triangle_fragment(&corners, Vec3::Z), Color::new(1.0, 0.0, 0.0, 1.0));

        let mid = shade_triangle_fragment(&corners, Vec3::new(0.25, 0.5, 0.25));
        assert_eq!(mid, Color::new(0.5, 0.5, 0.0, 1.0));
    }

    #[test]
    fn out_of_range_index_clamps_without_affecting_neighbours() {
        let palette = ColorPalette::from_colors(&[RED, GREEN]).unwrap();
        let corners = shade([0, 99, 0], &palette);
        assert_eq!(corners[1].color, GREEN);
        assert_eq!(corners[0].color, RED);
    }

    #[test]
    fn vertex_positions_pass_through_identity() {
        let palette = ColorPalette::from_colors(&[RED]).unwrap();
        let corners = shade([0; 3], &palette);
        assert_eq!(corners[1].clip, Vec4::new(1.0, 0.0, SCENE_DEPTH, 1.0));
    }
}
