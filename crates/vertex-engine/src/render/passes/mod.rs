//! One pass per primitive kind.
//!
//! Every pass follows the same two-step contract: `prepare` (uniform +
//! vertex upload, pipeline creation on first use or format change) and
//! `draw` (records into an open render pass).
//!
//! Constants shared with the `shading` mirror are not written in WGSL; each
//! shader source is composed behind a prelude generated from the Rust values.

use crate::coords::SCENE_DEPTH;
use crate::paint::PALETTE_CAPACITY;
use crate::shading::{CIRCLE_OUTER_RADIUS, CIRCLE_RIM_RADIUS, HIGHLIGHT_CATEGORY};

mod common;
mod edge;
mod marker;
mod point;
mod triangle;

pub use edge::{EdgePass, EDGE_COLOR};
pub use marker::MarkerPass;
pub use point::PointPass;
pub use triangle::TrianglePass;

const CIRCLE_WGSL: &str = include_str!("shaders/circle.wgsl");

/// `const` declarations for every value the WGSL shares with Rust.
fn constant_prelude() -> String {
    format!(
        "const SCENE_DEPTH: f32 = {SCENE_DEPTH:?};\n\
         const PALETTE_CAPACITY: u32 = {PALETTE_CAPACITY}u;\n\
         const CIRCLE_OUTER_RADIUS: f32 = {CIRCLE_OUTER_RADIUS:?};\n\
         const CIRCLE_RIM_RADIUS: f32 = {CIRCLE_RIM_RADIUS:?};\n\
         const HIGHLIGHT_CATEGORY: u32 = {HIGHLIGHT_CATEGORY}u;\n"
    )
}

fn compose(parts: &[&str]) -> String {
    let mut source = constant_prelude();
    for part in parts {
        source.push('\n');
        source.push_str(part);
    }
    source
}

fn triangle_shader_source() -> String {
    compose(&[include_str!("shaders/triangle.wgsl")])
}

fn edge_shader_source() -> String {
    compose(&[include_str!("shaders/edge.wgsl")])
}

fn point_shader_source() -> String {
    compose(&[CIRCLE_WGSL, include_str!("shaders/point.wgsl")])
}

fn marker_shader_source() -> String {
    compose(&[CIRCLE_WGSL, include_str!("shaders/marker.wgsl")])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(label: &str, source: &str) -> naga::Module {
        naga::front::wgsl::parse_str(source)
            .unwrap_or_else(|e| panic!("{label}: {}", e.emit_to_string(source)))
    }

    fn validate(label: &str, source: &str) {
        let module = parse(label, source);
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("{label}: {e:?}"));
    }

    fn all_sources() -> [(&'static str, String); 4] {
        [
            ("triangle", triangle_shader_source()),
            ("edge", edge_shader_source()),
            ("point", point_shader_source()),
            ("marker", marker_shader_source()),
        ]
    }

    /// Value of the module-scope constant `name` as the shader sees it.
    fn literal(module: &naga::Module, name: &str) -> naga::Literal {
        let (_, constant) = module
            .constants
            .iter()
            .find(|(_, c)| c.name.as_deref() == Some(name))
            .unwrap_or_else(|| panic!("constant {name} missing"));
        match module.global_expressions[constant.init] {
            naga::Expression::Literal(lit) => lit,
            ref other => panic!("constant {name} is not a literal: {other:?}"),
        }
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn every_shader_validates() {
        for (label, source) in all_sources() {
            validate(label, &source);
        }
    }

    #[test]
    fn every_shader_declares_both_entry_points() {
        for (label, source) in all_sources() {
            let module = parse(label, &source);
            let names: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
            assert!(names.contains(&"vs_main"), "{label}: {names:?}");
            assert!(names.contains(&"fs_main"), "{label}: {names:?}");
        }
    }

    // ── shared constants ──────────────────────────────────────────────────

    #[test]
    fn shader_constants_match_rust() {
        for (label, source) in all_sources() {
            let module = parse(label, &source);
            assert_eq!(literal(&module, "SCENE_DEPTH"), naga::Literal::F32(SCENE_DEPTH), "{label}");
            assert_eq!(
                literal(&module, "PALETTE_CAPACITY"),
                naga::Literal::U32(PALETTE_CAPACITY as u32),
                "{label}"
            );
            assert_eq!(
                literal(&module, "CIRCLE_OUTER_RADIUS"),
                naga::Literal::F32(CIRCLE_OUTER_RADIUS),
                "{label}"
            );
            assert_eq!(
                literal(&module, "CIRCLE_RIM_RADIUS"),
                naga::Literal::F32(CIRCLE_RIM_RADIUS),
                "{label}"
            );
            assert_eq!(
                literal(&module, "HIGHLIGHT_CATEGORY"),
                naga::Literal::U32(HIGHLIGHT_CATEGORY),
                "{label}"
            );
        }
    }

    #[test]
    fn wgsl_files_do_not_redeclare_shared_constants() {
        for src in [
            CIRCLE_WGSL,
            include_str!("shaders/triangle.wgsl"),
            include_str!("shaders/edge.wgsl"),
            include_str!("shaders/point.wgsl"),
            include_str!("shaders/marker.wgsl"),
        ] {
            assert!(!src.lines().any(|l| l.trim_start().starts_with("const ")), "{src}");
        }
    }

    #[test]
    fn palette_array_uses_capacity() {
        let module = parse("triangle", &triangle_shader_source());
        let sized = module.types.iter().any(|(_, ty)| {
            matches!(
                ty.inner,
                naga::TypeInner::Array { size: naga::ArraySize::Constant(n), .. }
                    if n.get() == PALETTE_CAPACITY as u32
            )
        });
        assert!(sized);
    }
}
