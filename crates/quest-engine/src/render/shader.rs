//! WGSL sources and CPU-side validation.
//!
//! wgpu reports shader errors asynchronously through the device's error sink,
//! so sources are parsed and validated with naga before a module is created.

use crate::error::{RenderError, RenderResult};

pub const VS_ENTRY: &str = "vs_main";
pub const FS_ENTRY: &str = "fs_main";

/// Passes 2D positions straight through as clip-space positions.
pub const SHAPE_VS: &str = include_str!("shaders/shape_vs.wgsl");

/// Fills with the color from the uniform at group 0, binding 0.
pub const SHAPE_FS: &str = include_str!("shaders/shape_fs.wgsl");

/// Joins the two stage sources into one module source.
pub fn combine(vertex_src: &str, fragment_src: &str) -> String {
    format!("{vertex_src}\n{fragment_src}")
}

/// Parses and validates `source`, and checks that both entry points exist
/// with the right stages.
pub fn validate_wgsl(source: &str) -> RenderResult<naga::Module> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| RenderError::ShaderCompileError(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| RenderError::ShaderCompileError(format!("{e}")))?;

    require_entry(&module, VS_ENTRY, naga::ShaderStage::Vertex)?;
    require_entry(&module, FS_ENTRY, naga::ShaderStage::Fragment)?;
    Ok(module)
}

/// Checks the vertex entry's `@location` inputs against `layout`.
///
/// Every input must be supplied by an attribute of the same component type;
/// the component count may differ.
pub fn check_vertex_inputs(
    module: &naga::Module,
    layout: &wgpu::VertexBufferLayout<'_>,
) -> RenderResult<()> {
    let Some(entry) = module
        .entry_points
        .iter()
        .find(|ep| ep.name == VS_ENTRY && ep.stage == naga::ShaderStage::Vertex)
    else {
        return require_entry(module, VS_ENTRY, naga::ShaderStage::Vertex);
    };

    for (location, kind) in location_inputs(module, &entry.function) {
        let Some(attr) = layout
            .attributes
            .iter()
            .find(|a| a.shader_location == location)
        else {
            return Err(RenderError::ShaderCompileError(format!(
                "vertex input @location({location}) is not provided by the vertex buffer layout"
            )));
        };

        if format_kind(attr.format) != kind {
            return Err(RenderError::ShaderCompileError(format!(
                "vertex input @location({location}) is {kind:?} but the buffer provides {:?}",
                attr.format
            )));
        }
    }
    Ok(())
}

fn require_entry(module: &naga::Module, name: &str, stage: naga::ShaderStage) -> RenderResult<()> {
    let found = module
        .entry_points
        .iter()
        .any(|ep| ep.name == name && ep.stage == stage);

    if found {
        Ok(())
    } else {
        Err(RenderError::ShaderCompileError(format!(
            "missing {stage:?} entry point `{name}`"
        )))
    }
}

/// `@location` inputs of `function`, including those inside struct arguments.
fn location_inputs(module: &naga::Module, function: &naga::Function) -> Vec<(u32, naga::ScalarKind)> {
    let mut out = Vec::new();
    for arg in &function.arguments {
        match &arg.binding {
            Some(binding) => push_location(module, binding, arg.ty, &mut out),
            None => {
                if let naga::TypeInner::Struct { members, .. } = &module.types[arg.ty].inner {
                    for member in members {
                        if let Some(binding) = &member.binding {
                            push_location(module, binding, member.ty, &mut out);
                        }
                    }
                }
            }
        }
    }
    out
}

fn push_location(
    module: &naga::Module,
    binding: &naga::Binding,
    ty: naga::Handle<naga::Type>,
    out: &mut Vec<(u32, naga::ScalarKind)>,
) {
    let naga::Binding::Location { location, .. } = binding else {
        return;
    };
    let kind = match &module.types[ty].inner {
        naga::TypeInner::Scalar(scalar) => scalar.kind,
        naga::TypeInner::Vector { scalar, .. } => scalar.kind,
        _ => return,
    };
    out.push((*location, kind));
}

/// Component type a vertex format reads as in the shader.
fn format_kind(format: wgpu::VertexFormat) -> naga::ScalarKind {
    use wgpu::VertexFormat as F;
    match format {
        F::Uint8 | F::Uint8x2 | F::Uint8x4 | F::Uint16 | F::Uint16x2 | F::Uint16x4
        | F::Uint32 | F::Uint32x2 | F::Uint32x3 | F::Uint32x4 => naga::ScalarKind::Uint,
        F::Sint8 | F::Sint8x2 | F::Sint8x4 | F::Sint16 | F::Sint16x2 | F::Sint16x4
        | F::Sint32 | F::Sint32x2 | F::Sint32x3 | F::Sint32x4 => naga::ScalarKind::Sint,
        _ => naga::ScalarKind::Float,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Point;

    #[test]
    fn bundled_pair_validates() {
        validate_wgsl(&combine(SHAPE_VS, SHAPE_FS)).unwrap();
    }

    #[test]
    fn syntax_error_is_compile_error() {
        let src = combine(SHAPE_VS, "@fragment fn fs_main( -> @location(0) vec4f {");
        assert!(matches!(
            validate_wgsl(&src),
            Err(RenderError::ShaderCompileError(_))
        ));
    }

    #[test]
    fn type_error_is_compile_error() {
        let fs = "@fragment fn fs_main() -> @location(0) vec4f { return 1.0; }";
        assert!(matches!(
            validate_wgsl(&combine(SHAPE_VS, fs)),
            Err(RenderError::ShaderCompileError(_))
        ));
    }

    #[test]
    fn missing_vertex_stage_is_compile_error() {
        let err = validate_wgsl(SHAPE_FS).unwrap_err();
        assert_eq!(
            err,
            RenderError::ShaderCompileError("missing Vertex entry point `vs_main`".into())
        );
    }

    #[test]
    fn missing_fragment_stage_is_compile_error() {
        assert!(validate_wgsl(SHAPE_VS).is_err());
    }

    // ── vertex inputs ─────────────────────────────────────────────────────

    fn with_vs(vs: &str) -> naga::Module {
        validate_wgsl(&combine(vs, SHAPE_FS)).unwrap()
    }

    #[test]
    fn bundled_pair_matches_point_layout() {
        check_vertex_inputs(&with_vs(SHAPE_VS), &Point::layout()).unwrap();
    }

    #[test]
    fn wider_float_input_is_accepted() {
        let vs = "@vertex fn vs_main(@location(0) pos: vec3f) -> @builtin(position) vec4f {
            return vec4f(pos, 1.0);
        }";
        check_vertex_inputs(&with_vs(vs), &Point::layout()).unwrap();
    }

    #[test]
    fn integer_input_over_float_buffer_is_compile_error() {
        let vs = "@vertex fn vs_main(@location(0) pos: vec2<u32>) -> @builtin(position) vec4f {
            return vec4f(vec2f(pos), 0.0, 1.0);
        }";
        let err = check_vertex_inputs(&with_vs(vs), &Point::layout()).unwrap_err();
        assert!(matches!(err, RenderError::ShaderCompileError(_)));
    }

    #[test]
    fn unsupplied_location_is_compile_error() {
        let vs = "struct VertexIn {
            @location(0) pos: vec2f,
            @location(1) uv: vec2f,
        };
        @vertex fn vs_main(v: VertexIn) -> @builtin(position) vec4f {
            return vec4f(v.pos + v.uv, 0.0, 1.0);
        }";
        let err = check_vertex_inputs(&with_vs(vs), &Point::layout()).unwrap_err();
        assert_eq!(
            err,
            RenderError::ShaderCompileError(
                "vertex input @location(1) is not provided by the vertex buffer layout".into()
            )
        );
    }
}
