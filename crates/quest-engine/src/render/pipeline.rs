use std::num::NonZeroU64;

use crate::coords::ColorRgba;
use crate::error::{RenderError, RenderResult};

use super::RenderCtx;
use super::shader::{self, FS_ENTRY, VS_ENTRY};

/// Binding size of the per-shape color uniform.
pub(crate) const COLOR_BINDING_SIZE: NonZeroU64 = match NonZeroU64::new(ColorRgba::SIZE) {
    Some(size) => size,
    None => panic!("ColorRgba has zero size"),
};

/// The single pipeline every shape is drawn with.
///
/// Layout: group 0 holds one uniform buffer (binding 0, fragment stage only)
/// carrying the fill color; vertex buffer 0 carries `vec2f` positions.
pub struct ShapePipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl ShapePipeline {
    /// Compiles both stages into one shader module and builds the pipeline
    /// targeting the context's surface format.
    ///
    /// Fails with `ShaderCompileError` when the combined source does not
    /// validate, when its vertex inputs do not match `vertex_layout`, or when
    /// the device rejects the module or pipeline.
    pub fn build(
        ctx: &RenderCtx<'_>,
        vertex_src: &str,
        fragment_src: &str,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
    ) -> RenderResult<Self> {
        let source = shader::combine(vertex_src, fragment_src);
        let parsed = shader::validate_wgsl(&source)?;
        shader::check_vertex_inputs(&parsed, &vertex_layout)?;

        let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quest shape shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("quest shape bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(COLOR_BINDING_SIZE),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("quest shape pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quest shape pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(VS_ENTRY),
                compilation_options: Default::default(),
                buffers: &[vertex_layout],
            },

            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(FS_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Hand-authored triangles come in both windings.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        ctx.faults.check(RenderError::ShaderCompileError)?;
        log::debug!("shape pipeline built for {:?}", ctx.surface_format);

        Ok(Self {
            pipeline,
            bind_group_layout,
        })
    }

    #[inline]
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    #[inline]
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_binding_is_one_vec4() {
        assert_eq!(COLOR_BINDING_SIZE.get(), 16);
    }
}
