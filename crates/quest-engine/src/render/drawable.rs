use crate::coords::ColorRgba;
use crate::error::{RenderError, RenderResult};
use crate::scene::{PassRecord, Shape, ShapeDraw, ShapeHandle};

use super::{RenderCtx, ShapePipeline};

/// One shape's geometry and color, resident on the device.
///
/// Buffers are written once at upload and never touched again.
#[derive(Debug)]
pub struct DrawableShape {
    handle: ShapeHandle,
    vertex_count: u32,

    vertex_buffer: wgpu::Buffer,
    _color_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl DrawableShape {
    /// Allocates and fills the vertex and color buffers and binds the color
    /// against the pipeline's layout.
    ///
    /// Fails with `OutOfDeviceMemory` when a buffer exceeds the device limit or
    /// the device reports an allocation failure.
    pub fn upload(
        ctx: &RenderCtx<'_>,
        pipeline: &ShapePipeline,
        handle: ShapeHandle,
        shape: &Shape,
        color: ColorRgba,
    ) -> RenderResult<Self> {
        let max = ctx.max_buffer_size();
        check_allocation("vertex buffer", shape.byte_len(), max)?;
        check_allocation("color buffer", ColorRgba::SIZE, max)?;

        let vertex_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quest shape vbo"),
            size: shape.byte_len(),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        ctx.queue.write_buffer(&vertex_buffer, 0, shape.as_bytes());

        let color_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quest shape color ubo"),
            size: ColorRgba::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        ctx.queue.write_buffer(&color_buffer, 0, color.as_bytes());

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quest shape bind group"),
            layout: pipeline.bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: color_buffer.as_entire_binding(),
            }],
        });

        ctx.faults.check(RenderError::OutOfDeviceMemory)?;
        log::debug!(
            "uploaded shape {}: {} vertices, {} bytes",
            handle.index(),
            shape.vertex_count(),
            shape.byte_len()
        );

        Ok(Self {
            handle,
            vertex_count: shape.vertex_count(),
            vertex_buffer,
            _color_buffer: color_buffer,
            bind_group,
        })
    }

    /// Records pipeline, bind group and vertex buffer binds plus one draw of
    /// every vertex.
    pub fn record_draw(&self, pass: &mut PassRecord) {
        self.draw_info().record(pass);
    }

    #[inline]
    pub fn draw_info(&self) -> ShapeDraw {
        ShapeDraw {
            handle: self.handle,
            vertex_count: self.vertex_count,
        }
    }

    #[inline]
    pub(crate) fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    #[inline]
    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Refuses allocations the device cannot satisfy.
pub(crate) fn check_allocation(what: &str, size: u64, max: u64) -> RenderResult<()> {
    if size > max {
        return Err(RenderError::OutOfDeviceMemory(format!(
            "{what} of {size} bytes exceeds device limit of {max} bytes"
        )));
    }
    Ok(())
}
