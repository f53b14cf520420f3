use crate::coords::ColorRgba;
use crate::device::Gpu;
use crate::error::{RenderError, RenderResult};
use crate::scene::{PassCmd, PassRecord, ShapeDraw, ShapeHandle, ShapeList, presets};

use super::{DrawableShape, Lifecycle, RenderCtx, ShapePipeline, Stage};

/// Counts from a submitted frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub passes: usize,
    pub draws: usize,
}

/// Records one frame: a single pass cleared to `clear`, with one draw per
/// shape in the given order.
///
/// Refused unless `lifecycle` has reached `ResourcesUploaded` cleanly.
pub fn plan_frame(
    lifecycle: &Lifecycle,
    clear: ColorRgba,
    draws: impl IntoIterator<Item = ShapeDraw>,
) -> RenderResult<PassRecord> {
    lifecycle.require(Stage::ResourcesUploaded)?;

    let mut pass = PassRecord::new();
    pass.begin_pass(clear);
    for draw in draws {
        draw.record(&mut pass);
    }
    pass.end_pass();
    Ok(pass)
}

/// Owns the render context, the shared pipeline and every uploaded shape.
///
/// Drives `Uninitialized → DeviceReady → PipelineReady → ResourcesUploaded →
/// FrameSubmitted`. The first failure halts it where it stands.
pub struct ShapeRenderer<'w> {
    gpu: Gpu<'w>,
    lifecycle: Lifecycle,
    clear: ColorRgba,

    pipeline: Option<ShapePipeline>,
    shapes: Vec<DrawableShape>,
}

impl<'w> ShapeRenderer<'w> {
    /// Wraps an initialized context; the renderer starts at `DeviceReady`.
    pub fn new(gpu: Gpu<'w>) -> RenderResult<Self> {
        let mut lifecycle = Lifecycle::new();
        lifecycle.advance(Stage::DeviceReady)?;

        Ok(Self {
            gpu,
            lifecycle,
            clear: presets::CLEAR_COLOR,
            pipeline: None,
            shapes: Vec::new(),
        })
    }

    /// Full linear setup: bundled pipeline, then every shape of `scene`.
    pub fn setup(gpu: Gpu<'w>, scene: &ShapeList) -> RenderResult<Self> {
        let mut renderer = Self::new(gpu)?;
        renderer.build_standard_pipeline()?;
        renderer.upload(scene)?;
        Ok(renderer)
    }

    pub fn with_clear_color(mut self, clear: ColorRgba) -> Self {
        self.clear = clear;
        self
    }

    pub fn build_pipeline(
        &mut self,
        vertex_src: &str,
        fragment_src: &str,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
    ) -> RenderResult<()> {
        self.checked(|r| {
            r.lifecycle.require(Stage::DeviceReady)?;
            let ctx = RenderCtx::from_gpu(&r.gpu);
            let pipeline = ShapePipeline::build(&ctx, vertex_src, fragment_src, vertex_layout)?;
            r.pipeline = Some(pipeline);
            r.lifecycle.advance(Stage::PipelineReady)
        })
    }

    pub fn build_standard_pipeline(&mut self) -> RenderResult<()> {
        self.build_pipeline(
            super::shader::SHAPE_VS,
            super::shader::SHAPE_FS,
            crate::coords::Point::layout(),
        )
    }

    /// Uploads every shape of `scene`, in registration order.
    pub fn upload(&mut self, scene: &ShapeList) -> RenderResult<()> {
        self.checked(|r| {
            r.lifecycle.require(Stage::PipelineReady)?;
            let Some(pipeline) = r.pipeline.as_ref() else {
                return Err(RenderError::InvalidTransition {
                    from: r.lifecycle.stage(),
                    to: Stage::ResourcesUploaded,
                });
            };

            let ctx = RenderCtx::from_gpu(&r.gpu);
            let shapes = scene
                .iter()
                .map(|e| DrawableShape::upload(&ctx, pipeline, e.handle, &e.shape, e.color))
                .collect::<RenderResult<Vec<_>>>()?;

            r.shapes = shapes;
            r.lifecycle.advance(Stage::ResourcesUploaded)
        })
    }

    /// Acquires the surface texture, records the single pass, submits and
    /// presents. Callable once.
    pub fn render_once(&mut self) -> RenderResult<FrameStats> {
        self.checked(|r| {
            let record = plan_frame(
                &r.lifecycle,
                r.clear,
                r.shapes.iter().map(DrawableShape::draw_info),
            )?;
            let Some(pipeline) = r.pipeline.as_ref() else {
                return Err(RenderError::InvalidTransition {
                    from: r.lifecycle.stage(),
                    to: Stage::FrameSubmitted,
                });
            };

            let mut frame = r.gpu.begin_frame()?;
            {
                let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("quest shape pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(r.clear.to_wgpu()),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });

                replay(&mut rpass, &record, pipeline, &r.shapes)?;
            }
            r.gpu.submit(frame);
            r.lifecycle.advance(Stage::FrameSubmitted)?;

            let stats = FrameStats {
                passes: record.pass_count(),
                draws: record.draw_count(),
            };
            log::debug!("frame submitted: {stats:?}");
            Ok(stats)
        })
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.lifecycle.stage()
    }

    #[inline]
    pub fn gpu_mut(&mut self) -> &mut Gpu<'w> {
        &mut self.gpu
    }

    /// Runs one setup step, recording its failure on the lifecycle.
    fn checked<T>(&mut self, step: impl FnOnce(&mut Self) -> RenderResult<T>) -> RenderResult<T> {
        step(self).map_err(|err| self.lifecycle.fail(err))
    }
}

/// Issues `record` on `rpass`. The pass itself is opened and closed by the
/// caller, so begin/end markers are skipped.
fn replay(
    rpass: &mut wgpu::RenderPass<'_>,
    record: &PassRecord,
    pipeline: &ShapePipeline,
    shapes: &[DrawableShape],
) -> RenderResult<()> {
    for cmd in record.cmds() {
        match cmd {
            PassCmd::BeginPass { .. } | PassCmd::EndPass => {}
            PassCmd::SetPipeline => rpass.set_pipeline(pipeline.pipeline()),
            PassCmd::SetBindGroup { slot, shape } => {
                rpass.set_bind_group(*slot, resolve(shapes, *shape)?.bind_group(), &[]);
            }
            PassCmd::SetVertexBuffer { slot, shape } => {
                let s = resolve(shapes, *shape)?;
                rpass.set_vertex_buffer(*slot, s.vertex_buffer().slice(..));
            }
            PassCmd::Draw { vertices, instances } => {
                rpass.draw(vertices.clone(), instances.clone());
            }
        }
    }
    Ok(())
}

/// Handles index the uploaded shapes in registration order.
fn resolve(shapes: &[DrawableShape], handle: ShapeHandle) -> RenderResult<&DrawableShape> {
    shapes.get(handle.index()).ok_or_else(|| {
        RenderError::InvalidShape(format!("no uploaded shape for handle {}", handle.index()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Point;
    use crate::scene::Shape;

    fn uploaded() -> Lifecycle {
        let mut lc = Lifecycle::new();
        for to in [Stage::DeviceReady, Stage::PipelineReady, Stage::ResourcesUploaded] {
            lc.advance(to).unwrap();
        }
        lc
    }

    fn draws(scene: &ShapeList) -> Vec<ShapeDraw> {
        scene
            .iter()
            .map(|e| ShapeDraw {
                handle: e.handle,
                vertex_count: e.shape.vertex_count(),
            })
            .collect()
    }

    // ── frame driver ──────────────────────────────────────────────────────

    #[test]
    fn starter_scene_draws_three_six_nine() {
        let scene = presets::starter_scene().unwrap();
        let record = plan_frame(&uploaded(), presets::CLEAR_COLOR, draws(&scene)).unwrap();
        assert_eq!(record.vertex_counts(), vec![3, 6, 9]);
    }

    #[test]
    fn one_pass_and_one_draw_per_shape() {
        let scene = presets::starter_scene().unwrap();
        let record = plan_frame(&uploaded(), presets::CLEAR_COLOR, draws(&scene)).unwrap();

        assert_eq!(record.pass_count(), 1);
        assert!(!record.is_open());
        assert_eq!(record.draw_count(), scene.len());
        assert_eq!(
            record.cmds().first(),
            Some(&PassCmd::BeginPass { clear: ColorRgba::NAVY })
        );
        assert_eq!(record.cmds().last(), Some(&PassCmd::EndPass));
    }

    #[test]
    fn empty_scene_still_clears() {
        let record = plan_frame(&uploaded(), ColorRgba::BLACK, Vec::new()).unwrap();
        assert_eq!(record.pass_count(), 1);
        assert_eq!(record.draw_count(), 0);
    }

    #[test]
    fn rectangle_draw_binds_green_uniform() {
        let rect = Shape::from_coords(&[
            -0.5, -0.75, 0.5, -0.75, 0.5, 0.0, -0.5, -0.75, 0.5, 0.0, -0.5, 0.0,
        ])
        .unwrap();
        let scene = ShapeList::new().with(rect, ColorRgba::new(0.0, 1.0, 0.0, 1.0));
        let record = plan_frame(&uploaded(), presets::CLEAR_COLOR, draws(&scene)).unwrap();

        let bound = record
            .cmds()
            .iter()
            .find_map(|c| match c {
                PassCmd::SetBindGroup { slot: 0, shape } => Some(*shape),
                _ => None,
            })
            .unwrap();
        let entry = scene.get(bound).unwrap();
        let uniform: &[f32] = bytemuck::cast_slice(entry.color.as_bytes());

        assert_eq!(record.vertex_counts(), vec![6]);
        assert_eq!(uniform, &[0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn later_shapes_are_recorded_later() {
        let scene = presets::starter_scene().unwrap();
        let record = plan_frame(&uploaded(), presets::CLEAR_COLOR, draws(&scene)).unwrap();
        let order: Vec<ShapeHandle> = record
            .cmds()
            .iter()
            .filter_map(|c| match c {
                PassCmd::SetVertexBuffer { shape, .. } => Some(*shape),
                _ => None,
            })
            .collect();
        assert_eq!(
            order,
            vec![ShapeHandle::new(0), ShapeHandle::new(1), ShapeHandle::new(2)]
        );
    }

    // ── failure ───────────────────────────────────────────────────────────

    #[test]
    fn no_frame_before_resources_uploaded() {
        let mut lc = Lifecycle::new();
        lc.advance(Stage::DeviceReady).unwrap();
        let tri = Shape::new(vec![Point::new(0.0, 0.0); 3]).unwrap();
        let scene = ShapeList::new().with(tri, ColorRgba::RED);

        let err = plan_frame(&lc, ColorRgba::BLACK, draws(&scene)).unwrap_err();
        assert!(matches!(err, RenderError::InvalidTransition { .. }));
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let err = resolve(&[], ShapeHandle::new(0)).unwrap_err();
        assert!(matches!(err, RenderError::InvalidShape(_)));
    }
}
