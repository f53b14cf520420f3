use std::ops::Range;

use crate::coords::ColorRgba;

use super::ShapeHandle;

/// Renderer-agnostic render pass command.
///
/// Shapes refer to their GPU resources by handle; the renderer resolves them
/// when replaying a [`PassRecord`] onto a real pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PassCmd {
    BeginPass { clear: ColorRgba },
    SetPipeline,
    SetBindGroup { slot: u32, shape: ShapeHandle },
    SetVertexBuffer { slot: u32, shape: ShapeHandle },
    Draw { vertices: Range<u32>, instances: Range<u32> },
    EndPass,
}

/// Recorded command stream for one frame.
#[derive(Debug, Default)]
pub struct PassRecord {
    cmds: Vec<PassCmd>,
    open: bool,
    pipeline_bound: bool,
}

impl PassRecord {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a pass cleared to `clear`.
    ///
    /// # Panics
    /// Panics (debug only) if a pass is already open.
    pub fn begin_pass(&mut self, clear: ColorRgba) {
        debug_assert!(!self.open, "begin_pass called inside an open pass");
        self.open = true;
        self.pipeline_bound = false;
        self.cmds.push(PassCmd::BeginPass { clear });
    }

    /// # Panics
    /// Panics (debug only) without a matching `begin_pass`.
    pub fn end_pass(&mut self) {
        debug_assert!(self.open, "end_pass called without begin_pass");
        self.open = false;
        self.cmds.push(PassCmd::EndPass);
    }

    /// Binds the shared pipeline. A no-op if it is already bound in this pass.
    pub fn set_pipeline(&mut self) {
        if self.pipeline_bound {
            return;
        }
        self.pipeline_bound = true;
        self.cmds.push(PassCmd::SetPipeline);
    }

    pub fn set_bind_group(&mut self, slot: u32, shape: ShapeHandle) {
        self.cmds.push(PassCmd::SetBindGroup { slot, shape });
    }

    pub fn set_vertex_buffer(&mut self, slot: u32, shape: ShapeHandle) {
        self.cmds.push(PassCmd::SetVertexBuffer { slot, shape });
    }

    pub fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>) {
        self.cmds.push(PassCmd::Draw { vertices, instances });
    }

    #[inline]
    pub fn cmds(&self) -> &[PassCmd] {
        &self.cmds
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn pass_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|c| matches!(c, PassCmd::BeginPass { .. }))
            .count()
    }

    pub fn draw_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|c| matches!(c, PassCmd::Draw { .. }))
            .count()
    }

    /// Vertex count of every draw, in record order.
    pub fn vertex_counts(&self) -> Vec<u32> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                PassCmd::Draw { vertices, .. } => Some(vertices.end - vertices.start),
                _ => None,
            })
            .collect()
    }
}

/// What a single shape contributes to a pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShapeDraw {
    pub handle: ShapeHandle,
    pub vertex_count: u32,
}

impl ShapeDraw {
    /// Binds pipeline, bind group (slot 0) and vertex buffer (slot 0), then draws
    /// all vertices as a single instance.
    pub fn record(self, pass: &mut PassRecord) {
        pass.set_pipeline();
        pass.set_bind_group(0, self.handle);
        pass.set_vertex_buffer(0, self.handle);
        pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(index: u32, vertex_count: u32) -> ShapeDraw {
        ShapeDraw { handle: ShapeHandle::new(index), vertex_count }
    }

    #[test]
    fn shape_draw_sequence() {
        let mut pass = PassRecord::new();
        pass.begin_pass(ColorRgba::BLACK);
        draw(2, 6).record(&mut pass);
        pass.end_pass();

        let h = ShapeHandle::new(2);
        assert_eq!(
            pass.cmds(),
            &[
                PassCmd::BeginPass { clear: ColorRgba::BLACK },
                PassCmd::SetPipeline,
                PassCmd::SetBindGroup { slot: 0, shape: h },
                PassCmd::SetVertexBuffer { slot: 0, shape: h },
                PassCmd::Draw { vertices: 0..6, instances: 0..1 },
                PassCmd::EndPass,
            ]
        );
    }

    #[test]
    fn pipeline_bound_once_per_pass() {
        let mut pass = PassRecord::new();
        pass.begin_pass(ColorRgba::BLACK);
        draw(0, 3).record(&mut pass);
        draw(1, 3).record(&mut pass);
        pass.end_pass();

        let binds = pass
            .cmds()
            .iter()
            .filter(|c| **c == PassCmd::SetPipeline)
            .count();
        assert_eq!(binds, 1);
        assert_eq!(pass.draw_count(), 2);
    }

    #[test]
    fn new_pass_rebinds_pipeline() {
        let mut pass = PassRecord::new();
        for _ in 0..2 {
            pass.begin_pass(ColorRgba::BLACK);
            draw(0, 3).record(&mut pass);
            pass.end_pass();
        }
        assert_eq!(pass.pass_count(), 2);
        let binds = pass
            .cmds()
            .iter()
            .filter(|c| **c == PassCmd::SetPipeline)
            .count();
        assert_eq!(binds, 2);
    }

    #[test]
    fn open_state_tracks_begin_end() {
        let mut pass = PassRecord::new();
        assert!(!pass.is_open());
        pass.begin_pass(ColorRgba::BLACK);
        assert!(pass.is_open());
        pass.end_pass();
        assert!(!pass.is_open());
    }
}
