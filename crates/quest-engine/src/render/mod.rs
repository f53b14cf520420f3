//! GPU rendering.
//!
//! One pipeline draws every shape: positions arrive as `vec2f` in normalized
//! device coordinates and each shape's fill color comes from its own uniform
//! buffer. Frames are recorded as [`PassRecord`](crate::scene::PassRecord)s
//! first and then replayed onto a wgpu render pass.

mod ctx;
mod drawable;
mod frame;
mod lifecycle;
mod pipeline;

pub mod shader;

pub use ctx::RenderCtx;
pub use drawable::DrawableShape;
pub use frame::{plan_frame, FrameStats, ShapeRenderer};
pub use lifecycle::{Lifecycle, Stage};
pub use pipeline::ShapePipeline;
