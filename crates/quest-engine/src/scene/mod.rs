//! Scene (CPU-side) types.
//!
//! Responsibilities:
//! - validated shape geometry and its registration order
//! - renderer-agnostic pass commands, so a frame can be inspected without a GPU
//! - the built-in starter shapes

mod cmd;
mod key;
mod list;
mod shape;

pub mod presets;

pub use cmd::{PassCmd, PassRecord, ShapeDraw};
pub use key::ShapeHandle;
pub use list::{ShapeEntry, ShapeList};
pub use shape::Shape;
