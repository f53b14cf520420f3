//! Geometry and color primitives shared by the scene and the renderer.
//!
//! Positions are in normalized device coordinates:
//! - origin at the surface center
//! - +X right, +Y up, both axes spanning `[-1, 1]`

mod color;
mod point;

pub use color::ColorRgba;
pub use point::Point;
