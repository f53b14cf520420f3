//! The starter scene: a red triangle, a green rectangle and a white star.
//!
//! The star is three overlapping triangles in a single draw, not a proper star
//! polygon triangulation.

use crate::coords::{ColorRgba, Point};
use crate::error::RenderResult;

use super::{Shape, ShapeList};

const fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

pub const TRIANGLE: [Point; 3] = [p(0.0, 0.5), p(-0.5, 0.0), p(0.5, 0.0)];

pub const RECTANGLE: [Point; 6] = [
    p(-0.5, -0.75),
    p(0.5, -0.75),
    p(0.5, 0.0),
    p(-0.5, -0.75),
    p(0.5, 0.0),
    p(-0.5, 0.0),
];

pub const STAR: [Point; 9] = [
    p(0.0, 0.0),
    p(0.1, -0.2),
    p(-0.2, -0.4),
    //
    p(-0.2, -0.1),
    p(0.2, -0.1),
    p(0.0, -0.3),
    //
    p(0.0, -0.3),
    p(0.2, -0.4),
    p(0.1, -0.2),
];

pub const TRIANGLE_COLOR: ColorRgba = ColorRgba::RED;
pub const RECTANGLE_COLOR: ColorRgba = ColorRgba::GREEN;
pub const STAR_COLOR: ColorRgba = ColorRgba::WHITE;

/// Background of the starter frame.
pub const CLEAR_COLOR: ColorRgba = ColorRgba::NAVY;

/// Triangle, rectangle, star, in that paint order.
pub fn starter_scene() -> RenderResult<ShapeList> {
    Ok(ShapeList::new()
        .with(Shape::new(TRIANGLE)?, TRIANGLE_COLOR)
        .with(Shape::new(RECTANGLE)?, RECTANGLE_COLOR)
        .with(Shape::new(STAR)?, STAR_COLOR))
}
