use crate::coords::Point;
use crate::error::{RenderError, RenderResult};

/// Immutable triangle-list geometry.
///
/// Invariants (checked at construction):
/// - at least one triangle, and a point count that is a multiple of 3
/// - every coordinate is finite
/// - the point count fits a `u32` draw range
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    points: Vec<Point>,
}

impl Shape {
    pub fn new(points: impl Into<Vec<Point>>) -> RenderResult<Self> {
        let points = points.into();

        if points.is_empty() {
            return Err(RenderError::InvalidShape("shape has no points".into()));
        }
        if points.len() % 3 != 0 {
            return Err(RenderError::InvalidShape(format!(
                "{} points do not form whole triangles",
                points.len()
            )));
        }
        if u32::try_from(points.len()).is_err() {
            return Err(RenderError::InvalidShape(format!(
                "{} points exceed the draw range",
                points.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(RenderError::InvalidShape(format!("point {i} is not finite")));
        }

        Ok(Self { points })
    }

    /// Builds a shape from flattened `x, y` pairs.
    pub fn from_coords(coords: &[f32]) -> RenderResult<Self> {
        if coords.len() % 2 != 0 {
            return Err(RenderError::InvalidShape(format!(
                "{} coordinates do not pair into points",
                coords.len()
            )));
        }

        let points: Vec<Point> = coords
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0], xy[1]))
            .collect();
        Self::new(points)
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of vertices drawn for this shape.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        // Fits by construction.
        self.points.len() as u32
    }

    #[inline]
    pub fn triangle_count(&self) -> u32 {
        self.vertex_count() / 3
    }

    /// Size of the vertex buffer holding this shape: `points * 2 * 4` bytes.
    #[inline]
    pub fn byte_len(&self) -> u64 {
        self.points.len() as u64 * Point::STRIDE
    }

    /// Flattened coordinates as raw vertex bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> [Point; 3] {
        [Point::new(0.0, 0.5), Point::new(-0.5, 0.0), Point::new(0.5, 0.0)]
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn accepts_whole_triangles() {
        let shape = Shape::new(tri()).unwrap();
        assert_eq!(shape.vertex_count(), 3);
        assert_eq!(shape.triangle_count(), 1);
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            Shape::new(Vec::new()),
            Err(RenderError::InvalidShape(_))
        ));
    }

    #[test]
    fn rejects_partial_triangle() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        assert!(matches!(Shape::new(pts), Err(RenderError::InvalidShape(_))));
    }

    #[test]
    fn rejects_non_finite_point() {
        let mut pts = tri();
        pts[1].y = f32::NAN;
        let err = Shape::new(pts).unwrap_err();
        assert_eq!(err, RenderError::InvalidShape("point 1 is not finite".into()));
    }

    #[test]
    fn from_coords_pairs_values() {
        let shape = Shape::from_coords(&[0.0, 0.5, -0.5, 0.0, 0.5, 0.0]).unwrap();
        assert_eq!(shape.points(), &tri());
    }

    #[test]
    fn from_coords_rejects_odd_length() {
        assert!(Shape::from_coords(&[0.0, 0.5, -0.5]).is_err());
    }

    // ── byte size ─────────────────────────────────────────────────────────

    #[test]
    fn byte_len_is_points_times_eight() {
        for triangles in 1..=5usize {
            let pts = vec![Point::new(0.1, 0.2); triangles * 3];
            let shape = Shape::new(pts).unwrap();
            assert_eq!(shape.byte_len(), shape.vertex_count() as u64 * 2 * 4);
            assert_eq!(shape.as_bytes().len() as u64, shape.byte_len());
        }
    }

    #[test]
    fn bytes_are_flattened_coordinates() {
        let shape = Shape::new(tri()).unwrap();
        let floats: &[f32] = bytemuck::cast_slice(shape.as_bytes());
        assert_eq!(floats, &[0.0, 0.5, -0.5, 0.0, 0.5, 0.0]);
    }
}
