//! Polygon value type: an ordered, implicitly closed vertex ring.

use nalgebra::Vector2;

use crate::geometry::{bounding_radius, bounds, midpoint, signed_area};
use crate::intersect::rings_intersect;

/// Ordered vertex ring. The last vertex connects back to the first.
///
/// Vertex order is kept as supplied; nothing in the engine re-orders it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vector2<f64>>,
}

impl Polygon {
    /// Wrap a vertex ring without validation; see `ShapeInput` for checked ingestion.
    pub fn new(vertices: Vec<Vector2<f64>>) -> Self {
        Self { vertices }
    }

    pub fn from_xy(xy: &[(f64, f64)]) -> Self {
        Self::new(xy.iter().map(|&(x, y)| Vector2::new(x, y)).collect())
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn into_vertices(self) -> Vec<Vector2<f64>> {
        self.vertices
    }

    /// Axis-aligned bounds `(min, max)`.
    pub fn bounds(&self) -> Option<(Vector2<f64>, Vector2<f64>)> {
        bounds(&self.vertices)
    }

    /// Bounding-box midpoint.
    pub fn midpoint(&self) -> Vector2<f64> {
        midpoint(&self.vertices)
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        signed_area(&self.vertices).abs()
    }

    /// Max vertex distance to the coordinate origin.
    pub fn bounding_radius(&self) -> f64 {
        bounding_radius(&self.vertices)
    }

    /// Copy shifted by `offset`.
    pub fn translate(&self, offset: Vector2<f64>) -> Polygon {
        Polygon {
            vertices: self.vertices.iter().map(|p| p + offset).collect(),
        }
    }

    /// Exact intersection test; shared boundary points count as intersecting.
    pub fn intersects(&self, other: &Polygon) -> bool {
        rings_intersect(&self.vertices, &other.vertices)
    }

    /// Max vertex distance to `other` (same vertex count and order assumed).
    pub fn max_vertex_distance(&self, other: &Polygon) -> Option<f64> {
        if self.len() != other.len() {
            return None;
        }
        Some(
            self.vertices
                .iter()
                .zip(&other.vertices)
                .map(|(a, b)| (a - b).norm())
                .fold(0.0, f64::max),
        )
    }
}

impl From<Vec<Vector2<f64>>> for Polygon {
    fn from(vertices: Vec<Vector2<f64>>) -> Self {
        Self::new(vertices)
    }
}
