//! Accepted polygon inputs and their validation.
//!
//! Three variants, resolved once at ingestion:
//! - `Points`: raw ordered `(x, y)` data.
//! - `Provider`: anything exposing vertices through `VertexSource`; user types
//!   implement the trait, closures `Fn() -> Vec<Vector2<f64>>` get it for free.
//! - `Polygon`: an existing `Polygon` value.
//!
//! All coordinates are global; the packer splits them into local shape + center.

use std::fmt;

use nalgebra::Vector2;

use crate::error::{PackError, PackResult};
use crate::geometry::{has_degenerate_area, signed_area};
use crate::polygon::Polygon;

/// Types that can hand out their vertex ring.
pub trait VertexSource {
    fn vertices(&self) -> Vec<Vector2<f64>>;
}

impl<F> VertexSource for F
where
    F: Fn() -> Vec<Vector2<f64>>,
{
    fn vertices(&self) -> Vec<Vector2<f64>> {
        self()
    }
}

/// One polygon as handed to `PolyPacker::add_polygons`.
pub enum ShapeInput {
    Points(Vec<Vector2<f64>>),
    Provider(Box<dyn VertexSource>),
    Polygon(Polygon),
}

impl ShapeInput {
    pub fn provider(source: impl VertexSource + 'static) -> Self {
        Self::Provider(Box::new(source))
    }

    /// Raw vertices before cleanup.
    fn raw_vertices(self) -> Vec<Vector2<f64>> {
        match self {
            Self::Points(points) => points,
            Self::Provider(source) => source.vertices(),
            Self::Polygon(poly) => poly.into_vertices(),
        }
    }

    /// Validate into a global-frame `Polygon`.
    ///
    /// Drops consecutive duplicates and a closing vertex equal to the first;
    /// rejects non-finite coordinates, fewer than 3 distinct vertices, and
    /// zero area. `index` only labels the error.
    pub fn resolve(self, index: usize) -> PackResult<Polygon> {
        let raw = self.raw_vertices();
        if let Some(p) = raw.iter().find(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(PackError::shape(
                index,
                format!("non-finite vertex ({}, {})", p.x, p.y),
            ));
        }
        let mut ring = raw;
        ring.dedup();
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        let distinct = count_distinct(&ring);
        if distinct < 3 {
            return Err(PackError::shape(
                index,
                format!("need at least 3 distinct vertices, got {distinct}"),
            ));
        }
        if has_degenerate_area(&ring, signed_area(&ring)) {
            return Err(PackError::shape(index, "polygon has zero area"));
        }
        Ok(Polygon::new(ring))
    }
}

fn count_distinct(ring: &[Vector2<f64>]) -> usize {
    let mut pts = ring.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));
    pts.dedup();
    pts.len()
}

impl fmt::Debug for ShapeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points(points) => f.debug_tuple("Points").field(points).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
            Self::Polygon(poly) => f.debug_tuple("Polygon").field(poly).finish(),
        }
    }
}

impl From<Polygon> for ShapeInput {
    fn from(poly: Polygon) -> Self {
        Self::Polygon(poly)
    }
}

impl From<Vec<Vector2<f64>>> for ShapeInput {
    fn from(points: Vec<Vector2<f64>>) -> Self {
        Self::Points(points)
    }
}

impl From<Vec<(f64, f64)>> for ShapeInput {
    fn from(xy: Vec<(f64, f64)>) -> Self {
        Self::Points(xy.into_iter().map(|(x, y)| Vector2::new(x, y)).collect())
    }
}

impl From<&[(f64, f64)]> for ShapeInput {
    fn from(xy: &[(f64, f64)]) -> Self {
        Self::Points(xy.iter().map(|&(x, y)| Vector2::new(x, y)).collect())
    }
}

impl From<Vec<[f64; 2]>> for ShapeInput {
    fn from(xy: Vec<[f64; 2]>) -> Self {
        Self::Points(xy.into_iter().map(|[x, y]| Vector2::new(x, y)).collect())
    }
}
