//! Packer state: local shapes, global centers, and the min-separation cache.
//!
//! Invariants
//! - `centers`, `shapes`, `radii` are index-aligned and of equal length.
//! - Every shape is expressed around its own bounding-box midpoint.
//! - `min_separation`/`pairs` cover all unordered pairs in lower-triangle
//!   order and are rebuilt in full whenever the polygon set grows.

use nalgebra::Vector2;

use crate::geometry::{min_separation, pair_count};
use crate::polygon::Polygon;

#[derive(Clone, Debug, Default)]
pub struct PackerState {
    centers: Vec<Vector2<f64>>,
    shapes: Vec<Polygon>,
    radii: Vec<f64>,
    pairs: Vec<(usize, usize)>,
    min_separation: Vec<f64>,
}

impl PackerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty state with room for `n` polygons and their pair tables.
    pub fn with_capacity(n: usize) -> Self {
        let m = pair_count(n);
        Self {
            centers: Vec::with_capacity(n),
            shapes: Vec::with_capacity(n),
            radii: Vec::with_capacity(n),
            pairs: Vec::with_capacity(m),
            min_separation: Vec::with_capacity(m),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[inline]
    pub fn centers(&self) -> &[Vector2<f64>] {
        &self.centers
    }

    #[inline]
    pub fn shapes(&self) -> &[Polygon] {
        &self.shapes
    }

    #[inline]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    #[inline]
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    #[inline]
    pub fn min_separation(&self) -> &[f64] {
        &self.min_separation
    }

    /// Shape `i` translated to its current center.
    pub fn global_shape(&self, i: usize) -> Polygon {
        self.shapes[i].translate(self.centers[i])
    }

    /// Split global polygons into (center, local shape), append, rebuild caches.
    pub fn append(&mut self, polygons: Vec<Polygon>) {
        self.centers.reserve(polygons.len());
        self.shapes.reserve(polygons.len());
        for poly in polygons {
            let mid = poly.midpoint();
            self.shapes.push(poly.translate(-mid));
            self.centers.push(mid);
        }
        self.rebuild();
    }

    /// Apply one displacement per polygon.
    ///
    /// Callers compute all displacements from the same snapshot first.
    pub fn displace(&mut self, displacements: &[Vector2<f64>]) {
        debug_assert_eq!(displacements.len(), self.centers.len());
        for (c, d) in self.centers.iter_mut().zip(displacements) {
            *c += d;
        }
    }

    fn rebuild(&mut self) {
        self.radii = self.shapes.iter().map(Polygon::bounding_radius).collect();
        let (table, pairs) = min_separation(&self.radii);
        self.min_separation = table;
        self.pairs = pairs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn square_at(x: f64, y: f64, side: f64) -> Polygon {
        let h = side / 2.0;
        Polygon::from_xy(&[
            (x - h, y - h),
            (x + h, y - h),
            (x + h, y + h),
            (x - h, y + h),
        ])
    }

    #[test]
    fn append_recenters_on_bbox_midpoint() {
        let mut s = PackerState::with_capacity(2);
        s.append(vec![square_at(3.0, -1.0, 2.0)]);
        assert_eq!(s.len(), 1);
        assert!((s.centers()[0] - vector![3.0, -1.0]).norm() < 1e-12);
        assert!(s.shapes()[0].midpoint().norm() < 1e-12);
        assert!((s.radii()[0] - 2.0f64.sqrt()).abs() < 1e-12);
        assert!(s.pairs().is_empty());
    }

    #[test]
    fn cache_rebuilt_over_all_polygons() {
        let mut s = PackerState::new();
        s.append(vec![square_at(0.0, 0.0, 2.0), square_at(5.0, 0.0, 2.0)]);
        assert_eq!(s.min_separation().len(), 1);
        s.append(vec![square_at(0.0, 5.0, 4.0)]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.pairs(), &[(1, 0), (2, 0), (2, 1)]);
        let r_small = 2.0f64.sqrt();
        let r_big = 8.0f64.sqrt();
        let expect = [2.0 * r_small, r_big + r_small, r_big + r_small];
        for (got, want) in s.min_separation().iter().zip(expect) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn displace_shifts_global_shape() {
        let mut s = PackerState::new();
        s.append(vec![square_at(0.0, 0.0, 1.0)]);
        s.displace(&[vector![1.0, 2.0]]);
        assert!((s.global_shape(0).midpoint() - vector![1.0, 2.0]).norm() < 1e-12);
    }
}
