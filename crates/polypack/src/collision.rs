//! Two-phase collision detection.
//!
//! Broad phase: a pair is a candidate iff its center distance does not exceed
//! the sum of the bounding radii. Circles that do not touch cannot hide
//! overlapping polygons, so this never drops a real collision.
//! Narrow phase: candidates are translated into the global frame and tested
//! exactly with `Polygon::intersects`.

use crate::geometry::pairwise_center_distance;
use crate::state::PackerState;

/// Dense symmetric N×N boolean relation; the diagonal stays `false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntersectionMatrix {
    n: usize,
    cells: Vec<bool>,
}

impl IntersectionMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    /// Number of polygons (rows).
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.n + j]
    }

    /// Mark `(i, j)` and `(j, i)`.
    pub fn set_pair(&mut self, i: usize, j: usize) {
        self.cells[i * self.n + j] = true;
        self.cells[j * self.n + i] = true;
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[bool] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }

    /// Indices colliding with polygon `i`.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(i)
            .iter()
            .enumerate()
            .filter_map(|(j, &hit)| hit.then_some(j))
    }

    pub fn any_in_row(&self, i: usize) -> bool {
        self.row(i).iter().any(|&hit| hit)
    }

    /// Per-polygon collision counts (row sums).
    pub fn row_counts(&self) -> Vec<usize> {
        (0..self.n)
            .map(|i| self.row(i).iter().filter(|&&hit| hit).count())
            .collect()
    }

    /// Number of unordered colliding pairs.
    pub fn pair_count(&self) -> usize {
        self.row_counts().iter().sum::<usize>() / 2
    }

    /// Nested rows, e.g. for serialization.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }
}

/// Pairs surviving the bounding-circle cull, in pair-table order.
pub fn candidates(state: &PackerState) -> Vec<(usize, usize)> {
    let distances = pairwise_center_distance(state.centers());
    let mut out = Vec::new();
    for (k, &pair) in state.pairs().iter().enumerate() {
        if distances[k] <= state.min_separation()[k] {
            out.push(pair);
        }
    }
    out
}

/// Full symmetric intersection relation of the current state.
pub fn find_intersections(state: &PackerState) -> IntersectionMatrix {
    let mut matrix = IntersectionMatrix::new(state.len());
    let cands = candidates(state);
    for &(i, j) in &cands {
        if state.global_shape(i).intersects(&state.global_shape(j)) {
            matrix.set_pair(i, j);
        }
    }
    tracing::trace!(
        polygons = state.len(),
        candidates = cands.len(),
        colliding = matrix.pair_count(),
        "find_intersections"
    );
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::Polygon;

    fn square_at(x: f64, y: f64) -> Polygon {
        Polygon::from_xy(&[
            (x - 0.5, y - 0.5),
            (x + 0.5, y - 0.5),
            (x + 0.5, y + 0.5),
            (x - 0.5, y + 0.5),
        ])
    }

    #[test]
    fn matrix_set_pair_is_symmetric() {
        let mut m = IntersectionMatrix::new(3);
        m.set_pair(2, 0);
        assert!(m.get(0, 2) && m.get(2, 0));
        assert!(!m.get(1, 1));
        assert_eq!(m.row_counts(), vec![1, 0, 1]);
        assert_eq!(m.pair_count(), 1);
        assert_eq!(m.neighbors(0).collect::<Vec<_>>(), vec![2]);
        assert!(!m.any_in_row(1));
    }

    #[test]
    fn broad_phase_keeps_close_pairs_only() {
        let mut s = PackerState::new();
        // radius 0.707 each, min separation 1.414
        s.append(vec![square_at(0.0, 0.0), square_at(1.2, 1.2), square_at(10.0, 0.0)]);
        // (1,0): distance 1.697 > 1.414; (2,*) far away
        assert!(candidates(&s).is_empty());
        s.append(vec![square_at(1.0, 0.0)]);
        let c = candidates(&s);
        assert_eq!(c, vec![(3, 0), (3, 1)]);
    }

    #[test]
    fn narrow_phase_rejects_circle_false_positive() {
        // Two diamonds whose circles overlap but whose tips point past each other.
        let a = Polygon::from_xy(&[(0.0, -1.0), (0.2, 0.0), (0.0, 1.0), (-0.2, 0.0)]);
        let b = Polygon::from_xy(&[(1.5, -1.0), (1.7, 0.0), (1.5, 1.0), (1.3, 0.0)]);
        let mut s = PackerState::new();
        s.append(vec![a, b]);
        assert_eq!(candidates(&s), vec![(1, 0)]);
        let m = find_intersections(&s);
        assert!(!m.get(0, 1));
    }
}
