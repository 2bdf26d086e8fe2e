//! Pure 2D helpers used by the engine.
//!
//! - Bounding-box midpoint (local origin of every stored shape).
//! - Zero-safe normalization.
//! - Bounding-circle radius and the pair-indexed distance tables.
//!
//! Pair tables enumerate the strict lower triangle row-major:
//! `(1,0), (2,0), (2,1), (3,0), ...`. Every table built here shares that order.

use nalgebra::Vector2;

/// Relative area tolerance; see `has_degenerate_area`.
pub const EPS_AREA: f64 = 1e-12;

/// Midpoint of the axis-aligned bounding box (not the centroid).
///
/// Centered there, the max vertex distance is never larger than for any
/// other bounding-box-derived origin, which keeps the culling circles tight.
/// Returns the zero vector for an empty slice.
pub fn midpoint(vertices: &[Vector2<f64>]) -> Vector2<f64> {
    let Some((lo, hi)) = bounds(vertices) else {
        return Vector2::zeros();
    };
    (lo + hi) * 0.5
}

/// Axis-aligned bounds `(min, max)`; `None` for an empty slice.
pub fn bounds(vertices: &[Vector2<f64>]) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let first = *vertices.first()?;
    Some(vertices.iter().skip(1).fold((first, first), |(lo, hi), p| {
        (
            Vector2::new(lo.x.min(p.x), lo.y.min(p.y)),
            Vector2::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

/// Unit vector in the direction of `v`; the zero vector if `|v| == 0`.
#[inline]
pub fn normalize(v: Vector2<f64>) -> Vector2<f64> {
    let norm = v.norm();
    if norm > 0.0 {
        v / norm
    } else {
        Vector2::zeros()
    }
}

/// Max distance of any vertex to the local origin.
///
/// Assumes the vertices are already expressed in the local frame.
pub fn bounding_radius(vertices: &[Vector2<f64>]) -> f64 {
    vertices.iter().map(|p| p.norm()).fold(0.0, f64::max)
}

/// z-component of `(b - a) × (c - a)`.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Shoelace area; positive for counterclockwise vertex order.
pub fn signed_area(vertices: &[Vector2<f64>]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|k| {
            let p = vertices[k];
            let q = vertices[(k + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    0.5 * twice
}

/// Area `|area| <= EPS_AREA * d²`, with `d` the bounding-box diagonal of `vertices`.
///
/// Scale-relative so tiny but well-formed rings stay valid while collinear
/// rings (exactly or up to rounding) are rejected at any scale.
pub fn has_degenerate_area(vertices: &[Vector2<f64>], area: f64) -> bool {
    let Some((lo, hi)) = bounds(vertices) else {
        return true;
    };
    area.abs() <= EPS_AREA * (hi - lo).norm_squared()
}

/// Unordered index pairs `(i, j)` with `i > j`, lower triangle row-major.
pub fn pair_indices(n: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(pair_count(n));
    for i in 1..n {
        for j in 0..i {
            out.push((i, j));
        }
    }
    out
}

/// Number of unordered pairs among `n` items.
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Minimum clearance per pair: sum of the two bounding radii.
///
/// Returns the table together with its parallel pair index.
pub fn min_separation(radii: &[f64]) -> (Vec<f64>, Vec<(usize, usize)>) {
    let pairs = pair_indices(radii.len());
    let table = pairs.iter().map(|&(i, j)| radii[i] + radii[j]).collect();
    (table, pairs)
}

/// Euclidean distance between centers for every unordered pair.
pub fn pairwise_center_distance(centers: &[Vector2<f64>]) -> Vec<f64> {
    pair_indices(centers.len())
        .into_iter()
        .map(|(i, j)| (centers[i] - centers[j]).norm())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn midpoint_uses_bounds_not_centroid() {
        // Right triangle: centroid is (1/3, 1/3), bbox midpoint is (0.5, 0.5).
        let tri = [vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]];
        let m = midpoint(&tri);
        assert!((m - vector![0.5, 0.5]).norm() < 1e-12);
    }

    #[test]
    fn normalize_zero_is_zero() {
        let z = normalize(Vector2::zeros());
        assert_eq!(z, Vector2::zeros());
        assert!(!z.x.is_nan() && !z.y.is_nan());
        let u = normalize(vector![3.0, -4.0]);
        assert!((u - vector![0.6, -0.8]).norm() < 1e-12);
    }

    #[test]
    fn bounding_radius_of_centered_square() {
        let sq = [
            vector![-0.5, -0.5],
            vector![0.5, -0.5],
            vector![0.5, 0.5],
            vector![-0.5, 0.5],
        ];
        assert!((bounding_radius(&sq) - 0.5f64.sqrt()).abs() < 1e-12);
        assert!((signed_area(&sq) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_area_is_scale_relative() {
        let tiny = [
            vector![0.0, 0.0],
            vector![1e-7, 0.0],
            vector![1e-7, 1e-7],
            vector![0.0, 1e-7],
        ];
        assert!(!has_degenerate_area(&tiny, signed_area(&tiny)));
        let line = [vector![0.0, 0.0], vector![1e6, 1e6], vector![2e6, 2e6]];
        assert!(has_degenerate_area(&line, signed_area(&line)));
        assert!(has_degenerate_area(&[], 0.0));
    }

    #[test]
    fn pair_tables_share_lower_triangle_order() {
        assert_eq!(pair_indices(4), vec![(1, 0), (2, 0), (2, 1), (3, 0), (3, 1), (3, 2)]);
        assert_eq!(pair_count(4), 6);
        assert!(pair_indices(1).is_empty());
        assert!(pair_indices(0).is_empty());

        let (table, pairs) = min_separation(&[1.0, 2.0, 4.0]);
        assert_eq!(pairs, vec![(1, 0), (2, 0), (2, 1)]);
        assert_eq!(table, vec![3.0, 5.0, 6.0]);

        let d = pairwise_center_distance(&[vector![0.0, 0.0], vector![3.0, 4.0], vector![0.0, 1.0]]);
        assert_eq!(d.len(), 3);
        assert!((d[0] - 5.0).abs() < 1e-12);
        assert!((d[1] - 1.0).abs() < 1e-12);
        assert!((d[2] - 18.0f64.sqrt()).abs() < 1e-12);
    }
}
