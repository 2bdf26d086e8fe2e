//! Exact polygon/polygon intersection for simple (possibly non-convex) rings.
//!
//! Two rings intersect iff some pair of edges meets (touching included) or one
//! ring lies entirely inside the other. Edge tests use orientation signs; the
//! containment fallback is an even-odd crossing count on one vertex.

use nalgebra::Vector2;

use crate::geometry::{bounds, cross};

/// True if the closed regions bounded by `a` and `b` share at least one point.
pub fn rings_intersect(a: &[Vector2<f64>], b: &[Vector2<f64>]) -> bool {
    let (Some((a_lo, a_hi)), Some((b_lo, b_hi))) = (bounds(a), bounds(b)) else {
        return false;
    };
    if a_hi.x < b_lo.x || b_hi.x < a_lo.x || a_hi.y < b_lo.y || b_hi.y < a_lo.y {
        return false;
    }
    if edges_cross(a, b) {
        return true;
    }
    contains_point(b, a[0]) || contains_point(a, b[0])
}

fn edges_cross(a: &[Vector2<f64>], b: &[Vector2<f64>]) -> bool {
    let na = a.len();
    let nb = b.len();
    for i in 0..na {
        let p1 = a[i];
        let p2 = a[(i + 1) % na];
        for j in 0..nb {
            let q1 = b[j];
            let q2 = b[(j + 1) % nb];
            if segments_intersect(p1, p2, q1, q2) {
                return true;
            }
        }
    }
    false
}

/// Closed segments `[p1,p2]` and `[q1,q2]` share a point (endpoints included).
pub fn segments_intersect(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    q1: Vector2<f64>,
    q2: Vector2<f64>,
) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

/// `p` is known collinear with `[a,b]`; check it lies within the segment's box.
#[inline]
fn on_segment(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>) -> bool {
    a.x.min(b.x) <= p.x && p.x <= a.x.max(b.x) && a.y.min(b.y) <= p.y && p.y <= a.y.max(b.y)
}

/// Even-odd point-in-ring test (interior only; boundary handled by edge tests).
pub fn contains_point(ring: &[Vector2<f64>], p: Vector2<f64>) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = ring[i];
        let vj = ring[j];
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_at = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_at {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Vector2<f64>> {
        vec![
            vector![x0, y0],
            vector![x1, y0],
            vector![x1, y1],
            vector![x0, y1],
        ]
    }

    #[test]
    fn overlapping_and_disjoint_squares() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        assert!(rings_intersect(&a, &rect(0.3, 0.0, 1.3, 1.0)));
        assert!(!rings_intersect(&a, &rect(2.0, 0.0, 3.0, 1.0)));
    }

    #[test]
    fn shared_edge_counts_as_intersecting() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        assert!(rings_intersect(&a, &rect(1.0, 0.0, 2.0, 1.0)));
        // corner contact only
        assert!(rings_intersect(&a, &rect(1.0, 1.0, 2.0, 2.0)));
    }

    #[test]
    fn containment_without_edge_contact() {
        let big = rect(-2.0, -2.0, 2.0, 2.0);
        let small = rect(-0.1, -0.1, 0.1, 0.1);
        assert!(rings_intersect(&big, &small));
        assert!(rings_intersect(&small, &big));
    }

    #[test]
    fn crossing_bars_without_contained_vertices() {
        let horizontal = rect(-2.0, -0.1, 2.0, 0.1);
        let vertical = rect(-0.1, -2.0, 0.1, 2.0);
        assert!(rings_intersect(&horizontal, &vertical));
    }

    #[test]
    fn square_in_notch_of_l_shape_is_free() {
        // L-shape occupying [0,2]x[0,2] minus the top-right quadrant.
        let l = vec![
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![2.0, 1.0],
            vector![1.0, 1.0],
            vector![1.0, 2.0],
            vector![0.0, 2.0],
        ];
        let in_notch = rect(1.2, 1.2, 1.8, 1.8);
        assert!(!rings_intersect(&l, &in_notch));
        let into_arm = rect(0.8, 1.2, 1.8, 1.8);
        assert!(rings_intersect(&l, &into_arm));
    }

    #[test]
    fn point_in_ring_even_odd() {
        let sq = rect(0.0, 0.0, 1.0, 1.0);
        assert!(contains_point(&sq, vector![0.5, 0.5]));
        assert!(!contains_point(&sq, vector![1.5, 0.5]));
        assert!(!contains_point(&sq[..2], vector![0.5, 0.0]));
    }
}
