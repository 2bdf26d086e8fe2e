//! Density metric: how much of a target region the polygons cover.
//!
//! The region may be any simple polygon. It is split into triangles by ear
//! clipping once per call, and every polygon is clipped against each triangle
//! (Sutherland–Hodgman). Overlaps between polygons are counted once per
//! polygon, matching a plain sum of per-polygon intersection areas.

use nalgebra::Vector2;

use crate::error::{PackError, PackResult};
use crate::geometry::{cross, has_degenerate_area, signed_area};
use crate::polygon::Polygon;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapMode {
    /// Covered area in absolute units.
    #[default]
    Absolute,
    /// Covered area divided by the region area.
    Relative,
}

/// Sum of `area(polygon ∩ region)` over all polygons; 0 without a region.
pub fn overlap_area(
    polygons: &[Polygon],
    region: Option<&Polygon>,
    mode: OverlapMode,
) -> PackResult<f64> {
    let Some(region) = region else {
        return Ok(0.0);
    };
    let ring = ccw_ring(region)?;
    let pieces = triangulate(&ring)?;
    let covered: f64 = polygons
        .iter()
        .map(|p| {
            pieces
                .iter()
                .map(|tri| signed_area(&clip_convex(p.vertices(), tri)).abs())
                .sum::<f64>()
        })
        .sum();
    Ok(match mode {
        OverlapMode::Absolute => covered,
        OverlapMode::Relative => covered / signed_area(&ring),
    })
}

/// Region vertices in counterclockwise order, or an error if degenerate.
fn ccw_ring(region: &Polygon) -> PackResult<Vec<Vector2<f64>>> {
    let mut ring = region.vertices().to_vec();
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.len() < 3 {
        return Err(PackError::region("need at least 3 vertices"));
    }
    let area = signed_area(&ring);
    if has_degenerate_area(&ring, area) {
        return Err(PackError::region("region has zero area"));
    }
    if area < 0.0 {
        ring.reverse();
    }
    Ok(ring)
}

/// Ear-clipping triangulation of a simple counterclockwise ring.
///
/// Collinear corners are dropped without emitting a triangle. Self-intersecting
/// rings fail either because a full pass finds no ear or because the
/// triangles do not add up to the ring's area.
pub fn triangulate(ring: &[Vector2<f64>]) -> PackResult<Vec<[Vector2<f64>; 3]>> {
    let mut idx: Vec<usize> = (0..ring.len()).collect();
    let mut out = Vec::with_capacity(ring.len().saturating_sub(2));
    let mut misses = 0;
    let mut k = 0;
    while idx.len() > 3 {
        let m = idx.len();
        if misses >= m {
            return Err(PackError::region("region must be a simple polygon"));
        }
        let (ia, ib, ic) = (idx[(k + m - 1) % m], idx[k % m], idx[(k + 1) % m]);
        let (a, b, c) = (ring[ia], ring[ib], ring[ic]);
        let turn = cross(a, b, c);
        if turn == 0.0 {
            idx.remove(k % m);
            misses = 0;
            continue;
        }
        let blocked = turn < 0.0
            || idx
                .iter()
                .filter(|&&j| j != ia && j != ib && j != ic)
                .map(|&j| ring[j])
                .any(|p| p != a && p != b && p != c && in_triangle(a, b, c, p));
        if blocked {
            k = (k + 1) % m;
            misses += 1;
            continue;
        }
        out.push([a, b, c]);
        idx.remove(k % m);
        misses = 0;
        if k >= idx.len() {
            k = 0;
        }
    }
    if let [ia, ib, ic] = idx[..] {
        let tri = [ring[ia], ring[ib], ring[ic]];
        if cross(tri[0], tri[1], tri[2]) > 0.0 {
            out.push(tri);
        }
    }
    let area = signed_area(ring);
    let total: f64 = out.iter().map(|t| signed_area(t)).sum();
    if (total - area).abs() > 1e-9 * area.abs() {
        return Err(PackError::region("region must be a simple polygon"));
    }
    Ok(out)
}

/// `p` inside or on the counterclockwise triangle `a, b, c`.
#[inline]
fn in_triangle(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, p: Vector2<f64>) -> bool {
    cross(a, b, p) >= 0.0 && cross(b, c, p) >= 0.0 && cross(c, a, p) >= 0.0
}

/// Clip `subject` against the convex counterclockwise ring `clip`.
pub fn clip_convex(subject: &[Vector2<f64>], clip: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let mut output = subject.to_vec();
    let m = clip.len();
    for k in 0..m {
        let a = clip[k];
        let b = clip[(k + 1) % m];
        let input = std::mem::take(&mut output);
        let Some(&last) = input.last() else {
            break;
        };
        let mut s = last;
        for &e in &input {
            let e_in = cross(a, b, e) >= 0.0;
            let s_in = cross(a, b, s) >= 0.0;
            if e_in {
                if !s_in {
                    output.push(edge_crossing(s, e, a, b));
                }
                output.push(e);
            } else if s_in {
                output.push(edge_crossing(s, e, a, b));
            }
            s = e;
        }
    }
    output
}

/// Point where segment `s→e` crosses the line through `a, b`.
#[inline]
fn edge_crossing(
    s: Vector2<f64>,
    e: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
) -> Vector2<f64> {
    let ds = cross(a, b, s);
    let de = cross(a, b, e);
    let t = ds / (ds - de);
    s + (e - s) * t
}
