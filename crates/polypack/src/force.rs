//! Explicit Euler update of polygon centers.
//!
//! Per polygon `i`:
//! - colliding: move `repulsion` along the re-normalized sum of unit vectors
//!   pointing from each colliding neighbour's center to `i`'s center;
//! - free: move `attraction` towards the global origin.
//!
//! Displacements are computed from one snapshot of the centers and applied
//! afterwards in a separate pass. No velocity or damping state is kept.

use nalgebra::Vector2;

use crate::collision::IntersectionMatrix;
use crate::error::{PackError, PackResult};
use crate::geometry::normalize;

/// Step sizes for the two forces. Zero disables a force.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coefficients {
    pub attraction: f64,
    pub repulsion: f64,
}

impl Coefficients {
    /// Checked constructor: both values finite and non-negative.
    pub fn new(attraction: f64, repulsion: f64) -> PackResult<Self> {
        check("attraction", attraction)?;
        check("repulsion", repulsion)?;
        Ok(Self {
            attraction,
            repulsion,
        })
    }
}

fn check(name: &'static str, value: f64) -> PackResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PackError::InvalidArgument { name, value })
    }
}

/// Outward unit direction for polygon `i`; zero if contributions cancel.
pub fn repulsion_direction(
    centers: &[Vector2<f64>],
    hits: &IntersectionMatrix,
    i: usize,
) -> Vector2<f64> {
    let sum = hits
        .neighbors(i)
        .map(|j| normalize(centers[i] - centers[j]))
        .fold(Vector2::zeros(), |acc, u| acc + u);
    normalize(sum)
}

/// One displacement per polygon, all read from `centers` before any write.
pub fn displacements(
    centers: &[Vector2<f64>],
    hits: &IntersectionMatrix,
    coeffs: Coefficients,
) -> Vec<Vector2<f64>> {
    debug_assert_eq!(centers.len(), hits.len());
    (0..centers.len())
        .map(|i| {
            if hits.any_in_row(i) {
                repulsion_direction(centers, hits, i) * coeffs.repulsion
            } else {
                normalize(-centers[i]) * coeffs.attraction
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn coefficients_reject_negative_and_non_finite() {
        assert!(Coefficients::new(0.0, 0.0).is_ok());
        assert_eq!(
            Coefficients::new(-0.1, 0.0),
            Err(PackError::InvalidArgument {
                name: "attraction",
                value: -0.1
            })
        );
        assert!(matches!(
            Coefficients::new(0.1, f64::INFINITY),
            Err(PackError::InvalidArgument {
                name: "repulsion",
                ..
            })
        ));
        assert!(Coefficients::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn free_polygons_move_towards_origin() {
        let centers = [vector![3.0, 4.0], vector![0.0, 0.0]];
        let hits = IntersectionMatrix::new(2);
        let d = displacements(&centers, &hits, Coefficients::new(0.5, 9.0).unwrap());
        assert!((d[0] - vector![-0.3, -0.4]).norm() < 1e-12);
        // at the origin the attraction direction is zero
        assert_eq!(d[1], Vector2::zeros());
    }

    #[test]
    fn opposing_neighbours_cancel() {
        // middle polygon is hit symmetrically from both sides
        let centers = [vector![-1.0, 0.0], vector![0.0, 0.0], vector![1.0, 0.0]];
        let mut hits = IntersectionMatrix::new(3);
        hits.set_pair(0, 1);
        hits.set_pair(1, 2);
        let d = displacements(&centers, &hits, Coefficients::new(0.1, 0.5).unwrap());
        assert_eq!(d[1], Vector2::zeros());
        assert!((d[0] - vector![-0.5, 0.0]).norm() < 1e-12);
        assert!((d[2] - vector![0.5, 0.0]).norm() < 1e-12);
    }

    #[test]
    fn repulsion_sum_is_renormalized() {
        let centers = [vector![0.0, 0.0], vector![-1.0, 0.0], vector![0.0, -2.0]];
        let mut hits = IntersectionMatrix::new(3);
        hits.set_pair(0, 1);
        hits.set_pair(0, 2);
        let dir = repulsion_direction(&centers, &hits, 0);
        let s = 0.5f64.sqrt();
        assert!((dir - vector![s, s]).norm() < 1e-12);
    }
}
