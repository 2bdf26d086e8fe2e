//! `PolyPacker`: the engine handed to drivers.
//!
//! Every mutating call validates first and mutates afterwards, so a failed
//! call leaves the packer untouched.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector2;

use crate::collision::{self, IntersectionMatrix};
use crate::error::{PackError, PackResult};
use crate::force::{self, Coefficients};
use crate::polygon::Polygon;
use crate::shape::ShapeInput;
use crate::state::PackerState;

/// Frame of reference for polygon queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Frame {
    /// Around the polygon's own bounding-box midpoint.
    #[default]
    Local,
    /// Shared simulation coordinates.
    Global,
}

impl FromStr for Frame {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "global" => Ok(Self::Global),
            other => Err(PackError::InvalidFrame {
                frame: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Global => "global",
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct PolyPacker {
    state: PackerState,
}

impl PolyPacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocate for `n` polygons.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            state: PackerState::with_capacity(n),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Read-only view of the engine state (centers, radii, pair tables).
    #[inline]
    pub fn state(&self) -> &PackerState {
        &self.state
    }

    #[inline]
    pub fn centers(&self) -> &[Vector2<f64>] {
        self.state.centers()
    }

    /// Add polygons given in global coordinates.
    ///
    /// All inputs are validated before any is stored; one bad input rejects
    /// the whole call. The min-separation cache is rebuilt over all polygons.
    pub fn add_polygons<I, T>(&mut self, inputs: I) -> PackResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<ShapeInput>,
    {
        let polys = inputs
            .into_iter()
            .enumerate()
            .map(|(k, input)| Into::<ShapeInput>::into(input).resolve(k))
            .collect::<PackResult<Vec<_>>>()?;
        let added = polys.len();
        self.state.append(polys);
        tracing::debug!(added, total = self.len(), "add_polygons");
        Ok(())
    }

    /// Polygon `index` in the requested frame.
    pub fn polygon(&self, index: usize, frame: Frame) -> PackResult<Polygon> {
        if index >= self.len() {
            return Err(PackError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(match frame {
            Frame::Local => self.state.shapes()[index].clone(),
            Frame::Global => self.state.global_shape(index),
        })
    }

    /// All polygons in the requested frame.
    pub fn polygons(&self, frame: Frame) -> Vec<Polygon> {
        match frame {
            Frame::Local => self.state.shapes().to_vec(),
            Frame::Global => (0..self.len()).map(|i| self.state.global_shape(i)).collect(),
        }
    }

    /// Symmetric pairwise intersection relation.
    pub fn find_intersections(&self) -> IntersectionMatrix {
        collision::find_intersections(&self.state)
    }

    /// Per-polygon collision counts for the current positions.
    pub fn collision_counts(&self) -> Vec<usize> {
        self.find_intersections().row_counts()
    }

    /// Advance one relaxation step: repel colliding polygons, attract free ones.
    pub fn step(&mut self, attraction: f64, repulsion: f64) -> PackResult<()> {
        let coeffs = Coefficients::new(attraction, repulsion)?;
        let hits = self.find_intersections();
        let moves = force::displacements(self.state.centers(), &hits, coeffs);
        self.state.displace(&moves);
        tracing::trace!(
            colliding = hits.pair_count(),
            attraction,
            repulsion,
            "step"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64) -> Vec<(f64, f64)> {
        vec![
            (x - 0.5, y - 0.5),
            (x + 0.5, y - 0.5),
            (x + 0.5, y + 0.5),
            (x - 0.5, y + 0.5),
        ]
    }

    #[test]
    fn frame_tokens() {
        assert_eq!("local".parse::<Frame>().unwrap(), Frame::Local);
        assert_eq!("global".parse::<Frame>().unwrap(), Frame::Global);
        assert_eq!(
            "Global".parse::<Frame>(),
            Err(PackError::InvalidFrame {
                frame: "Global".into()
            })
        );
        assert_eq!(Frame::Global.to_string(), "global");
        assert_eq!(Frame::default(), Frame::Local);
    }

    #[test]
    fn index_out_of_range() {
        let mut p = PolyPacker::new();
        p.add_polygons([square(0.0, 0.0)]).unwrap();
        assert!(p.polygon(0, Frame::Local).is_ok());
        assert_eq!(
            p.polygon(1, Frame::Global),
            Err(PackError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn bad_input_aborts_whole_call() {
        let mut p = PolyPacker::new();
        p.add_polygons([square(0.0, 0.0)]).unwrap();
        let err = p
            .add_polygons([square(2.0, 0.0), vec![(0.0, 0.0), (1.0, 1.0)]])
            .unwrap_err();
        assert!(matches!(err, PackError::InvalidShape { index: 1, .. }));
        assert_eq!(p.len(), 1);
        assert!(p.state().pairs().is_empty());
    }

    #[test]
    fn invalid_coefficients_leave_centers_untouched() {
        let mut p = PolyPacker::new();
        p.add_polygons([square(2.0, 0.0)]).unwrap();
        let before = p.centers().to_vec();
        assert!(p.step(-1.0, 0.0).is_err());
        assert!(p.step(0.1, f64::NAN).is_err());
        assert_eq!(p.centers(), &before[..]);
    }
}
