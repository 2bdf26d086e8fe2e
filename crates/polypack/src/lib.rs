//! Force-driven packing of arbitrary 2D polygons.
//!
//! Polygons that overlap push each other apart, polygons that are free are
//! pulled towards the global origin. Repeated `step` calls relax a scattered
//! set of shapes into a dense arrangement; the driving loop (termination,
//! reporting, persistence) belongs to the caller.
//!
//! Layout
//! - `geometry`, `polygon`, `intersect`: pure 2D helpers and the exact
//!   polygon/polygon predicate.
//! - `shape`: the accepted input variants and their validation.
//! - `state`, `collision`, `force`: the packing engine proper.
//! - `packer`: the composition root (`PolyPacker`).
//! - `metrics`, `vtk`, `sample`: collaborators for drivers (density metric,
//!   legacy VTK output, random and demo shapes).

pub mod collision;
pub mod error;
pub mod force;
pub mod geometry;
pub mod intersect;
pub mod metrics;
pub mod packer;
pub mod polygon;
pub mod sample;
pub mod shape;
pub mod state;
pub mod vtk;


/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use collision::IntersectionMatrix;
pub use error::{PackError, PackResult};
pub use force::Coefficients;
pub use nalgebra::Vector2 as Vec2;
pub use packer::{Frame, PolyPacker};
pub use polygon::Polygon;
pub use shape::{ShapeInput, VertexSource};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::collision::IntersectionMatrix;
    pub use crate::error::{PackError, PackResult};
    pub use crate::force::Coefficients;
    pub use crate::metrics::{overlap_area, OverlapMode};
    pub use crate::packer::{Frame, PolyPacker};
    pub use crate::polygon::Polygon;
    pub use crate::sample::{demo_shapes, draw_star_polygon, ReplayToken, StarCfg};
    pub use crate::shape::{ShapeInput, VertexSource};
    pub use nalgebra::Vector2 as Vec2;
}
