//! Error type shared by every fallible engine operation.
//!
//! Geometric coincidences (zero-length vectors, coincident centers) are not
//! errors; they resolve to zero displacements so the simulation loop stays total.

use std::fmt;

/// Errors surfaced by the packer and its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum PackError {
    /// Input `index` of an `add_polygons` call is degenerate.
    InvalidShape { index: usize, reason: String },
    /// Unrecognized frame-of-reference token.
    InvalidFrame { frame: String },
    /// Polygon index outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// Negative or non-finite force coefficient.
    InvalidArgument { name: &'static str, value: f64 },
    /// Region used for the density metric cannot be clipped against.
    InvalidRegion { reason: String },
}

impl PackError {
    pub(crate) fn shape(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn region(reason: impl Into<String>) -> Self {
        Self::InvalidRegion {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { index, reason } => {
                write!(f, "invalid shape at input {index}: {reason}")
            }
            Self::InvalidFrame { frame } => write!(
                f,
                "invalid frame of reference {frame:?} (expected \"local\" or \"global\")"
            ),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "polygon index {index} out of range for {len} polygons")
            }
            Self::InvalidArgument { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            Self::InvalidRegion { reason } => write!(f, "invalid region: {reason}"),
        }
    }
}

impl std::error::Error for PackError {}

pub type PackResult<T> = Result<T, PackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_value() {
        let e = PackError::InvalidArgument {
            name: "repulsion",
            value: -1.0,
        };
        assert_eq!(
            e.to_string(),
            "repulsion must be finite and non-negative, got -1"
        );
        let e = PackError::IndexOutOfRange { index: 3, len: 2 };
        assert!(e.to_string().contains("index 3"));
        let e = PackError::InvalidFrame {
            frame: "world".into(),
        };
        assert!(e.to_string().contains("\"world\""));
    }
}
