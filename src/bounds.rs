//! Parameter bounds and the unit-cube scaling transform.
//!
//! A [`Bounds`] descriptor is an ordered list of named dimensions, each with
//! inclusive `(low, high)` edges and a [`ParamKind`]. It defines the
//! dimensionality of every coordinate row flowing through selection and owns
//! the min-max transform between original parameter units and the
//! `[0, 1]`-per-dimension space used for clustering distance and model input.
//!
//! # Examples
//!
//! ```
//! use infill::bounds::{Bound, Bounds};
//!
//! let bounds = Bounds::new(vec![
//!     Bound::float("learning_rate", 1e-4, 1e-1),
//!     Bound::int("num_layers", 1, 8),
//! ])
//! .unwrap();
//!
//! let scaled = bounds.scale_to_unit(&[0.05005, 4.5]).unwrap();
//! let back = bounds.unscale_from_unit(&scaled).unwrap();
//! // Integer dimensions round to the nearest whole value on the way back.
//! assert_eq!(back[1], 5.0);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How values along one dimension are treated when mapped out of unit space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParamKind {
    /// Continuous values anywhere inside the bounds.
    Float,
    /// Whole-numbered values; unscaling and perturbation round to the
    /// nearest integer.
    Int,
}

/// A single named dimension with inclusive `(low, high)` edges.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bound {
    /// Parameter name, used in diagnostics.
    pub name: String,
    /// Lower edge (inclusive).
    pub low: f64,
    /// Upper edge (inclusive).
    pub high: f64,
    /// Value kind along this dimension.
    pub kind: ParamKind,
}

impl Bound {
    /// Creates a continuous dimension.
    #[must_use]
    pub fn float(name: impl Into<String>, low: f64, high: f64) -> Self {
        Self {
            name: name.into(),
            low,
            high,
            kind: ParamKind::Float,
        }
    }

    /// Creates an integer-valued dimension.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn int(name: impl Into<String>, low: i64, high: i64) -> Self {
        Self {
            name: name.into(),
            low: low as f64,
            high: high as f64,
            kind: ParamKind::Int,
        }
    }

    /// Width of the dimension in original units.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Ordered, validated list of parameter dimensions.
///
/// Immutable for the lifetime of a selection call; every coordinate row is
/// checked against its dimensionality before use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    dims: Vec<Bound>,
}

impl Bounds {
    /// Creates a bounds descriptor from the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBounds`] when `dims` is empty and
    /// [`Error::InvalidBounds`] when any dimension has `low >= high` or a
    /// non-finite edge.
    pub fn new(dims: Vec<Bound>) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::EmptyBounds);
        }
        for dim in &dims {
            if !dim.low.is_finite() || !dim.high.is_finite() || dim.low >= dim.high {
                return Err(Error::InvalidBounds {
                    name: dim.name.clone(),
                    low: dim.low,
                    high: dim.high,
                });
            }
        }
        Ok(Self { dims })
    }

    /// The number of dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    /// Always `false`: construction rejects empty descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// The dimensions in order.
    #[must_use]
    pub fn dims(&self) -> &[Bound] {
        &self.dims
    }

    /// Checks a coordinate row against the descriptor's dimensionality.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] carrying `index` when the row
    /// has the wrong number of coordinates.
    pub fn check_row(&self, row: &[f64], index: usize) -> Result<()> {
        if row.len() == self.dims.len() {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dims.len(),
                got: row.len(),
                index,
            })
        }
    }

    /// Maps a row from original units into `[0, 1]` per dimension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when the row has the wrong
    /// number of coordinates.
    pub fn scale_to_unit(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.check_row(row, 0)?;
        Ok(row
            .iter()
            .zip(&self.dims)
            .map(|(&v, dim)| (v - dim.low) / dim.range())
            .collect())
    }

    /// Maps a unit-space row back into original units.
    ///
    /// Values are clamped into the bounds; `Int` dimensions round to the
    /// nearest whole number after unscaling.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when the row has the wrong
    /// number of coordinates.
    pub fn unscale_from_unit(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.check_row(row, 0)?;
        Ok(row
            .iter()
            .zip(&self.dims)
            .map(|(&v, dim)| {
                let raw = dim.low + v * dim.range();
                let raw = match dim.kind {
                    ParamKind::Float => raw,
                    ParamKind::Int => raw.round(),
                };
                raw.clamp(dim.low, dim.high)
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = Bounds::new(vec![Bound::float("x", 2.0, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidBounds { .. }));
    }

    #[test]
    fn test_rejects_zero_width_bounds() {
        let err = Bounds::new(vec![Bound::float("x", 1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidBounds { .. }));
    }

    #[test]
    fn test_rejects_empty_descriptor() {
        let err = Bounds::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyBounds));
    }

    #[test]
    fn test_scale_round_trip_float() {
        let bounds = Bounds::new(vec![Bound::float("x", -5.0, 5.0), Bound::float("y", 0.0, 2.0)])
            .unwrap();
        let scaled = bounds.scale_to_unit(&[0.0, 1.0]).unwrap();
        assert_eq!(scaled, vec![0.5, 0.5]);
        let back = bounds.unscale_from_unit(&scaled).unwrap();
        assert_eq!(back, vec![0.0, 1.0]);
    }

    #[test]
    fn test_unscale_rounds_int_dimensions() {
        let bounds = Bounds::new(vec![Bound::int("n", 0, 10)]).unwrap();
        let back = bounds.unscale_from_unit(&[0.33]).unwrap();
        assert_eq!(back, vec![3.0]);
    }

    #[test]
    fn test_unscale_clamps_into_bounds() {
        let bounds = Bounds::new(vec![Bound::float("x", 0.0, 1.0)]).unwrap();
        let back = bounds.unscale_from_unit(&[1.5]).unwrap();
        assert_eq!(back, vec![1.0]);
    }

    #[test]
    fn test_dimension_mismatch_reports_row_index() {
        let bounds = Bounds::new(vec![Bound::float("x", 0.0, 1.0)]).unwrap();
        let err = bounds.check_row(&[0.1, 0.2], 7).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 1,
                got: 2,
                index: 7
            }
        ));
    }
}
