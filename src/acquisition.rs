//! Interface to the surrogate model's acquisition evaluator.
//!
//! The evaluator is an external collaborator: the surrogate model, its
//! exploration parameters, and the acquisition formula all live with the
//! caller. Selection only needs fresh utilities for the small batches of
//! points it synthesizes during backfill, always in unit-scaled
//! coordinates.
//!
//! The trait is blanket-implemented for closures, so a plain
//! `|points: &[Vec<f64>]| ...` works anywhere an evaluator is expected:
//!
//! ```
//! use infill::acquisition::Acquisition;
//!
//! let flat = |points: &[Vec<f64>]| vec![0.0; points.len()];
//! assert_eq!(flat.evaluate(&[vec![0.5], vec![0.2]]), vec![0.0, 0.0]);
//! ```

/// Evaluates acquisition utility for a batch of unit-scaled points.
pub trait Acquisition {
    /// Returns one utility per input point, in order.
    fn evaluate(&self, scaled_points: &[Vec<f64>]) -> Vec<f64>;
}

impl<F> Acquisition for F
where
    F: Fn(&[Vec<f64>]) -> Vec<f64>,
{
    fn evaluate(&self, scaled_points: &[Vec<f64>]) -> Vec<f64> {
        self(scaled_points)
    }
}
