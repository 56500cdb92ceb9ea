//! Candidate points and the raw local-optima pool.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A local optimum produced by upstream restart optimization of the
/// acquisition surface.
///
/// Coordinates are in original (unscaled) parameter units. The
/// `convergence` metric reported by the local optimizer is carried for
/// callers that want it but plays no role in selection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalOptimum {
    /// Unscaled coordinates, one per bound dimension.
    pub coords: Vec<f64>,
    /// Acquisition utility at the point.
    pub utility: f64,
    /// Convergence strength reported by the restart optimizer.
    pub convergence: f64,
}

impl LocalOptimum {
    /// Creates a pool entry with a neutral convergence metric.
    #[must_use]
    pub fn new(coords: Vec<f64>, utility: f64) -> Self {
        Self {
            coords,
            utility,
            convergence: 0.0,
        }
    }

    /// Sets the convergence strength reported by the restart optimizer.
    #[must_use]
    pub fn with_convergence(mut self, convergence: f64) -> Self {
        self.convergence = convergence;
        self
    }
}

/// A point selected for evaluation by the enclosing optimization loop.
///
/// Coordinates are in original (unscaled) parameter units. `is_optimum`
/// records provenance: `true` for a cluster representative taken directly
/// from the local-optima pool, `false` for a point synthesized by noise
/// perturbation (its coordinates no longer sit on an acquisition optimum).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    /// Unscaled coordinates, one per bound dimension.
    pub coords: Vec<f64>,
    /// Acquisition utility at the point.
    pub utility: f64,
    /// Whether the point came directly from local-optimum search.
    pub is_optimum: bool,
}

impl Candidate {
    /// Creates a candidate taken directly from the local-optima pool.
    #[must_use]
    pub fn optimum(coords: Vec<f64>, utility: f64) -> Self {
        Self {
            coords,
            utility,
            is_optimum: true,
        }
    }

    /// Creates a candidate synthesized by noise perturbation.
    #[must_use]
    pub fn synthesized(coords: Vec<f64>, utility: f64) -> Self {
        Self {
            coords,
            utility,
            is_optimum: false,
        }
    }
}
