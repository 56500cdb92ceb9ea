//! Bounded random perturbation used to synthesize unique candidates.
//!
//! When a selected point collides with the evaluation history, or the batch
//! falls short of the requested size, selection draws nearby replacements by
//! perturbing existing rows. The routine must stay inside the bounds and
//! must signal failure distinctly from producing a valid (possibly
//! still-duplicate) point — the retry loops in [`crate::selector`] own the
//! re-checking.
//!
//! # Examples
//!
//! ```
//! use infill::bounds::{Bound, Bounds};
//! use infill::noise::{Perturbation, UniformNoise};
//!
//! let bounds = Bounds::new(vec![Bound::float("x", 0.0, 10.0)]).unwrap();
//! let noise = UniformNoise::with_seed(0.2, 42).unwrap();
//!
//! let rows = vec![vec![5.0]];
//! let perturbed = noise.perturb(&rows, &bounds).unwrap();
//! assert!((4.0..=6.0).contains(&perturbed[0][0]));
//! ```

use parking_lot::Mutex;

use crate::bounds::{Bounds, ParamKind};
use crate::error::{Error, Result};

/// Draws bounded random replacements for a set of coordinate rows.
///
/// Implementations are `Send + Sync` so a configured selector can be shared
/// across threads; the stock [`UniformNoise`] keeps its RNG behind a mutex
/// for that reason.
pub trait Perturbation: Send + Sync {
    /// Returns one perturbed row per input row, each within bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Perturbation`] when a valid in-bounds replacement
    /// cannot be produced; the caller aborts selection rather than retrying.
    fn perturb(&self, rows: &[Vec<f64>], bounds: &Bounds) -> Result<Vec<Vec<f64>>>;
}

/// Uniform bounded noise, the stock perturbation.
///
/// Each coordinate moves by an offset drawn uniformly from
/// `±noise_add / 2` of the dimension's range, then is clamped into the
/// bounds. Integer dimensions round to the nearest whole value, so for
/// discrete spaces the perturbation walks to neighboring grid points.
///
/// # Examples
///
/// ```
/// use infill::noise::UniformNoise;
///
/// // Random seed
/// let noise = UniformNoise::new(0.25).unwrap();
/// // Fixed seed for reproducibility
/// let noise = UniformNoise::with_seed(0.25, 42).unwrap();
/// ```
pub struct UniformNoise {
    noise_add: f64,
    rng: Mutex<fastrand::Rng>,
}

impl UniformNoise {
    /// Creates the perturbation with a random seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNoise`] when `noise_add` is not a positive
    /// finite number.
    pub fn new(noise_add: f64) -> Result<Self> {
        Self::build(noise_add, fastrand::Rng::new())
    }

    /// Creates the perturbation with a fixed seed for reproducibility.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNoise`] when `noise_add` is not a positive
    /// finite number.
    pub fn with_seed(noise_add: f64, seed: u64) -> Result<Self> {
        Self::build(noise_add, fastrand::Rng::with_seed(seed))
    }

    fn build(noise_add: f64, rng: fastrand::Rng) -> Result<Self> {
        if !noise_add.is_finite() || noise_add <= 0.0 {
            return Err(Error::InvalidNoise(noise_add));
        }
        Ok(Self {
            noise_add,
            rng: Mutex::new(rng),
        })
    }
}

impl Perturbation for UniformNoise {
    fn perturb(&self, rows: &[Vec<f64>], bounds: &Bounds) -> Result<Vec<Vec<f64>>> {
        let mut rng = self.rng.lock();
        let mut out = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            bounds.check_row(row, index)?;
            let mut perturbed = Vec::with_capacity(row.len());
            for (&v, dim) in row.iter().zip(bounds.dims()) {
                if !v.is_finite() {
                    return Err(Error::Perturbation(format!(
                        "non-finite coordinate {v} in dimension '{}'",
                        dim.name
                    )));
                }
                let offset = (rng.f64() - 0.5) * self.noise_add * dim.range();
                let moved = match dim.kind {
                    ParamKind::Float => v + offset,
                    ParamKind::Int => (v + offset).round(),
                };
                perturbed.push(moved.clamp(dim.low, dim.high));
            }
            out.push(perturbed);
        }

        Ok(out)
    }
}
