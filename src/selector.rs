//! Candidate-batch selection: threshold pick, duplicate resolution, and
//! noise-driven backfill.
//!
//! [`Selector`] ties the four stages together. Cluster representatives come
//! out of [`crate::cluster`]; phase A replaces any representative that
//! exactly matches the evaluation history with a perturbed neighbor; phase B
//! tops the batch up to the requested size with perturbed, freshly evaluated
//! points. Both phases re-check uniqueness after every perturbation round
//! and give up with a diagnostic error after [`MAX_TRIES`] rounds rather
//! than returning a violating batch.
//!
//! # Examples
//!
//! ```
//! use infill::prelude::*;
//!
//! let bounds = Bounds::new(vec![
//!     Bound::float("x", 0.0, 1.0),
//!     Bound::float("y", 0.0, 1.0),
//! ])
//! .unwrap();
//!
//! // Three restarts: two converged to the same optimum, one elsewhere.
//! let pool = vec![
//!     LocalOptimum::new(vec![0.3, 0.7], 1.8),
//!     LocalOptimum::new(vec![0.3, 0.7], 1.7),
//!     LocalOptimum::new(vec![0.9, 0.1], 0.9),
//! ];
//!
//! let selector = Selector::builder()
//!     .batch_size(2)
//!     .min_cluster_utility(0.4)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let acquisition = |points: &[Vec<f64>]| vec![0.0; points.len()];
//! let batch = selector.select(&pool, &[], &bounds, &acquisition).unwrap();
//!
//! assert_eq!(batch.len(), 2);
//! assert!(batch.iter().all(|c| c.is_optimum));
//! ```

use crate::acquisition::Acquisition;
use crate::bounds::Bounds;
use crate::cluster::select_representatives;
use crate::dedup::duplicate_flags;
use crate::error::{Error, Result};
use crate::noise::{Perturbation, UniformNoise};
use crate::point::{Candidate, LocalOptimum};

/// Hard ceiling on perturbation rounds in both retry loops.
///
/// Guarantees termination for any finite bounds and history; hitting it
/// surfaces as [`Error::DuplicatesExhausted`] or
/// [`Error::BackfillExhausted`].
pub const MAX_TRIES: usize = 1000;

/// Default requested batch size.
const DEFAULT_BATCH_SIZE: usize = 1;
/// Default noise magnitude for the stock perturbation.
const DEFAULT_NOISE_ADD: f64 = 0.25;

/// Selects a batch of unique candidate points from a pool of local optima.
///
/// Configured once via [`Selector::builder`] and reusable across rounds of
/// the enclosing optimization loop; the pool, history, and bounds are
/// per-call inputs.
///
/// # Examples
///
/// ```
/// use infill::selector::Selector;
///
/// // Single best point per round, default noise
/// let selector = Selector::builder().build().unwrap();
///
/// // Three distinct candidates per round, reproducible noise
/// let selector = Selector::builder()
///     .batch_size(3)
///     .min_cluster_utility(0.5)
///     .noise_add(0.1)
///     .seed(42)
///     .build()
///     .unwrap();
/// ```
pub struct Selector {
    batch_size: usize,
    min_cluster_utility: Option<f64>,
    perturbation: Box<dyn Perturbation>,
}

impl Selector {
    /// Creates a builder for configuring a `Selector`.
    #[must_use]
    pub fn builder() -> SelectorBuilder {
        SelectorBuilder::new()
    }

    /// Runs selection for one round of the enclosing optimization loop.
    ///
    /// `pool` holds the local optima found by restart optimization of the
    /// acquisition surface and `history` the unscaled coordinates of every
    /// point already scored, both read-only. The returned batch holds at
    /// most `batch_size` candidates, each exactly unique against `history`
    /// and against the rest of the batch.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPool`] and [`Error::DimensionMismatch`] reject invalid
    /// inputs; [`Error::Perturbation`] propagates a noise-routine failure;
    /// [`Error::DuplicatesExhausted`] and [`Error::BackfillExhausted`]
    /// report that the retry ceiling elapsed before a conforming batch
    /// existed. No partial batch is ever returned.
    pub fn select<A>(
        &self,
        pool: &[LocalOptimum],
        history: &[Vec<f64>],
        bounds: &Bounds,
        acquisition: &A,
    ) -> Result<Vec<Candidate>>
    where
        A: Acquisition + ?Sized,
    {
        for (index, row) in history.iter().enumerate() {
            bounds.check_row(row, index)?;
        }

        let mut selected =
            select_representatives(pool, bounds, self.min_cluster_utility, self.batch_size)?;
        // The single-best path ignores the batch size; cap it here so the
        // cardinality bound holds even for a zero-size request.
        selected.truncate(self.batch_size);
        trace_info!(selected = selected.len(), "selected cluster representatives");

        let batch = self.resolve_duplicates(selected, history, bounds)?;
        self.backfill(batch, history, bounds, acquisition)
    }

    /// Phase A: replace representatives that exactly match history with
    /// perturbed neighbors until the batch is clean.
    fn resolve_duplicates(
        &self,
        mut batch: Vec<Candidate>,
        history: &[Vec<f64>],
        bounds: &Bounds,
    ) -> Result<Vec<Candidate>> {
        let mut tries = 0;

        loop {
            let rows: Vec<Vec<f64>> = batch.iter().map(|c| c.coords.clone()).collect();
            let flags = duplicate_flags(&rows, history);
            if !flags.iter().any(|&f| f) {
                return Ok(batch);
            }
            if tries == MAX_TRIES {
                return Err(Error::DuplicatesExhausted { tries });
            }
            tries += 1;

            let flagged: Vec<Vec<f64>> = rows
                .iter()
                .zip(&flags)
                .filter(|&(_, &f)| f)
                .map(|(r, _)| r.clone())
                .collect();
            trace_debug!(
                round = tries,
                flagged = flagged.len(),
                "perturbing duplicated candidates"
            );

            let replacements = self.perturbation.perturb(&flagged, bounds)?;
            check_replacement_count(replacements.len(), flagged.len())?;

            // Fold the replacements into a fresh snapshot; a replaced row is
            // no longer the true acquisition optimum.
            let mut next = Vec::with_capacity(batch.len());
            let mut ri = 0;
            for (candidate, &dup) in batch.into_iter().zip(&flags) {
                if dup {
                    next.push(Candidate::synthesized(
                        replacements[ri].clone(),
                        candidate.utility,
                    ));
                    ri += 1;
                } else {
                    next.push(candidate);
                }
            }
            batch = next;
        }
    }

    /// Phase B: top the batch up to the requested size with perturbed,
    /// freshly evaluated points.
    fn backfill<A>(
        &self,
        mut batch: Vec<Candidate>,
        history: &[Vec<f64>],
        bounds: &Bounds,
        acquisition: &A,
    ) -> Result<Vec<Candidate>>
    where
        A: Acquisition + ?Sized,
    {
        let mut missing = self.batch_size.saturating_sub(batch.len());
        if missing == 0 {
            return Ok(batch);
        }
        if batch.is_empty() {
            // No seeds to draw from (a pool with no usable utilities).
            return Err(Error::BackfillExhausted { tries: 0, missing });
        }

        // Everything a fresh row must differ from: the batch so far plus the
        // full history. Accepted rows are appended as we go.
        let mut comparison: Vec<Vec<f64>> = batch
            .iter()
            .map(|c| c.coords.clone())
            .chain(history.iter().cloned())
            .collect();

        let mut tries = 0;
        while missing > 0 {
            if tries == MAX_TRIES {
                return Err(Error::BackfillExhausted { tries, missing });
            }
            tries += 1;

            // Seed rows cycle through the current batch in rank order.
            let seeds: Vec<Vec<f64>> = (0..missing)
                .map(|i| batch[i % batch.len()].coords.clone())
                .collect();
            let perturbed = self.perturbation.perturb(&seeds, bounds)?;
            check_replacement_count(perturbed.len(), seeds.len())?;

            // `duplicate_flags` also catches two fresh rows colliding with
            // each other within this round.
            let flags = duplicate_flags(&perturbed, &comparison);
            let fresh: Vec<Vec<f64>> = perturbed
                .into_iter()
                .zip(&flags)
                .filter(|&(_, &f)| !f)
                .map(|(r, _)| r)
                .collect();

            if !fresh.is_empty() {
                let scaled = fresh
                    .iter()
                    .map(|row| bounds.scale_to_unit(row))
                    .collect::<Result<Vec<_>>>()?;
                let utilities = acquisition.evaluate(&scaled);
                if utilities.len() != fresh.len() {
                    return Err(Error::AcquisitionMismatch {
                        expected: fresh.len(),
                        got: utilities.len(),
                    });
                }
                for (row, utility) in fresh.into_iter().zip(utilities) {
                    comparison.push(row.clone());
                    batch.push(Candidate::synthesized(row, utility));
                }
            }

            missing = self.batch_size.saturating_sub(batch.len());
            trace_debug!(round = tries, missing, "backfill round complete");
        }

        Ok(batch)
    }
}

/// Verifies that a perturbation returned one row per input.
fn check_replacement_count(got: usize, expected: usize) -> Result<()> {
    if got == expected {
        Ok(())
    } else {
        Err(Error::Perturbation(format!(
            "noise routine returned {got} rows for {expected} inputs"
        )))
    }
}

/// Builder for configuring a [`Selector`].
///
/// All options have sensible defaults:
/// - `batch_size`: 1
/// - `min_cluster_utility`: absent (single best point, no clustering)
/// - `noise_add`: 0.25
/// - `seed`: random
/// - `perturbation`: [`UniformNoise`]
///
/// # Examples
///
/// ```
/// use infill::selector::SelectorBuilder;
///
/// let selector = SelectorBuilder::new()
///     .batch_size(4)
///     .min_cluster_utility(0.3)
///     .seed(42)
///     .build()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct SelectorBuilder {
    batch_size: Option<usize>,
    min_cluster_utility: Option<f64>,
    noise_add: Option<f64>,
    seed: Option<u64>,
    perturbation: Option<Box<dyn Perturbation>>,
}

impl SelectorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many candidates each selection round should return.
    ///
    /// Default: 1.
    #[must_use]
    pub fn batch_size(mut self, n: usize) -> Self {
        self.batch_size = Some(n);
        self
    }

    /// Sets the relative-utility threshold a cluster representative must
    /// reach to be selected.
    ///
    /// When unset, clustering is skipped and only the single best point is
    /// taken from the pool (the batch is still topped up to `batch_size` by
    /// backfill). Must lie in `[0, 1]`.
    #[must_use]
    pub fn min_cluster_utility(mut self, threshold: f64) -> Self {
        self.min_cluster_utility = Some(threshold);
        self
    }

    /// Sets the noise magnitude for the stock perturbation, as a fraction
    /// of each dimension's range.
    ///
    /// Ignored when a custom [`Perturbation`] is supplied.
    ///
    /// Default: 0.25.
    #[must_use]
    pub fn noise_add(mut self, noise_add: f64) -> Self {
        self.noise_add = Some(noise_add);
        self
    }

    /// Sets the random seed for reproducible perturbation.
    ///
    /// Ignored when a custom [`Perturbation`] is supplied.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the stock noise routine with a custom one.
    #[must_use]
    pub fn perturbation(mut self, perturbation: Box<dyn Perturbation>) -> Self {
        self.perturbation = Some(perturbation);
        self
    }

    /// Builds the configured [`Selector`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidThreshold`] when `min_cluster_utility` lies
    /// outside `[0, 1]` and [`Error::InvalidNoise`] when `noise_add` is not
    /// a positive finite number.
    pub fn build(self) -> Result<Selector> {
        if let Some(threshold) = self.min_cluster_utility
            && !(0.0..=1.0).contains(&threshold)
        {
            return Err(Error::InvalidThreshold(threshold));
        }

        let perturbation: Box<dyn Perturbation> = if let Some(p) = self.perturbation {
            p
        } else {
            let noise_add = self.noise_add.unwrap_or(DEFAULT_NOISE_ADD);
            Box::new(if let Some(seed) = self.seed {
                UniformNoise::with_seed(noise_add, seed)?
            } else {
                UniformNoise::new(noise_add)?
            })
        };

        Ok(Selector {
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            min_cluster_utility: self.min_cluster_utility,
            perturbation,
        })
    }
}
