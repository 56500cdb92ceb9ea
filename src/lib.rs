#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Candidate-batch selection for sequential Bayesian optimization.
//!
//! Restart-based local optimization of an acquisition surface yields a pool
//! of local optima, many of which are near-identical copies of the same
//! basin. This crate decides which of those optima represent genuinely
//! distinct regions, picks a bounded batch of promising, *exactly* unique
//! points to evaluate next, and — when novelty runs out or points collide
//! with the evaluation history — synthesizes unique replacements by bounded
//! random perturbation.
//!
//! The surrogate model, the acquisition formula, the restart optimizer, and
//! the evaluation history store are the caller's: they enter only through
//! the [`Acquisition`](acquisition::Acquisition) and
//! [`Perturbation`](noise::Perturbation) traits and plain coordinate slices.
//!
//! # Pipeline
//!
//! | Stage | Module | Role |
//! |-------|--------|------|
//! | Density clustering & ranking | [`cluster`] | Group near-identical optima, rank by relative utility |
//! | Threshold selection | [`cluster`] | Single best point, or every representative above the threshold |
//! | Duplicate resolution | [`dedup`], [`selector`] | Exact-match check against history, perturb collisions |
//! | Noise-driven backfill | [`noise`], [`selector`] | Top the batch up with perturbed, freshly evaluated points |
//!
//! # Getting started
//!
//! ```
//! use infill::prelude::*;
//!
//! let bounds = Bounds::new(vec![
//!     Bound::float("x", -5.0, 5.0),
//!     Bound::int("depth", 1, 8),
//! ])
//! .unwrap();
//!
//! // Local optima from the caller's restart optimizer (unscaled space).
//! let pool = vec![
//!     LocalOptimum::new(vec![1.5, 3.0], 0.9),
//!     LocalOptimum::new(vec![1.5, 3.0], 0.8),
//!     LocalOptimum::new(vec![-2.0, 6.0], 0.6),
//! ];
//!
//! // Coordinates already scored in earlier rounds.
//! let history = vec![vec![0.0, 4.0]];
//!
//! let selector = Selector::builder()
//!     .batch_size(2)
//!     .min_cluster_utility(0.5)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! // The caller's acquisition evaluator, invoked on unit-scaled points.
//! let acquisition = |points: &[Vec<f64>]| vec![0.1; points.len()];
//!
//! let batch = selector
//!     .select(&pool, &history, &bounds, &acquisition)
//!     .unwrap();
//! assert_eq!(batch.len(), 2);
//! ```
//!
//! Selection either returns a full batch or a descriptive [`Error`] — never
//! a partial or duplicated batch. The enclosing loop treats exhaustion
//! errors ([`Error::DuplicatesExhausted`], [`Error::BackfillExhausted`]) as
//! a loggable end of the round, not a crash.
//!
//! # Feature flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on the public data types | off |
//! | `tracing` | Structured log events at stage boundaries via [`tracing`](https://docs.rs/tracing) | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod acquisition;
pub mod bounds;
pub mod cluster;
pub mod dedup;
mod error;
pub mod noise;
pub mod point;
pub mod selector;

pub use error::{Error, Result};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use infill::prelude::*;
/// ```
pub mod prelude {
    pub use crate::acquisition::Acquisition;
    pub use crate::bounds::{Bound, Bounds, ParamKind};
    pub use crate::error::{Error, Result};
    pub use crate::noise::{Perturbation, UniformNoise};
    pub use crate::point::{Candidate, LocalOptimum};
    pub use crate::selector::{Selector, SelectorBuilder};
}
