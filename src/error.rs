#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a bound's lower edge is not strictly below its upper edge.
    #[error("invalid bounds for '{name}': low ({low}) must be less than high ({high})")]
    InvalidBounds {
        /// The name of the offending dimension.
        name: String,
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when a bounds descriptor is constructed with no dimensions.
    #[error("bounds must contain at least one dimension")]
    EmptyBounds,

    /// Returned when a coordinate row does not match the bounds dimensionality.
    #[error("dimension mismatch: expected {expected} coordinates but row {index} has {got}")]
    DimensionMismatch {
        /// The number of dimensions defined by the bounds.
        expected: usize,
        /// The actual number of coordinates in the row.
        got: usize,
        /// The index of the offending row.
        index: usize,
    },

    /// Returned when selection is invoked on an empty local-optima pool.
    #[error("local optima pool is empty: at least one point is required")]
    EmptyPool,

    /// Returned when the cluster-utility threshold is outside `[0, 1]`.
    #[error("invalid cluster utility threshold: {0} must be in [0.0, 1.0]")]
    InvalidThreshold(f64),

    /// Returned when the noise magnitude is not positive.
    #[error("invalid noise magnitude: {0} must be positive")]
    InvalidNoise(f64),

    /// Returned when the noise routine cannot produce a valid in-bounds point.
    #[error("perturbation failed: {0}")]
    Perturbation(String),

    /// Returned when the retry ceiling elapsed with duplicated candidates
    /// still present in the selected batch.
    #[error(
        "could not find unique parameter combinations after {tries} perturbation rounds; \
         the search space may be discrete and already exhausted"
    )]
    DuplicatesExhausted {
        /// The number of perturbation rounds attempted.
        tries: usize,
    },

    /// Returned when the retry ceiling elapsed before the batch reached the
    /// requested size.
    #[error(
        "could not synthesize {missing} additional unique candidates after {tries} \
         perturbation rounds; the search space may be discrete and already exhausted"
    )]
    BackfillExhausted {
        /// The number of perturbation rounds attempted.
        tries: usize,
        /// How many candidates were still missing when the ceiling was hit.
        missing: usize,
    },

    /// Returned when the acquisition evaluator yields the wrong number of utilities.
    #[error("acquisition evaluator returned {got} utilities for {expected} points")]
    AcquisitionMismatch {
        /// The number of points handed to the evaluator.
        expected: usize,
        /// The number of utilities it returned.
        got: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
