//! Density clustering of local optima and utility-ranked representative
//! selection.
//!
//! Restart-based local search frequently converges many random starts to the
//! same optimum of the acquisition surface. Clustering groups those
//! near-identical points so that a batch is built from genuinely distinct
//! regions rather than repeats of the single best one.
//!
//! Clustering runs on unit-scaled coordinates with a neighborhood radius of
//! [`NEIGHBORHOOD_SCALE`]` * sqrt(n_dims)` and a minimum cluster size of
//! one, which degenerates density clustering into connected components of
//! the radius graph: tight enough that a cluster means "converged to the
//! same optimum", and every point belongs to some cluster.

use crate::bounds::Bounds;
use crate::error::{Error, Result};
use crate::point::{Candidate, LocalOptimum};

/// Per-dimension constant for the clustering neighborhood radius.
///
/// The effective radius in unit space is `NEIGHBORHOOD_SCALE * sqrt(n_dims)`.
pub const NEIGHBORHOOD_SCALE: f64 = 1e-3;

/// The clustering radius in unit space for the given dimensionality.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn neighborhood_radius(n_dims: usize) -> f64 {
    NEIGHBORHOOD_SCALE * (n_dims as f64).sqrt()
}

/// Euclidean distance between two rows of equal length.
fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Labels each point with a cluster id in `0..n_clusters`.
///
/// Two points share a cluster when they are connected through a chain of
/// neighbors within `radius`. With a minimum cluster size of one this is
/// exactly density clustering as used here: no point is ever noise.
#[must_use]
pub fn cluster_labels(points: &[Vec<f64>], radius: f64) -> Vec<usize> {
    const UNLABELLED: usize = usize::MAX;

    let mut labels = vec![UNLABELLED; points.len()];
    let mut next_label = 0;

    for start in 0..points.len() {
        if labels[start] != UNLABELLED {
            continue;
        }
        labels[start] = next_label;
        let mut frontier = vec![start];
        while let Some(i) = frontier.pop() {
            for j in 0..points.len() {
                if labels[j] == UNLABELLED && distance(&points[i], &points[j]) <= radius {
                    labels[j] = next_label;
                    frontier.push(j);
                }
            }
        }
        next_label += 1;
    }

    labels
}

/// Reduces the local-optima pool to ranked, locality-deduplicated
/// representatives, at most `batch_size` of them.
///
/// With `min_cluster_utility` absent, the single maximum-utility point is
/// returned and clustering is skipped entirely. Otherwise the pool is
/// clustered on unit-scaled coordinates; within each cluster only the point
/// with maximal `utility / max(utility)` survives, clusters whose
/// representative falls below the threshold are dropped, and the survivors
/// are ordered by descending relative utility.
///
/// Ties — both within a cluster and in the final ordering — break toward
/// the lowest original pool index, so the output is deterministic for a
/// given pool ordering. Relative utility divides by the pool maximum
/// verbatim; acquisition surfaces that can go non-positive should be
/// shifted by the caller before the pool is built.
///
/// Every returned candidate keeps its original unscaled coordinates and raw
/// utility and is marked `is_optimum = true`.
///
/// # Errors
///
/// Returns [`Error::EmptyPool`] for an empty pool and
/// [`Error::DimensionMismatch`] when a pool row does not match the bounds.
pub fn select_representatives(
    pool: &[LocalOptimum],
    bounds: &Bounds,
    min_cluster_utility: Option<f64>,
    batch_size: usize,
) -> Result<Vec<Candidate>> {
    if pool.is_empty() {
        return Err(Error::EmptyPool);
    }
    for (index, opt) in pool.iter().enumerate() {
        bounds.check_row(&opt.coords, index)?;
    }

    let Some(threshold) = min_cluster_utility else {
        // Terminal case: the single best point, first index on ties.
        let mut best = 0;
        for i in 1..pool.len() {
            if pool[i].utility > pool[best].utility {
                best = i;
            }
        }
        return Ok(vec![Candidate::optimum(
            pool[best].coords.clone(),
            pool[best].utility,
        )]);
    };

    let max_utility = pool
        .iter()
        .map(|opt| opt.utility)
        .fold(f64::NEG_INFINITY, f64::max);
    let relative: Vec<f64> = pool.iter().map(|opt| opt.utility / max_utility).collect();

    let scaled = pool
        .iter()
        .map(|opt| bounds.scale_to_unit(&opt.coords))
        .collect::<Result<Vec<_>>>()?;
    let labels = cluster_labels(&scaled, neighborhood_radius(bounds.len()));
    let n_clusters = labels.iter().max().map_or(0, |&m| m + 1);

    trace_debug!(
        pool = pool.len(),
        clusters = n_clusters,
        "clustered local optima"
    );

    // Representative per cluster: maximal relative utility, first pool
    // index on ties.
    let mut representative: Vec<Option<usize>> = vec![None; n_clusters];
    for (i, &label) in labels.iter().enumerate() {
        if representative[label].is_none_or(|r| relative[i] > relative[r]) {
            representative[label] = Some(i);
        }
    }

    let mut survivors: Vec<usize> = representative
        .into_iter()
        .flatten()
        .filter(|&i| relative[i] >= threshold)
        .collect();
    survivors.sort_by(|&a, &b| relative[b].total_cmp(&relative[a]).then(a.cmp(&b)));
    survivors.truncate(batch_size);

    Ok(survivors
        .into_iter()
        .map(|i| Candidate::optimum(pool[i].coords.clone(), pool[i].utility))
        .collect())
}
