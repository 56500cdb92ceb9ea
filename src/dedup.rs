//! Exact-match duplicate detection against previously evaluated points.
//!
//! This is the sole oracle for "has this parameter combination been tried".
//! Comparison is full floating-point equality per dimension, with no
//! tolerance: near-duplicate suppression is the clustering stage's job, and
//! the downstream surrogate fit only breaks on rows that are *exactly*
//! identical.

/// Exact elementwise equality between two coordinate rows.
///
/// Rows of different lengths are never equal.
#[must_use]
#[allow(clippy::float_cmp)] // exact equality is the documented contract
pub fn rows_equal(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// Flags each row of `rows` that exactly matches a row of `history` or an
/// earlier row of `rows` itself.
///
/// Including earlier rows in the comparison set is what lets a caller keep
/// an in-progress batch internally unique while also checking it against
/// the evaluation history in one pass.
#[must_use]
pub fn duplicate_flags(rows: &[Vec<f64>], history: &[Vec<f64>]) -> Vec<bool> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            history.iter().any(|h| rows_equal(row, h))
                || rows[..i].iter().any(|r| rows_equal(row, r))
        })
        .collect()
}
