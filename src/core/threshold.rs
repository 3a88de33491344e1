// threshold.rs - Rank-based binarization cutoff for continuous columns

use crate::error::{MatrixError, Result};

/// 1-based rank of the cutoff among `m` ascending positive distances.
///
/// Floor of `m * fraction`, never below the first rank.
pub fn cutoff_rank(m: usize, fraction: f64) -> usize {
    // floor(m * fraction) == 0 selects rank 1, the smallest distance; it never wraps to the largest
    ((m as f64 * fraction).floor() as usize).clamp(1, m.max(1))
}

/// Derive the "related" cutoff from all pairwise distances of a column.
///
/// Only strictly positive distances are ranked. A pair is related iff its
/// distance is strictly below the returned value. When every distance is
/// zero there is nothing to rank and the column is rejected.
pub fn rank_cutoff<I>(distances: I, fraction: f64) -> Result<f64>
where
    I: IntoIterator<Item = f64>,
{
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(MatrixError::config(format!(
            "Euclidean distance fraction ({}) must be between 0 and 1",
            fraction
        )));
    }

    let mut positive: Vec<f64> = distances.into_iter().filter(|d| *d > 0.0).collect();
    if positive.is_empty() {
        return Err(MatrixError::data(
            "All pairwise distances are zero, no cutoff can be derived",
        ));
    }
    positive.sort_by(|a, b| a.total_cmp(b));

    let rank = cutoff_rank(positive.len(), fraction);
    let cutoff = positive[rank - 1];
    log::debug!(
        "Cutoff rank {} of {} positive distances (fraction {}): {}",
        rank,
        positive.len(),
        fraction,
        cutoff
    );
    Ok(cutoff)
}
