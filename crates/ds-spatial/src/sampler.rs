//! Roulette-wheel sampling over a weight vector.
//!
//! # Algorithm
//!
//! Weights are normalised to sum to 1.  The available indices start as
//! `0..n` in order.  Each draw takes `u ~ U[0, 1)`, scales it by the
//! probability mass still available, and walks the available indices
//! accumulating normalised weight until the running sum reaches the scaled
//! draw.  Without duplicates the chosen index leaves the available list (its
//! mass is subtracted), so later draws are proportional to the remaining
//! weights rather than leaking the removed mass onto one index.
//!
//! # Fallback
//!
//! Floating-point summation can leave the final running sum a few ulps short
//! of the draw (ten weights of `0.1` sum to `0.9999999999999999`).  When the
//! walk ends without reaching the draw, the **first available index** is
//! selected.  This is deterministic policy, not an error.

use ds_core::RandomSource;

use crate::{SelectionError, SelectionResult};

/// Normalise `weights` to sum to 1.
///
/// Negative or non-finite entries count as 0.
///
/// # Errors
///
/// - [`SelectionError::EmptyCandidateSet`] if `weights` is empty.
/// - [`SelectionError::NumericDegenerate`] if the usable weights sum to 0.
pub fn normalize_weights(weights: &[f64]) -> SelectionResult<Vec<f64>> {
    if weights.is_empty() {
        return Err(SelectionError::EmptyCandidateSet);
    }
    let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let total: f64 = weights.iter().copied().map(clean).sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(SelectionError::NumericDegenerate { total });
    }
    Ok(weights.iter().map(|&w| clean(w) / total).collect())
}

/// Draw up to `count` indices into `weights`.
///
/// Returns exactly `count` indices when `allow_duplicates` is set, otherwise
/// `min(count, weights.len())` distinct indices, in selection order.
///
/// # Errors
///
/// See [`normalize_weights`].  An empty weight vector fails even when
/// `count == 0`.
pub fn sample_indices<R: RandomSource + ?Sized>(
    weights:          &[f64],
    count:            usize,
    allow_duplicates: bool,
    rng:              &mut R,
) -> SelectionResult<Vec<usize>> {
    let normalized = normalize_weights(weights)?;

    let mut available: Vec<usize> = (0..normalized.len()).collect();
    let mut remaining_mass = 1.0;
    let mut selected =
        Vec::with_capacity(if allow_duplicates { count } else { count.min(normalized.len()) });

    while selected.len() < count && !available.is_empty() {
        let threshold = rng.unit() * remaining_mass;

        let mut cumulative = 0.0;
        let mut hit = None;
        for (pos, &index) in available.iter().enumerate() {
            let w = normalized[index];
            cumulative += w;
            if w > 0.0 && cumulative >= threshold {
                hit = Some(pos);
                break;
            }
        }
        let pos = hit.unwrap_or(0);
        let index = available[pos];

        selected.push(index);
        if !allow_duplicates {
            available.remove(pos);
            remaining_mass = (remaining_mass - normalized[index]).max(0.0);
        }
    }

    Ok(selected)
}
