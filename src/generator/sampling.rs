//! Weighted sampling without replacement.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

/// Clamps a user-supplied weight into `[0, ∞)`, mapping NaN/∞ to zero.
#[inline]
pub(crate) fn sanitize_weight(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 {
        w
    } else {
        0.0
    }
}

/// Draws up to `k` distinct indices into `weights`.
///
/// Each draw picks index `i` from the remaining pool `R` with probability
/// `w(i) / Σ_{r∈R} w(r)`, then removes it. Once no positive weight is left
/// in the pool, remaining draws are uniform over what is left.
pub(crate) fn weighted_without_replacement<R: Rng>(
    weights: &[f64],
    k: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..weights.len()).collect();
    let mut mass: Vec<f64> = weights.iter().map(|&w| sanitize_weight(w)).collect();
    let mut picked = Vec::with_capacity(k.min(pool.len()));

    while picked.len() < k && !pool.is_empty() {
        // Scaled by the largest weight so the total stays finite.
        let max = mass.iter().copied().fold(0.0, f64::max);
        let dist = if max > 0.0 {
            WeightedIndex::new(mass.iter().map(|w| w / max)).ok()
        } else {
            None
        };
        let slot = match dist {
            Some(dist) => dist.sample(rng),
            None => rng.random_range(0..pool.len()),
        };
        picked.push(pool.remove(slot));
        mass.remove(slot);
    }

    picked
}
