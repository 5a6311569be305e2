//! Ranked preference list sampling.
//!
//! Without weights every remaining specialisation is equally likely at each
//! draw. With weights, draws are proportional to the weights of the
//! specialisations not yet chosen, so popular specialisations appear more
//! often and earlier.

use rand::seq::index;
use rand::Rng;
use std::collections::{HashMap, HashSet};

use super::sampling::{sanitize_weight, weighted_without_replacement};
use crate::error::ConfigurationError;

/// Samples one ranked preference list.
///
/// # Arguments
/// * `specs` - Candidate specialisations (no duplicates).
/// * `n_prefs` - List length, `1..=specs.len()`.
/// * `weights` - Optional popularity weights. Missing, negative and
///   non-finite entries count as zero. If every weight is zero the draw is
///   uniform.
///
/// # Errors
/// [`ConfigurationError`] for an empty or duplicated `specs`, or an
/// `n_prefs` outside `1..=specs.len()`.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_allocation::generator::sample_preferences;
///
/// let specs: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
/// let mut rng = SmallRng::seed_from_u64(1);
/// let prefs = sample_preferences(&specs, 2, None, &mut rng).unwrap();
/// assert_eq!(prefs.len(), 2);
/// assert_ne!(prefs[0], prefs[1]);
/// ```
pub fn sample_preferences<R: Rng>(
    specs: &[String],
    n_prefs: usize,
    weights: Option<&HashMap<String, f64>>,
    rng: &mut R,
) -> Result<Vec<String>, ConfigurationError> {
    check_request(specs, n_prefs)?;
    let weights = weights.map(|w| spec_weights(specs, w));
    Ok(draw(specs, n_prefs, weights.as_deref(), rng))
}

/// Validates a preference request.
pub(crate) fn check_request(specs: &[String], n_prefs: usize) -> Result<(), ConfigurationError> {
    if specs.is_empty() {
        return Err(ConfigurationError::NoSpecialisations);
    }
    if n_prefs == 0 {
        return Err(ConfigurationError::NoPreferences);
    }
    if n_prefs > specs.len() {
        return Err(ConfigurationError::TooManyPreferences {
            requested: n_prefs,
            available: specs.len(),
        });
    }

    let mut seen = HashSet::new();
    for spec in specs {
        if !seen.insert(spec.as_str()) {
            return Err(ConfigurationError::DuplicateSpecialisation { spec: spec.clone() });
        }
    }
    Ok(())
}

/// Weight vector aligned with `specs`, sanitised.
pub(crate) fn spec_weights(specs: &[String], weights: &HashMap<String, f64>) -> Vec<f64> {
    specs
        .iter()
        .map(|s| weights.get(s).copied().map_or(0.0, sanitize_weight))
        .collect()
}

/// Draws without validation. `weights` must be aligned with `specs`.
pub(crate) fn draw<R: Rng>(
    specs: &[String],
    n_prefs: usize,
    weights: Option<&[f64]>,
    rng: &mut R,
) -> Vec<String> {
    let picked = match weights {
        Some(w) if w.iter().sum::<f64>() > 0.0 => weighted_without_replacement(w, n_prefs, rng),
        _ => index::sample(rng, specs.len(), n_prefs).into_vec(),
    };
    picked.into_iter().map(|i| specs[i].clone()).collect()
}
