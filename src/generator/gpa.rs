//! Discretised Gaussian GPA sampling.
//!
//! GPAs are drawn from a fixed, evenly spaced grid rather than a continuous
//! distribution. Each grid point carries mass proportional to the Gaussian
//! density `exp(-(x - mean)^2 / (2 * std_dev^2))`, normalised over the grid.
//!
//! Two modes:
//! - **With replacement** (bootstrapping): independent draws, repeats expected.
//! - **Without replacement**: each drawn point is removed and the remaining
//!   mass renormalised, so no grid point is drawn twice within one call.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sampling::weighted_without_replacement;
use crate::error::ConfigurationError;

/// Default number of grid points.
pub const DEFAULT_GRID_SIZE: usize = 64;

/// A discrete GPA distribution over an evenly spaced grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaGrid {
    values: Vec<f64>,
    probabilities: Vec<f64>,
}

impl GpaGrid {
    /// Builds the grid and its probability mass function.
    ///
    /// # Errors
    /// - [`ConfigurationError::EmptyGrid`] if `grid_size == 0`.
    /// - [`ConfigurationError::InvalidGpaRange`] if a bound is non-finite or
    ///   `gpa_min > gpa_max`. An equal range yields `grid_size` copies of
    ///   the single value.
    /// - [`ConfigurationError::InvalidMean`] / [`ConfigurationError::InvalidStdDev`]
    ///   for a non-finite mean or a non-positive spread.
    pub fn new(
        gpa_min: f64,
        gpa_max: f64,
        mean: f64,
        std_dev: f64,
        grid_size: usize,
    ) -> Result<Self, ConfigurationError> {
        if grid_size == 0 {
            return Err(ConfigurationError::EmptyGrid);
        }
        if !gpa_min.is_finite() || !gpa_max.is_finite() || gpa_min > gpa_max {
            return Err(ConfigurationError::InvalidGpaRange {
                min: gpa_min,
                max: gpa_max,
            });
        }
        if !mean.is_finite() {
            return Err(ConfigurationError::InvalidMean(mean));
        }
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return Err(ConfigurationError::InvalidStdDev(std_dev));
        }

        let values: Vec<f64> = if grid_size == 1 {
            vec![gpa_min]
        } else {
            let last = grid_size - 1;
            let step = (gpa_max - gpa_min) / last as f64;
            (0..last)
                .map(|i| gpa_min + i as f64 * step)
                .chain(std::iter::once(gpa_max))
                .collect()
        };

        let two_var = 2.0 * std_dev * std_dev;
        let weights: Vec<f64> = values
            .iter()
            .map(|&x| (-(x - mean).powi(2) / two_var).exp())
            .collect();
        let total: f64 = weights.iter().sum();

        // Every point can underflow to zero when the mean sits far outside
        // the range with a tiny spread.
        let probabilities = if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![1.0 / grid_size as f64; grid_size]
        };

        Ok(Self {
            values,
            probabilities,
        })
    }

    /// Grid values in ascending order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Probability of each grid value (sums to 1).
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a grid has at least one point.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `n` independent draws (bootstrapping).
    pub fn sample_with_replacement<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        match WeightedIndex::new(&self.probabilities) {
            Ok(dist) => (0..n).map(|_| self.values[dist.sample(rng)]).collect(),
            Err(_) => (0..n)
                .map(|_| self.values[rng.random_range(0..self.values.len())])
                .collect(),
        }
    }

    /// `n` draws from distinct grid points, renormalising after each draw.
    ///
    /// # Errors
    /// [`ConfigurationError::GridExhausted`] if `n` exceeds the grid size.
    pub fn sample_without_replacement<R: Rng>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>, ConfigurationError> {
        if n > self.len() {
            return Err(ConfigurationError::GridExhausted {
                requested: n,
                grid_size: self.len(),
            });
        }
        Ok(weighted_without_replacement(&self.probabilities, n, rng)
            .into_iter()
            .map(|i| self.values[i])
            .collect())
    }
}

/// Draws `n` GPAs from `grid` in the requested mode.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_allocation::generator::{sample_gpas, GpaGrid};
///
/// let grid = GpaGrid::new(0.0, 9.0, 6.0, 1.25, 64).unwrap();
/// let mut rng = SmallRng::seed_from_u64(123);
/// let gpas = sample_gpas(&grid, 10, true, &mut rng).unwrap();
/// assert!(gpas.iter().all(|g| grid.values().contains(g)));
/// ```
pub fn sample_gpas<R: Rng>(
    grid: &GpaGrid,
    n: usize,
    with_replacement: bool,
    rng: &mut R,
) -> Result<Vec<f64>, ConfigurationError> {
    if with_replacement {
        Ok(grid.sample_with_replacement(n, rng))
    } else {
        grid.sample_without_replacement(n, rng)
    }
}
