//! Synthetic population configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::gpa::{GpaGrid, DEFAULT_GRID_SIZE};
use super::preferences::check_request;
use crate::error::ConfigurationError;
use crate::models::SpecialisationCapacities;

/// Parameters for [`PopulationGenerator`](super::PopulationGenerator).
///
/// # Defaults
///
/// | Field | Value |
/// |-------|-------|
/// | `n_students` | 1000 |
/// | `specs` | engineering catalogue names |
/// | `n_prefs` | 5 |
/// | `gpa_min` .. `gpa_max` | 0.75 .. 9.0 |
/// | `gpa_mean` / `gpa_std_dev` | 6.0 / 1.25 |
/// | `grid_size` | 64 |
/// | `with_replacement` | true |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of students to generate.
    pub n_students: usize,
    /// Candidate specialisations for preference lists.
    pub specs: Vec<String>,
    /// Preference list length per student.
    pub n_prefs: usize,
    /// Optional popularity weights by specialisation name.
    pub pref_weights: Option<HashMap<String, f64>>,
    /// Lower GPA bound (inclusive).
    pub gpa_min: f64,
    /// Upper GPA bound (inclusive).
    pub gpa_max: f64,
    /// Centre of the GPA distribution.
    pub gpa_mean: f64,
    /// Spread of the GPA distribution.
    pub gpa_std_dev: f64,
    /// Number of grid points GPAs are drawn from.
    pub grid_size: usize,
    /// Bootstrapped GPAs (repeats allowed) when true.
    pub with_replacement: bool,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_students: 1000,
            specs: SpecialisationCapacities::engineering_defaults()
                .specs()
                .map(str::to_string)
                .collect(),
            n_prefs: 5,
            pref_weights: None,
            gpa_min: 0.75,
            gpa_max: 9.0,
            gpa_mean: 6.0,
            gpa_std_dev: 1.25,
            grid_size: DEFAULT_GRID_SIZE,
            with_replacement: true,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of students.
    pub fn with_students(mut self, n: usize) -> Self {
        self.n_students = n;
        self
    }

    /// Sets the candidate specialisations.
    pub fn with_specs<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specs = specs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the preference list length.
    pub fn with_prefs(mut self, n: usize) -> Self {
        self.n_prefs = n;
        self
    }

    /// Sets popularity weights.
    pub fn with_pref_weights(mut self, weights: HashMap<String, f64>) -> Self {
        self.pref_weights = Some(weights);
        self
    }

    /// Sets the GPA range.
    pub fn with_gpa_range(mut self, min: f64, max: f64) -> Self {
        self.gpa_min = min;
        self.gpa_max = max;
        self
    }

    /// Sets the GPA distribution centre and spread.
    pub fn with_gpa_distribution(mut self, mean: f64, std_dev: f64) -> Self {
        self.gpa_mean = mean;
        self.gpa_std_dev = std_dev;
        self
    }

    /// Sets the number of grid points.
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    /// Chooses bootstrapped (`true`) or distinct (`false`) GPAs.
    pub fn with_replacement(mut self, with_replacement: bool) -> Self {
        self.with_replacement = with_replacement;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the GPA grid described by this configuration.
    pub fn gpa_grid(&self) -> Result<GpaGrid, ConfigurationError> {
        GpaGrid::new(
            self.gpa_min,
            self.gpa_max,
            self.gpa_mean,
            self.gpa_std_dev,
            self.grid_size,
        )
    }

    /// Checks the configuration before any randomness is consumed.
    ///
    /// Returns the GPA grid on success so callers need not rebuild it.
    pub fn validate(&self) -> Result<GpaGrid, ConfigurationError> {
        check_request(&self.specs, self.n_prefs)?;
        let grid = self.gpa_grid()?;
        if !self.with_replacement && self.n_students > grid.len() {
            return Err(ConfigurationError::GridExhausted {
                requested: self.n_students,
                grid_size: grid.len(),
            });
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.n_students, 1000);
        assert_eq!(config.n_prefs, 5);
        assert_eq!(config.specs.len(), 10);
        assert_eq!(config.grid_size, 64);
        assert!(config.with_replacement);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new()
            .with_students(20)
            .with_specs(["A", "B", "C"])
            .with_prefs(2)
            .with_gpa_range(1.0, 4.0)
            .with_gpa_distribution(3.0, 0.5)
            .with_grid_size(16)
            .with_replacement(false)
            .with_seed(7);
        assert_eq!(config.specs, vec!["A", "B", "C"]);
        assert_eq!(config.seed, Some(7));
        let grid = config.validate().unwrap();
        assert_eq!(grid.len(), 16);
    }

    #[test]
    fn test_validate_rejects_exhausted_grid() {
        let config = GeneratorConfig::new().with_students(65).with_replacement(false);
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigurationError::GridExhausted {
                requested: 65,
                grid_size: 64
            }
        );
        assert!(config.with_replacement(true).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_prefs() {
        let config = GeneratorConfig::new().with_specs(["A"]).with_prefs(2);
        assert_eq!(config.validate().unwrap_err().field(), "n_prefs");
    }
}
