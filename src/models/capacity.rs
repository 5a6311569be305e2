//! Specialisation capacity model.
//!
//! Maps each specialisation to its remaining seat count. A run clones the
//! configured map and consumes seats from its own copy; counts only ever
//! decrease during a run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigurationError;

/// Remaining seats per specialisation.
///
/// Iteration order is the specialisation name's lexicographic order, which
/// keeps seeded random fallback draws reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialisationCapacities {
    seats: BTreeMap<String, u32>,
}

impl SpecialisationCapacities {
    /// Creates an empty capacity map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or overwrites) a specialisation's seat count.
    pub fn with_seats(mut self, spec: impl Into<String>, seats: u32) -> Self {
        self.seats.insert(spec.into(), seats);
        self
    }

    /// Builds a capacity map from signed counts, as entered by a user.
    ///
    /// # Errors
    /// [`ConfigurationError::NegativeCapacity`] for any count below zero,
    /// [`ConfigurationError::CapacityOverflow`] for counts above `u32::MAX`,
    /// [`ConfigurationError::DuplicateSpecialisation`] for repeated names.
    pub fn try_from_signed<I, S>(entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut seats = BTreeMap::new();
        for (spec, count) in entries {
            let spec = spec.into();
            if count < 0 {
                return Err(ConfigurationError::NegativeCapacity { spec, seats: count });
            }
            let Ok(count) = u32::try_from(count) else {
                return Err(ConfigurationError::CapacityOverflow {
                    spec,
                    seats: count,
                    max: u32::MAX,
                });
            };
            if seats.insert(spec.clone(), count).is_some() {
                return Err(ConfigurationError::DuplicateSpecialisation { spec });
            }
        }
        Ok(Self { seats })
    }

    /// The default University of Auckland engineering catalogue.
    pub fn engineering_defaults() -> Self {
        [
            ("Biomedical", 35),
            ("Chemical and Materials", 80),
            ("Civil and Environmental", 210),
            ("Computer Systems", 100),
            ("Electrical and Electronic", 100),
            ("Engineering Science", 80),
            ("Mechanical", 125),
            ("Mechatronics", 105),
            ("Software", 125),
            ("Structural", 80),
        ]
        .into_iter()
        .fold(Self::new(), |caps, (spec, seats)| caps.with_seats(spec, seats))
    }

    /// Remaining seats for a specialisation (`None` if unknown).
    pub fn remaining(&self, spec: &str) -> Option<u32> {
        self.seats.get(spec).copied()
    }

    /// Whether the specialisation is configured at all.
    pub fn contains(&self, spec: &str) -> bool {
        self.seats.contains_key(spec)
    }

    /// Whether the specialisation exists and has at least one free seat.
    pub fn has_room(&self, spec: &str) -> bool {
        self.remaining(spec).is_some_and(|n| n > 0)
    }

    /// Consumes one seat. Returns `false` (and changes nothing) when the
    /// specialisation is unknown or full.
    pub fn take_seat(&mut self, spec: &str) -> bool {
        match self.seats.get_mut(spec) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    /// Returns one seat, e.g. when a repair step moves a student out.
    pub(crate) fn release_seat(&mut self, spec: &str) {
        if let Some(n) = self.seats.get_mut(spec) {
            *n = n.saturating_add(1);
        }
    }

    /// Names of specialisations with free seats, in iteration order.
    pub fn available(&self) -> impl Iterator<Item = &str> {
        self.seats
            .iter()
            .filter(|&(_, &n)| n > 0)
            .map(|(s, _)| s.as_str())
    }

    /// Total free seats across all specialisations.
    pub fn total(&self) -> u64 {
        self.seats.values().map(|&n| u64::from(n)).sum()
    }

    /// Seats consumed relative to an earlier state of the same map.
    pub fn consumed_since(&self, initial: &Self) -> u64 {
        initial.total().saturating_sub(self.total())
    }

    /// `(name, remaining)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.seats.iter().map(|(s, &n)| (s.as_str(), n))
    }

    /// Specialisation names.
    pub fn specs(&self) -> impl Iterator<Item = &str> {
        self.seats.keys().map(String::as_str)
    }

    /// Number of specialisations.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether no specialisations are configured.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}
