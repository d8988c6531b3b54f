//! Measurement records as delivered by a measurement source.

use serde::{Deserialize, Serialize};

/// One measured cross-section point as delivered by a measurement source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Incident energy (eV).
    pub energy: f64,
    /// Reported energy uncertainty, when present.
    #[serde(default)]
    pub energy_uncertainty: Option<f64>,
    /// Measured cross section (b).
    pub value: f64,
    /// Reported cross-section uncertainty, when present.
    #[serde(default)]
    pub value_uncertainty: Option<f64>,
    /// Experiment (EXFOR entry) the point belongs to.
    pub experiment_id: String,
    /// Dataset (EXFOR subentry) the point belongs to.
    pub dataset_id: String,
    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,
    /// First author of the measurement.
    #[serde(default)]
    pub author: String,
}

impl Measurement {
    /// Creates a point whose dataset id equals its experiment id.
    pub fn new(energy: f64, value: f64, experiment_id: impl Into<String>) -> Self {
        let experiment_id = experiment_id.into();
        Self {
            energy,
            energy_uncertainty: None,
            value,
            value_uncertainty: None,
            dataset_id: experiment_id.clone(),
            experiment_id,
            year: None,
            author: String::new(),
        }
    }

    /// Attaches a cross-section uncertainty.
    pub fn with_value_uncertainty(mut self, uncertainty: f64) -> Self {
        self.value_uncertainty = Some(uncertainty);
        self
    }

    /// Attaches an energy uncertainty.
    pub fn with_energy_uncertainty(mut self, uncertainty: f64) -> Self {
        self.energy_uncertainty = Some(uncertainty);
        self
    }

    /// Assigns the point to a dataset.
    pub fn with_dataset(mut self, dataset_id: impl Into<String>) -> Self {
        self.dataset_id = dataset_id.into();
        self
    }

    /// Records the publication year and author.
    pub fn with_publication(mut self, year: i32, author: impl Into<String>) -> Self {
        self.year = Some(year);
        self.author = author.into();
        self
    }

    /// Whether the energy lies inside the closed window `[lower, upper]`.
    pub fn in_range(&self, lower: f64, upper: f64) -> bool {
        self.energy >= lower && self.energy <= upper
    }

    /// Whether a usable energy uncertainty was reported.
    pub fn has_energy_uncertainty(&self) -> bool {
        matches!(self.energy_uncertainty, Some(u) if !u.is_nan())
    }

    /// Whether a usable cross-section uncertainty was reported.
    pub fn has_value_uncertainty(&self) -> bool {
        matches!(self.value_uncertainty, Some(u) if !u.is_nan())
    }
}

/// Sorts and de-duplicates energies, dropping non-finite entries.
///
/// This is the preparation the coverage calculator expects from its callers.
pub fn sorted_unique_energies<I>(energies: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut values: Vec<f64> = energies.into_iter().filter(|e| e.is_finite()).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_unique_drops_duplicates_and_nan() {
        let energies = sorted_unique_energies(vec![3.0, 1.0, f64::NAN, 3.0, 2.0]);
        assert_eq!(energies, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn in_range_is_inclusive() {
        let point = Measurement::new(1.0, 2.0, "E1");
        assert!(point.in_range(1.0, 2.0));
        assert!(point.in_range(0.0, 1.0));
        assert!(!point.in_range(1.5, 2.0));
    }
}
