//! Comparison of measurements against a reference evaluation curve.

use nug_core::{ErrorInfo, NugError, ScoredMetric};
use serde::{Deserialize, Serialize};

use crate::measurement::Measurement;

/// Energy/value curve of a reference evaluation, sorted by energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCurve {
    energies: Vec<f64>,
    values: Vec<f64>,
}

impl ReferenceCurve {
    /// Builds a curve from parallel arrays already sorted by energy.
    pub fn new(energies: Vec<f64>, values: Vec<f64>) -> Result<Self, NugError> {
        if energies.is_empty() {
            return Err(NugError::precondition(
                "empty-reference-curve",
                "a reference curve needs at least one point",
            ));
        }
        if energies.len() != values.len() {
            return Err(NugError::Precondition(
                ErrorInfo::new(
                    "reference-length-mismatch",
                    "reference energies and values differ in length",
                )
                .with_context("energies", energies.len().to_string())
                .with_context("values", values.len().to_string()),
            ));
        }
        if energies.iter().chain(values.iter()).any(|v| !v.is_finite()) {
            return Err(NugError::precondition(
                "non-finite-reference",
                "reference curve contains non-finite values",
            ));
        }
        if let Some(index) = energies.windows(2).position(|pair| pair[0] > pair[1]) {
            return Err(NugError::Precondition(
                ErrorInfo::new("unsorted-reference", "reference energies must be sorted")
                    .with_context("index", (index + 1).to_string()),
            ));
        }
        Ok(Self { energies, values })
    }

    /// Builds a curve from unordered `(energy, value)` points.
    pub fn from_points(mut points: Vec<(f64, f64)>) -> Result<Self, NugError> {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (energies, values) = points.into_iter().unzip();
        Self::new(energies, values)
    }

    /// Grid energies.
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Grid values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// Whether the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Piecewise-linear interpolation, clamped to the end values outside the grid.
    pub fn interpolate(&self, energy: f64) -> f64 {
        let last = self.energies.len() - 1;
        if energy.is_nan() {
            return f64::NAN;
        }
        if energy <= self.energies[0] {
            return self.values[0];
        }
        if energy >= self.energies[last] {
            return self.values[last];
        }
        let upper = self.energies.partition_point(|&e| e <= energy);
        let lower = upper - 1;
        let (x0, x1) = (self.energies[lower], self.energies[upper]);
        let (y0, y1) = (self.values[lower], self.values[upper]);
        y0 + (energy - x0) / (x1 - x0) * (y1 - y0)
    }
}

/// Percentage deviation of `measured` from `reference`; NaN when the reference is zero.
pub fn relative_error(measured: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return f64::NAN;
    }
    (measured - reference) / reference * 100.0
}

/// Squared deviation normalised by the squared uncertainty; NaN when the
/// uncertainty is zero or not finite.
pub fn chi_squared(measured: f64, reference: f64, uncertainty: f64) -> f64 {
    if !uncertainty.is_finite() || uncertainty == 0.0 {
        return f64::NAN;
    }
    let deviation = measured - reference;
    deviation * deviation / (uncertainty * uncertainty)
}

/// Per-point discrepancies of one measurement set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// Energies of the compared points.
    pub energies: Vec<f64>,
    /// Per-point discrepancy; NaN marks an undefined value.
    pub values: Vec<f64>,
    /// Mean absolute relative error, or reduced chi-squared, over the
    /// defined values. NaN when no value is defined.
    pub summary: f64,
}

impl Discrepancy {
    /// Iterates over the `(energy, value)` pairs with a defined value.
    pub fn defined(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energies
            .iter()
            .zip(self.values.iter())
            .filter(|(_, value)| value.is_finite())
            .map(|(energy, value)| (*energy, *value))
    }

    /// Number of points whose value is undefined.
    pub fn undefined_count(&self) -> usize {
        self.values.iter().filter(|value| !value.is_finite()).count()
    }
}

/// Compares measurements inside `[lower, upper]` with the reference curve.
///
/// Chi-squared needs a variance term, so points without a reported
/// uncertainty are dropped for that metric. Returns `None` when no point
/// remains, which callers treat as "not applicable".
pub fn discrepancy<'a, I>(
    measurements: I,
    curve: &ReferenceCurve,
    lower: f64,
    upper: f64,
    metric: ScoredMetric,
) -> Option<Discrepancy>
where
    I: IntoIterator<Item = &'a Measurement>,
{
    let mut energies = Vec::new();
    let mut values = Vec::new();
    for point in measurements {
        if !point.in_range(lower, upper) {
            continue;
        }
        let reference = curve.interpolate(point.energy);
        let value = match metric {
            ScoredMetric::RelativeError => relative_error(point.value, reference),
            ScoredMetric::ChiSquared => match point.value_uncertainty {
                Some(uncertainty) if !uncertainty.is_nan() => {
                    chi_squared(point.value, reference, uncertainty)
                }
                _ => continue,
            },
        };
        energies.push(point.energy);
        values.push(value);
    }
    if energies.is_empty() {
        return None;
    }

    let defined: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let summary = if defined.is_empty() {
        f64::NAN
    } else {
        let total: f64 = match metric {
            ScoredMetric::RelativeError => defined.iter().map(|v| v.abs()).sum(),
            ScoredMetric::ChiSquared => defined.iter().sum(),
        };
        total / defined.len() as f64
    };

    Some(Discrepancy {
        energies,
        values,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation_clamps_outside_the_grid() {
        let curve = ReferenceCurve::new(vec![1.0, 2.0, 4.0], vec![10.0, 20.0, 0.0]).expect("curve");
        assert_eq!(curve.interpolate(0.5), 10.0);
        assert_eq!(curve.interpolate(5.0), 0.0);
        assert_eq!(curve.interpolate(1.5), 15.0);
        assert_eq!(curve.interpolate(3.0), 10.0);
        assert_eq!(curve.interpolate(2.0), 20.0);
    }

    #[test]
    fn zero_reference_yields_undefined_relative_error() {
        assert!(relative_error(1.0, 0.0).is_nan());
        assert!(chi_squared(1.0, 2.0, 0.0).is_nan());
        assert_eq!(chi_squared(3.0, 1.0, 2.0), 1.0);
    }
}
