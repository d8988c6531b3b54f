//! Energy-coverage geometry.
//!
//! Every measurement illuminates a neighbourhood of `width / 2` on each side
//! of its energy. Coverage is the share of the graded window that lies inside
//! the union of those neighbourhoods.

use std::iter::once;

use nug_core::{CoverageScale, ErrorInfo, NugError};

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

fn axis(scale: CoverageScale, energy: f64) -> f64 {
    match scale {
        CoverageScale::Linear => energy,
        CoverageScale::Log => energy.log10(),
    }
}

/// Percentage of `[lower, upper]` covered by measurements at `energies`.
///
/// `energies` must be finite, already sorted ascending and inside the window;
/// none of this is corrected here. The width is expressed on the chosen axis, so
/// on the log scale it is a width in decades. An empty input covers nothing.
pub fn coverage(
    energies: &[f64],
    lower: f64,
    upper: f64,
    width: f64,
    scale: CoverageScale,
) -> Result<f64, NugError> {
    if !(lower.is_finite() && upper.is_finite()) || lower >= upper {
        return Err(NugError::Configuration(
            ErrorInfo::new("malformed-bounds", "coverage bounds must satisfy lower < upper")
                .with_context("lower", lower.to_string())
                .with_context("upper", upper.to_string()),
        ));
    }
    if !(width.is_finite() && width > 0.0) {
        return Err(NugError::Configuration(
            ErrorInfo::new("invalid-energy-width", "coverage width must be positive")
                .with_context("width", width.to_string()),
        ));
    }
    if scale == CoverageScale::Log && lower <= 0.0 {
        return Err(NugError::Configuration(
            ErrorInfo::new("log-scale-bounds", "log coverage requires a positive lower bound")
                .with_context("lower", lower.to_string()),
        ));
    }
    if let Some(index) = energies.iter().position(|energy| !energy.is_finite()) {
        return Err(NugError::Precondition(
            ErrorInfo::new("non-finite-energy", "coverage energies must be finite")
                .with_context("index", index.to_string())
                .with_context("energy", energies[index].to_string()),
        ));
    }
    if let Some(index) = energies.windows(2).position(|pair| !(pair[0] <= pair[1])) {
        return Err(NugError::Precondition(
            ErrorInfo::new("unsorted-energies", "coverage energies must be sorted ascending")
                .with_context("index", (index + 1).to_string())
                .with_hint("sort and de-duplicate energies before computing coverage"),
        ));
    }
    let (first, last) = match (energies.first(), energies.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Ok(0.0),
    };
    if first < lower || last > upper {
        return Err(NugError::Precondition(
            ErrorInfo::new("energy-out-of-bounds", "coverage energies must lie inside the bounds")
                .with_context("first", first.to_string())
                .with_context("last", last.to_string()),
        ));
    }

    let low = axis(scale, lower);
    let high = axis(scale, upper);
    let span = high - low;
    let half = width / 2.0;

    let points: Vec<f64> = once(low)
        .chain(energies.iter().map(|&energy| axis(scale, energy)))
        .chain(once(high))
        .collect();
    let last_gap = points.len() - 2;
    let unoccupied: f64 = points
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let mut gap = pair[1] - pair[0];
            if index == 0 || index == last_gap {
                gap += half;
            }
            (gap - width).max(0.0)
        })
        .sum();

    Ok(round_to(100.0 * (span - unoccupied) / span, 7))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_seven_digits() {
        assert_eq!(round_to(12.345_678_91, 7), 12.345_678_9);
    }

    #[test]
    fn single_point_with_wide_reach_covers_everything() {
        let value = coverage(&[0.0], 0.0, 1.0, 4.0, CoverageScale::Linear).expect("coverage");
        assert_eq!(value, 100.0);
    }
}
