//! Grading of a whole isotope catalog.

use nug_core::{GradingOptions, IsotopeId, NugError};
use tracing::{debug, info};

use crate::nuclide::Nuclide;
use crate::scoreboard::Scoreboard;
use crate::source::{CatalogSource, DataSources};

const PSEUDO_ENTRIES: [&str; 2] = ["n", "Heavy Water"];

/// Whether a catalog row names a real isotope.
///
/// The free neutron, heavy water and rows without a mass number are skipped.
pub fn is_gradable(isotope: &IsotopeId) -> bool {
    isotope.a != 0 && !PSEUDO_ENTRIES.contains(&isotope.symbol.trim())
}

fn grade_validated(
    isotope: &IsotopeId,
    options: &GradingOptions,
    sources: &DataSources<'_>,
) -> Result<Nuclide, NugError> {
    let mut nuclide = Nuclide::new(isotope.clone());
    nuclide.get_metrics(options, sources)?;
    debug!(isotope = %nuclide.label(), score = nuclide.mean_score(), "isotope graded");
    Ok(nuclide)
}

/// Grades a single isotope after validating `options`.
pub fn grade_isotope(
    isotope: &IsotopeId,
    options: &GradingOptions,
    sources: &DataSources<'_>,
) -> Result<Nuclide, NugError> {
    options.validate()?;
    grade_validated(isotope, options, sources)
}

/// Grades every gradable isotope of `catalog` into a scoreboard.
///
/// Options are validated before any isotope is touched, so a configuration
/// error aborts the pass with nothing graded.
pub fn grade_many_isotopes(
    catalog: &dyn CatalogSource,
    options: &GradingOptions,
    sources: &DataSources<'_>,
) -> Result<Scoreboard, NugError> {
    options.validate()?;
    let mut scoreboard = Scoreboard::new(options)?;
    let isotopes = catalog.isotopes()?;
    info!(
        rows = isotopes.len(),
        evaluation = %options.evaluation,
        metric = %options.scored_metric,
        "grading catalog"
    );
    for isotope in isotopes.iter().filter(|isotope| is_gradable(isotope)) {
        let nuclide = grade_validated(isotope, options, sources)?;
        scoreboard.insert(nuclide.report());
    }
    info!(isotopes = scoreboard.len(), "catalog graded");
    Ok(scoreboard)
}
