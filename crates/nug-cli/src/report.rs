//! Plain-text rendering of graded isotopes.

use std::fmt::{self, Display, Formatter};

use nug_core::GradingOptions;
use nug_grade::{DataGap, ExperimentMetrics, NuclideReport, ReactionReport};

struct NuclideText<'a> {
    report: &'a NuclideReport,
    options: &'a GradingOptions,
}

impl Display for NuclideText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let options = self.options;
        writeln!(f, "Nuclide: {} (Z = {}, N = {})", report.label, report.z, report.n)?;
        writeln!(f, "    Number of datasets: {}", report.dataset_count)?;
        writeln!(f, "    Mean score: {:.3}", report.score)?;
        writeln!(
            f,
            "    Reporting from {:e} eV to {:e} eV with width {} ({}), evaluation {}",
            options.lower_energy,
            options.upper_energy,
            options.energy_width,
            options.coverage_scale,
            options.evaluation
        )?;
        for reaction in &report.reactions {
            write_reaction(f, reaction, options)?;
        }
        Ok(())
    }
}

fn write_reaction(
    f: &mut Formatter<'_>,
    reaction: &ReactionReport,
    options: &GradingOptions,
) -> fmt::Result {
    writeln!(
        f,
        "    ({}) [MT = {}] -> {} points in {} datasets",
        reaction.name, reaction.code, reaction.point_count, reaction.dataset_count
    )?;
    writeln!(
        f,
        "        Experiments: {} (reporting dData {:.2}%, dEnergy {:.2}%)",
        reaction.experiment_count,
        reaction.value_uncertainty_share,
        reaction.energy_uncertainty_share
    )?;
    match reaction.gap {
        Some(DataGap::MissingEvaluation) => {
            writeln!(f, "        No evaluation available ({}).", options.evaluation)?;
        }
        Some(DataGap::LoadFailed) => writeln!(f, "        Data could not be loaded.")?,
        _ if !reaction.has_data_in_range() => {
            writeln!(f, "        No measurements in energy range.")?;
        }
        _ => {
            writeln!(f, "        Energy Coverage: {:.2}%", reaction.energy_coverage)?;
            writeln!(
                f,
                "        Energy Coverage with Uncertainty: {:.2}%",
                reaction.energy_coverage_with_uncertainty
            )?;
            writeln!(
                f,
                "        {}: {:.3}",
                options.scored_metric.label(),
                reaction.average_metric
            )?;
            for (id, experiment) in &reaction.experiments {
                write_experiment(f, id, experiment)?;
            }
        }
    }
    writeln!(f, "        Score: {:.3}", reaction.score)
}

fn write_experiment(
    f: &mut Formatter<'_>,
    id: &str,
    experiment: &ExperimentMetrics,
) -> fmt::Result {
    let author = if experiment.author.is_empty() {
        "unknown author"
    } else {
        experiment.author.as_str()
    };
    match experiment.year {
        Some(year) => write!(f, "          [{id}] {author}, {year}")?,
        None => write!(f, "          [{id}] {author}")?,
    }
    writeln!(
        f,
        ": {} points, metric {:.3}, coverage {:.2}%",
        experiment.point_count, experiment.weighted_metric, experiment.energy_coverage
    )
}

/// Human readable report of one graded isotope.
pub fn render_nuclide(report: &NuclideReport, options: &GradingOptions) -> String {
    NuclideText { report, options }.to_string()
}
