//! One reaction channel: its measurement table and derived quality metrics.

use std::collections::{BTreeMap, BTreeSet};

use nug_core::{Channel, GradingOptions, NugError, ScoredMetric};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coverage::coverage;
use crate::discrepancy::{discrepancy, ReferenceCurve};
use crate::measurement::{sorted_unique_energies, Measurement};
use crate::report::ReactionReport;
use crate::weighting::FluxWeighting;

/// Where a reaction stands within one grading pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReactionStatus {
    /// No measurement table is attached.
    Empty,
    /// A table is attached but metrics have not been computed.
    Loaded,
    /// Metrics were computed for the current table.
    Scored,
}

/// Reason a reaction carries zero-valued metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataGap {
    /// The measurement source had no table for the channel.
    NoMeasurements,
    /// The table has no point inside the energy window.
    NoDataInRange,
    /// No reference evaluation exists for the channel.
    MissingEvaluation,
    /// A source failed to read or parse its data.
    LoadFailed,
}

/// Metrics of one experiment within a reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentMetrics {
    /// Mean absolute flux-weighted discrepancy.
    pub weighted_metric: f64,
    /// Coverage (%) of the experiment's defined points.
    pub energy_coverage: f64,
    /// In-range points of the experiment.
    pub point_count: usize,
    /// Points whose discrepancy was undefined and excluded.
    pub undefined_points: usize,
    /// First author of the experiment.
    #[serde(default)]
    pub author: String,
    /// Publication year of the experiment.
    #[serde(default)]
    pub year: Option<i32>,
}

impl ExperimentMetrics {
    fn empty(points: &[&Measurement]) -> Self {
        let first = points.first();
        Self {
            weighted_metric: 0.0,
            energy_coverage: 0.0,
            point_count: points.len(),
            undefined_points: 0,
            author: first.map(|point| point.author.clone()).unwrap_or_default(),
            year: first.and_then(|point| point.year),
        }
    }
}

/// Percentage of the table's experiments with at least one point passing `reports`.
fn experiment_share(table: &[Measurement], reports: impl Fn(&Measurement) -> bool) -> f64 {
    let experiments: BTreeSet<&str> = table
        .iter()
        .map(|point| point.experiment_id.as_str())
        .collect();
    if experiments.is_empty() {
        return 0.0;
    }
    let reporting: BTreeSet<&str> = table
        .iter()
        .filter(|&point| reports(point))
        .map(|point| point.experiment_id.as_str())
        .collect();
    100.0 * reporting.len() as f64 / experiments.len() as f64
}

/// A defined per-point discrepancy kept for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscrepancyPoint {
    /// Energy of the point (eV).
    pub energy: f64,
    /// Unweighted discrepancy of the point.
    pub value: f64,
    /// Experiment the point belongs to.
    pub experiment_id: String,
}

/// Combines coverage and average discrepancy into a single score.
///
/// The result lies in `[0, energy_coverage]` for any non-negative metric.
pub fn compose_score(energy_coverage: f64, average_metric: f64, metric: ScoredMetric) -> f64 {
    match metric {
        ScoredMetric::ChiSquared => energy_coverage / (1.0 + average_metric),
        ScoredMetric::RelativeError => energy_coverage / (1.0 + average_metric / 100.0),
    }
}

/// A reaction channel's measurements and metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    code: u32,
    name: String,
    measurements: Vec<Measurement>,
    energy_coverage: f64,
    energy_coverage_with_uncertainty: f64,
    average_metric: f64,
    score: f64,
    dataset_count: usize,
    experiment_count: usize,
    value_uncertainty_share: f64,
    energy_uncertainty_share: f64,
    point_count: usize,
    in_range_count: usize,
    experiments: BTreeMap<String, ExperimentMetrics>,
    points: Vec<DiscrepancyPoint>,
    status: ReactionStatus,
    gap: Option<DataGap>,
}

impl Reaction {
    /// Creates an empty reaction for `channel`.
    pub fn new(channel: &Channel) -> Self {
        Self {
            code: channel.code,
            name: channel.name.clone(),
            measurements: Vec::new(),
            energy_coverage: 0.0,
            energy_coverage_with_uncertainty: 0.0,
            average_metric: 0.0,
            score: 0.0,
            dataset_count: 0,
            experiment_count: 0,
            value_uncertainty_share: 0.0,
            energy_uncertainty_share: 0.0,
            point_count: 0,
            in_range_count: 0,
            experiments: BTreeMap::new(),
            points: Vec::new(),
            status: ReactionStatus::Empty,
            gap: None,
        }
    }

    /// Attaches a measurement table, discarding any previous table and metrics.
    pub fn load(&mut self, table: Vec<Measurement>) {
        self.reset_metrics();
        self.point_count = table.len();
        self.dataset_count = table
            .iter()
            .map(|point| point.dataset_id.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        self.experiment_count = table
            .iter()
            .map(|point| point.experiment_id.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        self.value_uncertainty_share = experiment_share(&table, Measurement::has_value_uncertainty);
        self.energy_uncertainty_share =
            experiment_share(&table, Measurement::has_energy_uncertainty);
        self.measurements = table;
        if self.measurements.is_empty() {
            self.status = ReactionStatus::Empty;
            self.gap = Some(DataGap::NoMeasurements);
        } else {
            self.status = ReactionStatus::Loaded;
            self.gap = None;
        }
    }

    /// Records that metrics cannot be computed, leaving them zero.
    ///
    /// A failed load also drops the table.
    pub fn mark_unavailable(&mut self, gap: DataGap) {
        self.reset_metrics();
        if gap == DataGap::LoadFailed {
            self.measurements.clear();
            self.point_count = 0;
            self.dataset_count = 0;
            self.experiment_count = 0;
            self.value_uncertainty_share = 0.0;
            self.energy_uncertainty_share = 0.0;
        }
        self.status = if self.measurements.is_empty() {
            ReactionStatus::Empty
        } else {
            ReactionStatus::Loaded
        };
        self.gap = Some(gap);
    }

    fn reset_metrics(&mut self) {
        self.energy_coverage = 0.0;
        self.energy_coverage_with_uncertainty = 0.0;
        self.average_metric = 0.0;
        self.score = 0.0;
        self.in_range_count = 0;
        self.experiments.clear();
        self.points.clear();
    }

    /// Computes coverage, weighted discrepancy and score for the attached
    /// table against `curve`.
    ///
    /// Recomputes from scratch on every call, so repeated calls with the same
    /// inputs give identical results.
    pub fn calc_metrics(
        &mut self,
        curve: &ReferenceCurve,
        options: &GradingOptions,
    ) -> Result<(), NugError> {
        self.reset_metrics();
        if self.measurements.is_empty() {
            self.status = ReactionStatus::Empty;
            self.gap = Some(DataGap::NoMeasurements);
            return Ok(());
        }
        self.gap = None;

        let lower = options.lower_energy;
        let upper = options.upper_energy;
        let in_range: Vec<&Measurement> = self
            .measurements
            .iter()
            .filter(|point| point.in_range(lower, upper))
            .collect();
        self.in_range_count = in_range.len();
        if in_range.is_empty() {
            debug!(reaction = %self.name, "no measurements in energy range");
            self.status = ReactionStatus::Scored;
            self.gap = Some(DataGap::NoDataInRange);
            return Ok(());
        }

        let all = sorted_unique_energies(in_range.iter().map(|point| point.energy));
        self.energy_coverage = coverage(
            &all,
            lower,
            upper,
            options.energy_width,
            options.coverage_scale,
        )?;
        let with_uncertainty = sorted_unique_energies(
            in_range
                .iter()
                .filter(|point| point.has_value_uncertainty())
                .map(|point| point.energy),
        );
        self.energy_coverage_with_uncertainty = coverage(
            &with_uncertainty,
            lower,
            upper,
            options.energy_width,
            options.coverage_scale,
        )?;

        let mut by_experiment: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
        for &point in &in_range {
            by_experiment
                .entry(point.experiment_id.as_str())
                .or_default()
                .push(point);
        }

        let spectrum = options.weighting_spectrum;
        let mut contributions = Vec::with_capacity(by_experiment.len());
        for (experiment, points) in by_experiment {
            let result = discrepancy(
                points.iter().copied(),
                curve,
                lower,
                upper,
                options.scored_metric,
            );
            let Some(result) = result else {
                self.experiments
                    .insert(experiment.to_string(), ExperimentMetrics::empty(&points));
                contributions.push((0.0, 0.0));
                continue;
            };

            let mut energies = Vec::new();
            let mut weighted_sum = 0.0;
            for (energy, value) in result.defined() {
                let weighted = value * spectrum.relative_weight(energy);
                if !weighted.is_finite() {
                    continue;
                }
                weighted_sum += weighted.abs();
                energies.push(energy);
                self.points.push(DiscrepancyPoint {
                    energy,
                    value,
                    experiment_id: experiment.to_string(),
                });
            }
            let undefined_points = result.values.len() - energies.len();
            if energies.is_empty() {
                let mut metrics = ExperimentMetrics::empty(&points);
                metrics.undefined_points = undefined_points;
                self.experiments.insert(experiment.to_string(), metrics);
                contributions.push((0.0, 0.0));
                continue;
            }

            let weighted_metric = weighted_sum / energies.len() as f64;
            let energies = sorted_unique_energies(energies);
            let experiment_coverage = coverage(
                &energies,
                lower,
                upper,
                options.energy_width,
                options.coverage_scale,
            )?;
            debug!(
                reaction = %self.name,
                experiment,
                weighted_metric,
                coverage = experiment_coverage,
                "experiment graded"
            );
            self.experiments.insert(
                experiment.to_string(),
                ExperimentMetrics {
                    weighted_metric,
                    energy_coverage: experiment_coverage,
                    undefined_points,
                    ..ExperimentMetrics::empty(&points)
                },
            );
            contributions.push((weighted_metric * experiment_coverage, experiment_coverage));
        }

        let total_coverage: f64 = contributions.iter().map(|(_, cov)| cov).sum();
        self.average_metric = if total_coverage > 0.0 {
            contributions
                .iter()
                .map(|(contribution, cov)| contribution * cov / total_coverage)
                .sum::<f64>()
                / contributions.len() as f64
        } else {
            1.0
        };
        self.score = compose_score(
            self.energy_coverage,
            self.average_metric,
            options.scored_metric,
        );
        self.status = ReactionStatus::Scored;
        Ok(())
    }

    /// MT-equivalent reaction code.
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Symbolic channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached measurement table.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Coverage (%) over all in-range measurements.
    pub fn energy_coverage(&self) -> f64 {
        self.energy_coverage
    }

    /// Coverage (%) over in-range measurements that report an uncertainty.
    pub fn energy_coverage_with_uncertainty(&self) -> f64 {
        self.energy_coverage_with_uncertainty
    }

    /// Coverage-weighted average discrepancy.
    pub fn average_metric(&self) -> f64 {
        self.average_metric
    }

    /// Composite quality score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Distinct datasets in the table.
    pub fn dataset_count(&self) -> usize {
        self.dataset_count
    }

    /// Distinct experiments in the table.
    pub fn experiment_count(&self) -> usize {
        self.experiment_count
    }

    /// Percentage of experiments reporting a cross-section uncertainty.
    pub fn value_uncertainty_share(&self) -> f64 {
        self.value_uncertainty_share
    }

    /// Percentage of experiments reporting an energy uncertainty.
    pub fn energy_uncertainty_share(&self) -> f64 {
        self.energy_uncertainty_share
    }

    /// Rows in the table.
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Rows inside the energy window.
    pub fn in_range_count(&self) -> usize {
        self.in_range_count
    }

    /// Per-experiment breakdown keyed by experiment id.
    pub fn experiments(&self) -> &BTreeMap<String, ExperimentMetrics> {
        &self.experiments
    }

    /// Defined per-point discrepancies.
    pub fn points(&self) -> &[DiscrepancyPoint] {
        &self.points
    }

    /// Current lifecycle state.
    pub fn status(&self) -> ReactionStatus {
        self.status
    }

    /// Why metrics are zero, if they are.
    pub fn gap(&self) -> Option<DataGap> {
        self.gap
    }

    /// Serializable snapshot for report consumers.
    pub fn report(&self) -> ReactionReport {
        ReactionReport {
            code: self.code,
            name: self.name.clone(),
            energy_coverage: self.energy_coverage,
            energy_coverage_with_uncertainty: self.energy_coverage_with_uncertainty,
            average_metric: self.average_metric,
            score: self.score,
            dataset_count: self.dataset_count,
            experiment_count: self.experiment_count,
            value_uncertainty_share: self.value_uncertainty_share,
            energy_uncertainty_share: self.energy_uncertainty_share,
            point_count: self.point_count,
            in_range_count: self.in_range_count,
            status: self.status,
            gap: self.gap,
            experiments: self.experiments.clone(),
            point_energies: self.points.iter().map(|point| point.energy).collect(),
            point_values: self.points.iter().map(|point| point.value).collect(),
        }
    }
}
