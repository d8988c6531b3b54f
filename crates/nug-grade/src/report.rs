//! Serializable snapshots handed to report and scoreboard consumers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reaction::{DataGap, ExperimentMetrics, ReactionStatus};

/// Metrics of one reaction channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionReport {
    /// MT-equivalent reaction code.
    pub code: u32,
    /// Symbolic channel name.
    pub name: String,
    /// Coverage (%) over all in-range measurements.
    pub energy_coverage: f64,
    /// Coverage (%) over in-range measurements with an uncertainty.
    pub energy_coverage_with_uncertainty: f64,
    /// Coverage-weighted average discrepancy.
    pub average_metric: f64,
    /// Composite quality score.
    pub score: f64,
    /// Distinct datasets in the table.
    pub dataset_count: usize,
    /// Distinct experiments in the table.
    #[serde(default)]
    pub experiment_count: usize,
    /// Percentage of experiments reporting a cross-section uncertainty.
    #[serde(default)]
    pub value_uncertainty_share: f64,
    /// Percentage of experiments reporting an energy uncertainty.
    #[serde(default)]
    pub energy_uncertainty_share: f64,
    /// Rows in the table.
    pub point_count: usize,
    /// Rows inside the energy window.
    pub in_range_count: usize,
    /// Lifecycle state at the end of the pass.
    pub status: ReactionStatus,
    /// Why metrics are zero, if they are.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<DataGap>,
    /// Per-experiment breakdown.
    pub experiments: BTreeMap<String, ExperimentMetrics>,
    /// Energies of the defined per-point discrepancies.
    pub point_energies: Vec<f64>,
    /// Defined per-point discrepancies.
    pub point_values: Vec<f64>,
}

impl ReactionReport {
    /// Whether any measurement fell inside the energy window.
    pub fn has_data_in_range(&self) -> bool {
        self.in_range_count > 0
    }
}

/// Metrics of one isotope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuclideReport {
    /// Label in `<A><Symbol>` form.
    pub label: String,
    /// Element symbol.
    pub symbol: String,
    /// Proton number.
    pub z: u32,
    /// Neutron number.
    pub n: u32,
    /// Mass number.
    pub a: u32,
    /// Datasets summed over the graded channels.
    pub dataset_count: usize,
    /// Score averaged over the required channels.
    pub score: f64,
    /// One entry per required channel, in configuration order.
    pub reactions: Vec<ReactionReport>,
}
