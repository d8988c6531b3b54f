//! Per-pass scoreboard of isotope scores.

use std::collections::BTreeMap;

use nug_core::serde::to_canonical_json_bytes;
use nug_core::{GradingOptions, NugError};
use serde::{Deserialize, Serialize};

use crate::report::NuclideReport;

/// One heat-map cell: an isotope's position and score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardEntry {
    /// Label in `<A><Symbol>` form.
    pub label: String,
    /// Neutron number.
    pub n: u32,
    /// Proton number.
    pub z: u32,
    /// Mass number.
    pub a: u32,
    /// Score averaged over the required channels.
    pub score: f64,
}

/// Results of a batch grading pass together with the options that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Content hash of [`Scoreboard::options`].
    pub options_hash: String,
    /// Options of the pass.
    pub options: GradingOptions,
    /// Graded isotopes keyed by label.
    pub nuclides: BTreeMap<String, NuclideReport>,
}

impl Scoreboard {
    /// Creates an empty scoreboard for `options`.
    pub fn new(options: &GradingOptions) -> Result<Self, NugError> {
        Ok(Self {
            options_hash: options.options_hash()?,
            options: options.clone(),
            nuclides: BTreeMap::new(),
        })
    }

    /// Adds or replaces an isotope.
    pub fn insert(&mut self, report: NuclideReport) {
        self.nuclides.insert(report.label.clone(), report);
    }

    /// Looks up an isotope by label.
    pub fn get(&self, label: &str) -> Option<&NuclideReport> {
        self.nuclides.get(label)
    }

    /// Number of graded isotopes.
    pub fn len(&self) -> usize {
        self.nuclides.len()
    }

    /// Whether no isotope was graded.
    pub fn is_empty(&self) -> bool {
        self.nuclides.is_empty()
    }

    /// `(N, Z, score)` cells ordered by proton then mass number.
    pub fn entries(&self) -> Vec<ScoreboardEntry> {
        let mut entries: Vec<ScoreboardEntry> = self
            .nuclides
            .values()
            .map(|report| ScoreboardEntry {
                label: report.label.clone(),
                n: report.n,
                z: report.z,
                a: report.a,
                score: report.score,
            })
            .collect();
        entries.sort_by(|left, right| (left.z, left.a).cmp(&(right.z, right.a)));
        entries
    }

    /// Canonical JSON rendering with sorted keys.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, NugError> {
        to_canonical_json_bytes(self)
    }
}
