//! One isotope under grading and the reactions it owns.

use indexmap::IndexMap;
use nug_core::{GradingOptions, IsotopeId, NugError};
use tracing::{debug, warn};

use crate::reaction::{DataGap, Reaction, ReactionStatus};
use crate::report::NuclideReport;
use crate::source::{DataSources, EvaluationKey, MeasurementKey};

/// An isotope and the reactions graded for it in the current pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Nuclide {
    isotope: IsotopeId,
    reactions: IndexMap<String, Reaction>,
    dataset_count: usize,
}

impl Nuclide {
    /// Creates an isotope with no graded reactions.
    pub fn new(isotope: IsotopeId) -> Self {
        Self {
            isotope,
            reactions: IndexMap::new(),
            dataset_count: 0,
        }
    }

    /// Proton number.
    pub fn z(&self) -> u32 {
        self.isotope.z
    }

    /// Mass number.
    pub fn a(&self) -> u32 {
        self.isotope.a
    }

    /// Neutron number.
    pub fn n(&self) -> u32 {
        self.isotope.neutron_number()
    }

    /// Element symbol.
    pub fn symbol(&self) -> &str {
        &self.isotope.symbol
    }

    /// Label in `<A><Symbol>` form.
    pub fn label(&self) -> String {
        self.isotope.label()
    }

    /// Catalog identity.
    pub fn isotope(&self) -> &IsotopeId {
        &self.isotope
    }

    /// Graded reactions in required-channel order.
    pub fn reactions(&self) -> &IndexMap<String, Reaction> {
        &self.reactions
    }

    /// Looks up a graded reaction by channel name.
    pub fn reaction(&self, name: &str) -> Option<&Reaction> {
        self.reactions.get(name)
    }

    /// Datasets summed over the graded reactions.
    pub fn dataset_count(&self) -> usize {
        self.dataset_count
    }

    /// Score averaged over the graded reactions; zero when none were graded.
    pub fn mean_score(&self) -> f64 {
        if self.reactions.is_empty() {
            return 0.0;
        }
        self.reactions.values().map(Reaction::score).sum::<f64>() / self.reactions.len() as f64
    }

    /// Rebuilds every required reaction from `sources` and grades it.
    ///
    /// Missing tables and evaluations leave the affected channel zero-valued.
    /// Source failures that are not fatal degrade only their channel; fatal
    /// errors abort the call.
    pub fn get_metrics(
        &mut self,
        options: &GradingOptions,
        sources: &DataSources<'_>,
    ) -> Result<(), NugError> {
        self.reactions = IndexMap::with_capacity(options.required_channels.len());
        self.dataset_count = 0;
        let label = self.label();

        for channel in &options.required_channels {
            let mut reaction = Reaction::new(channel);
            let key = MeasurementKey::new(
                options.projectile,
                self.isotope.z,
                self.isotope.a,
                channel.name.as_str(),
            );
            match sources.measurements.measurements(&key) {
                Ok(Some(table)) => reaction.load(table),
                Ok(None) => reaction.load(Vec::new()),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!(isotope = %label, channel = %channel.name, error = %err, "measurement load failed");
                    reaction.mark_unavailable(DataGap::LoadFailed);
                }
            }

            if reaction.status() == ReactionStatus::Loaded {
                let key = EvaluationKey {
                    evaluation: options.evaluation.clone(),
                    projectile: options.projectile,
                    reaction_code: channel.code,
                    z: self.isotope.z,
                    a: self.isotope.a,
                };
                match sources.evaluations.evaluation(&key) {
                    Ok(Some(curve)) => reaction.calc_metrics(&curve, options)?,
                    Ok(None) => {
                        warn!(
                            isotope = %label,
                            channel = %channel,
                            evaluation = %options.evaluation,
                            "no evaluation found for reaction"
                        );
                        reaction.mark_unavailable(DataGap::MissingEvaluation);
                    }
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(err) => {
                        warn!(isotope = %label, channel = %channel.name, error = %err, "evaluation load failed");
                        reaction.mark_unavailable(DataGap::LoadFailed);
                    }
                }
            }

            debug!(
                isotope = %label,
                channel = %channel.name,
                score = reaction.score(),
                status = ?reaction.status(),
                "reaction graded"
            );
            self.dataset_count += reaction.dataset_count();
            self.reactions.insert(channel.name.clone(), reaction);
        }
        Ok(())
    }

    /// Serializable snapshot of the graded isotope.
    pub fn report(&self) -> NuclideReport {
        NuclideReport {
            label: self.label(),
            symbol: self.isotope.symbol.clone(),
            z: self.z(),
            n: self.n(),
            a: self.a(),
            dataset_count: self.dataset_count,
            score: self.mean_score(),
            reactions: self.reactions.values().map(Reaction::report).collect(),
        }
    }
}
