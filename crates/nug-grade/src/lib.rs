#![deny(missing_docs)]
#![doc = "Grading engine: energy coverage, discrepancy against reference evaluations, \
flux weighting and score aggregation for reactions, isotopes and whole catalogs."]

pub mod batch;
pub mod coverage;
pub mod discrepancy;
pub mod measurement;
pub mod nuclide;
pub mod reaction;
pub mod report;
pub mod scoreboard;
pub mod source;
pub mod weighting;

pub use batch::{grade_isotope, grade_many_isotopes, is_gradable};
pub use coverage::coverage;
pub use discrepancy::{chi_squared, discrepancy, relative_error, Discrepancy, ReferenceCurve};
pub use measurement::{sorted_unique_energies, Measurement};
pub use nuclide::Nuclide;
pub use reaction::{
    compose_score, DataGap, DiscrepancyPoint, ExperimentMetrics, Reaction, ReactionStatus,
};
pub use report::{NuclideReport, ReactionReport};
pub use scoreboard::{Scoreboard, ScoreboardEntry};
pub use source::{
    CatalogSource, DataSources, EvaluationKey, EvaluationSource, InMemoryCatalog,
    InMemoryEvaluations, InMemoryMeasurements, MeasurementKey, MeasurementSource,
};
pub use weighting::FluxWeighting;
