#![deny(missing_docs)]
#![doc = "Core configuration, identifiers, and error types for the NuGrade grading engine."]

pub mod errors;
pub mod hash;
pub mod options;
pub mod serde;
mod types;

pub use errors::{ErrorInfo, NugError};
pub use hash::stable_hash_string;
pub use options::{load_options, CoverageScale, GradingOptions, ScoredMetric, WeightingSpectrum};
pub use types::{Channel, IsotopeId, Projectile};
