//! Seams to the external data providers, with in-memory implementations.

use std::collections::HashMap;

use nug_core::{IsotopeId, NugError, Projectile};

use crate::discrepancy::ReferenceCurve;
use crate::measurement::Measurement;

/// Lookup key of a measurement table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeasurementKey {
    /// Incident particle.
    pub projectile: Projectile,
    /// Proton number.
    pub z: u32,
    /// Mass number.
    pub a: u32,
    /// Channel name, e.g. `N,TOT`.
    pub reaction: String,
}

impl MeasurementKey {
    /// Creates a key.
    pub fn new(projectile: Projectile, z: u32, a: u32, reaction: impl Into<String>) -> Self {
        Self {
            projectile,
            z,
            a,
            reaction: reaction.into(),
        }
    }
}

/// Lookup key of a reference evaluation curve.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvaluationKey {
    /// Evaluation (library) identifier.
    pub evaluation: String,
    /// Incident particle.
    pub projectile: Projectile,
    /// MT-equivalent reaction code.
    pub reaction_code: u32,
    /// Proton number.
    pub z: u32,
    /// Mass number.
    pub a: u32,
}

/// Provides measurement tables.
pub trait MeasurementSource {
    /// Returns the table for `key`, or `None` when there is none.
    fn measurements(&self, key: &MeasurementKey) -> Result<Option<Vec<Measurement>>, NugError>;
}

/// Provides reference evaluation curves.
pub trait EvaluationSource {
    /// Returns the curve for `key`, or `None` when no evaluation exists.
    fn evaluation(&self, key: &EvaluationKey) -> Result<Option<ReferenceCurve>, NugError>;
}

/// Enumerates the isotopes of a catalog.
pub trait CatalogSource {
    /// All catalog rows, pseudo-entries included.
    fn isotopes(&self) -> Result<Vec<IsotopeId>, NugError>;
}

/// The sources one grading pass reads from.
#[derive(Clone, Copy)]
pub struct DataSources<'a> {
    /// Measurement tables.
    pub measurements: &'a dyn MeasurementSource,
    /// Reference evaluations.
    pub evaluations: &'a dyn EvaluationSource,
}

impl<'a> DataSources<'a> {
    /// Bundles a measurement and an evaluation source.
    pub fn new(
        measurements: &'a dyn MeasurementSource,
        evaluations: &'a dyn EvaluationSource,
    ) -> Self {
        Self {
            measurements,
            evaluations,
        }
    }
}

/// Measurement tables held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMeasurements {
    tables: HashMap<MeasurementKey, Vec<Measurement>>,
}

impl InMemoryMeasurements {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point to the table under `key`.
    pub fn push(&mut self, key: MeasurementKey, point: Measurement) {
        self.tables.entry(key).or_default().push(point);
    }

    /// Replaces the table under `key`.
    pub fn insert(&mut self, key: MeasurementKey, table: Vec<Measurement>) {
        self.tables.insert(key, table);
    }

    /// Number of stored tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table is stored.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl MeasurementSource for InMemoryMeasurements {
    fn measurements(&self, key: &MeasurementKey) -> Result<Option<Vec<Measurement>>, NugError> {
        Ok(self.tables.get(key).cloned())
    }
}

/// Reference curves held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEvaluations {
    curves: HashMap<EvaluationKey, ReferenceCurve>,
}

impl InMemoryEvaluations {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the curve for `key`.
    pub fn insert(&mut self, key: EvaluationKey, curve: ReferenceCurve) {
        self.curves.insert(key, curve);
    }
}

impl EvaluationSource for InMemoryEvaluations {
    fn evaluation(&self, key: &EvaluationKey) -> Result<Option<ReferenceCurve>, NugError> {
        Ok(self.curves.get(key).cloned())
    }
}

/// A fixed list of catalog rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    isotopes: Vec<IsotopeId>,
}

impl InMemoryCatalog {
    /// Wraps the given rows.
    pub fn new(isotopes: Vec<IsotopeId>) -> Self {
        Self { isotopes }
    }
}

impl CatalogSource for InMemoryCatalog {
    fn isotopes(&self) -> Result<Vec<IsotopeId>, NugError> {
        Ok(self.isotopes.clone())
    }
}
