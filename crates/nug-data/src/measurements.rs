//! Measurement table CSV.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use nug_core::{ErrorInfo, NugError, Projectile};
use nug_grade::{Measurement, MeasurementKey, MeasurementSource};
use serde::Deserialize;
use tracing::debug;

use crate::wrap_csv;

#[derive(Debug, Deserialize)]
struct MeasurementRow {
    #[serde(rename = "Projectile")]
    projectile: String,
    #[serde(rename = "Z")]
    z: u32,
    #[serde(rename = "A")]
    a: u32,
    #[serde(rename = "Reaction")]
    reaction: String,
    #[serde(rename = "Energy")]
    energy: f64,
    #[serde(rename = "dEnergy")]
    energy_uncertainty: Option<f64>,
    #[serde(rename = "Data")]
    value: f64,
    #[serde(rename = "dData")]
    value_uncertainty: Option<f64>,
    #[serde(rename = "EXFOR_Entry")]
    experiment_id: String,
    #[serde(rename = "Year")]
    year: Option<i32>,
    #[serde(rename = "Author", default)]
    author: String,
    #[serde(rename = "Dataset_Number")]
    dataset_id: String,
}

/// Measurement tables read from one CSV file and indexed by
/// `(projectile, Z, A, reaction)`.
#[derive(Debug, Clone, Default)]
pub struct CsvMeasurementSource {
    tables: HashMap<MeasurementKey, Vec<Measurement>>,
}

impl CsvMeasurementSource {
    /// Reads and indexes the CSV file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, NugError> {
        let path = path.as_ref();
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)
            .map_err(|err| {
                NugError::Data(
                    ErrorInfo::new("measurements-open", "failed to open measurement table")
                        .with_context("path", path.display().to_string())
                        .with_hint(err.to_string()),
                )
            })?;
        Self::from_csv(reader)
    }

    /// Reads and indexes CSV data from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, NugError> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, NugError> {
        let mut tables: HashMap<MeasurementKey, Vec<Measurement>> = HashMap::new();
        let mut rows = 0usize;
        for (index, result) in reader.deserialize::<MeasurementRow>().enumerate() {
            let row = result.map_err(|err| wrap_csv("measurements-row", err))?;
            let projectile: Projectile = row.projectile.parse().map_err(|err: NugError| {
                NugError::Data(
                    ErrorInfo::new("measurements-projectile", err.info().message.clone())
                        .with_context("row", (index + 1).to_string()),
                )
            })?;
            let key = MeasurementKey::new(projectile, row.z, row.a, row.reaction);
            tables.entry(key).or_default().push(Measurement {
                energy: row.energy,
                energy_uncertainty: row.energy_uncertainty,
                value: row.value,
                value_uncertainty: row.value_uncertainty,
                experiment_id: row.experiment_id,
                dataset_id: row.dataset_id,
                year: row.year,
                author: row.author,
            });
            rows += 1;
        }
        debug!(rows, tables = tables.len(), "measurement table indexed");
        Ok(Self { tables })
    }

    /// Number of indexed `(projectile, Z, A, reaction)` tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl MeasurementSource for CsvMeasurementSource {
    fn measurements(&self, key: &MeasurementKey) -> Result<Option<Vec<Measurement>>, NugError> {
        Ok(self.tables.get(key).cloned())
    }
}
