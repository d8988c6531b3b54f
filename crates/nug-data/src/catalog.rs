//! Isotope catalog CSV.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use nug_core::{IsotopeId, NugError};
use nug_grade::CatalogSource;
use serde::Deserialize;

use crate::wrap_csv;

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Z")]
    z: u32,
    #[serde(rename = "A")]
    a: u32,
    #[serde(rename = "Symbol")]
    symbol: String,
}

/// Isotope catalog read from a `Z,A,Symbol` CSV file.
///
/// Rows are returned as written; pseudo-entries are filtered by the grader.
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    path: PathBuf,
}

impl CsvCatalogSource {
    /// Catalog backed by the file at `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for CsvCatalogSource {
    fn isotopes(&self) -> Result<Vec<IsotopeId>, NugError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(&self.path)
            .map_err(|err| wrap_csv("catalog-read", err))?;
        reader
            .deserialize::<CatalogRow>()
            .map(|row| {
                let row = row.map_err(|err| wrap_csv("catalog-record", err))?;
                Ok(IsotopeId::new(row.z, row.a, row.symbol))
            })
            .collect()
    }
}
