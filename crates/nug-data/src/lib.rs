#![deny(missing_docs)]
#![doc = "CSV and directory backed implementations of the grading engine's data sources, \
plus scoreboard exporters."]

pub mod catalog;
pub mod evaluations;
pub mod export;
pub mod measurements;

use std::path::Path;

use nug_core::{ErrorInfo, NugError};

pub use catalog::CsvCatalogSource;
pub use evaluations::{parse_evaluation_table, DirectoryEvaluationSource};
pub use export::{write_scoreboard_csv, write_scoreboard_json};
pub use measurements::CsvMeasurementSource;

pub(crate) fn wrap_csv(code: &str, err: csv::Error) -> NugError {
    NugError::Data(ErrorInfo::new(code, "CSV data failure").with_hint(err.to_string()))
}

pub(crate) fn wrap_io(code: &str, path: &Path, err: std::io::Error) -> NugError {
    NugError::Data(
        ErrorInfo::new(code, "file access failed")
            .with_context("path", path.display().to_string())
            .with_hint(err.to_string()),
    )
}
