//! Scoreboard JSON and CSV writers.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use csv::WriterBuilder;
use nug_core::NugError;
use nug_grade::Scoreboard;

use crate::{wrap_csv, wrap_io};

fn ensure_parent(path: &Path) -> Result<(), NugError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|err| wrap_io("export-dir", parent, err))
        }
        _ => Ok(()),
    }
}

/// Writes the scoreboard as canonical JSON.
pub fn write_scoreboard_json(path: &Path, scoreboard: &Scoreboard) -> Result<(), NugError> {
    ensure_parent(path)?;
    let bytes = scoreboard.to_json_bytes()?;
    fs::write(path, bytes).map_err(|err| wrap_io("export-json", path, err))
}

/// Writes `label,N,Z,score` rows ordered by proton then mass number.
pub fn write_scoreboard_csv(path: &Path, scoreboard: &Scoreboard) -> Result<(), NugError> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|err| wrap_io("export-csv", path, err))?;
    let mut writer = WriterBuilder::new().from_writer(BufWriter::new(file));
    writer
        .write_record(["label", "N", "Z", "score"])
        .map_err(|err| wrap_csv("export-csv-header", err))?;
    for entry in scoreboard.entries() {
        writer
            .write_record([
                entry.label,
                entry.n.to_string(),
                entry.z.to_string(),
                entry.score.to_string(),
            ])
            .map_err(|err| wrap_csv("export-csv-row", err))?;
    }
    writer
        .flush()
        .map_err(|err| wrap_csv("export-csv-flush", err.into()))?;
    Ok(())
}
