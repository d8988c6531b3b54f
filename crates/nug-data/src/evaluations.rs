//! Evaluation tables stored one file per reaction.

use std::fs;
use std::path::{Path, PathBuf};

use nug_core::{ErrorInfo, NugError};
use nug_grade::{EvaluationKey, EvaluationSource, ReferenceCurve};
use tracing::debug;

use crate::wrap_io;

const HEADER_LINES: usize = 5;
const MEV_TO_EV: f64 = 1.0e6;
const MB_TO_B: f64 = 1.0e-3;

/// Parses an evaluation table into a curve in eV and barns.
///
/// The first five lines are a header. Each following line holds
/// whitespace-separated `E(MeV) xs(mb)` columns, optionally followed by
/// lower and upper cross-section bands which are ignored.
pub fn parse_evaluation_table(text: &str) -> Result<ReferenceCurve, NugError> {
    let mut points = Vec::new();
    for (index, line) in text.lines().enumerate().skip(HEADER_LINES) {
        let mut columns = line.split_whitespace();
        let (Some(energy), Some(value)) = (columns.next(), columns.next()) else {
            if line.trim().is_empty() {
                continue;
            }
            return Err(parse_error(index, "expected energy and cross-section columns"));
        };
        let energy: f64 = energy
            .parse()
            .map_err(|_| parse_error(index, "energy is not a number"))?;
        let value: f64 = value
            .parse()
            .map_err(|_| parse_error(index, "cross section is not a number"))?;
        points.push((energy * MEV_TO_EV, value * MB_TO_B));
    }
    if points.is_empty() {
        return Err(NugError::data(
            "evaluation-empty",
            "evaluation table has no data lines",
        ));
    }
    ReferenceCurve::from_points(points).map_err(|err| NugError::Data(err.info().clone()))
}

fn parse_error(index: usize, message: &str) -> NugError {
    NugError::Data(
        ErrorInfo::new("evaluation-parse", message).with_context("line", (index + 1).to_string()),
    )
}

/// Evaluation tables stored as
/// `<root>/<evaluation>/<projectile>-<Z>-<A>-MT<code>.txt`.
#[derive(Debug, Clone)]
pub struct DirectoryEvaluationSource {
    root: PathBuf,
}

impl DirectoryEvaluationSource {
    /// Reads tables below `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the table for `key`.
    pub fn path_for(&self, key: &EvaluationKey) -> PathBuf {
        self.root.join(&key.evaluation).join(format!(
            "{}-{}-{}-MT{:03}.txt",
            key.projectile, key.z, key.a, key.reaction_code
        ))
    }
}

impl EvaluationSource for DirectoryEvaluationSource {
    fn evaluation(&self, key: &EvaluationKey) -> Result<Option<ReferenceCurve>, NugError> {
        let path = self.path_for(key);
        if !path.is_file() {
            debug!(path = %path.display(), "evaluation file not found");
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|err| wrap_io("evaluation-read", &path, err))?;
        parse_evaluation_table(&text)
            .map(Some)
            .map_err(|err| match err {
                NugError::Data(info) => {
                    NugError::Data(info.with_context("path", path.display().to_string()))
                }
                other => other,
            })
    }
}
