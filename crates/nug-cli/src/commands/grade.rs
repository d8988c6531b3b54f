use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use nug_core::serde::to_canonical_json_bytes;
use nug_core::{load_options, IsotopeId};
use nug_data::{CsvMeasurementSource, DirectoryEvaluationSource};
use nug_grade::{grade_isotope, DataSources};
use tracing::info;

use crate::report::render_nuclide;

#[derive(Args, Debug)]
pub struct GradeArgs {
    /// YAML grading options.
    #[arg(long)]
    pub options: PathBuf,
    /// Measurement table CSV.
    #[arg(long)]
    pub measurements: PathBuf,
    /// Root directory of the evaluation tables.
    #[arg(long)]
    pub evaluations: PathBuf,
    /// Proton number.
    #[arg(long)]
    pub z: u32,
    /// Mass number.
    #[arg(long)]
    pub a: u32,
    /// Element symbol.
    #[arg(long)]
    pub symbol: String,
    /// Optional path receiving the JSON report.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

pub fn run(args: &GradeArgs) -> Result<(), Box<dyn Error>> {
    let options = load_options(&args.options)?;
    let measurements = CsvMeasurementSource::from_path(&args.measurements)?;
    let evaluations = DirectoryEvaluationSource::new(&args.evaluations);
    let sources = DataSources::new(&measurements, &evaluations);

    let isotope = IsotopeId::new(args.z, args.a, args.symbol.clone());
    let nuclide = grade_isotope(&isotope, &options, &sources)?;
    let report = nuclide.report();
    print!("{}", render_nuclide(&report, &options));

    if let Some(path) = &args.json {
        fs::write(path, to_canonical_json_bytes(&report)?)?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}
