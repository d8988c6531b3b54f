use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use nug_core::load_options;
use nug_data::{
    write_scoreboard_csv, write_scoreboard_json, CsvCatalogSource, CsvMeasurementSource,
    DirectoryEvaluationSource,
};
use nug_grade::{grade_many_isotopes, DataSources};
use tracing::info;

#[derive(Args, Debug)]
pub struct ScoreboardArgs {
    /// YAML grading options.
    #[arg(long)]
    pub options: PathBuf,
    /// Measurement table CSV.
    #[arg(long)]
    pub measurements: PathBuf,
    /// Root directory of the evaluation tables.
    #[arg(long)]
    pub evaluations: PathBuf,
    /// Isotope catalog CSV (`Z,A,Symbol`).
    #[arg(long)]
    pub catalog: PathBuf,
    /// Output directory for scoreboard artefacts.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &ScoreboardArgs) -> Result<(), Box<dyn Error>> {
    let options = load_options(&args.options)?;
    let measurements = CsvMeasurementSource::from_path(&args.measurements)?;
    let evaluations = DirectoryEvaluationSource::new(&args.evaluations);
    let catalog = CsvCatalogSource::new(&args.catalog);
    let sources = DataSources::new(&measurements, &evaluations);

    let scoreboard = grade_many_isotopes(&catalog, &options, &sources)?;
    write_scoreboard_json(&args.out.join("scoreboard.json"), &scoreboard)?;
    write_scoreboard_csv(&args.out.join("scoreboard.csv"), &scoreboard)?;
    info!(
        isotopes = scoreboard.len(),
        out = %args.out.display(),
        "scoreboard written"
    );

    for entry in scoreboard.entries() {
        println!("{:>8}  Z={:<3} N={:<3} score={:.3}", entry.label, entry.z, entry.n, entry.score);
    }
    Ok(())
}
