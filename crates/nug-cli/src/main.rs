use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    coverage::{self, CoverageArgs},
    grade::{self, GradeArgs},
    options::{self, OptionsArgs},
    scoreboard::{self, ScoreboardArgs},
};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod commands;
mod report;

#[derive(Parser, Debug)]
#[command(name = "nug", about = "Grade experimental cross-section data against evaluations")]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a preset grading configuration as YAML.
    Options(OptionsArgs),
    /// Compute the energy coverage of a list of energies.
    Coverage(CoverageArgs),
    /// Grade a single isotope and print its report.
    Grade(GradeArgs),
    /// Grade an isotope catalog and write the scoreboard.
    Scoreboard(ScoreboardArgs),
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Options(args) => options::run(&args),
        Command::Coverage(args) => coverage::run(&args),
        Command::Grade(args) => grade::run(&args),
        Command::Scoreboard(args) => scoreboard::run(&args),
    }
}
