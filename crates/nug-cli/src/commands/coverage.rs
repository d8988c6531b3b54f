use std::error::Error;

use clap::Args;
use nug_core::CoverageScale;
use nug_grade::{coverage, sorted_unique_energies};

#[derive(Args, Debug)]
pub struct CoverageArgs {
    /// Lower energy bound.
    #[arg(long, allow_negative_numbers = true)]
    pub lower: f64,
    /// Upper energy bound.
    #[arg(long, allow_negative_numbers = true)]
    pub upper: f64,
    /// Reach width of each measurement on the chosen axis.
    #[arg(long)]
    pub width: f64,
    /// Axis scale (`linear` or `log`).
    #[arg(long, default_value = "linear")]
    pub scale: CoverageScale,
    /// Measurement energies, in any order.
    #[arg(required = true, allow_negative_numbers = true)]
    pub energies: Vec<f64>,
}

pub fn run(args: &CoverageArgs) -> Result<(), Box<dyn Error>> {
    let energies = sorted_unique_energies(
        args.energies
            .iter()
            .copied()
            .filter(|energy| *energy >= args.lower && *energy <= args.upper),
    );
    let value = coverage(&energies, args.lower, args.upper, args.width, args.scale)?;
    println!("{value}");
    Ok(())
}
