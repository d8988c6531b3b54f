use std::error::Error;

use clap::{Args, ValueEnum};
use nug_core::serde::to_yaml_string;
use nug_core::GradingOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Neutrons,
    Protons,
}

#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Preset to print.
    #[arg(long, value_enum, default_value_t = Preset::Neutrons)]
    pub preset: Preset,
}

pub fn run(args: &OptionsArgs) -> Result<(), Box<dyn Error>> {
    let options = match args.preset {
        Preset::Neutrons => GradingOptions::neutrons(),
        Preset::Protons => GradingOptions::protons(),
    };
    print!("{}", to_yaml_string(&options)?);
    Ok(())
}
