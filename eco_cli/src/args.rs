use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eco_changelist::Config;
use eco_common::DEFAULT_DRIVER_PIN;
use eco_transform::Corner;

/// ECO toolkit - derive and post-process engineering change orders
#[derive(Parser, Debug)]
#[command(name = "eco")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the changelist that turns the original design into the optimized one
    Changelist(ChangelistArgs),
    /// Report how far placed cells moved between two designs
    Displacement(DisplacementArgs),
    /// Retarget cell types of a design and its netlist to another corner
    Corner(CornerArgs),
    /// Remove escape backslashes from a file
    Unescape(UnescapeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ChangelistArgs {
    /// Original design (DEF)
    pub original: PathBuf,
    /// Optimized design (DEF)
    pub optimized: PathBuf,
    /// Changelist output path
    pub output: PathBuf,

    /// Output pin that marks an inserted buffer as a net driver
    #[arg(long, default_value = DEFAULT_DRIVER_PIN)]
    pub driver_pin: String,
    /// Parse the two designs concurrently
    #[arg(short = 'p', long, default_value_t = false)]
    pub parallel: bool,
    /// Also write the run summary as JSON
    #[arg(long)]
    pub summary_json: Option<PathBuf>,
}

impl ChangelistArgs {
    /// Convert command-line arguments into internal configuration
    pub fn to_config(&self) -> Config {
        Config::builder()
            .driver_pin(self.driver_pin.as_str())
            .parallel(self.parallel)
            .build()
    }
}

#[derive(clap::Args, Debug)]
pub struct DisplacementArgs {
    /// Original design (DEF)
    pub original: PathBuf,
    /// Optimized design (DEF)
    pub optimized: PathBuf,
    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct CornerArgs {
    pub input_def: PathBuf,
    pub output_def: PathBuf,
    pub input_netlist: PathBuf,
    pub output_netlist: PathBuf,
    /// Target corner: L, R, SL or SRAM
    pub corner: Corner,
}

#[derive(clap::Args, Debug)]
pub struct UnescapeArgs {
    pub input: PathBuf,
    pub output: PathBuf,
}
