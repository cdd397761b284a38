//! ECO toolkit CLI
//!
//! Entry point for the `eco` command-line tool. Derives the changelist
//! between an original and an optimized placed design, and hosts the
//! companion transformations used around it in the flow.

#[global_allocator]
/// Global allocator using jemalloc.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use clap::Parser;
use eco_changelist::synthesize_paths;
use eco_common::Diagnostics;
use eco_transform::{
    DisplacementReport, rename_components_file, rename_netlist_file, strip_backslashes_file,
};
use tracing::info;

use args::{Args, ChangelistArgs, Command, CornerArgs, DisplacementArgs, UnescapeArgs};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Changelist(args) => changelist(&args),
        Command::Displacement(args) => displacement(&args),
        Command::Corner(args) => corner(&args),
        Command::Unescape(args) => unescape(&args),
    }
}

fn changelist(args: &ChangelistArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.to_config();
    let changelist = synthesize_paths(&args.original, &args.optimized, &config)?;
    changelist.write_to_path(&args.output)?;

    if let Some(path) = &args.summary_json {
        std::fs::write(path, changelist.summary.to_json()?)?;
        info!("Summary written to {}", path.display());
    }

    println!("{}", changelist.summary);
    Ok(())
}

fn displacement(args: &DisplacementArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut diagnostics = Diagnostics::new();
    let report = DisplacementReport::from_paths(&args.original, &args.optimized, &mut diagnostics)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    if !diagnostics.is_empty() {
        info!("{} record warnings while parsing", diagnostics.len());
    }
    Ok(())
}

fn corner(args: &CornerArgs) -> Result<(), Box<dyn std::error::Error>> {
    info!("Changing corner to {}", args.corner);

    let components = rename_components_file(&args.input_def, &args.output_def, args.corner)?;
    println!("Successfully processed {} components", components.processed);
    println!(
        "Changed {} components from valid corners to {}",
        components.changed, args.corner
    );
    println!(
        "Skipped {} components (no valid corner suffix)",
        components.processed - components.changed
    );

    let netlist = rename_netlist_file(&args.input_netlist, &args.output_netlist, args.corner)?;
    println!(
        "Netlist: Changed {} instances to {}",
        netlist.changed, args.corner
    );
    Ok(())
}

fn unescape(args: &UnescapeArgs) -> Result<(), Box<dyn std::error::Error>> {
    strip_backslashes_file(&args.input, &args.output)?;
    Ok(())
}
