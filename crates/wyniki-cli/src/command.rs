use std::path::PathBuf;

use clap::Parser;
use wyniki_dataset::cache;

use crate::app;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Results CSV file path
    #[arg(default_value = "wyniki_testow_fixed.csv")]
    data_file: PathBuf,

    /// District the population is filtered to (exact match)
    #[arg(long, default_value = "Warszawa")]
    locality: String,

    /// Display label of the school selected by default
    #[arg(long, default_value = "SZKOŁA PODSTAWOWA NR 398 - Warszawa")]
    target_school: String,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    eprintln!("Loading results from {}...", args.data_file.display());
    let population = cache::population(&args.data_file, &args.locality)?;
    eprintln!("Loaded {} schools in {}", population.len(), args.locality);

    anyhow::ensure!(
        !population.is_empty(),
        "no schools found for locality '{}'",
        args.locality
    );

    app::run_tui(population, &args.target_school)?;

    Ok(())
}
