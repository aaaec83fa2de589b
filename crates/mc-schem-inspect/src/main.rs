mod config;
mod report;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use config::InspectConfig;
use mc_schem_mcedit::SchematicReader;
use mc_schem_world::{LegacyMapper, Registries};
use tracing::info;

#[derive(Parser)]
#[command(name = "mc-schem-inspect", about = "Decode a legacy MCEdit schematic and summarize it")]
pub struct Args {
    /// Schematic file to read (raw or gzip-compressed)
    pub file: PathBuf,

    /// Configuration file; defaults are used when it does not exist
    #[arg(short, long, default_value = "inspect.toml")]
    pub config: PathBuf,

    /// Replacement legacy id table (overrides the config file)
    #[arg(long)]
    pub legacy_table: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let config = match InspectConfig::load_or_default(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", args.config.display());
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    if let Err(e) = run(&args, &config) {
        eprintln!("{}: {e}", args.file.display());
        std::process::exit(1);
    }
}

fn run(args: &Args, config: &InspectConfig) -> Result<(), Box<dyn std::error::Error>> {
    let legacy_table = args
        .legacy_table
        .as_ref()
        .or(config.registry.legacy_table.as_ref());
    let legacy = Arc::new(match legacy_table {
        Some(path) => LegacyMapper::load(path)?,
        None => LegacyMapper::bundled()?,
    });
    let registries = Registries::with_resolver(legacy.clone())?;

    info!("Reading {}", args.file.display());
    let input = BufReader::new(File::open(&args.file)?);
    let (clipboard, diagnostics) = SchematicReader::new(input, registries).read_with_diagnostics()?;

    print!("{}", report::render(&clipboard, &diagnostics, &legacy, &config.report));
    Ok(())
}
