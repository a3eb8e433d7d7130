//! Fill the unit array for every event of an event file.
//!
//! Usage:
//!   fill_units data/events.yaml
//!   fill_units --config configs/track_units.yaml data/events.yaml
//!
//! Enable pass logging with:
//!   RUST_LOG=debug fill_units --verbose data/events.yaml

use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use track_units::io::EventFile;
use track_units::{Result, UnitFillConfig, UnitFiller};

/// Fill detector units from reconstructed tracks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Event file (YAML)
    events: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = UnitFillConfig::DEFAULT_PATH)]
    config: PathBuf,

    /// Print per-region counters for every event
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(&args.config)?;
    let geometry = config.to_geometry()?;
    let events = EventFile::load(&args.events)?;
    info!("Loaded {} events from {}", events.len(), args.events.display());

    let filler = UnitFiller::new(&geometry, config.to_fill_config());
    let mut store = filler.new_store();

    println!(
        "Mode: {:?}, pt_min: {} GeV/c, {} units",
        filler.config().grid_mode,
        filler.config().pt_min,
        store.len()
    );

    let mut total_units = 0;
    let mut total_cut = 0;
    for (i, event) in events.events.iter().enumerate() {
        let tracks = event.to_tracks();
        let summary = filler.fill(&mut store, &tracks)?;
        total_units += summary.n_units;
        total_cut += summary.n_units_cut;

        let name = if event.name.is_empty() {
            format!("event {}", i)
        } else {
            event.name.clone()
        };
        println!("{}: {}", name, summary.summary());

        if args.verbose {
            let c = &summary.counters;
            println!(
                "  tracker_only {}/{}  calorimeter {}/{}  dead_zone {}/{}  tracker {}/{}",
                c.tracker_only.touched,
                c.tracker_only.passed_cut,
                c.calorimeter.touched,
                c.calorimeter.passed_cut,
                c.dead_zone.touched,
                c.dead_zone.passed_cut,
                c.tracker.touched,
                c.tracker.passed_cut
            );
            println!("  rejections: {:?}", summary.rejections);
        }
    }

    println!("\n=== Summary ===");
    println!("Events: {}", events.len());
    println!("Units touched: {}", total_units);
    println!("Units above cut: {}", total_cut);
    Ok(())
}

fn load_config(path: &Path) -> Result<UnitFillConfig> {
    if path.exists() {
        Ok(UnitFillConfig::load(path)?)
    } else {
        println!("Config not found, using defaults");
        Ok(UnitFillConfig::default())
    }
}
