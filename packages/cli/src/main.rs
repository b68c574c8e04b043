#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line entry point for the jochome map toolchain.
//!
//! Generates the deck.gl map artifacts for one city, lists the cities
//! with a registered camera, and inspects boundary archives.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use jochome_map_gml::load_record_table;
use jochome_map_viewstate::CityViewStates;

#[derive(Parser)]
#[command(name = "jochome_map_cli", about = "Boundary map artifact toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the map layers and tables for one city
    Generate {
        /// Path to the e-Stat boundary zip archive
        archive: PathBuf,

        /// City to generate artifacts for (e.g., "札幌市")
        city: String,

        /// Directory the artifacts are written into
        #[arg(long, default_value = "data/generated")]
        output_dir: PathBuf,
    },

    /// List the cities with a registered map camera
    Cities,

    /// Show per-city record counts for a boundary archive
    Inspect {
        /// Path to the e-Stat boundary zip archive
        archive: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            archive,
            city,
            output_dir,
        } => cmd_generate(&archive, &city, &output_dir),
        Commands::Cities => cmd_cities(),
        Commands::Inspect { archive } => cmd_inspect(&archive),
    }
}

/// Runs the artifact pipeline and prints what it produced.
fn cmd_generate(
    archive: &Path,
    city: &str,
    output_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = jochome_map_generate::run(archive, city, output_dir)?;

    println!("=== Generate ===");
    println!();
    println!(
        "Records:       {} total, {} in {city}",
        summary.total_records, summary.city_records
    );
    println!("District rows: {}", summary.district_rows);
    println!("Output:        {}", output_dir.display());

    Ok(())
}

/// Prints every registered city camera.
fn cmd_cities() -> Result<(), Box<dyn std::error::Error>> {
    let cities = CityViewStates::load()?;

    println!("=== Cities ===");
    println!();
    for (name, view_state) in cities.iter() {
        println!(
            "{name}  lat {:.5}  lon {:.5}  zoom {}",
            view_state.latitude, view_state.longitude, view_state.zoom
        );
    }

    Ok(())
}

/// Prints per-city record counts for an archive.
fn cmd_inspect(archive: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_record_table(archive)?;

    println!("=== Inspect ===");
    println!();
    println!("Records: {} total", table.len());
    for (city, count) in table.city_counts() {
        println!("  {city}: {count}");
    }

    Ok(())
}
