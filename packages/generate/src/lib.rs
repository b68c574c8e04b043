#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Map artifact generation.
//!
//! Turns one boundary archive plus a city name into the four files the
//! map front end loads: the merged district layer, the all-towns layer,
//! the district table, and the city camera metadata. [`run`] drives the
//! whole pipeline and reports what it produced.

pub mod geojson;
pub mod table;

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;
use std::time::Instant;

use jochome_map_district::{DistrictError, group_and_merge};
use jochome_map_gml::{GmlError, load_record_table};
use jochome_map_viewstate::{CityViewStates, ViewState, ViewStateError};
use serde::Serialize;
use thiserror::Error;

/// Merged district layer, one feature per disjoint part.
pub const OUTPUT_DISTRICTS_GEOJSON: &str = "districts.geojson";
/// Flat town layer covering every record of the city.
pub const OUTPUT_TOWNS_GEOJSON: &str = "towns.geojson";
/// District table, one row per disjoint part.
pub const OUTPUT_DISTRICTS_CSV: &str = "districts.csv";
/// City camera metadata.
pub const OUTPUT_CITY_JSON: &str = "city.json";

/// Errors from the artifact pipeline.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// File system access failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Loading or parsing the boundary archive failed.
    #[error("Dataset error: {0}")]
    Gml(#[from] GmlError),

    /// Merging district geometry failed.
    #[error("District error: {0}")]
    District(#[from] DistrictError),

    /// The city has no registered camera.
    #[error("View state error: {0}")]
    ViewState(#[from] ViewStateError),

    /// Serializing a JSON artifact failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the district table failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Counts reported by one [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Records parsed from the archive.
    pub total_records: usize,
    /// Records matching the city filter.
    pub city_records: usize,
    /// District rows written, one per disjoint part.
    pub district_rows: usize,
}

/// Camera metadata written next to the layers.
#[derive(Debug, Clone, Serialize)]
pub struct CityMetadata {
    /// City the artifacts were generated for.
    pub city: String,
    /// Initial camera for the map view.
    pub view_state: ViewState,
}

/// Generates all four artifacts for one city into `output_dir`.
///
/// The camera is resolved first so an unsupported city fails before the
/// archive is opened.
///
/// # Errors
///
/// Returns [`GenerateError`] if the city has no registered camera, the
/// archive cannot be loaded, district geometry cannot be merged, or an
/// artifact cannot be written.
pub fn run(archive: &Path, city: &str, output_dir: &Path) -> Result<GenerateSummary, GenerateError> {
    log::info!("Generating map artifacts for {city}");
    let view_state = *CityViewStates::load()?.get(city)?;

    let table = load_record_table(archive)?;

    let start = Instant::now();
    let filtered = table.filter_city(city);
    let rows = group_and_merge(&filtered)?;
    log::info!(
        "  merged {} of {} records into {} district rows in {:.2?}",
        filtered.len(),
        table.len(),
        rows.len(),
        start.elapsed()
    );

    std::fs::create_dir_all(output_dir).map_err(|e| GenerateError::Io {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let start = Instant::now();
    write_layer(
        &output_dir.join(OUTPUT_DISTRICTS_GEOJSON),
        &geojson::district_layer(&rows),
    )?;
    write_layer(
        &output_dir.join(OUTPUT_TOWNS_GEOJSON),
        &geojson::towns_layer(&filtered),
    )?;
    table::write_district_table(&output_dir.join(OUTPUT_DISTRICTS_CSV), &rows)?;
    save_city_metadata(
        output_dir,
        &CityMetadata {
            city: city.to_string(),
            view_state,
        },
    )?;
    log::info!(
        "  wrote artifacts to {} in {:.2?}",
        output_dir.display(),
        start.elapsed()
    );

    Ok(GenerateSummary {
        total_records: table.len(),
        city_records: filtered.len(),
        district_rows: rows.len(),
    })
}

/// Streams one JSON layer to disk.
fn write_layer<T: Serialize>(path: &Path, layer: &T) -> Result<(), GenerateError> {
    let file = File::create(path).map_err(|e| GenerateError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, layer)?;
    writer.flush().map_err(|e| GenerateError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

/// Saves the camera metadata to `city.json`.
fn save_city_metadata(dir: &Path, metadata: &CityMetadata) -> Result<(), GenerateError> {
    let path = dir.join(OUTPUT_CITY_JSON);
    let tmp_path = dir.join("city.json.tmp");
    let contents = serde_json::to_string_pretty(metadata)?;
    std::fs::write(&tmp_path, contents).map_err(|e| GenerateError::Io {
        path: tmp_path.display().to_string(),
        source: e,
    })?;
    std::fs::rename(&tmp_path, &path).map_err(|e| GenerateError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}
