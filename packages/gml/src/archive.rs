//! Zip access for the boundary distribution.
//!
//! e-Stat ships each city's boundary dataset as a zip holding one GML
//! document (plus auxiliary metadata entries). The document is parsed
//! straight out of the archive; nothing is extracted to disk.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use jochome_map_gml_models::RecordTable;
use zip::ZipArchive;

use crate::{GmlError, parse_gml};

/// Extension identifying the boundary document inside the zip.
const GML_EXTENSION: &str = ".gml";

/// Opens the distribution zip at `path` and parses its first `.gml` entry
/// into a [`RecordTable`].
///
/// # Errors
///
/// Returns [`GmlError::Io`] if the archive cannot be opened,
/// [`GmlError::Zip`] if it is not a readable zip,
/// [`GmlError::MissingGmlEntry`] if no entry has the `.gml` extension, and
/// any parse error from [`parse_gml`] otherwise.
pub fn load_record_table(path: &Path) -> Result<RecordTable, GmlError> {
    log::info!("Loading boundary archive {}", path.display());

    let file = File::open(path).map_err(|e| GmlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let entry_name = archive
        .file_names()
        .find(|name| name.ends_with(GML_EXTENSION))
        .map(ToString::to_string)
        .ok_or_else(|| GmlError::MissingGmlEntry {
            archive: path.display().to_string(),
        })?;

    log::info!("  parsing entry {entry_name}");
    let started = Instant::now();

    let entry = archive.by_name(&entry_name)?;
    let table = parse_gml(BufReader::new(entry))?;

    log::info!(
        "  parsed {} records in {:.2?}",
        table.len(),
        started.elapsed()
    );

    Ok(table)
}
