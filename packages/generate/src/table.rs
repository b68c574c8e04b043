//! District table output.

use std::path::Path;

use jochome_map_district_models::DistrictRow;
use serde::Serialize;

use crate::GenerateError;

/// One line of the district table.
#[derive(Debug, Serialize)]
struct TableRow<'a> {
    prefecture_name: &'a str,
    city_name: &'a str,
    town_group: &'a str,
}

/// Writes the district table, one row per disjoint part.
///
/// # Errors
///
/// Returns [`GenerateError`] if the file cannot be created or a row
/// cannot be written.
pub fn write_district_table(path: &Path, rows: &[DistrictRow]) -> Result<(), GenerateError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(TableRow {
            prefecture_name: &row.prefecture_name,
            city_name: &row.city_names,
            town_group: &row.label,
        })?;
    }
    writer.flush().map_err(|e| GenerateError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}
