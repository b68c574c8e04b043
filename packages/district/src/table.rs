//! Assembles the district table from grouped, merged records.

use std::collections::BTreeSet;

use jochome_map_district_models::{DISCONNECTION_MARKER, DistrictRow, TOWN_GROUP_DELIMITER};
use jochome_map_gml_models::TownRecord;

use crate::DistrictError;
use crate::color::fill_color;
use crate::key::partition_by_district;
use crate::merge::{BoolOpsUnion, PolygonUnion, merge_rings};

/// Groups city-filtered records into districts and merges each group's
/// polygons, using the default union engine.
///
/// Records whose town name lacks "条" are dropped first; the rest
/// partition into districts. One row is emitted per disjoint merged
/// part, in district key order. A district that falls apart into more
/// than one part gets the disconnection marker appended to its label
/// once, and all of its rows share that label.
///
/// # Errors
///
/// Returns [`DistrictError::UnsupportedGeometry`] if any district's
/// union collapses to an empty geometry.
pub fn group_and_merge(records: &[&TownRecord]) -> Result<Vec<DistrictRow>, DistrictError> {
    group_and_merge_with(&BoolOpsUnion, records)
}

/// Like [`group_and_merge`], with a caller-chosen union engine.
///
/// # Errors
///
/// Returns [`DistrictError::UnsupportedGeometry`] if any district's
/// union collapses to an empty geometry.
pub fn group_and_merge_with(
    engine: &impl PolygonUnion,
    records: &[&TownRecord],
) -> Result<Vec<DistrictRow>, DistrictError> {
    let keyed: Vec<&TownRecord> = records
        .iter()
        .copied()
        .filter(|record| record.town_name.contains(TOWN_GROUP_DELIMITER))
        .collect();
    let groups = partition_by_district(&keyed);

    log::debug!(
        "{} districts from {} of {} records",
        groups.len(),
        keyed.len(),
        records.len()
    );

    let mut rows = Vec::new();
    for (district, members) in groups {
        let Some(first) = members.first() else {
            continue;
        };

        let rings: Vec<_> = members.iter().map(|record| &record.ring).collect();
        let parts = merge_rings(engine, district, &rings)?;

        let color = fill_color(district);
        let city_names = members
            .iter()
            .map(|record| record.city_name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
            .join(",");

        let mut label = district.to_string();
        if parts.len() > 1 {
            label.push_str(DISCONNECTION_MARKER);
        }

        for ring in parts {
            rows.push(DistrictRow {
                prefecture_name: first.prefecture_name.clone(),
                city_names: city_names.clone(),
                label: label.clone(),
                ring,
                fill_color: color,
            });
        }
    }

    Ok(rows)
}
