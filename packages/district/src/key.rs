//! District keys from the "条" naming convention.
//!
//! Hokkaidō grid addressing names town areas like "北1条西2丁目": row
//! (条) then block (丁目). Truncating a town name right after its first
//! "条" yields the district it belongs to, so "北1条西2丁目" and
//! "北1条西3丁目" both land in "北1条".

use std::collections::BTreeMap;

use jochome_map_district_models::TOWN_GROUP_DELIMITER;
use jochome_map_gml_models::TownRecord;

/// The district key of a town name: the prefix up to and including the
/// first "条", or `None` when the name has no delimiter.
#[must_use]
pub fn district_key(town_name: &str) -> Option<&str> {
    town_name
        .find(TOWN_GROUP_DELIMITER)
        .map(|at| &town_name[..at + TOWN_GROUP_DELIMITER.len_utf8()])
}

/// Partitions records by district key.
///
/// Insertion-stable: within a group, member order equals the records'
/// relative input order. Keys iterate in lexicographic order. Records
/// whose town name lacks the delimiter (the caller is expected to have
/// filtered those out) are skipped.
#[must_use]
pub fn partition_by_district<'a>(
    records: &[&'a TownRecord],
) -> BTreeMap<&'a str, Vec<&'a TownRecord>> {
    let mut groups: BTreeMap<&str, Vec<&TownRecord>> = BTreeMap::new();
    for record in records {
        if let Some(key) = district_key(&record.town_name) {
            groups.entry(key).or_default().push(record);
        }
    }
    groups
}
