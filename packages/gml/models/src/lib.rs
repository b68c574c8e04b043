#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Town-boundary record types parsed from the e-Stat census GML distribution.
//!
//! A [`TownRecord`] is one `gml:featureMember`: the administrative names of a
//! fine-grained town area (町丁目) and its polygon boundary. A [`RecordTable`]
//! is the full dataset in document order; downstream grouping operates on a
//! city-filtered view of it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A polygon boundary as (longitude, latitude) pairs in ring order.
///
/// The first point is not required to repeat at the end.
pub type LonLatRing = Vec<(f64, f64)>;

/// One parsed boundary feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TownRecord {
    /// Prefecture name (e.g. "北海道").
    pub prefecture_name: String,
    /// City or ward name (e.g. "札幌市中央区").
    pub city_name: String,
    /// Fine-grained town name (e.g. "北一条西2丁目").
    pub town_name: String,
    /// Display address: city and town names joined with a space.
    pub address: String,
    /// Boundary ring in (longitude, latitude) order.
    pub ring: LonLatRing,
}

impl TownRecord {
    /// Builds a record, deriving the display address from the city and town
    /// names.
    #[must_use]
    pub fn new(
        prefecture_name: String,
        city_name: String,
        town_name: String,
        ring: LonLatRing,
    ) -> Self {
        let address = format!("{city_name} {town_name}");
        Self {
            prefecture_name,
            city_name,
            town_name,
            address,
            ring,
        }
    }
}

/// All parsed records, in document order.
///
/// Grown only during parsing; read-only afterward. Duplicate names are valid
/// (a town split across multiple polygons appears once per polygon).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTable {
    records: Vec<TownRecord>,
}

impl RecordTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a parsed record.
    pub fn push(&mut self, record: TownRecord) {
        self.records.push(record);
    }

    /// Number of records in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in document order.
    #[must_use]
    pub fn records(&self) -> &[TownRecord] {
        &self.records
    }

    /// Records whose city name contains `city`, in document order.
    ///
    /// Substring match, so "札幌市" selects every ward of the city.
    #[must_use]
    pub fn filter_city(&self, city: &str) -> Vec<&TownRecord> {
        self.records
            .iter()
            .filter(|record| record.city_name.contains(city))
            .collect()
    }

    /// Record counts keyed by city name, in sorted name order.
    #[must_use]
    pub fn city_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.city_name.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

impl From<Vec<TownRecord>> for RecordTable {
    fn from(records: Vec<TownRecord>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, town: &str) -> TownRecord {
        TownRecord::new(
            "北海道".to_string(),
            city.to_string(),
            town.to_string(),
            vec![(141.0, 43.0), (141.1, 43.0), (141.1, 43.1)],
        )
    }

    #[test]
    fn address_joins_city_and_town_with_space() {
        let rec = record("札幌市中央区", "北一条西2丁目");
        assert_eq!(rec.address, "札幌市中央区 北一条西2丁目");
    }

    #[test]
    fn filter_city_matches_substring_across_wards() {
        let table = RecordTable::from(vec![
            record("札幌市中央区", "北一条西2丁目"),
            record("旭川市", "1条通1丁目"),
            record("札幌市北区", "北三十条西1丁目"),
        ]);

        let filtered = table.filter_city("札幌市");
        assert_eq!(filtered.len(), 2);
        assert!(
            filtered
                .iter()
                .all(|record| record.city_name.contains("札幌市"))
        );
    }

    #[test]
    fn filter_city_preserves_document_order() {
        let table = RecordTable::from(vec![
            record("札幌市北区", "北三十条西1丁目"),
            record("札幌市中央区", "北一条西2丁目"),
        ]);

        let filtered = table.filter_city("札幌市");
        assert_eq!(filtered[0].town_name, "北三十条西1丁目");
        assert_eq!(filtered[1].town_name, "北一条西2丁目");
    }

    #[test]
    fn city_counts_tally_per_city() {
        let table = RecordTable::from(vec![
            record("札幌市中央区", "北一条西2丁目"),
            record("札幌市中央区", "北一条西3丁目"),
            record("旭川市", "1条通1丁目"),
        ]);

        let counts = table.city_counts();
        assert_eq!(counts.get("札幌市中央区"), Some(&2));
        assert_eq!(counts.get("旭川市"), Some(&1));
    }
}
