#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District grouping, the core transform of the boundary pipeline.
//!
//! Fine-grained town areas (町丁目) are clustered into coarser named
//! districts by the "条" prefix of their names, each cluster's polygons are
//! unioned into minimal disjoint parts, and every district gets a
//! deterministic fill color derived from its name. A district whose merged
//! geometry falls apart into multiple disjoint parts has exclaves, and its
//! display label is flagged accordingly.
//!
//! The whole transform is a pure function of the input records: no state
//! is kept between calls, and identical input yields identical rows.

pub mod color;
pub mod key;
pub mod merge;
pub mod table;

use thiserror::Error;

pub use jochome_map_district_models::{
    DISCONNECTION_MARKER, DistrictRow, FillColor, TOWN_GROUP_DELIMITER,
};
pub use table::{group_and_merge, group_and_merge_with};

/// Errors from the district grouping pipeline.
#[derive(Debug, Error)]
pub enum DistrictError {
    /// Polygon union produced a degenerate empty geometry.
    #[error("Unsupported geometry for district {district}: union produced no polygons")]
    UnsupportedGeometry {
        /// District key whose union collapsed.
        district: String,
    },
}
