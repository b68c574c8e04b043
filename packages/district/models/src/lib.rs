#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Output types of the district grouping pipeline.
//!
//! A [`DistrictRow`] is one merged part of one district group, ready for
//! rendering: label, aggregated city names, boundary ring, and fill color.

use jochome_map_gml_models::LonLatRing;
use serde::{Deserialize, Serialize};

/// Character that closes a district prefix in a town name
/// ("北1条西2丁目" → district "北1条").
pub const TOWN_GROUP_DELIMITER: char = '条';

/// Suffix appended to the label of a district whose merged geometry is
/// disconnected.
pub const DISCONNECTION_MARKER: &str = " (飛び地あり)";

/// An RGBA fill color for a rendered polygon layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl FillColor {
    /// Fixed color of the unmerged all-towns layer.
    pub const ALL_TOWNS: Self = Self::new(0, 0, 0, 64);

    /// Alpha applied to every derived district color.
    pub const GROUP_ALPHA: u8 = 128;

    /// Creates a color from its four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The color as an `[r, g, b, a]` array, the shape deck.gl-style
    /// renderers read from feature properties.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// One row of the district table: a single merged part of one district.
///
/// A disconnected district emits one row per disjoint part; those rows
/// share the same label, city names, and fill color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictRow {
    /// Prefecture name shared by the district's member records.
    pub prefecture_name: String,
    /// Deduplicated, comma-joined city names of the member records.
    pub city_names: String,
    /// District display name; carries [`DISCONNECTION_MARKER`] when the
    /// merged geometry has more than one part.
    pub label: String,
    /// Boundary of this part in (longitude, latitude) order, closed.
    pub ring: LonLatRing,
    /// Fill color derived from the district key.
    pub fill_color: FillColor,
}
