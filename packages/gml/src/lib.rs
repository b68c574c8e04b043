#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary dataset ingestion.
//!
//! The e-Stat census boundary distribution is a zip holding one JPGIS GML
//! document. [`archive::load_record_table`] opens the zip, locates the
//! document, and streams it through [`parse_gml`] into a [`RecordTable`].
//! Parsing is strict: the load aborts on the first feature with a missing
//! name field or an unusable coordinate list.

pub mod archive;
pub mod parse;

use thiserror::Error;

pub use archive::load_record_table;
pub use jochome_map_gml_models::{LonLatRing, RecordTable, TownRecord};
pub use parse::parse_gml;

/// Errors from loading or parsing the boundary dataset.
#[derive(Debug, Error)]
pub enum GmlError {
    /// File system access failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The distribution zip could not be read.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The GML document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The archive holds no `.gml` entry.
    #[error("No .gml entry in archive: {archive}")]
    MissingGmlEntry {
        /// Path of the archive that was searched.
        archive: String,
    },

    /// A feature record is missing a required field or carries an invalid
    /// coordinate list.
    #[error("Malformed featureMember {feature}: {reason}")]
    MalformedRecord {
        /// Town name of the offending feature, or its 1-based position when
        /// the name itself is missing.
        feature: String,
        /// What made the feature unusable.
        reason: String,
    },
}
