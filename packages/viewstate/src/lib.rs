#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-city initial map cameras.
//!
//! The camera registry is baked into the binary at compile time via
//! [`include_str!`]. Supporting a new city means adding its entry to
//! `cities.toml`; no code changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Camera registry embedded at compile time.
const CITIES_TOML: &str = include_str!("../cities.toml");

/// Number of configured cities (used in tests).
#[cfg(test)]
const EXPECTED_CITY_COUNT: usize = 6;

/// Errors from the view-state registry.
#[derive(Debug, Error)]
pub enum ViewStateError {
    /// The embedded registry failed to parse.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// No view state is configured for the requested city.
    #[error("No view state configured for city: {city}")]
    UnknownCity {
        /// City name that was requested.
        city: String,
    },
}

/// One city's initial map camera.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewState {
    /// Camera latitude in degrees.
    pub latitude: f64,
    /// Camera longitude in degrees.
    pub longitude: f64,
    /// deck.gl-style zoom level.
    pub zoom: f64,
}

/// All configured cities' view states, keyed by city name.
#[derive(Debug, Clone, Deserialize)]
pub struct CityViewStates {
    cities: BTreeMap<String, ViewState>,
}

impl CityViewStates {
    /// Parses the embedded registry.
    ///
    /// # Errors
    ///
    /// Returns [`ViewStateError::Toml`] if the embedded TOML is malformed
    /// (which would be a build-time mistake, not a runtime condition).
    pub fn load() -> Result<Self, ViewStateError> {
        Ok(toml::de::from_str(CITIES_TOML)?)
    }

    /// The view state of `city`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewStateError::UnknownCity`] if the city is not
    /// configured.
    pub fn get(&self, city: &str) -> Result<&ViewState, ViewStateError> {
        self.cities
            .get(city)
            .ok_or_else(|| ViewStateError::UnknownCity {
                city: city.to_string(),
            })
    }

    /// Configured city names, sorted.
    #[must_use]
    pub fn city_names(&self) -> Vec<&str> {
        self.cities.keys().map(String::as_str).collect()
    }

    /// Iterates (city name, view state) in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ViewState)> {
        self.cities
            .iter()
            .map(|(name, state)| (name.as_str(), state))
    }
}
