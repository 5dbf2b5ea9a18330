//! Core domain types for Lumen.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application.

mod events;
pub use events::{EventRow, EventTable};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Coordinate
// ============================================================================

/// A validated (latitude, longitude) pair.
///
/// Latitude is bounded to [-90, 90] and longitude to [-180, 180]; NaN and
/// infinities fail the bounds check, so a constructed `Coordinate` is always
/// finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Renders as `lat,lng`, the form the places API expects in its `location`
/// query parameter.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = CoordinateError;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

// ============================================================================
// PlaceKind
// ============================================================================

/// The fixed set of landmark categories offered by the dashboard.
///
/// The serialized form of each variant is the place-type tag the search
/// provider recognizes (`shopping_mall`, `movie_theater`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceKind {
    #[default]
    School,
    Hospital,
    Restaurant,
    Park,
    Airport,
    Gym,
    ShoppingMall,
    MovieTheater,
    Lodging,
    Museum,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown landmark category '{0}'")]
pub struct PlaceKindParseError(String);

impl PlaceKind {
    /// The provider-facing place-type tag. Never empty.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PlaceKind::School => "school",
            PlaceKind::Hospital => "hospital",
            PlaceKind::Restaurant => "restaurant",
            PlaceKind::Park => "park",
            PlaceKind::Airport => "airport",
            PlaceKind::Gym => "gym",
            PlaceKind::ShoppingMall => "shopping_mall",
            PlaceKind::MovieTheater => "movie_theater",
            PlaceKind::Lodging => "lodging",
            PlaceKind::Museum => "museum",
        }
    }

    /// Human-facing label used in the sidebar and in spoken announcements.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            PlaceKind::School => "school",
            PlaceKind::Hospital => "hospital",
            PlaceKind::Restaurant => "restaurant",
            PlaceKind::Park => "park",
            PlaceKind::Airport => "airport",
            PlaceKind::Gym => "gym",
            PlaceKind::ShoppingMall => "shopping mall",
            PlaceKind::MovieTheater => "movie theater",
            PlaceKind::Lodging => "lodging",
            PlaceKind::Museum => "museum",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, PlaceKindParseError> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| PlaceKindParseError(raw.to_string()))
    }

    #[must_use]
    pub const fn all() -> &'static [PlaceKind] {
        &[
            PlaceKind::School,
            PlaceKind::Hospital,
            PlaceKind::Restaurant,
            PlaceKind::Park,
            PlaceKind::Airport,
            PlaceKind::Gym,
            PlaceKind::ShoppingMall,
            PlaceKind::MovieTheater,
            PlaceKind::Lodging,
            PlaceKind::Museum,
        ]
    }
}

impl fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Landmark
// ============================================================================

/// A resolved point of interest. Present only when the search provider
/// returned at least one match within the search radius.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
}

impl Landmark {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// ============================================================================
// ApiKey
// ============================================================================

/// Search-provider credential.
///
/// The secret is never printed: `Debug` masks it and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("API key must not be empty")]
pub struct EmptyKeyError;

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyKeyError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyKeyError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}
