//! Core types for the ISS location pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::geo::Coordinate;

/// Unit tag carried by every result. Distances are reported in miles.
pub const DISTANCE_UNITS: &str = "mi";

/// Which upstream service produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Position,
    Geocoder,
    OceanLookup,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position => write!(f, "ISS position API"),
            Self::Geocoder => write!(f, "reverse geocoder"),
            Self::OceanLookup => write!(f, "ocean-name lookup"),
        }
    }
}

/// Failure talking to a single upstream service. One attempt, no retries.
#[derive(Debug)]
pub enum UpstreamError {
    Network { source: Upstream, detail: String },
    InvalidResponse { source: Upstream, detail: String },
}

impl UpstreamError {
    /// Identity of the upstream that failed.
    pub fn source(&self) -> Upstream {
        match self {
            Self::Network { source, .. } | Self::InvalidResponse { source, .. } => *source,
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { source, detail } => {
                write!(f, "{} unreachable: {}", source, detail)
            }
            Self::InvalidResponse { source, detail } => {
                write!(f, "{} returned an invalid response: {}", source, detail)
            }
        }
    }
}

impl std::error::Error for UpstreamError {}

/// The ISS subpoint at the moment it was fetched. Never cached.
#[derive(Debug, Clone, Copy)]
pub struct IssPosition {
    pub coordinate: Coordinate,
    pub observed_at: DateTime<Utc>,
}

/// Human-readable description of a geocoded subpoint. The geocoder may know
/// any subset of the three fields; absent ones stay `None` and are omitted
/// from serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaceName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl PlaceName {
    pub fn is_empty(&self) -> bool {
        self.locality.is_none() && self.region.is_none() && self.country.is_none()
    }
}

/// Terminal outcome of the place-enrichment stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    /// The subpoint reverse-geocoded to a named place on land.
    Address(PlaceName),
    /// Open water with a known ocean name.
    Ocean(String),
    /// Neither the geocoder nor the ocean lookup knew the spot.
    Unknown,
    /// The geocoder failed outright; place data could not be determined.
    Unavailable,
}

/// The assembled answer for one request. Built once at the end of the
/// pipeline, never mutated, discarded after serialization.
#[derive(Debug, Clone)]
pub struct LocationResult {
    /// The ISS subpoint.
    pub position: Coordinate,
    /// Observer-to-subpoint great-circle distance, rounded to whole miles.
    pub distance_miles: i64,
    pub units: &'static str,
    pub place: Place,
    pub generated_at: DateTime<Utc>,
}
