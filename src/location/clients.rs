//! Upstream HTTP clients: ISS tracking API, reverse geocoder, and
//! ocean-name lookup.
//!
//! Each client issues a single GET with a short timeout, parses the JSON
//! body, and maps failures into [`UpstreamError`]. One attempt per call,
//! no retries.

use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;

use super::names::RegionForm;
use super::types::{IssPosition, Upstream, UpstreamError};
use crate::geo::Coordinate;

const USER_AGENT: &str = "IssLocator/0.3 (iss-locator-service)";
const CALL_TIMEOUT: Duration = Duration::from_secs(5);

const POSITION_URL: &str = "http://api.open-notify.org/iss-now.json";
const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const OCEAN_URL: &str = "https://secure.geonames.org/oceanJSON";

/// The geocoder's distinguished "nothing here" status.
const ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Address-component type tags of interest.
pub const TAG_LOCALITY: &str = "locality";
pub const TAG_REGION: &str = "administrative_area_level_1";
pub const TAG_COUNTRY: &str = "country";

// ─── Source traits ──────────────────────────────────────────────

/// Source of the current ISS subpoint.
pub trait PositionSource: Send + Sync {
    fn fetch_current(&self) -> Result<IssPosition, UpstreamError>;
}

/// Reverse geocoder for a coordinate.
pub trait GeocodeSource: Send + Sync {
    fn lookup(&self, point: Coordinate) -> Result<GeocodeOutcome, UpstreamError>;
}

/// Ocean-name lookup for open-water coordinates.
pub trait OceanSource: Send + Sync {
    fn lookup(&self, point: Coordinate) -> Result<Option<String>, UpstreamError>;
}

// ─── ISS position ───────────────────────────────────────────────

#[derive(Deserialize)]
struct PositionBody {
    iss_position: PositionFields,
}

#[derive(Deserialize)]
struct PositionFields {
    // The tracking API reports coordinates as strings.
    latitude: String,
    longitude: String,
}

/// Client for the public ISS tracking API.
pub struct PositionClient;

impl PositionSource for PositionClient {
    fn fetch_current(&self) -> Result<IssPosition, UpstreamError> {
        let response = ureq::get(POSITION_URL)
            .set("User-Agent", USER_AGENT)
            .timeout(CALL_TIMEOUT)
            .call()
            .map_err(|e| network_error(Upstream::Position, e))?;

        let body: PositionBody = response
            .into_json()
            .map_err(|e| invalid_response(Upstream::Position, e))?;

        position_from_body(body)
    }
}

fn position_from_body(body: PositionBody) -> Result<IssPosition, UpstreamError> {
    let lat = parse_position_field(&body.iss_position.latitude, "latitude")?;
    let lon = parse_position_field(&body.iss_position.longitude, "longitude")?;
    Ok(IssPosition {
        coordinate: Coordinate::new(lat, lon),
        observed_at: Utc::now(),
    })
}

fn parse_position_field(raw: &str, field: &str) -> Result<f64, UpstreamError> {
    raw.parse().map_err(|_| UpstreamError::InvalidResponse {
        source: Upstream::Position,
        detail: format!("unparseable {}: '{}'", field, raw),
    })
}

// ─── Reverse geocoding ──────────────────────────────────────────

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
}

/// One geocoder result: an ordered list of labeled address components.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeCandidate {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

/// A labeled piece of a geocoded address, carried in both a full and an
/// abbreviated textual form plus classification tags.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    /// The requested textual form of this component.
    pub fn name(&self, form: RegionForm) -> &str {
        match form {
            RegionForm::Long => &self.long_name,
            RegionForm::Short => &self.short_name,
        }
    }
}

/// Find the first component carrying the given type tag. When several
/// components share a tag, the first listed wins.
pub fn find_component<'a>(
    components: &'a [AddressComponent],
    tag: &str,
) -> Option<&'a AddressComponent> {
    components.iter().find(|c| c.types.iter().any(|t| t == tag))
}

/// Outcome of a reverse-geocode call. `NotFound` is the upstream's explicit
/// zero-results answer for the coordinate — open ocean or unmapped
/// territory — and is not a failure.
#[derive(Debug, Clone)]
pub enum GeocodeOutcome {
    Found(Vec<GeocodeCandidate>),
    NotFound,
}

/// Client for the reverse-geocoding API.
pub struct ReverseGeocodeClient {
    api_key: String,
}

impl ReverseGeocodeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into() }
    }
}

impl GeocodeSource for ReverseGeocodeClient {
    fn lookup(&self, point: Coordinate) -> Result<GeocodeOutcome, UpstreamError> {
        let url = format!(
            "{}?result_type=country|locality|administrative_area_level_1|natural_feature\
             &language=en_GB&latlng={},{}&key={}",
            GEOCODE_URL, point.lat, point.lon, self.api_key,
        );

        let response = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .timeout(CALL_TIMEOUT)
            .call()
            .map_err(|e| network_error(Upstream::Geocoder, e))?;

        let body: GeocodeResponse = response
            .into_json()
            .map_err(|e| invalid_response(Upstream::Geocoder, e))?;

        outcome_from_geocode(body)
    }
}

fn outcome_from_geocode(body: GeocodeResponse) -> Result<GeocodeOutcome, UpstreamError> {
    if body.status == ZERO_RESULTS {
        return Ok(GeocodeOutcome::NotFound);
    }
    if body.status != "OK" {
        return Err(UpstreamError::InvalidResponse {
            source: Upstream::Geocoder,
            detail: format!("status {}", body.status),
        });
    }
    if body.results.is_empty() {
        return Err(UpstreamError::InvalidResponse {
            source: Upstream::Geocoder,
            detail: "status OK with no results".into(),
        });
    }
    Ok(GeocodeOutcome::Found(body.results))
}

// ─── Ocean-name lookup ──────────────────────────────────────────

#[derive(Deserialize)]
struct OceanBody {
    #[serde(default)]
    ocean: Option<OceanFields>,
}

#[derive(Deserialize)]
struct OceanFields {
    name: String,
}

/// Client for the ocean-name lookup API.
pub struct OceanNameClient {
    username: String,
}

impl OceanNameClient {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into() }
    }
}

impl OceanSource for OceanNameClient {
    fn lookup(&self, point: Coordinate) -> Result<Option<String>, UpstreamError> {
        let url = format!(
            "{}?lat={}&lng={}&username={}",
            OCEAN_URL, point.lat, point.lon, self.username,
        );

        let response = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .timeout(CALL_TIMEOUT)
            .call()
            .map_err(|e| network_error(Upstream::OceanLookup, e))?;

        let body: OceanBody = response
            .into_json()
            .map_err(|e| invalid_response(Upstream::OceanLookup, e))?;

        Ok(body.ocean.map(|o| o.name))
    }
}

// ─── Error mapping ──────────────────────────────────────────────

fn network_error(source: Upstream, err: ureq::Error) -> UpstreamError {
    UpstreamError::Network { source, detail: err.to_string() }
}

fn invalid_response(source: Upstream, err: std::io::Error) -> UpstreamError {
    UpstreamError::InvalidResponse { source, detail: err.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_body_parses() {
        let body: PositionBody = serde_json::from_str(
            r#"{"iss_position": {"latitude": "10.0", "longitude": "20.0"}, "message": "success"}"#,
        )
        .unwrap();
        let position = position_from_body(body).unwrap();
        assert_eq!(position.coordinate, Coordinate::new(10.0, 20.0));
    }

    #[test]
    fn test_position_body_missing_field() {
        let parsed = serde_json::from_str::<PositionBody>(
            r#"{"iss_position": {"latitude": "10.0"}}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_position_body_unparseable_latitude() {
        let body: PositionBody = serde_json::from_str(
            r#"{"iss_position": {"latitude": "north", "longitude": "20.0"}}"#,
        )
        .unwrap();
        let err = position_from_body(body).unwrap_err();
        assert_eq!(err.source(), Upstream::Position);
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_geocode_zero_results_is_not_found() {
        let body: GeocodeResponse =
            serde_json::from_str(r#"{"status": "ZERO_RESULTS", "results": []}"#).unwrap();
        assert!(matches!(outcome_from_geocode(body), Ok(GeocodeOutcome::NotFound)));
    }

    #[test]
    fn test_geocode_ok_yields_candidates() {
        let body: GeocodeResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "results": [{
                    "address_components": [
                        {"long_name": "Japan", "short_name": "JP", "types": ["country", "political"]}
                    ]
                }]
            }"#,
        )
        .unwrap();
        match outcome_from_geocode(body).unwrap() {
            GeocodeOutcome::Found(candidates) => {
                assert_eq!(candidates.len(), 1);
                assert_eq!(candidates[0].address_components[0].long_name, "Japan");
            }
            GeocodeOutcome::NotFound => panic!("expected Found"),
        }
    }

    #[test]
    fn test_geocode_denied_status_is_error() {
        let body: GeocodeResponse =
            serde_json::from_str(r#"{"status": "REQUEST_DENIED"}"#).unwrap();
        let err = outcome_from_geocode(body).unwrap_err();
        assert_eq!(err.source(), Upstream::Geocoder);
    }

    #[test]
    fn test_geocode_ok_without_results_is_error() {
        let body: GeocodeResponse =
            serde_json::from_str(r#"{"status": "OK", "results": []}"#).unwrap();
        assert!(outcome_from_geocode(body).is_err());
    }

    #[test]
    fn test_ocean_body_with_name() {
        let body: OceanBody =
            serde_json::from_str(r#"{"ocean": {"name": "Pacific Ocean", "distance": "0"}}"#)
                .unwrap();
        assert_eq!(body.ocean.map(|o| o.name).as_deref(), Some("Pacific Ocean"));
    }

    #[test]
    fn test_ocean_body_empty() {
        let body: OceanBody = serde_json::from_str("{}").unwrap();
        assert!(body.ocean.is_none());
    }

    fn component(long: &str, short: &str, tags: &[&str]) -> AddressComponent {
        AddressComponent {
            long_name: long.into(),
            short_name: short.into(),
            types: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_find_component_by_tag() {
        let components = vec![
            component("Mountain View", "Mountain View", &[TAG_LOCALITY, "political"]),
            component("California", "CA", &[TAG_REGION, "political"]),
        ];
        let region = find_component(&components, TAG_REGION).unwrap();
        assert_eq!(region.long_name, "California");
        assert!(find_component(&components, TAG_COUNTRY).is_none());
    }

    #[test]
    fn test_find_component_first_match_wins() {
        let components = vec![
            component("First", "1st", &[TAG_REGION]),
            component("Second", "2nd", &[TAG_REGION]),
        ];
        assert_eq!(find_component(&components, TAG_REGION).unwrap().long_name, "First");
    }

    #[test]
    fn test_component_forms() {
        let c = component("California", "CA", &[TAG_REGION]);
        assert_eq!(c.name(RegionForm::Long), "California");
        assert_eq!(c.name(RegionForm::Short), "CA");
    }
}
