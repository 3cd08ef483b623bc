//! Location resolver — orchestrates the pipeline.
//!
//! Flow: ISS position (fatal on failure) → great-circle distance →
//! reverse geocode → ocean-name fallback. Enrichment failures degrade the
//! result to position and distance instead of failing the request.

use chrono::Utc;

use super::clients::{
    find_component, GeocodeCandidate, GeocodeOutcome, GeocodeSource, OceanNameClient, OceanSource,
    PositionClient, PositionSource, ReverseGeocodeClient, TAG_COUNTRY, TAG_LOCALITY, TAG_REGION,
};
use super::names::CountryNames;
use super::types::{LocationResult, Place, PlaceName, UpstreamError, DISTANCE_UNITS};
use crate::config::Config;
use crate::geo::{self, Coordinate, Unit};

/// The resolver, generic over its three upstream sources so the pipeline
/// can be exercised with in-memory fakes.
pub struct LocationResolver<P, G, O> {
    position: P,
    geocoder: G,
    ocean: O,
    names: CountryNames,
}

/// The production resolver, wired to the real upstream services.
pub type ServiceResolver = LocationResolver<PositionClient, ReverseGeocodeClient, OceanNameClient>;

impl ServiceResolver {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            PositionClient,
            ReverseGeocodeClient::new(&config.geocoder_api_key),
            OceanNameClient::new(&config.geonames_user),
            CountryNames::standard(),
        )
    }
}

impl<P, G, O> LocationResolver<P, G, O>
where
    P: PositionSource,
    G: GeocodeSource,
    O: OceanSource,
{
    pub fn new(position: P, geocoder: G, ocean: O, names: CountryNames) -> Self {
        Self { position, geocoder, ocean, names }
    }

    /// Resolve the current ISS location relative to `observer`.
    ///
    /// A position-fetch failure is fatal — there is no result without it.
    /// Everything downstream is enrichment and degrades gracefully.
    pub fn locate(&self, observer: Coordinate) -> Result<LocationResult, UpstreamError> {
        let position = self.position.fetch_current()?;
        let distance_miles =
            geo::distance(observer, position.coordinate, Unit::Miles).round() as i64;

        let place = self.resolve_place(position.coordinate);

        Ok(LocationResult {
            position: position.coordinate,
            distance_miles,
            units: DISTANCE_UNITS,
            place,
            generated_at: Utc::now(),
        })
    }

    fn resolve_place(&self, subpoint: Coordinate) -> Place {
        match self.geocoder.lookup(subpoint) {
            Ok(GeocodeOutcome::Found(candidates)) => self.place_from_candidates(&candidates),
            Ok(GeocodeOutcome::NotFound) => self.ocean_fallback(subpoint),
            Err(e) => {
                log_degraded(&e);
                Place::Unavailable
            }
        }
    }

    /// Best-effort: a dead ocean service never fails the request.
    fn ocean_fallback(&self, subpoint: Coordinate) -> Place {
        match self.ocean.lookup(subpoint) {
            Ok(Some(name)) => Place::Ocean(name),
            Ok(None) => Place::Unknown,
            Err(e) => {
                log_degraded(&e);
                Place::Unknown
            }
        }
    }

    fn place_from_candidates(&self, candidates: &[GeocodeCandidate]) -> Place {
        let components = match candidates.first() {
            Some(candidate) => &candidate.address_components,
            None => return Place::Unknown,
        };

        let locality = find_component(components, TAG_LOCALITY).map(|c| c.long_name.clone());
        let country = find_component(components, TAG_COUNTRY)
            .map(|c| self.names.format_country(&c.long_name).to_string());

        let form = self.names.region_form(country.as_deref(), locality.is_some());
        let region = find_component(components, TAG_REGION).map(|c| c.name(form).to_string());

        let place = PlaceName { locality, region, country };
        if place.is_empty() {
            Place::Unknown
        } else {
            Place::Address(place)
        }
    }
}

fn log_degraded(err: &UpstreamError) {
    eprintln!(
        "[{}] degraded enrichment: {}",
        Utc::now().format("%H:%M:%S"),
        err,
    );
}
