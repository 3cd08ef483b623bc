//! ISS location subsystem.
//!
//! Upstream clients for position, reverse geocoding, and ocean-name lookup;
//! country-name normalization; and the request-scoped resolver that ties
//! them into one result.

pub mod clients;
pub mod names;
pub mod resolver;
pub mod types;

pub use clients::{GeocodeOutcome, OceanNameClient, PositionClient, ReverseGeocodeClient};
pub use names::{CountryNames, RegionForm};
pub use resolver::{LocationResolver, ServiceResolver};
pub use types::{IssPosition, LocationResult, Place, PlaceName, Upstream, UpstreamError};
