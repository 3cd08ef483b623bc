//! ISS Locator — answers "where is the ISS right now, relative to me?"
//!
//! Fetches the station's current subpoint from a public tracking API,
//! computes the great-circle distance to an observer, and names the spot
//! below the station via reverse geocoding, falling back to an ocean name
//! over open water.

pub mod config;
pub mod geo;
pub mod location;
pub mod server;
