use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::geo::Coordinate;
use crate::location::{LocationResult, Place};

use super::state::AppState;

/// Header carrying the client's access token.
pub const TOKEN_HEADER: &str = "x-iss-locator-token";

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /locate ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LocateQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Wire form of a [`LocationResult`]. Place fields appear only when known;
/// `ocean` and the address fields are mutually exclusive.
#[derive(Debug, Serialize)]
pub struct LocateResponse {
    pub lat: f64,
    pub lon: f64,
    pub dist: i64,
    pub units: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocean: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    pub timestamp: i64,
}

impl LocateResponse {
    /// Flatten a [`LocationResult`] into the wire shape.
    pub fn from_result(result: &LocationResult) -> Self {
        let mut response = Self {
            lat: result.position.lat,
            lon: result.position.lon,
            dist: result.distance_miles,
            units: result.units,
            locality: None,
            region: None,
            country: None,
            ocean: None,
            updated_at: format_updated_at(result.generated_at),
            timestamp: result.generated_at.timestamp_millis(),
        };

        match &result.place {
            Place::Address(name) => {
                response.locality = name.locality.clone();
                response.region = name.region.clone();
                response.country = name.country.clone();
            }
            Place::Ocean(name) => response.ocean = Some(name.clone()),
            // Both serialize without place fields; the distinction is kept
            // in LocationResult and in the degraded-enrichment log.
            Place::Unknown | Place::Unavailable => {}
        }

        response
    }
}

fn format_updated_at(t: DateTime<Utc>) -> String {
    format!("{} UTC", t.format("%b %d %H:%M"))
}

pub async fn locate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<LocateQuery>,
) -> Result<Json<LocateResponse>, ApiError> {
    let start = Instant::now();

    let token = headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok());
    if !state.config.is_authorized(token) {
        return Err(api_error(StatusCode::UNAUTHORIZED, "Not authorized."));
    }

    let observer = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
        _ => return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'lat' or 'lng' parameter")),
    };
    if !observer.in_range() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Invalid coordinates. Lat: -90..90, Lng: -180..180",
        ));
    }

    // The upstream clients block; keep them off the async workers.
    let shared = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || shared.resolver.locate(observer))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("resolver task failed: {}", e)))?
        .map_err(|e| api_error(StatusCode::BAD_GATEWAY, format!("{}", e)))?;

    eprintln!(
        "[{}] GET /locate lat={} lng={} -> {} mi ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        observer.lat,
        observer.lon,
        result.distance_miles,
        start.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Json(LocateResponse::from_result(&result)))
}
