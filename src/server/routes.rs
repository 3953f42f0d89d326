//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::PointQuery;
use crate::error::Error;
use crate::geo::{Found, GeocodeOptions, ReverseOptions};
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/geocode", get(geocode_handler))
        .route("/api/reverse", get(reverse_handler))
        .route("/api/timezone", get(timezone_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            Error::Query(_) => (StatusCode::BAD_REQUEST, "QUERY_ERROR"),
            Error::InsufficientPrivileges(_) => (StatusCode::FORBIDDEN, "INSUFFICIENT_PRIVILEGES"),
            Error::Service(_) => (StatusCode::BAD_GATEWAY, "SERVICE_ERROR"),
            Error::Parse(_) => (StatusCode::BAD_GATEWAY, "PARSE_ERROR"),
            Error::TimedOut(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMED_OUT"),
            Error::Unavailable(_) => (StatusCode::BAD_GATEWAY, "UNAVAILABLE"),
            Error::AuthenticationFailure(_) => (StatusCode::BAD_GATEWAY, "AUTHENTICATION_FAILURE"),
            Error::QuotaExceeded(_) => (StatusCode::BAD_GATEWAY, "QUOTA_EXCEEDED"),
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
            status,
        }
    }
}

/// Run a geocoder call on the blocking thread pool
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError {
            error: format!("Lookup task failed: {}", e),
            code: "INTERNAL_ERROR".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        })?
        .map_err(ApiError::from)
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Search endpoint the server talks to
    pub endpoint: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoint: state.geocoder.api().to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Geocode query parameters
#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    /// Address or place name
    pub q: String,
    /// Return every match instead of the best one
    #[serde(default)]
    pub all: bool,
}

/// Geocode endpoint
///
/// GET /api/geocode?q=Berlin&all=false
async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<Option<Found>>, ApiError> {
    let geocoder = state.geocoder.clone();
    let options = GeocodeOptions {
        exactly_one: !params.all,
        timeout: None,
    };

    let found = run_blocking(move || geocoder.geocode(&params.q, &options)).await?;
    Ok(Json(found))
}

/// Reverse query parameters
#[derive(Debug, Deserialize)]
pub struct ReverseParams {
    /// Point as "lat, lng"
    pub point: String,
    pub exactly_one: Option<bool>,
    pub feature_code: Option<String>,
    pub lang: Option<String>,
    pub nearby_type: Option<String>,
}

/// Reverse geocode endpoint
///
/// GET /api/reverse?point=52.5,13.41&exactly_one=true
async fn reverse_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseParams>,
) -> Result<Json<Option<Found>>, ApiError> {
    let geocoder = state.geocoder.clone();
    let mut options = ReverseOptions {
        exactly_one: params.exactly_one,
        timeout: None,
        feature_code: params.feature_code,
        lang: params.lang,
        ..Default::default()
    };
    if let Some(nearby_type) = params.nearby_type {
        options.find_nearby_type = nearby_type;
    }

    let point = PointQuery::Text(params.point);
    let found = run_blocking(move || geocoder.reverse(point, &options)).await?;
    Ok(Json(found))
}

/// Timezone query parameters
#[derive(Debug, Deserialize)]
pub struct TimezoneParams {
    /// Point as "lat, lng"
    pub point: String,
}

/// Timezone response
#[derive(Debug, Serialize, Deserialize)]
pub struct TimezoneResponse {
    /// IANA timezone identifier
    pub id: String,
    /// Current offset from UTC in seconds
    pub utc_offset_secs: i32,
    /// Raw service response
    pub raw: serde_json::Value,
}

/// Timezone endpoint
///
/// GET /api/timezone?point=40.75,-73.98
async fn timezone_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TimezoneParams>,
) -> Result<Json<TimezoneResponse>, ApiError> {
    let geocoder = state.geocoder.clone();
    let point = PointQuery::Text(params.point);

    let timezone = run_blocking(move || geocoder.reverse_timezone(point, None)).await?;
    Ok(Json(TimezoneResponse {
        id: timezone.id().to_string(),
        utc_offset_secs: timezone.utc_offset().local_minus_utc(),
        raw: timezone.raw().clone(),
    }))
}
