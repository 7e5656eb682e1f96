//! HTTP API over the resolver.
//!
//! Kept out of the server binary so the router can be exercised in tests
//! without binding a socket.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::address::first_address_value;
use crate::error::ErrorKind;
use crate::models::LookupResponse;
use crate::resolver::AddressResolver;

/// Build the application router.
pub fn router(resolver: Arc<AddressResolver>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/lookup", get(lookup_handler))
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(resolver)
}

/// HTTP status for each error kind; success is always 200.
fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MissingAddress | ErrorKind::InvalidAddressFormat => StatusCode::BAD_REQUEST,
        ErrorKind::AddressNotFound => StatusCode::NOT_FOUND,
        ErrorKind::NetworkError => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::GeocodingApiError | ErrorKind::BoundariesApiError | ErrorKind::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn index_handler() -> &'static str {
    "Lookup an address by adding the address query parameter to /lookup, \
     e.g. /lookup?address=346 panorama avenue bathurst"
}

/// `GET /lookup?address=<text>`
///
/// A repeated `address` parameter is tolerated: the first value that is
/// non-empty after trimming wins.
async fn lookup_handler(
    State(resolver): State<Arc<AddressResolver>>,
    Query(params): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<LookupResponse>) {
    let raw = first_address_value(
        params
            .iter()
            .filter(|(key, _)| key == "address")
            .map(|(_, value)| value.as_str()),
    )
    .unwrap_or("");

    let response = resolver.lookup(raw).await;
    let status = match &response.error {
        None => StatusCode::OK,
        Some(error) => status_for(error.code),
    };

    (status, Json(response))
}

/// Unknown routes get the same envelope shape with a presentation-only code.
async fn not_found_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": {
                "message": "Route not found",
                "code": "ROUTE_NOT_FOUND"
            }
        })),
    )
}
