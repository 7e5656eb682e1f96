//! Core data models for the lookup pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, LookupError};

/// Geographic point (lat/lon), WGS84 decimal degrees.
///
/// Serialized with the long field names the response contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "latitude")]
    pub lat: f64,
    #[serde(rename = "longitude")]
    pub lon: f64,
}

impl GeoPoint {
    /// True when both components are plausible WGS84 degrees.
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// One geocoder hit: the point plus the canonical address the upstream
/// matched, and its property identifier when one was assigned.
#[derive(Debug, Clone)]
pub struct GeocodeMatch {
    pub location: GeoPoint,
    pub matched_address: String,
    pub property_id: Option<i64>,
}

/// District resolved by point-in-polygon containment upstream.
#[derive(Debug, Clone)]
pub struct DistrictInfo {
    pub district_name: String,
}

/// Success payload of one resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupData {
    /// The normalized address the caller searched for, echoed back verbatim.
    pub address: String,
    pub location: GeoPoint,
    pub suburb: String,
    /// Populated from the same district field as `suburb`; the boundary
    /// layer exposes a single district name for both concepts.
    #[serde(rename = "stateElectoralDistrict")]
    pub state_electoral_district: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: ErrorKind,
}

/// The envelope every caller receives: `data` on success, `error` on failure,
/// never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<LookupData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl LookupResponse {
    pub fn ok(data: LookupData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: &LookupError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                message: error.to_string(),
                code: error.kind(),
            }),
        }
    }
}

impl From<Result<LookupData, LookupError>> for LookupResponse {
    fn from(result: Result<LookupData, LookupError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(&e),
        }
    }
}
