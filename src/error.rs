//! Error taxonomy for the lookup pipeline.
//!
//! Every failure a caller can observe is one of these variants; the wire
//! `code` is the [`ErrorKind`] the variant maps to. Network-layer failures
//! (timeout, refused connection) are classified separately from
//! valid-transport-but-bad-response failures, which carry the kind of the
//! stage that produced them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable error code returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    MissingAddress,
    InvalidAddressFormat,
    AddressNotFound,
    GeocodingApiError,
    BoundariesApiError,
    NetworkError,
    InternalError,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Address is required")]
    MissingAddress,

    #[error("Address must be at least 3 characters long.")]
    AddressTooShort,

    #[error("Address cannot exceed 200 characters.")]
    AddressTooLong,

    #[error("Address not found")]
    AddressNotFound,

    /// Geocoder reachable but returned a bad status or an unusable body.
    #[error("Geocoding API failed: {0}")]
    Geocoding(String),

    /// Boundary service reachable but returned a bad status or an unusable body.
    #[error("Boundaries API failed: {0}")]
    Boundaries(String),

    /// The geocoded point fell inside no district polygon.
    #[error("Unable to retrieve suburb information")]
    DistrictNotFound,

    #[error("Request timeout")]
    Timeout,

    #[error("Network connection error")]
    Connection,

    #[error("An unexpected error occurred")]
    Internal,
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::MissingAddress => ErrorKind::MissingAddress,
            LookupError::AddressTooShort | LookupError::AddressTooLong => {
                ErrorKind::InvalidAddressFormat
            }
            LookupError::AddressNotFound => ErrorKind::AddressNotFound,
            LookupError::Geocoding(_) => ErrorKind::GeocodingApiError,
            LookupError::Boundaries(_) | LookupError::DistrictNotFound => {
                ErrorKind::BoundariesApiError
            }
            LookupError::Timeout | LookupError::Connection => ErrorKind::NetworkError,
            LookupError::Internal => ErrorKind::InternalError,
        }
    }
}
