//! Resolution orchestrator: normalize, geocode, resolve boundary, assemble.
//!
//! The pipeline is strictly linear; the boundary call needs the geocoder's
//! point, so the two upstream requests are never issued concurrently. Holds
//! no per-request state, so one resolver behind an `Arc` serves any number
//! of concurrent requests.

use std::panic::AssertUnwindSafe;

use anyhow::Result;
use futures::FutureExt;
use tracing::{error, info, warn};

use crate::address::NormalizedAddress;
use crate::boundaries::BoundariesClient;
use crate::config::Config;
use crate::error::LookupError;
use crate::geocoding::GeocodingClient;
use crate::models::{LookupData, LookupResponse};

pub struct AddressResolver {
    geocoding: GeocodingClient,
    boundaries: BoundariesClient,
}

impl AddressResolver {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            geocoding: GeocodingClient::new(config)?,
            boundaries: BoundariesClient::new(config)?,
        })
    }

    /// Run one full resolution and shape the outcome into the response
    /// envelope. This is the single boundary where anything unexpected
    /// escaping the pipeline is converted into a typed INTERNAL_ERROR
    /// failure; callers never observe an unwind.
    pub async fn lookup(&self, raw: &str) -> LookupResponse {
        let result = match AssertUnwindSafe(self.resolve(raw)).catch_unwind().await {
            Ok(result) => result,
            Err(_) => {
                error!("address lookup panicked");
                Err(LookupError::Internal)
            }
        };

        LookupResponse::from(result)
    }

    /// The two-stage pipeline with typed failures.
    pub async fn resolve(&self, raw: &str) -> Result<LookupData, LookupError> {
        let address = NormalizedAddress::parse(raw)?;
        info!("Starting address lookup for: {}", address);

        let matched = self
            .geocoding
            .geocode(&address)
            .await
            .inspect_err(|e| error!("Geocoding stage failed: {}", e))?
            .ok_or_else(|| {
                warn!("No geocoder match for: {}", address);
                LookupError::AddressNotFound
            })?;

        info!(
            "Geocoded to ({}, {}), matched address {:?}, property id {:?}",
            matched.location.lat, matched.location.lon, matched.matched_address, matched.property_id
        );

        let district = self
            .boundaries
            .district_at(matched.location)
            .await
            .inspect_err(|e| error!("Boundaries stage failed: {}", e))?
            .ok_or_else(|| {
                warn!(
                    "No district polygon contains ({}, {})",
                    matched.location.lat, matched.location.lon
                );
                LookupError::DistrictNotFound
            })?;

        info!("Address lookup successful: district {}", district.district_name);

        // Callers get back the address they searched for, case-normalized,
        // not the upstream echo. The single district name intentionally
        // fills both output fields.
        Ok(LookupData {
            address: address.into_string(),
            location: matched.location,
            suburb: district.district_name.clone(),
            state_electoral_district: district.district_name,
        })
    }
}
