//! Boundary client for the NSW administrative boundaries layer.
//!
//! Spatial-intersection query: which district polygon contains a point.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::LookupError;
use crate::models::{DistrictInfo, GeoPoint};

const USER_AGENT: &str = concat!("waratah/", env!("CARGO_PKG_VERSION"), " (address lookup)");

#[derive(Debug, Deserialize)]
struct BoundariesResponse {
    #[serde(default)]
    features: Vec<BoundaryFeature>,
}

#[derive(Debug, Deserialize)]
struct BoundaryFeature {
    properties: BoundaryProperties,
}

#[derive(Debug, Deserialize)]
struct BoundaryProperties {
    districtname: String,
}

pub struct BoundariesClient {
    client: Client,
    url: Url,
}

impl BoundariesClient {
    pub fn new(config: &Config) -> Result<Self> {
        let url = Url::parse(&config.boundaries_url)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, url })
    }

    /// Find the district containing `point`. `Ok(None)` means no polygon
    /// intersected; transport and response-shape failures are typed errors.
    pub async fn district_at(&self, point: GeoPoint) -> Result<Option<DistrictInfo>, LookupError> {
        // Esri point geometry is lon-first.
        let geometry = format!("{},{}", point.lon, point.lat);

        let response = self
            .client
            .get(self.url.clone())
            .query(&[
                ("geometry", geometry.as_str()),
                ("geometryType", "esriGeometryPoint"),
                ("inSR", "4326"),
                ("spatialRel", "esriSpatialRelIntersects"),
                ("outFields", "*"),
                ("returnGeometry", "false"),
                ("f", "geoJSON"),
            ])
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        debug!("Boundaries API response status: {}", status);

        if !status.is_success() {
            return Err(LookupError::Boundaries(format!(
                "upstream returned status {status}"
            )));
        }

        let body: BoundariesResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Boundaries(format!("malformed response body: {e}")))?;

        let Some(feature) = body.features.into_iter().next() else {
            debug!("No features found in boundaries response");
            return Ok(None);
        };

        Ok(Some(DistrictInfo {
            district_name: feature.properties.districtname,
        }))
    }
}

fn classify_send_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout
    } else if e.is_connect() {
        LookupError::Connection
    } else {
        LookupError::Boundaries(e.to_string())
    }
}
