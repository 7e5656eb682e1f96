//! Geocoding client for the NSW geocoded addressing layer.
//!
//! One outbound query per call: exact-match filter on the address field,
//! GeoJSON feature collection back, first feature wins.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::address::NormalizedAddress;
use crate::config::Config;
use crate::error::LookupError;
use crate::models::{GeoPoint, GeocodeMatch};

const USER_AGENT: &str = concat!("waratah/", env!("CARGO_PKG_VERSION"), " (address lookup)");

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    geometry: PointGeometry,
    properties: GeocodeProperties,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    /// `[longitude, latitude]`, with an optional trailing elevation.
    coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct GeocodeProperties {
    address: String,
    principaladdresssiteoid: Option<i64>,
    rid: Option<i64>,
}

pub struct GeocodingClient {
    client: Client,
    url: Url,
}

impl GeocodingClient {
    pub fn new(config: &Config) -> Result<Self> {
        let url = Url::parse(&config.geocoding_url)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, url })
    }

    /// Geocode one address. `Ok(None)` means the upstream matched nothing;
    /// transport and response-shape failures are typed errors.
    pub async fn geocode(
        &self,
        address: &NormalizedAddress,
    ) -> Result<Option<GeocodeMatch>, LookupError> {
        let filter = format!("address='{}'", address.as_str());

        let response = self
            .client
            .get(self.url.clone())
            .query(&[("where", filter.as_str()), ("outFields", "*"), ("f", "geojson")])
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        debug!("Geocoding API response status: {}", status);

        if !status.is_success() {
            return Err(LookupError::Geocoding(format!(
                "upstream returned status {status}"
            )));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Geocoding(format!("malformed response body: {e}")))?;

        let Some(feature) = body.features.into_iter().next() else {
            debug!("No features found in geocoding response");
            return Ok(None);
        };

        // Delivered lon-first, with an optional trailing elevation; reorder
        // for internal use.
        let &[lon, lat, ..] = feature.geometry.coordinates.as_slice() else {
            return Err(LookupError::Geocoding(
                "feature geometry has fewer than 2 coordinates".to_string(),
            ));
        };

        let location = GeoPoint { lat, lon };
        if !location.in_range() {
            return Err(LookupError::Geocoding(format!(
                "feature coordinates out of range: lat={lat}, lon={lon}"
            )));
        }

        Ok(Some(GeocodeMatch {
            location,
            matched_address: feature.properties.address,
            property_id: feature
                .properties
                .principaladdresssiteoid
                .or(feature.properties.rid),
        }))
    }
}

/// Split transport-layer failures (NETWORK_ERROR) from everything else the
/// send can produce, which counts against the geocoding stage.
fn classify_send_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout
    } else if e.is_connect() {
        LookupError::Connection
    } else {
        LookupError::Geocoding(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer, timeout_secs: u64) -> Config {
        Config {
            geocoding_url: format!("{}/geocode/query", server.uri()),
            boundaries_url: format!("{}/boundaries/query", server.uri()),
            request_timeout_secs: timeout_secs,
        }
    }

    fn feature_body(lon: f64, lat: f64, address: &str) -> serde_json::Value {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [lon, lat, 0.0] },
                "properties": {
                    "address": address,
                    "principaladdresssiteoid": 1234567,
                    "rid": 42
                }
            }]
        })
    }

    #[tokio::test]
    async fn test_geocode_extracts_first_feature_lat_lon_reordered() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/query"))
            .and(query_param("where", "address='346 PANORAMA AVENUE BATHURST'"))
            .and(query_param("f", "geojson"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feature_body(
                149.56705027262,
                -33.4296842928957,
                "346 PANORAMA AVENUE BATHURST",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeocodingClient::new(&test_config(&server, 5)).unwrap();
        let address = NormalizedAddress::parse("346 PANORAMA AVENUE BATHURST").unwrap();
        let matched = client.geocode(&address).await.unwrap().unwrap();

        assert_eq!(matched.location.lat, -33.4296842928957);
        assert_eq!(matched.location.lon, 149.56705027262);
        assert_eq!(matched.matched_address, "346 PANORAMA AVENUE BATHURST");
        assert_eq!(matched.property_id, Some(1234567));
    }

    #[tokio::test]
    async fn test_geocode_zero_features_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "FeatureCollection",
                "features": []
            })))
            .mount(&server)
            .await;

        let client = GeocodingClient::new(&test_config(&server, 5)).unwrap();
        let address = NormalizedAddress::parse("NO SUCH PLACE").unwrap();
        assert!(client.geocode(&address).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_geocode_server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/query"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = GeocodingClient::new(&test_config(&server, 5)).unwrap();
        let address = NormalizedAddress::parse("346 PANORAMA AVENUE BATHURST").unwrap();
        let err = client.geocode(&address).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GeocodingApiError);
    }

    #[tokio::test]
    async fn test_geocode_malformed_body_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = GeocodingClient::new(&test_config(&server, 5)).unwrap();
        let address = NormalizedAddress::parse("346 PANORAMA AVENUE BATHURST").unwrap();
        let err = client.geocode(&address).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GeocodingApiError);
    }

    #[tokio::test]
    async fn test_geocode_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/query"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(5))
                    .set_body_json(feature_body(149.0, -33.0, "X")),
            )
            .mount(&server)
            .await;

        let client = GeocodingClient::new(&test_config(&server, 1)).unwrap();
        let address = NormalizedAddress::parse("346 PANORAMA AVENUE BATHURST").unwrap();
        let err = client.geocode(&address).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkError);
    }

    #[tokio::test]
    async fn test_geocode_out_of_range_coordinates_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/query"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(feature_body(500.0, -33.0, "X")),
            )
            .mount(&server)
            .await;

        let client = GeocodingClient::new(&test_config(&server, 5)).unwrap();
        let address = NormalizedAddress::parse("346 PANORAMA AVENUE BATHURST").unwrap();
        let err = client.geocode(&address).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GeocodingApiError);
    }

    #[tokio::test]
    async fn test_geocode_property_id_falls_back_to_rid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [149.0, -33.0] },
                    "properties": { "address": "X", "rid": 42 }
                }]
            })))
            .mount(&server)
            .await;

        let client = GeocodingClient::new(&test_config(&server, 5)).unwrap();
        let address = NormalizedAddress::parse("346 PANORAMA AVENUE BATHURST").unwrap();
        let matched = client.geocode(&address).await.unwrap().unwrap();
        assert_eq!(matched.property_id, Some(42));
    }
}
