//! Google Maps client for geocoding and walking directions
//!
//! Talks to the Geocoding API (`/geocode/json`) and the Directions API
//! (`/directions/json`, walking mode). Both endpoints answer HTTP 200 with a
//! `status` field in the body; error mapping happens on that field.

use std::time::Duration;

use async_trait::async_trait;
use domain::Coordinate;
use moka::future::Cache;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::GoogleMapsConfig;
use crate::error::MapsError;
use crate::models::{PlaceMatch, WalkingLeg};

/// Cache at most this many distinct geocoded addresses
const GEOCODE_CACHE_CAPACITY: u64 = 10_000;

/// Trait for geocoding and walking-directions clients
#[async_trait]
pub trait MapsClient: Send + Sync {
    /// Geocode a free-text address into ranked candidate places
    async fn geocode(&self, address: &str) -> Result<Vec<PlaceMatch>, MapsError>;

    /// Walking route between two coordinates, `None` when no path exists
    async fn walking_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<WalkingLeg>, MapsError>;
}

/// HTTP client for the Google Maps Geocoding and Directions APIs
#[derive(Debug)]
pub struct GoogleMapsClient {
    client: Client,
    config: GoogleMapsConfig,
    geocode_cache: Option<Cache<String, Vec<PlaceMatch>>>,
}

impl GoogleMapsClient {
    /// Create a new Maps client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be initialized.
    pub fn new(config: &GoogleMapsConfig) -> Result<Self, MapsError> {
        if config.api_key.is_none() {
            return Err(MapsError::Configuration(
                "api_key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Busline/1.0")
            .build()
            .map_err(|e| MapsError::ConnectionFailed(e.to_string()))?;

        let geocode_cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(GEOCODE_CACHE_CAPACITY)
                .time_to_live(Duration::from_secs(
                    u64::from(config.cache_ttl_minutes) * 60,
                ))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            geocode_cache,
        })
    }

    fn key(&self) -> &str {
        self.config
            .api_key
            .as_ref()
            .map_or("", |key| key.expose_secret())
    }

    async fn get_body(&self, url: &str, params: &[(&str, String)]) -> Result<String, MapsError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MapsError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    MapsError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapsError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| MapsError::ParseError(e.to_string()))
    }

    /// Parse the geocoding response body into ranked places
    fn parse_geocode_response(body: &str) -> Result<Vec<PlaceMatch>, MapsError> {
        let raw: RawGeocodeResponse =
            serde_json::from_str(body).map_err(|e| MapsError::ParseError(e.to_string()))?;

        match raw.status.as_str() {
            "OK" => Ok(raw
                .results
                .into_iter()
                .map(|result| PlaceMatch {
                    latitude: result.geometry.location.lat,
                    longitude: result.geometry.location.lng,
                    formatted_address: result.formatted_address,
                })
                .collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            "OVER_QUERY_LIMIT" => Err(MapsError::QuotaExceeded),
            "REQUEST_DENIED" => Err(MapsError::AuthFailed(
                raw.error_message
                    .unwrap_or_else(|| "request denied".to_string()),
            )),
            other => Err(MapsError::RequestFailed(format!(
                "geocoding status {other}"
            ))),
        }
    }

    /// Parse the directions response body into the first route's first leg
    fn parse_directions_response(body: &str) -> Result<Option<WalkingLeg>, MapsError> {
        let raw: RawDirectionsResponse =
            serde_json::from_str(body).map_err(|e| MapsError::ParseError(e.to_string()))?;

        match raw.status.as_str() {
            "OK" => {
                let leg = raw
                    .routes
                    .into_iter()
                    .next()
                    .and_then(|route| route.legs.into_iter().next());
                Ok(leg.map(|leg| WalkingLeg {
                    distance_meters: leg.distance.value,
                    duration_seconds: leg.duration.value,
                }))
            },
            "ZERO_RESULTS" | "NOT_FOUND" => Ok(None),
            "OVER_QUERY_LIMIT" => Err(MapsError::QuotaExceeded),
            "REQUEST_DENIED" => Err(MapsError::AuthFailed(
                raw.error_message
                    .unwrap_or_else(|| "request denied".to_string()),
            )),
            other => Err(MapsError::RequestFailed(format!(
                "directions status {other}"
            ))),
        }
    }
}

#[async_trait]
impl MapsClient for GoogleMapsClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Vec<PlaceMatch>, MapsError> {
        let cache_key = address.trim().to_lowercase();
        if let Some(cache) = &self.geocode_cache {
            if let Some(hit) = cache.get(&cache_key).await {
                debug!("geocode cache hit");
                return Ok(hit);
            }
        }

        let url = format!("{}/geocode/json", self.config.base_url);
        let mut params: Vec<(&str, String)> = vec![
            ("address", address.to_string()),
            ("language", self.config.language.clone()),
            ("key", self.key().to_string()),
        ];
        if let Some(region) = &self.config.region {
            params.push(("region", region.clone()));
        }

        debug!(%url, "geocoding address");
        let body = self.get_body(&url, &params).await?;
        let places = Self::parse_geocode_response(&body)?;

        if places.is_empty() {
            warn!("no geocoding results");
        } else if let Some(cache) = &self.geocode_cache {
            cache.insert(cache_key, places.clone()).await;
        }

        debug!(count = places.len(), "geocoding complete");
        Ok(places)
    }

    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn walking_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<WalkingLeg>, MapsError> {
        let url = format!("{}/directions/json", self.config.base_url);
        let params = [
            ("origin", origin.to_query_param()),
            ("destination", destination.to_query_param()),
            ("mode", "walking".to_string()),
            ("alternatives", "false".to_string()),
            ("units", "metric".to_string()),
            ("language", self.config.language.clone()),
            ("key", self.key().to_string()),
        ];

        debug!(%url, "requesting walking route");
        let body = self.get_body(&url, &params).await?;
        let leg = Self::parse_directions_response(&body)?;

        if leg.is_none() {
            warn!("no walking route between points");
        }
        Ok(leg)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawGeocodeResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<RawGeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct RawGeocodeResult {
    formatted_address: String,
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    location: RawLatLng,
}

#[derive(Debug, Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct RawDirectionsResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    #[serde(default)]
    legs: Vec<RawDirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct RawDirectionsLeg {
    distance: RawMetric,
    duration: RawMetric,
}

#[derive(Debug, Deserialize)]
struct RawMetric {
    value: u32,
}
