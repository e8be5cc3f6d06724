//! Maps adapter - implements the geocoding and walking-directions ports
//! using integration_maps

use application::error::PipelineError;
use application::ports::{GeocodedPlace, GeocodingPort, WalkingDirectionsPort, WalkingRoute};
use async_trait::async_trait;
use domain::Coordinate;
use integration_maps::{MapsClient, MapsError, PlaceMatch};
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::retry::{RetryConfig, with_retry};

/// Adapter for geocoding and walking directions over the Maps APIs
pub struct GoogleMapsAdapter {
    client: Arc<dyn MapsClient>,
    retry: RetryConfig,
}

impl std::fmt::Debug for GoogleMapsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsAdapter")
            .field("client", &"MapsClient")
            .field("retry", &self.retry)
            .finish()
    }
}

impl GoogleMapsAdapter {
    /// Create a new maps adapter
    pub fn new(client: Arc<dyn MapsClient>, retry: RetryConfig) -> Self {
        Self { client, retry }
    }

    /// Convert a provider place, dropping candidates with out-of-range
    /// coordinates instead of failing the whole lookup
    fn convert_place(place: PlaceMatch) -> Option<GeocodedPlace> {
        match Coordinate::new(place.latitude, place.longitude) {
            Ok(coordinate) => Some(GeocodedPlace {
                coordinate,
                formatted_address: place.formatted_address,
            }),
            Err(err) => {
                warn!(
                    address = %place.formatted_address,
                    error = %err,
                    "skipping geocoding candidate with invalid coordinates"
                );
                None
            },
        }
    }

    fn map_error(err: MapsError) -> PipelineError {
        PipelineError::ProviderUnavailable(err.to_string())
    }
}

#[async_trait]
impl GeocodingPort for GoogleMapsAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodedPlace>, PipelineError> {
        let places = with_retry(&self.retry, "maps.geocode", || async {
            self.client.geocode(query).await
        })
        .await
        .into_result()
        .map_err(Self::map_error)?;

        Ok(places.into_iter().filter_map(Self::convert_place).collect())
    }
}

#[async_trait]
impl WalkingDirectionsPort for GoogleMapsAdapter {
    #[instrument(skip(self))]
    async fn walking_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<WalkingRoute, PipelineError> {
        let leg = with_retry(&self.retry, "maps.walking_route", || async {
            self.client.walking_route(origin, destination).await
        })
        .await
        .into_result()
        .map_err(Self::map_error)?;

        leg.map_or_else(
            || {
                Err(PipelineError::RouteUnavailable(format!(
                    "no walking path from {origin} to {destination}"
                )))
            },
            |leg| {
                Ok(WalkingRoute {
                    distance_meters: f64::from(leg.distance_meters),
                    duration_seconds: leg.duration_seconds,
                })
            },
        )
    }
}
