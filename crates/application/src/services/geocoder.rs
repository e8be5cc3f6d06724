//! Location resolution.

use std::sync::Arc;

use domain::Coordinate;
use tracing::{debug, instrument};

use crate::error::PipelineError;
use crate::ports::GeocodingPort;

/// Resolves free-text locations to coordinates through the geocoding port.
///
/// Consumes the provider's top-ranked candidate as-is; ranking is the
/// provider's job and is never redone here.
pub struct Geocoder {
    port: Arc<dyn GeocodingPort>,
}

impl Geocoder {
    /// Create a geocoder over the given provider port.
    #[must_use]
    pub fn new(port: Arc<dyn GeocodingPort>) -> Self {
        Self { port }
    }

    /// Resolve `location_text` to the coordinate of the best candidate.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::LocationNotFound`] when the provider has no
    /// candidates, and passes provider failures through unchanged.
    #[instrument(skip(self))]
    pub async fn resolve(&self, location_text: &str) -> Result<Coordinate, PipelineError> {
        let candidates = self.port.geocode(location_text).await?;

        let Some(best) = candidates.first() else {
            debug!("geocoder returned no candidates");
            return Err(PipelineError::LocationNotFound(location_text.to_string()));
        };

        debug!(
            address = %best.formatted_address,
            coordinate = %best.coordinate,
            candidates = candidates.len(),
            "geocoded location"
        );
        Ok(best.coordinate)
    }
}
