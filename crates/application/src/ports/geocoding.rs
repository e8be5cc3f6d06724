//! Port for resolving free-text locations into coordinates.

use async_trait::async_trait;
use domain::Coordinate;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// One geocoding candidate, in the provider's own ranking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Resolved position of the candidate.
    pub coordinate: Coordinate,
    /// Human-readable address the provider matched, useful for logs.
    pub formatted_address: String,
}

/// Resolves rider-supplied location text to coordinates.
///
/// Implementations return candidates in the provider's ranking order and
/// never reorder them; an empty list means the text matched nothing.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Geocode `query` into ranked candidates.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ProviderUnavailable`] when the provider
    /// cannot be reached or answers with an unusable payload.
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodedPlace>, PipelineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn GeocodingPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockGeocodingPort>();
    }

    #[test]
    fn geocoded_place_serializes_with_coordinate() {
        let place = GeocodedPlace {
            coordinate: Coordinate::new_unchecked(12.9716, 77.5946),
            formatted_address: "Indiranagar, Bengaluru".to_string(),
        };
        let json = serde_json::to_string(&place).unwrap();
        assert!(json.contains("12.9716"));
        assert!(json.contains("Indiranagar"));
    }
}
