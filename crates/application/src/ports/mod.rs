//! Port definitions for the application layer
//!
//! Ports are the interfaces the pipeline uses to reach external systems:
//! geocoding, stop discovery, walking directions, departure boards, and SMS
//! delivery. Adapters in the infrastructure layer implement them over the
//! provider clients.

mod geocoding;
mod sms;
mod stops;
mod transit_eta;
mod walking;

#[cfg(test)]
pub use geocoding::MockGeocodingPort;
pub use geocoding::{GeocodedPlace, GeocodingPort};
#[cfg(test)]
pub use sms::MockSmsDeliveryPort;
pub use sms::SmsDeliveryPort;
#[cfg(test)]
pub use stops::MockNearbyStopsPort;
pub use stops::NearbyStopsPort;
#[cfg(test)]
pub use transit_eta::MockTransitEtaPort;
pub use transit_eta::{NextDeparture, TransitEtaPort};
#[cfg(test)]
pub use walking::MockWalkingDirectionsPort;
pub use walking::{WalkingDirectionsPort, WalkingRoute};
