//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete provider clients.

mod maps_adapter;
mod sms_adapter;
mod transit_adapter;

pub use maps_adapter::GoogleMapsAdapter;
pub use sms_adapter::Fast2SmsDeliveryAdapter;
pub use transit_adapter::TransitApiAdapter;
