//! Google Maps integration for Busline
//!
//! Provides address geocoding via the Geocoding API (`/geocode/json`) and
//! walking distance/duration via the Directions API (`/directions/json`,
//! walking mode), against any Google-Maps-style endpoint.
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern shared by the integration
//! crates. [`MapsClient`] defines the interface for geocoding and walking
//! directions, implemented by [`GoogleMapsClient`]. Geocoding results are
//! cached in-process with a configurable TTL, since riders tend to repeat
//! the same landmarks.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_maps::{GoogleMapsClient, GoogleMapsConfig, MapsClient};
//!
//! let config = GoogleMapsConfig::default();
//! let client = GoogleMapsClient::new(&config)?;
//!
//! let places = client.geocode("Indiranagar, Bengaluru").await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GoogleMapsClient, MapsClient};
pub use config::GoogleMapsConfig;
pub use error::MapsError;
pub use models::{PlaceMatch, WalkingLeg};
