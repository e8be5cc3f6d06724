//! Transit data integration for Busline
//!
//! Provides nearby-stop lookup (with the lines servicing each stop) and
//! departure boards via a HAFAS-style API such as
//! [v6.db.transport.rest](https://v6.db.transport.rest).
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern shared by the integration
//! crates. [`TransitClient`] defines the interface for stop discovery and
//! departure lookup, implemented by [`TransitApiClient`]. Only bus lines are
//! surfaced; other products are filtered out at the wire boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::Coordinate;
//! use integration_transit::{TransitApiClient, TransitApiConfig, TransitClient};
//!
//! let config = TransitApiConfig::default();
//! let client = TransitApiClient::new(&config)?;
//!
//! let center = Coordinate::new(12.9716, 77.5946)?;
//! let stops = client.nearby_stops(&center, 1000).await?;
//! let board = client.departures(&stops[0].id, 60).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{TransitApiClient, TransitClient};
pub use config::TransitApiConfig;
pub use error::TransitError;
pub use models::{Departure, TransitLine, TransitStop};
