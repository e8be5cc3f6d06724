//! Application layer - the ETA resolution pipeline
//!
//! Sequences one inbound SMS through parse → geocode → locate stop →
//! estimate → compose → deliver. Ports define the provider seams;
//! infrastructure adapters implement them over the integration clients.

pub mod error;
pub mod ports;
pub mod request;
pub mod services;

pub use error::{FailureKind, PipelineError};
pub use ports::*;
pub use request::{InboundRequest, ParsedQuery};
pub use services::*;
