//! Pipeline components, one module per stage.

pub mod bus_eta_estimator;
pub mod geocoder;
pub mod message_parser;
pub mod pipeline;
pub mod response_composer;
pub mod stop_locator;
pub mod walk_estimator;

pub use bus_eta_estimator::BusEtaEstimator;
pub use geocoder::Geocoder;
pub use message_parser::parse_message;
pub use pipeline::{PipelineOrchestrator, PipelineReport, PipelineState};
pub use response_composer::{compose_failure, compose_reply};
pub use stop_locator::StopLocator;
pub use walk_estimator::WalkEstimator;
