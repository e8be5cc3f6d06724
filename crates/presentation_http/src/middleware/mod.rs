//! HTTP middleware components

pub mod metrics;

pub use metrics::{MetricsRecorder, MetricsRecorderLayer};
