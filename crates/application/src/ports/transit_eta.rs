//! Port for querying upcoming bus departures at a stop.

use async_trait::async_trait;
use domain::RouteId;
#[cfg(test)]
use mockall::automock;

use crate::error::PipelineError;

/// The next known departure of a route at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextDeparture {
    /// Seconds from now until the departure.
    pub eta_seconds: u32,
    /// True when the time is realtime-adjusted rather than purely scheduled.
    pub realtime: bool,
}

/// Looks up the next departure of a route at a stop.
///
/// Best-effort by contract: the caller degrades to an unknown ETA on any
/// error, so implementations surface provider failures rather than guess.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitEtaPort: Send + Sync {
    /// Next upcoming departure of `route` at the stop identified by
    /// `stop_id`, or `None` when the departure board lists nothing for the
    /// route inside the provider's window.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ProviderUnavailable`] when the departure
    /// board cannot be fetched or parsed.
    async fn next_departure(
        &self,
        stop_id: &str,
        route: &RouteId,
    ) -> Result<Option<NextDeparture>, PipelineError>;
}
