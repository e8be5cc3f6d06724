//! Error types for the SMS pipeline.

use domain::DomainError;

/// Everything that can stop a request on its way from inbound SMS to reply.
///
/// Each variant maps to exactly one user-facing reply, composed by
/// [`crate::services::response_composer::compose_failure`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Inbound text does not match the `LOCATION ROUTE_NUMBER` shape.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// The geocoder returned no candidates for the location text.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// No stop within the search radius services the requested route.
    #[error("no stop servicing route {0} within search radius")]
    NoStopForRoute(String),

    /// The directions provider could not produce a walking route.
    #[error("walking route unavailable: {0}")]
    RouteUnavailable(String),

    /// An upstream provider failed or answered with garbage.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The overall request deadline elapsed.
    #[error("request deadline exceeded")]
    Timeout,

    /// The SMS gateway refused or failed to deliver the reply.
    #[error("reply delivery failed: {0}")]
    DeliveryFailed(String),

    /// A domain invariant was violated while building value objects.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl PipelineError {
    /// Whether retrying the same request could plausibly succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_) | Self::Timeout)
    }

    /// The coarse failure category, used for state tracking and metrics.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::MalformedMessage(_) => FailureKind::MalformedMessage,
            Self::LocationNotFound(_) => FailureKind::LocationNotFound,
            Self::NoStopForRoute(_) => FailureKind::NoStopForRoute,
            Self::RouteUnavailable(_) => FailureKind::RouteUnavailable,
            Self::ProviderUnavailable(_) => FailureKind::ProviderUnavailable,
            Self::Timeout => FailureKind::Timeout,
            Self::DeliveryFailed(_) => FailureKind::DeliveryFailed,
            Self::Domain(_) => FailureKind::Internal,
        }
    }
}

/// Payload-free failure category, cheap to copy into pipeline states and
/// metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    MalformedMessage,
    LocationNotFound,
    NoStopForRoute,
    RouteUnavailable,
    ProviderUnavailable,
    Timeout,
    DeliveryFailed,
    Internal,
}

impl FailureKind {
    /// Stable snake_case label for logs and metric names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedMessage => "malformed_message",
            Self::LocationNotFound => "location_not_found",
            Self::NoStopForRoute => "no_stop_for_route",
            Self::RouteUnavailable => "route_unavailable",
            Self::ProviderUnavailable => "provider_unavailable",
            Self::Timeout => "timeout",
            Self::DeliveryFailed => "delivery_failed",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
