//! Bus route identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A normalized bus route identifier (e.g., `12A`, `500D`, `99Z`)
///
/// Route identifiers start with a digit and contain only ASCII
/// alphanumerics. Letters are uppercased on construction so that matching
/// against a stop's serviced routes is insensitive to rider input casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId {
    value: String,
}

impl RouteId {
    /// Parse and normalize a route token
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRouteId` when the token is empty, does
    /// not start with an ASCII digit, or contains non-alphanumeric
    /// characters.
    pub fn parse(token: impl AsRef<str>) -> Result<Self, DomainError> {
        let token = token.as_ref().trim();

        if token.is_empty() {
            return Err(DomainError::InvalidRouteId(
                "route identifier must not be empty".to_string(),
            ));
        }

        if !token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidRouteId(token.to_string()));
        }

        if !token.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidRouteId(token.to_string()));
        }

        Ok(Self {
            value: token.to_ascii_uppercase(),
        })
    }

    /// Get the normalized identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<&str> for RouteId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
