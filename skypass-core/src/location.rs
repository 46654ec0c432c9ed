use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options passed to the geolocation capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    /// How old a previously resolved position may be and still be reused
    pub maximum_age: Duration,
    pub timeout: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: false,
            maximum_age: Duration::from_secs(60),
            timeout: Duration::from_secs(5),
        }
    }
}

/// A resolved position. Only the human-readable label is modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub label: String,
    pub resolved_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation is not available on this device")]
    Unavailable,
    #[error("Geolocation permission denied")]
    PermissionDenied,
    #[error("Geolocation timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Request a single best-effort position
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, GeolocationError>;
}

/// Demo provider that always "finds" the same place
pub struct StaticGeolocation {
    label: String,
}

impl StaticGeolocation {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

#[async_trait]
impl GeolocationProvider for StaticGeolocation {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, GeolocationError> {
        tracing::debug!(
            high_accuracy = options.enable_high_accuracy,
            "Resolving static position: {}",
            self.label
        );
        Ok(Position {
            label: self.label.clone(),
            resolved_at: Utc::now(),
        })
    }
}

/// Provider for devices without the capability, or where the user said no
pub struct UnavailableGeolocation {
    denied: bool,
}

impl UnavailableGeolocation {
    pub fn absent() -> Self {
        Self { denied: false }
    }

    pub fn denied() -> Self {
        Self { denied: true }
    }
}

#[async_trait]
impl GeolocationProvider for UnavailableGeolocation {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, GeolocationError> {
        if self.denied {
            Err(GeolocationError::PermissionDenied)
        } else {
            Err(GeolocationError::Unavailable)
        }
    }
}

/// Where a location label came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationSource {
    /// Handed over from a previous screen
    Carried,
    Resolved,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationLabel {
    pub label: String,
    pub source: LocationSource,
}

impl LocationLabel {
    pub fn carried(label: impl Into<String>) -> Self {
        Self { label: label.into(), source: LocationSource::Carried }
    }

    pub fn resolved(label: impl Into<String>) -> Self {
        Self { label: label.into(), source: LocationSource::Resolved }
    }

    pub fn fallback(label: impl Into<String>) -> Self {
        Self { label: label.into(), source: LocationSource::Fallback }
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Display for LocationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_and_unavailable_providers() {
        let options = PositionOptions::default();

        let position = StaticGeolocation::new("Baker Street, London")
            .current_position(&options)
            .await
            .unwrap();
        assert_eq!(position.label, "Baker Street, London");

        let denied = UnavailableGeolocation::denied().current_position(&options).await;
        assert!(matches!(denied, Err(GeolocationError::PermissionDenied)));

        let absent = UnavailableGeolocation::absent().current_position(&options).await;
        assert!(matches!(absent, Err(GeolocationError::Unavailable)));
    }

    #[test]
    fn test_default_options() {
        let options = PositionOptions::default();
        assert!(!options.enable_high_accuracy);
        assert_eq!(options.maximum_age, Duration::from_secs(60));
        assert_eq!(options.timeout, Duration::from_secs(5));
    }
}
