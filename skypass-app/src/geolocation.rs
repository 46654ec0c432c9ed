use chrono::{DateTime, Utc};
use skypass_core::{Clock, GeolocationError, GeolocationProvider, LocationLabel, PositionOptions};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Used when a caller hands in an empty fallback
const LAST_RESORT_LABEL: &str = "Current location";

#[derive(Debug, Clone)]
struct CachedPosition {
    label: String,
    cached_at: DateTime<Utc>,
}

/// Turns the geolocation capability into a label, always.
///
/// Success yields the resolved label; absence, denial and timeout all
/// yield the caller's fallback. A resolution younger than
/// `maximum_age` is reused without asking the provider again.
#[derive(Clone)]
pub struct LocationResolver {
    provider: Option<Arc<dyn GeolocationProvider>>,
    options: PositionOptions,
    clock: Arc<dyn Clock>,
    cache: Arc<Mutex<Option<CachedPosition>>>,
}

impl LocationResolver {
    pub fn new(
        provider: Option<Arc<dyn GeolocationProvider>>,
        options: PositionOptions,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            options,
            clock,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn resolve(&self, fallback: &str) -> LocationLabel {
        let fallback = if fallback.trim().is_empty() { LAST_RESORT_LABEL } else { fallback };

        if let Some(label) = self.fresh_cached() {
            debug!("Reusing cached position: {}", label);
            return LocationLabel::resolved(label);
        }

        let Some(provider) = &self.provider else {
            debug!("No geolocation capability, using fallback: {}", fallback);
            return LocationLabel::fallback(fallback);
        };

        let attempt = tokio::time::timeout(self.options.timeout, provider.current_position(&self.options)).await;
        let result = attempt.unwrap_or(Err(GeolocationError::Timeout(self.options.timeout)));

        match result {
            Ok(position) if !position.label.trim().is_empty() => {
                self.store(&position.label);
                LocationLabel::resolved(position.label)
            }
            Ok(_) => {
                warn!("Geolocation returned an empty label, using fallback: {}", fallback);
                LocationLabel::fallback(fallback)
            }
            Err(e) => {
                warn!("{}, using fallback: {}", e, fallback);
                LocationLabel::fallback(fallback)
            }
        }
    }

    /// Resolve in the background; the result is delivered once through the
    /// returned task
    pub fn spawn(&self, fallback: impl Into<String>) -> LocationTask {
        let resolver = self.clone();
        let fallback = fallback.into();
        LocationTask {
            handle: tokio::spawn(async move { resolver.resolve(&fallback).await }),
        }
    }

    fn fresh_cached(&self) -> Option<String> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        let cached = cache.as_ref()?;
        let age = (self.clock.now() - cached.cached_at).to_std().ok()?;
        (age <= self.options.maximum_age).then(|| cached.label.clone())
    }

    fn store(&self, label: &str) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        *cache = Some(CachedPosition {
            label: label.to_string(),
            cached_at: self.clock.now(),
        });
    }
}

/// One pending resolution. Dropping it cancels the work.
pub struct LocationTask {
    handle: JoinHandle<LocationLabel>,
}

impl LocationTask {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// The label, or `None` if the task was cancelled first
    pub async fn wait(mut self) -> Option<LocationLabel> {
        (&mut self.handle).await.ok()
    }
}

impl Drop for LocationTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use skypass_core::{LocationSource, ManualClock, Position, StaticGeolocation, UnavailableGeolocation};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    struct HangingGeolocation;

    #[async_trait]
    impl GeolocationProvider for HangingGeolocation {
        async fn current_position(&self, _options: &PositionOptions) -> Result<Position, GeolocationError> {
            std::future::pending().await
        }
    }

    struct CountingGeolocation {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GeolocationProvider for CountingGeolocation {
        async fn current_position(&self, _options: &PositionOptions) -> Result<Position, GeolocationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Position {
                label: format!("Fix #{}", n),
                resolved_at: Utc::now(),
            })
        }
    }

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap())
    }

    fn resolver(provider: Option<Arc<dyn GeolocationProvider>>, clock: ManualClock) -> LocationResolver {
        LocationResolver::new(provider, PositionOptions::default(), Arc::new(clock))
    }

    #[tokio::test]
    async fn test_resolved_label() {
        let r = resolver(Some(Arc::new(StaticGeolocation::new("Baker Street, London"))), clock());
        let label = r.resolve("Current location").await;
        assert_eq!(label, LocationLabel::resolved("Baker Street, London"));
    }

    #[tokio::test]
    async fn test_unavailable_and_denied_fall_back() {
        let absent = resolver(None, clock()).resolve("Current location").await;
        assert_eq!(absent, LocationLabel::fallback("Current location"));

        let denied = resolver(Some(Arc::new(UnavailableGeolocation::denied())), clock())
            .resolve("Baker Street, London")
            .await;
        assert_eq!(denied.source, LocationSource::Fallback);
        assert_eq!(denied.as_str(), "Baker Street, London");

        let blank = resolver(None, clock()).resolve("  ").await;
        assert!(!blank.as_str().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back_within_bound() {
        let r = resolver(Some(Arc::new(HangingGeolocation)), clock());
        let started = Instant::now();

        let label = r.resolve("Current location").await;

        assert_eq!(label, LocationLabel::fallback("Current location"));
        assert_eq!(started.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_cache_respects_maximum_age() {
        let clock = clock();
        let provider = Arc::new(CountingGeolocation { calls: AtomicUsize::new(0) });
        let r = resolver(Some(provider.clone()), clock.clone());

        assert_eq!(r.resolve("x").await.as_str(), "Fix #1");
        clock.advance(chrono::Duration::seconds(60));
        assert_eq!(r.resolve("x").await.as_str(), "Fix #1");
        clock.advance(chrono::Duration::seconds(1));
        assert_eq!(r.resolve("x").await.as_str(), "Fix #2");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_task_delivers_nothing() {
        let r = resolver(Some(Arc::new(HangingGeolocation)), clock());
        let task = r.spawn("Current location");
        task.cancel();
        assert_eq!(task.wait().await, None);

        let task = r.spawn("Current location");
        assert_eq!(task.wait().await, Some(LocationLabel::fallback("Current location")));
    }
}
