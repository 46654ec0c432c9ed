use serde::Deserialize;
use skypass_core::flight::MAX_DEPARTURE_LEAD_MINUTES;
use skypass_core::PositionOptions;
use skypass_timeline::TimelineOffsets;
use std::env;
use std::time::Duration;

const MAX_TICK_SECONDS: u64 = 60 * 60;
const MAX_GEOLOCATION_SECONDS: u64 = 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub clock: ClockConfig,
    pub geolocation: GeolocationConfig,
    pub timeline: TimelineOffsets,
    pub trip: TripConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClockConfig {
    pub tick_seconds: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { tick_seconds: 30 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeolocationConfig {
    pub timeout_seconds: u64,
    pub maximum_age_seconds: u64,
    pub enable_high_accuracy: bool,
    /// Shown on the home screen when no position can be had
    pub home_fallback: String,
    /// Pre-filled as the wizard pickup when no position can be had
    pub landing_fallback: String,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5,
            maximum_age_seconds: 60,
            enable_high_accuracy: false,
            home_fallback: "Baker Street, London".to_string(),
            landing_fallback: "Current location".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TripConfig {
    pub departure_lead_minutes: i64,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            departure_lead_minutes: skypass_core::flight::DEFAULT_DEPARTURE_LEAD_MINUTES,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. SKYPASS_CLOCK__TICK_SECONDS=10
            .add_source(config::Environment::with_prefix("SKYPASS").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Refresh period of the clock; between one second and an hour
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(self.clock.tick_seconds.clamp(1, MAX_TICK_SECONDS))
    }

    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            enable_high_accuracy: self.geolocation.enable_high_accuracy,
            maximum_age: Duration::from_secs(self.geolocation.maximum_age_seconds.min(MAX_GEOLOCATION_SECONDS)),
            timeout: Duration::from_secs(self.geolocation.timeout_seconds.min(MAX_GEOLOCATION_SECONDS)),
        }
    }

    /// Clamped to `0..=MAX_DEPARTURE_LEAD_MINUTES`
    pub fn departure_lead(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.trip.departure_lead_minutes.clamp(0, MAX_DEPARTURE_LEAD_MINUTES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_session_constants() {
        let config = Config::default();
        assert_eq!(config.tick_period(), Duration::from_secs(30));
        assert_eq!(config.position_options(), PositionOptions::default());
        assert_eq!(config.departure_lead(), chrono::Duration::minutes(210));
        assert_eq!(config.timeline, TimelineOffsets::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                "[clock]\ntick_seconds = 0\n[geolocation]\nhome_fallback = \"Kings Cross\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: Config = s.try_deserialize().unwrap();

        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.geolocation.home_fallback, "Kings Cross");
        assert_eq!(config.geolocation.timeout_seconds, 5);
        assert_eq!(config.trip.departure_lead_minutes, 210);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.clock.tick_seconds = u64::MAX;
        config.geolocation.timeout_seconds = u64::MAX;
        config.trip.departure_lead_minutes = i64::MAX / 1000;

        assert_eq!(config.tick_period(), Duration::from_secs(MAX_TICK_SECONDS));
        assert_eq!(config.position_options().timeout, Duration::from_secs(MAX_GEOLOCATION_SECONDS));
        assert_eq!(config.departure_lead(), chrono::Duration::minutes(MAX_DEPARTURE_LEAD_MINUTES));

        config.trip.departure_lead_minutes = i64::MIN;
        assert_eq!(config.departure_lead(), chrono::Duration::zero());
    }
}
