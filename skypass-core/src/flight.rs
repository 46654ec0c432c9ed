use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use skypass_shared::FlightOverrides;
use uuid::Uuid;

pub const DEMO_FLIGHT_NUMBER: &str = "BA 287";
pub const DEMO_DESTINATION: &str = "London Heathrow (LHR)";
pub const DEMO_TERMINAL: &str = "Terminal 5";
pub const DEMO_GATE: &str = "A23";

/// Gap between establishing a trip and its departure, absent real flight data
pub const DEFAULT_DEPARTURE_LEAD_MINUTES: i64 = 210;

/// Leads outside `0..=MAX_DEPARTURE_LEAD_MINUTES` are clamped
pub const MAX_DEPARTURE_LEAD_MINUTES: i64 = 7 * 24 * 60;

/// Facts about the one flight a trip is planned around.
///
/// Built once when a trip is established and never edited afterwards;
/// planning a new trip replaces the whole value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightContext {
    pub trip_id: Uuid,
    pub flight_number: String,
    pub destination: String,
    pub terminal: String,
    pub gate: String,
    /// Display label, as entered by the user or derived from `departure_at`
    pub date: String,
    pub departure_at: DateTime<Utc>,
    pub established_at: DateTime<Utc>,
}

impl FlightContext {
    /// The built-in demonstration trip
    pub fn demo(established_at: DateTime<Utc>, departure_lead: Duration) -> Self {
        Self::from_overrides(&FlightOverrides::default(), established_at, departure_lead)
    }

    /// Build a trip from partial wizard input. Blank or missing fields take
    /// the demo values; the departure instant is always
    /// `established_at + departure_lead`.
    pub fn from_overrides(
        overrides: &FlightOverrides,
        established_at: DateTime<Utc>,
        departure_lead: Duration,
    ) -> Self {
        let departure_lead = departure_lead.clamp(Duration::zero(), Duration::minutes(MAX_DEPARTURE_LEAD_MINUTES));
        let departure_at = established_at
            .checked_add_signed(departure_lead)
            .unwrap_or(established_at);
        let date = non_blank(overrides.date.as_deref())
            .unwrap_or_else(|| departure_at.format("%b %-d, %Y").to_string());

        Self {
            trip_id: Uuid::new_v4(),
            flight_number: non_blank(overrides.flight_number.as_deref())
                .unwrap_or_else(|| DEMO_FLIGHT_NUMBER.to_string()),
            destination: non_blank(overrides.destination.as_deref())
                .unwrap_or_else(|| DEMO_DESTINATION.to_string()),
            terminal: non_blank(overrides.terminal.as_deref())
                .unwrap_or_else(|| DEMO_TERMINAL.to_string()),
            gate: DEMO_GATE.to_string(),
            date,
            departure_at,
            established_at,
        }
    }

    /// Departure time as `HH:MM`
    pub fn departure_label(&self) -> String {
        self.departure_at.format("%H:%M").to_string()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
