use serde::Serialize;
use skypass_core::FlightContext;
use skypass_timeline::Timeline;

use crate::offerings::LoungeOption;

/// Header and quick actions shown above the journey timeline
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JourneyOverview {
    pub flight_number: String,
    pub departure_time: String,
    pub date: String,
    pub destination: String,
    pub recommended_pickup: String,
    pub lounge_count: usize,
}

impl JourneyOverview {
    pub fn new(flight: &FlightContext, timeline: &Timeline) -> Self {
        Self {
            flight_number: flight.flight_number.clone(),
            departure_time: flight.departure_label(),
            date: flight.date.clone(),
            destination: flight.destination.clone(),
            recommended_pickup: timeline.taxi_pickup_at.format("%H:%M").to_string(),
            lounge_count: LoungeOption::at_terminal(&flight.terminal).len(),
        }
    }

    pub fn taxi_hint(&self) -> String {
        format!("Recommended pickup: {}", self.recommended_pickup)
    }

    pub fn lounge_hint(&self) -> String {
        match self.lounge_count {
            1 => "1 lounge available".to_string(),
            n => format!("{} lounges available", n),
        }
    }
}
