use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Stable identifier of a trip phase, in canonical itinerary order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseKey {
    Ride,
    Airport,
    Lounge,
    Gate,
    Boarding,
    Flight,
}

impl PhaseKey {
    pub const ALL: [PhaseKey; 6] = [
        PhaseKey::Ride,
        PhaseKey::Airport,
        PhaseKey::Lounge,
        PhaseKey::Gate,
        PhaseKey::Boarding,
        PhaseKey::Flight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKey::Ride => "ride",
            PhaseKey::Airport => "airport",
            PhaseKey::Lounge => "lounge",
            PhaseKey::Gate => "gate",
            PhaseKey::Boarding => "boarding",
            PhaseKey::Flight => "flight",
        }
    }
}

impl std::fmt::Display for PhaseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual family of a phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Accent {
    Transport,
    Location,
    Lounge,
    GateCall,
    Flight,
}

/// Transition a call-to-action triggers in the booking flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseAction {
    BookTaxi,
    BookLounge,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallToAction {
    pub label: String,
    /// `None` for informational buttons that do not move the flow
    pub action: Option<PhaseAction>,
}

impl CallToAction {
    pub fn new(label: &str, action: Option<PhaseAction>) -> Self {
        Self { label: label.to_string(), action }
    }
}

/// Partner promotion shown next to a phase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SponsoredContent {
    pub brand: String,
    pub link: String,
    pub headline: String,
    pub tagline: String,
}

impl SponsoredContent {
    pub fn samsonite() -> Self {
        Self {
            brand: "Samsonite".to_string(),
            link: "https://www.samsonite.com/".to_string(),
            headline: "Samsonite 20% off, just for you".to_string(),
            tagline: "Exclusive for Priority Pass members at T5".to_string(),
        }
    }

    pub fn nike() -> Self {
        Self {
            brand: "Nike".to_string(),
            link: "https://www.nike.com/".to_string(),
            headline: "Nike 20% off, just for you".to_string(),
            tagline: "In-store at T5 and online today".to_string(),
        }
    }
}

/// One milestone of the itinerary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseEvent {
    pub key: PhaseKey,
    pub title: String,
    pub subtitle: String,
    pub time: DateTime<Utc>,
    pub accent: Accent,
    pub call_to_action: Option<CallToAction>,
    pub sponsored: Option<SponsoredContent>,
}

impl PhaseEvent {
    /// `HH:MM` label of the phase time
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}
