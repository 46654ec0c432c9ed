use chrono::{DateTime, Utc};
use skypass_core::LocationLabel;
use skypass_shared::LandingPayload;

pub const DETECTING_LABEL: &str = "Detecting location…";

/// Home screen: the current time and where the user is
#[derive(Debug, Clone)]
pub struct HomeScreen {
    now: DateTime<Utc>,
    location: Option<LocationLabel>,
}

impl HomeScreen {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now, location: None }
    }

    pub fn on_tick(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    pub fn set_location(&mut self, label: LocationLabel) {
        self.location = Some(label);
    }

    pub fn location(&self) -> Option<&LocationLabel> {
        self.location.as_ref()
    }

    pub fn location_label(&self) -> &str {
        self.location.as_ref().map_or(DETECTING_LABEL, |l| l.as_str())
    }

    pub fn time_label(&self) -> String {
        self.now.format("%d/%m/%Y, %H:%M:%S").to_string()
    }

    /// Context for the landing wizard. Nothing is carried while the
    /// location is still being detected.
    pub fn landing_payload(&self) -> Option<LandingPayload> {
        self.location.as_ref().map(|l| LandingPayload {
            user_location_label: l.label.clone(),
        })
    }
}
