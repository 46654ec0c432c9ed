use skypass_core::{LocationLabel, LocationSource};
use skypass_shared::{FlightOverrides, JourneyPayload};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Flight details
    Flight,
    /// Pickup and drop-off
    Transfer,
}

/// Step one input. Departure airport and terminal are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightForm {
    pub flight_number: String,
    pub from_city: String,
    pub to_city: String,
    pub date: String,
    pub departure_airport: String,
    pub terminal: String,
}

/// What happened to the pickup field on entering step two
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupPrefill {
    /// Already had a value
    Unchanged,
    /// Filled from the label carried over from the home screen
    Carried,
    /// Still empty; the caller should resolve the device location and
    /// hand the label to [`LandingWizard::resolve_pickup`]
    NeedsGeolocation,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Not available on the {0:?} step")]
    WrongStep(WizardStep),

    #[error("Landing wizard is not open")]
    NotOpen,
}

/// Two-step landing form that plans a trip
#[derive(Debug, Clone)]
pub struct LandingWizard {
    step: WizardStep,
    pub flight: FlightForm,
    pub pickup: String,
    pub dropoff: String,
    carried_location: Option<LocationLabel>,
    prefilled: Option<LocationLabel>,
}

impl LandingWizard {
    pub fn new(carried_location: Option<LocationLabel>) -> Self {
        Self {
            step: WizardStep::Flight,
            flight: FlightForm::default(),
            pickup: String::new(),
            dropoff: String::new(),
            carried_location: carried_location.filter(|l| !is_blank(l.as_str())),
            prefilled: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Required step-one fields that are still blank
    pub fn missing_flight_fields(&self) -> Vec<&'static str> {
        let f = &self.flight;
        [
            ("flight number", &f.flight_number),
            ("origin city", &f.from_city),
            ("destination city", &f.to_city),
            ("date", &f.date),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
    }

    pub fn can_continue(&self) -> bool {
        self.missing_flight_fields().is_empty()
    }

    pub fn can_finish(&self) -> bool {
        !is_blank(&self.pickup) && !is_blank(&self.dropoff)
    }

    /// Move to step two, pre-filling whatever is still empty
    pub fn continue_to_transfer(&mut self) -> Result<PickupPrefill, WizardError> {
        if let Some(field) = self.missing_flight_fields().first().copied() {
            return Err(WizardError::MissingField(field));
        }
        self.step = WizardStep::Transfer;

        if is_blank(&self.dropoff) {
            self.dropoff = self.computed_dropoff();
        }

        let prefill = if !is_blank(&self.pickup) {
            PickupPrefill::Unchanged
        } else if let Some(label) = self.carried_location.clone() {
            self.pickup = label.label.clone();
            self.prefilled = Some(label);
            PickupPrefill::Carried
        } else {
            PickupPrefill::NeedsGeolocation
        };
        debug!("Wizard on transfer step, pickup prefill: {:?}", prefill);
        Ok(prefill)
    }

    /// Back to step one. Nothing typed so far is lost.
    pub fn back(&mut self) {
        self.step = WizardStep::Flight;
    }

    /// Apply a geolocation result; only fills an empty pickup
    pub fn resolve_pickup(&mut self, label: &LocationLabel) -> bool {
        if !is_blank(&self.pickup) || is_blank(label.as_str()) {
            return false;
        }
        self.pickup = label.label.clone();
        self.prefilled = Some(label.clone());
        true
    }

    /// Where the pickup came from, while it still holds the pre-filled
    /// value. `None` once the user has typed their own.
    pub fn pickup_source(&self) -> Option<LocationSource> {
        self.prefilled
            .as_ref()
            .filter(|l| l.label == self.pickup)
            .map(|l| l.source)
    }

    /// Suggested drop-off for the departure side of the trip
    pub fn computed_dropoff(&self) -> String {
        let f = &self.flight;
        let airport = f.departure_airport.trim();
        let terminal = f.terminal.trim();
        let from_city = f.from_city.trim();

        if !airport.is_empty() {
            if terminal.is_empty() {
                airport.to_string()
            } else {
                format!("{} {}", airport, terminal)
            }
        } else if !from_city.is_empty() {
            format!("{} Airport Departures", from_city)
        } else {
            "Airport Departures".to_string()
        }
    }

    /// Context for the journey overview. Only available on step two with
    /// every required field filled.
    pub fn finish(&self) -> Result<JourneyPayload, WizardError> {
        if self.step != WizardStep::Transfer {
            return Err(WizardError::WrongStep(self.step));
        }
        if let Some(field) = self.missing_flight_fields().first().copied() {
            return Err(WizardError::MissingField(field));
        }
        if is_blank(&self.pickup) {
            return Err(WizardError::MissingField("pickup location"));
        }
        if is_blank(&self.dropoff) {
            return Err(WizardError::MissingField("drop-off location"));
        }

        let f = &self.flight;
        let terminal = f.terminal.trim();
        info!("Wizard complete for flight {}", f.flight_number.trim());

        Ok(JourneyPayload {
            flight: FlightOverrides {
                flight_number: Some(f.flight_number.trim().to_string()),
                date: Some(f.date.trim().to_string()),
                destination: Some(f.to_city.trim().to_string()),
                terminal: (!terminal.is_empty()).then(|| terminal.to_string()),
            },
            from_city: Some(f.from_city.trim().to_string()),
            to_city: Some(f.to_city.trim().to_string()),
            pickup: Some(self.pickup.trim().to_string()),
            dropoff: Some(self.dropoff.trim().to_string()),
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(carried: Option<&str>) -> LandingWizard {
        let mut wizard = LandingWizard::new(carried.map(LocationLabel::carried));
        wizard.flight.flight_number = "BA 287".to_string();
        wizard.flight.from_city = "London".to_string();
        wizard.flight.to_city = "San Francisco".to_string();
        wizard.flight.date = "2026-10-21".to_string();
        wizard
    }

    #[test]
    fn test_step_one_requires_all_fields() {
        let mut wizard = LandingWizard::new(None);
        assert!(!wizard.can_continue());
        assert_eq!(wizard.missing_flight_fields().len(), 4);

        wizard.flight.flight_number = "BA 287".to_string();
        wizard.flight.from_city = "London".to_string();
        wizard.flight.to_city = "  ".to_string();
        wizard.flight.date = "2026-10-21".to_string();

        assert_eq!(
            wizard.continue_to_transfer(),
            Err(WizardError::MissingField("destination city"))
        );
        assert_eq!(wizard.step(), WizardStep::Flight);
    }

    #[test]
    fn test_carried_location_fills_pickup() {
        let mut wizard = filled(Some("Baker Street, London"));
        assert_eq!(wizard.continue_to_transfer(), Ok(PickupPrefill::Carried));
        assert_eq!(wizard.pickup, "Baker Street, London");
        assert_eq!(wizard.pickup_source(), Some(LocationSource::Carried));
        assert_eq!(wizard.dropoff, "London Airport Departures");
        assert!(wizard.can_finish());

        wizard.pickup = "221B Baker Street".to_string();
        assert_eq!(wizard.pickup_source(), None);
    }

    #[test]
    fn test_geolocation_only_fills_empty_pickup() {
        let mut wizard = filled(None);
        assert_eq!(wizard.continue_to_transfer(), Ok(PickupPrefill::NeedsGeolocation));
        assert!(!wizard.can_finish());

        assert!(wizard.resolve_pickup(&LocationLabel::fallback("Current location")));
        assert!(!wizard.resolve_pickup(&LocationLabel::resolved("Somewhere else")));
        assert_eq!(wizard.pickup, "Current location");
        assert_eq!(wizard.pickup_source(), Some(LocationSource::Fallback));

        wizard.back();
        assert_eq!(wizard.continue_to_transfer(), Ok(PickupPrefill::Unchanged));
    }

    #[test]
    fn test_dropoff_suggestions() {
        let mut wizard = filled(None);
        wizard.flight.departure_airport = "London Heathrow".to_string();
        assert_eq!(wizard.computed_dropoff(), "London Heathrow");
        wizard.flight.terminal = "Terminal 5".to_string();
        assert_eq!(wizard.computed_dropoff(), "London Heathrow Terminal 5");

        let mut bare = LandingWizard::new(None);
        assert_eq!(bare.computed_dropoff(), "Airport Departures");
        bare.dropoff = "Heathrow T5 Departures".to_string();
        bare.flight = filled(None).flight;
        bare.continue_to_transfer().unwrap();
        assert_eq!(bare.dropoff, "Heathrow T5 Departures");
    }

    #[test]
    fn test_finish_builds_journey_payload() {
        let mut wizard = filled(Some("Baker Street, London"));
        assert_eq!(wizard.finish(), Err(WizardError::WrongStep(WizardStep::Flight)));

        wizard.continue_to_transfer().unwrap();
        wizard.dropoff.clear();
        assert_eq!(wizard.finish(), Err(WizardError::MissingField("drop-off location")));

        wizard.dropoff = "Heathrow T5 Departures".to_string();
        let payload = wizard.finish().unwrap();
        assert_eq!(payload.flight.flight_number.as_deref(), Some("BA 287"));
        assert_eq!(payload.flight.destination.as_deref(), Some("San Francisco"));
        assert_eq!(payload.flight.terminal, None);
        assert_eq!(payload.pickup.as_deref(), Some("Baker Street, London"));
    }
}
