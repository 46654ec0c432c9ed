use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use skypass_core::CoreError;
use skypass_shared::PaymentPayload;
use std::str::FromStr;

/// Bottom-level tab of the journey screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Journey,
    Lounges,
    Rides,
}

/// Sub-screen within the journey tab
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStep {
    #[default]
    Overview,
    Taxi,
    Lounge,
}

/// Which sub-booking to open from the overview
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Taxi,
    Lounge,
}

impl From<BookingKind> for BookingStep {
    fn from(kind: BookingKind) -> Self {
        match kind {
            BookingKind::Taxi => BookingStep::Taxi,
            BookingKind::Lounge => BookingStep::Lounge,
        }
    }
}

/// Mutable navigation state of the journey screen.
/// Default is `(journey, overview)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TripSelection {
    pub active_tab: ActiveTab,
    pub booking_step: BookingStep,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Standard,
    Premium,
    #[serde(rename = "XL")]
    Xl,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Standard => "Standard",
            VehicleType::Premium => "Premium",
            VehicleType::Xl => "XL",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Standard" => Ok(VehicleType::Standard),
            "Premium" => Ok(VehicleType::Premium),
            "XL" => Ok(VehicleType::Xl),
            other => Err(CoreError::UnknownVariant {
                kind: "vehicle type",
                value: other.to_string(),
            }),
        }
    }
}

/// A chosen transfer, waiting to be paid for.
///
/// Handed to the payment screen once; dropped after payment or when the
/// user navigates away.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingRequest {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub amount: String,
    pub vehicle_type: VehicleType,
    pub pickup_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl BookingRequest {
    pub fn new(
        trip_id: Uuid,
        amount: String,
        vehicle_type: VehicleType,
        pickup_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            amount,
            vehicle_type,
            pickup_at,
            created_at,
        }
    }

    /// Navigation context for the payment screen
    pub fn into_payload(self) -> PaymentPayload {
        PaymentPayload {
            amount: Some(self.amount),
            vehicle_type: Some(self.vehicle_type.to_string()),
            pickup_at: Some(self.pickup_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_selection() {
        let selection = TripSelection::default();
        assert_eq!(selection.active_tab, ActiveTab::Journey);
        assert_eq!(selection.booking_step, BookingStep::Overview);
    }

    #[test]
    fn test_vehicle_type_names() {
        assert_eq!("XL".parse::<VehicleType>().unwrap(), VehicleType::Xl);
        assert_eq!(VehicleType::Premium.to_string(), "Premium");
        assert!("Limo".parse::<VehicleType>().is_err());
        assert_eq!(serde_json::to_value(VehicleType::Xl).unwrap(), "XL");
    }

    #[test]
    fn test_request_payload_keeps_amount_and_type() {
        let now = Utc::now();
        let request = BookingRequest::new(Uuid::new_v4(), "£85".to_string(), VehicleType::Xl, now, now);
        let payload = request.into_payload();
        assert_eq!(payload.amount.as_deref(), Some("£85"));
        assert_eq!(payload.vehicle_type.as_deref(), Some("XL"));
        assert_eq!(payload.pickup_at, Some(now));
    }
}
