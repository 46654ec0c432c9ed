use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Partial flight facts entered in the landing wizard.
/// Any field left as `None` falls back to the demo trip value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
}

/// Landing wizard -> journey overview
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JourneyPayload {
    pub flight: FlightOverrides,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff: Option<String>,
}

/// Home -> landing wizard, pre-fills the pickup location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LandingPayload {
    pub user_location_label: String,
}

/// Taxi selection -> payment
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_at: Option<DateTime<Utc>>,
}

/// Context carried along with a screen transition.
///
/// Variant order matters for untagged decoding: the shapes with a required
/// field are tried first, and the all-optional payment shape last.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum NavigationPayload {
    Journey(JourneyPayload),
    Landing(LandingPayload),
    Payment(PaymentPayload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journey_payload_deserialization() {
        let json = r#"
            {
                "flight": { "flightNumber": "LH 901", "date": "2026-10-21" },
                "fromCity": "London",
                "toCity": "Frankfurt"
            }
        "#;
        let payload: NavigationPayload = serde_json::from_str(json).expect("Failed to deserialize");
        match payload {
            NavigationPayload::Journey(journey) => {
                assert_eq!(journey.flight.flight_number.as_deref(), Some("LH 901"));
                assert_eq!(journey.flight.terminal, None);
                assert_eq!(journey.to_city.as_deref(), Some("Frankfurt"));
            }
            other => panic!("expected journey payload, got {:?}", other),
        }
    }

    #[test]
    fn test_landing_and_payment_shapes() {
        let landing: NavigationPayload =
            serde_json::from_str(r#"{ "userLocationLabel": "Baker Street, London" }"#).unwrap();
        assert!(matches!(landing, NavigationPayload::Landing(_)));

        let payment: NavigationPayload =
            serde_json::from_str(r#"{ "amount": "£65", "vehicleType": "Premium" }"#).unwrap();
        match payment {
            NavigationPayload::Payment(p) => {
                assert_eq!(p.amount.as_deref(), Some("£65"));
                assert!(p.pickup_at.is_none());
            }
            other => panic!("expected payment payload, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_terminal_is_omitted() {
        let overrides = FlightOverrides {
            flight_number: Some("BA 287".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&overrides).unwrap();
        assert_eq!(json, serde_json::json!({ "flightNumber": "BA 287" }));
    }
}
