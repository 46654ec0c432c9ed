use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct TripEstablishedEvent {
    pub trip_id: Uuid,
    pub flight_number: String,
    pub departure_at: i64,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct BookingRequestedEvent {
    pub request_id: Uuid,
    pub trip_id: Uuid,
    pub vehicle_type: String,
    pub amount: String,
    pub pickup_at: i64,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct PaymentConfirmedEvent {
    pub intent_id: String,
    pub amount: String,
    pub status: String,
    pub timestamp: i64,
}

/// In-memory record of a state-replacing transition within one session
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionEvent {
    TripEstablished(TripEstablishedEvent),
    BookingRequested(BookingRequestedEvent),
    PaymentConfirmed(PaymentConfirmedEvent),
}

impl SessionEvent {
    pub fn timestamp(&self) -> i64 {
        match self {
            SessionEvent::TripEstablished(e) => e.timestamp,
            SessionEvent::BookingRequested(e) => e.timestamp,
            SessionEvent::PaymentConfirmed(e) => e.timestamp,
        }
    }
}
