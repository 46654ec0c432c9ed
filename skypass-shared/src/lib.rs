pub mod models;

pub use models::events::SessionEvent;
pub use models::navigation::{FlightOverrides, JourneyPayload, LandingPayload, NavigationPayload, PaymentPayload};
