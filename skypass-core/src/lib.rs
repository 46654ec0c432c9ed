pub mod clock;
pub mod flight;
pub mod location;
pub mod payment;

pub use clock::{Clock, ManualClock, SystemClock};
pub use flight::FlightContext;
pub use location::{
    GeolocationError, GeolocationProvider, LocationLabel, LocationSource, Position, PositionOptions,
    StaticGeolocation, UnavailableGeolocation,
};
pub use payment::{PaymentAdapter, PaymentIntent, PaymentMethod, PaymentStatus};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown {kind}: {value}")]
    UnknownVariant {
        kind: &'static str,
        value: String,
    },
}
