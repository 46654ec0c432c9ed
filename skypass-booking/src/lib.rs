pub mod models;
pub mod flow;
pub mod offerings;
pub mod overview;
pub mod wizard;
pub mod payment;

pub use models::{ActiveTab, BookingKind, BookingRequest, BookingStep, TripSelection, VehicleType};
pub use flow::{BookingFlow, JourneyScreen};
pub use offerings::{Crowding, LoungeOption, VehicleOption};
pub use overview::JourneyOverview;
pub use wizard::{LandingWizard, PickupPrefill, WizardError, WizardStep};
pub use payment::{MockPaymentAdapter, PaymentOrchestrator, PaymentReceipt, PaymentScreen};
