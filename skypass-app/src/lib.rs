pub mod app_config;
pub mod clock;
pub mod geolocation;
pub mod home;
pub mod navigation;
pub mod session;

pub use app_config::Config;
pub use clock::{ClockSource, ClockSubscription};
pub use geolocation::{LocationResolver, LocationTask};
pub use home::HomeScreen;
pub use navigation::{Navigator, Route, Screen};
pub use session::{LocationTarget, TripSession};
