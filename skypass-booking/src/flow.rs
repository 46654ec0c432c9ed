use skypass_core::FlightContext;
use skypass_timeline::{PhaseAction, Timeline};
use tracing::{debug, info};

use crate::models::{ActiveTab, BookingKind, BookingRequest, BookingStep, TripSelection, VehicleType};
use crate::offerings::VehicleOption;

/// What the journey area should render for the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyScreen {
    Overview,
    TaxiSelection,
    /// `show_back` is only set when reached from the journey overview
    LoungeSelection { show_back: bool },
}

/// Drives the journey tab and its booking sub-screens.
///
/// Every transition is infallible; combinations that make no sense are
/// simply not reachable through these methods.
#[derive(Debug, Clone, Default)]
pub struct BookingFlow {
    selection: TripSelection,
}

impl BookingFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> TripSelection {
        self.selection
    }

    /// Switch tabs. The booking step is left as it was.
    pub fn select_tab(&mut self, tab: ActiveTab) {
        debug!("Tab {:?} -> {:?}", self.selection.active_tab, tab);
        self.selection.active_tab = tab;
    }

    /// Open a sub-booking screen. Ignored outside the journey tab, where
    /// the dedicated tab screens take over.
    pub fn enter_booking(&mut self, kind: BookingKind) {
        if self.selection.active_tab != ActiveTab::Journey {
            debug!("Ignoring {:?} booking outside the journey tab", kind);
            return;
        }
        self.selection.booking_step = kind.into();
        debug!("Booking step -> {:?}", self.selection.booking_step);
    }

    pub fn return_to_overview(&mut self) {
        self.selection.booking_step = BookingStep::Overview;
        debug!("Booking step -> Overview");
    }

    /// Back to `(journey, overview)`
    pub fn reset(&mut self) {
        self.selection = TripSelection::default();
    }

    /// Follow a phase call-to-action
    pub fn apply(&mut self, action: PhaseAction) {
        match action {
            PhaseAction::BookTaxi => self.enter_booking(BookingKind::Taxi),
            PhaseAction::BookLounge => self.enter_booking(BookingKind::Lounge),
        }
    }

    pub fn screen(&self) -> JourneyScreen {
        match (self.selection.active_tab, self.selection.booking_step) {
            (ActiveTab::Rides, _) => JourneyScreen::TaxiSelection,
            (ActiveTab::Lounges, _) => JourneyScreen::LoungeSelection { show_back: false },
            (ActiveTab::Journey, BookingStep::Overview) => JourneyScreen::Overview,
            (ActiveTab::Journey, BookingStep::Taxi) => JourneyScreen::TaxiSelection,
            (ActiveTab::Journey, BookingStep::Lounge) => JourneyScreen::LoungeSelection { show_back: true },
        }
    }

    /// Pick a transfer. The pickup time is taken from the timeline the
    /// user is looking at, so it matches the displayed recommendation.
    pub fn select_vehicle(
        &self,
        vehicle_type: VehicleType,
        price: &str,
        flight: &FlightContext,
        timeline: &Timeline,
    ) -> BookingRequest {
        let request = BookingRequest::new(
            flight.trip_id,
            price.to_string(),
            vehicle_type,
            timeline.taxi_pickup_at,
            timeline.computed_at,
        );
        info!(
            request_id = %request.id,
            trip_id = %flight.trip_id,
            "Transfer selected: {} for {}, pickup at {}",
            vehicle_type,
            request.amount,
            request.pickup_at.format("%H:%M")
        );
        request
    }

    pub fn select_option(&self, option: &VehicleOption, flight: &FlightContext, timeline: &Timeline) -> BookingRequest {
        self.select_vehicle(option.vehicle_type, &option.price, flight, timeline)
    }
}
