use chrono::{DateTime, Utc};
use skypass_booking::{
    ActiveTab, BookingFlow, BookingKind, JourneyOverview, JourneyScreen, LandingWizard, LoungeOption, PaymentOrchestrator,
    PaymentReceipt, PaymentScreen, PickupPrefill, TripSelection, VehicleOption, VehicleType, WizardError,
};
use skypass_core::{Clock, FlightContext, GeolocationProvider, LocationLabel, PaymentAdapter, PaymentStatus};
use skypass_shared::models::events::{BookingRequestedEvent, PaymentConfirmedEvent, TripEstablishedEvent};
use skypass_shared::{FlightOverrides, NavigationPayload, SessionEvent};
use skypass_timeline::{PhaseKey, Timeline, TimelineComputer};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::app_config::Config;
use crate::clock::{ClockSource, ClockSubscription};
use crate::geolocation::{LocationResolver, LocationTask};
use crate::home::HomeScreen;
use crate::navigation::{Navigator, Screen};

/// Which screen is waiting on a geolocation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationTarget {
    Home,
    Pickup,
}

/// Owns the trip context for one page session.
///
/// The flight and the booking selection are only replaced through the
/// methods here; every screen reads them, none keeps its own copy.
pub struct TripSession {
    config: Config,
    clock: Arc<dyn Clock>,
    ticker: ClockSource,
    /// Live only while a screen that shows the time is mounted
    ticks: Option<ClockSubscription>,
    computer: TimelineComputer,
    locations: LocationResolver,
    payments: PaymentOrchestrator,
    navigator: Navigator,
    flight: FlightContext,
    flow: BookingFlow,
    home: HomeScreen,
    wizard: Option<LandingWizard>,
    payment: Option<PaymentScreen>,
    pending_location: Option<(LocationTarget, LocationTask)>,
    events: Vec<SessionEvent>,
}

impl TripSession {
    /// Start a session on the demonstration trip. Nothing is mounted until
    /// the first [`TripSession::navigate`].
    pub fn new(
        config: Config,
        clock: Arc<dyn Clock>,
        geolocation: Option<Arc<dyn GeolocationProvider>>,
        payments: Arc<dyn PaymentAdapter>,
    ) -> Self {
        let now = clock.now();
        let flight = FlightContext::demo(now, config.departure_lead());
        info!(trip_id = %flight.trip_id, "Session started on demo flight {}", flight.flight_number);

        Self {
            ticker: ClockSource::new(clock.clone(), config.tick_period()),
            ticks: None,
            computer: TimelineComputer::new(config.timeline.clone()),
            locations: LocationResolver::new(geolocation, config.position_options(), clock.clone()),
            payments: PaymentOrchestrator::new(payments),
            navigator: Navigator::new(),
            flow: BookingFlow::new(),
            home: HomeScreen::new(now),
            wizard: None,
            payment: None,
            pending_location: None,
            events: Vec::new(),
            flight,
            clock,
            config,
        }
    }

    // --- navigation ---

    pub fn current_screen(&self) -> Option<Screen> {
        self.navigator.current_screen()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Leave the current screen and mount `screen` with `payload`.
    /// The clock refresh, pending geolocation work and unconsumed payment
    /// context belong to the screen being left and are discarded.
    pub fn navigate(&mut self, screen: Screen, payload: Option<NavigationPayload>) {
        if self.ticks.take().is_some() {
            debug!("Stopping clock refresh on unmount");
        }
        if let Some((target, task)) = self.pending_location.take() {
            debug!("Cancelling {:?} geolocation on unmount", target);
            task.cancel();
        }
        if self.payment.take().is_some() {
            debug!("Discarding unpaid payment context");
        }
        self.wizard = None;

        self.navigator.navigate(screen, payload);
        let payload = self.navigator.take_payload();

        match screen {
            Screen::Home => {
                self.home = HomeScreen::new(self.clock.now());
                self.ticks = Some(self.ticker.subscribe());
                let task = self.locations.spawn(self.config.geolocation.home_fallback.clone());
                self.pending_location = Some((LocationTarget::Home, task));
            }
            Screen::Landing => {
                let carried = match payload {
                    Some(NavigationPayload::Landing(p)) => Some(LocationLabel::carried(p.user_location_label)),
                    _ => None,
                };
                self.wizard = Some(LandingWizard::new(carried));
            }
            Screen::Journey => {
                if let Some(NavigationPayload::Journey(p)) = payload {
                    self.establish_trip(&p.flight);
                }
                self.ticks = Some(self.ticker.subscribe());
            }
            Screen::Payment => {
                let payload = match payload {
                    Some(NavigationPayload::Payment(p)) => Some(p),
                    Some(other) => {
                        warn!("Payment screen ignoring unrelated context: {:?}", other);
                        None
                    }
                    None => None,
                };
                self.payment = Some(PaymentScreen::from_payload(payload));
            }
            Screen::Settings | Screen::Adventure | Screen::Logout => {}
        }
    }

    /// Home's "plan transfer" action
    pub fn plan_transfer(&mut self) {
        let payload = self.home.landing_payload().map(NavigationPayload::Landing);
        self.navigate(Screen::Landing, payload);
    }

    // --- home ---

    pub fn home(&self) -> &HomeScreen {
        &self.home
    }

    // --- landing wizard ---

    pub fn wizard(&self) -> Option<&LandingWizard> {
        self.wizard.as_ref()
    }

    pub fn wizard_mut(&mut self) -> Option<&mut LandingWizard> {
        self.wizard.as_mut()
    }

    /// Move the wizard to its transfer step, asking for a position when
    /// nothing was carried over from home
    pub fn wizard_continue(&mut self) -> Result<PickupPrefill, WizardError> {
        let wizard = self.wizard.as_mut().ok_or(WizardError::NotOpen)?;
        let prefill = wizard.continue_to_transfer()?;
        if prefill == PickupPrefill::NeedsGeolocation && self.pending_location.is_none() {
            let task = self.locations.spawn(self.config.geolocation.landing_fallback.clone());
            self.pending_location = Some((LocationTarget::Pickup, task));
        }
        Ok(prefill)
    }

    /// Complete the wizard and open the journey for the new trip
    pub fn wizard_finish(&mut self) -> Result<(), WizardError> {
        let wizard = self.wizard.as_ref().ok_or(WizardError::NotOpen)?;
        let payload = wizard.finish()?;
        self.navigate(Screen::Journey, Some(NavigationPayload::Journey(payload)));
        Ok(())
    }

    /// Wait for the pending geolocation result, if any, and hand it to the
    /// screen that asked. Returns the target that received a label.
    pub async fn settle_location(&mut self) -> Option<LocationTarget> {
        let (target, task) = self.pending_location.take()?;
        let label = task.wait().await?;

        match target {
            LocationTarget::Home => {
                debug!("Home location: {}", label);
                self.home.set_location(label);
            }
            LocationTarget::Pickup => {
                let Some(wizard) = self.wizard.as_mut() else {
                    return None;
                };
                if !wizard.resolve_pickup(&label) {
                    debug!("Pickup already filled, dropping resolved label {}", label);
                }
            }
        }
        Some(target)
    }

    // --- trip context ---

    /// Replace the trip wholesale and return the flow to its initial state
    pub fn establish_trip(&mut self, overrides: &FlightOverrides) {
        let now = self.clock.now();
        self.flight = FlightContext::from_overrides(overrides, now, self.config.departure_lead());
        self.flow.reset();

        info!(
            trip_id = %self.flight.trip_id,
            "Trip established: {} to {} on {}, departs {}",
            self.flight.flight_number,
            self.flight.destination,
            self.flight.date,
            self.flight.departure_label()
        );
        self.events.push(SessionEvent::TripEstablished(TripEstablishedEvent {
            trip_id: self.flight.trip_id,
            flight_number: self.flight.flight_number.clone(),
            departure_at: self.flight.departure_at.timestamp(),
            timestamp: now.timestamp(),
        }));
    }

    pub fn flight(&self) -> &FlightContext {
        &self.flight
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The timeline as of the session clock
    pub fn timeline(&self) -> Timeline {
        self.timeline_at(self.clock.now())
    }

    pub fn timeline_at(&self, now: DateTime<Utc>) -> Timeline {
        self.computer.compute(&self.flight, now)
    }

    /// Clock refresh. Everything derived from "now" is recomputed on read;
    /// only the home screen keeps a copy of the instant.
    pub fn on_tick(&mut self, now: DateTime<Utc>) {
        self.home.on_tick(now);
    }

    /// Whether the mounted screen receives clock refreshes
    pub fn is_ticking(&self) -> bool {
        self.ticks.is_some()
    }

    /// Wait for the next clock refresh of the mounted screen and apply it.
    /// `None` right away when the screen does not show the time.
    pub async fn next_tick(&mut self) -> Option<DateTime<Utc>> {
        let now = self.ticks.as_mut()?.next_tick().await?;
        self.on_tick(now);
        Some(now)
    }

    pub fn journey_overview(&self) -> JourneyOverview {
        JourneyOverview::new(&self.flight, &self.timeline())
    }

    // --- booking flow ---

    pub fn selection(&self) -> TripSelection {
        self.flow.selection()
    }

    pub fn journey_screen(&self) -> JourneyScreen {
        self.flow.screen()
    }

    pub fn select_tab(&mut self, tab: ActiveTab) {
        self.flow.select_tab(tab);
    }

    pub fn enter_booking(&mut self, kind: BookingKind) {
        self.flow.enter_booking(kind);
    }

    pub fn return_to_overview(&mut self) {
        self.flow.return_to_overview();
    }

    /// Bottom navigation's Journey control
    pub fn reset_journey(&mut self) {
        self.flow.reset();
    }

    /// Follow the call-to-action of a phase card. Returns false when the
    /// phase has no in-app action.
    pub fn follow_phase(&mut self, key: PhaseKey) -> bool {
        let timeline = self.timeline();
        let action = timeline
            .phase(key)
            .and_then(|p| p.call_to_action.as_ref())
            .and_then(|cta| cta.action);

        match action {
            Some(action) => {
                self.flow.apply(action);
                true
            }
            None => false,
        }
    }

    pub fn vehicle_options(&self) -> Vec<VehicleOption> {
        VehicleOption::fleet()
    }

    pub fn lounge_options(&self) -> Vec<LoungeOption> {
        LoungeOption::at_terminal(&self.flight.terminal)
    }

    /// Pick a transfer from the fleet and move to payment. Unknown vehicle
    /// types are ignored.
    pub fn select_vehicle(&mut self, vehicle_type: VehicleType) -> bool {
        let Some(option) = VehicleOption::find(vehicle_type) else {
            warn!("No {} in the fleet", vehicle_type);
            return false;
        };

        let timeline = self.timeline();
        let request = self.flow.select_option(&option, &self.flight, &timeline);
        self.events.push(SessionEvent::BookingRequested(BookingRequestedEvent {
            request_id: request.id,
            trip_id: request.trip_id,
            vehicle_type: request.vehicle_type.to_string(),
            amount: request.amount.clone(),
            pickup_at: request.pickup_at.timestamp(),
            timestamp: request.created_at.timestamp(),
        }));

        self.navigate(Screen::Payment, Some(NavigationPayload::Payment(request.into_payload())));
        true
    }

    // --- payment ---

    pub fn payment_screen(&self) -> Option<&PaymentScreen> {
        self.payment.as_ref()
    }

    pub fn payment_screen_mut(&mut self) -> Option<&mut PaymentScreen> {
        self.payment.as_mut()
    }

    /// Pay for the pending request. The payment context is consumed; on
    /// success the journey starts over at its overview.
    pub async fn confirm_payment(&mut self) -> Option<PaymentReceipt> {
        let screen = self.payment.take()?;
        let receipt = screen.confirm(&self.payments).await;

        if receipt.status == PaymentStatus::Succeeded {
            self.events.push(SessionEvent::PaymentConfirmed(PaymentConfirmedEvent {
                intent_id: receipt.intent_id.clone().unwrap_or_default(),
                amount: receipt.amount.clone(),
                status: receipt.status.as_str().to_string(),
                timestamp: self.clock.now().timestamp(),
            }));
            self.flow.reset();
            self.navigate(Screen::Journey, None);
        } else {
            warn!("Payment of {} did not succeed: {}", receipt.amount, receipt.status.as_str());
        }
        Some(receipt)
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }
}
