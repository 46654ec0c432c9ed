use std::sync::Arc;
use skypass_app::{Config, Screen, TripSession};
use skypass_booking::{MockPaymentAdapter, VehicleType};
use skypass_core::{Clock, StaticGeolocation, SystemClock};
use skypass_timeline::Timeline;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn log_timeline(timeline: &Timeline, now: chrono::DateTime<chrono::Utc>) {
    for view in timeline.views_at(now) {
        tracing::info!(
            "{} {:<22} {:<8} {}",
            view.phase.time_label(),
            view.phase.title,
            view.status.badge(),
            view.phase.subtitle
        );
    }
    if timeline.is_degraded() {
        tracing::warn!("Timeline degraded: {} phase(s) out of order", timeline.conflicts().len());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skypass_app=debug,skypass_booking=debug,skypass_timeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    tracing::info!("Starting SkyPass session, clock refresh every {:?}", config.tick_period());

    let mut session = TripSession::new(
        config,
        clock,
        Some(Arc::new(StaticGeolocation::new("Baker Street, London"))),
        Arc::new(MockPaymentAdapter::new()),
    );

    // Home, then the landing wizard with the detected location
    session.navigate(Screen::Home, None);
    session.settle_location().await;
    tracing::info!("{} · {}", session.home().time_label(), session.home().location_label());
    session.plan_transfer();

    if let Some(wizard) = session.wizard_mut() {
        wizard.flight.flight_number = "BA 287".to_string();
        wizard.flight.from_city = "London".to_string();
        wizard.flight.to_city = "New York".to_string();
        wizard.flight.date = "Oct 19, 2026".to_string();
        wizard.flight.departure_airport = "Heathrow".to_string();
        wizard.flight.terminal = "Terminal 5".to_string();
    }
    session.wizard_continue()?;
    session.settle_location().await;
    session.wizard_finish()?;

    let overview = session.journey_overview();
    tracing::info!(
        "{} departs {} · {} · {}",
        overview.flight_number,
        overview.departure_time,
        overview.date,
        overview.destination
    );
    log_timeline(&session.timeline(), session.now());

    // Book the recommended transfer and pay for it
    session.follow_phase(skypass_timeline::PhaseKey::Ride);
    session.select_vehicle(VehicleType::Standard);
    if let Some(screen) = session.payment_screen() {
        tracing::info!("{}", screen.pay_label());
    }
    if let Some(receipt) = session.confirm_payment().await {
        tracing::info!("Payment {}", receipt.status.as_str());
    }
    tracing::debug!("Session events: {}", serde_json::to_string(session.events())?);

    if !session.is_ticking() {
        session.navigate(Screen::Journey, None);
    }
    loop {
        tokio::select! {
            tick = session.next_tick() => {
                let Some(now) = tick else { break };
                log_timeline(&session.timeline_at(now), now);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
