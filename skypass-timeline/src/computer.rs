use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use skypass_core::FlightContext;

use crate::phase::{Accent, CallToAction, PhaseAction, PhaseEvent, PhaseKey, SponsoredContent};
use crate::status::{derive_statuses, PhaseView};

/// Offsets are clamped to `0..=MAX_OFFSET_MINUTES` before use
pub const MAX_OFFSET_MINUTES: i64 = 7 * 24 * 60;

/// Fixed offsets of each phase from its anchor.
///
/// The first three are counted forward from the current instant, the last
/// two backward from the flight's departure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimelineOffsets {
    pub taxi_pickup_minutes: i64,
    pub airport_arrival_minutes: i64,
    pub lounge_entry_minutes: i64,
    pub gate_leave_minutes: i64,
    pub boarding_minutes: i64,
}

impl TimelineOffsets {
    pub fn clamped(&self) -> Self {
        let clamp = |minutes: i64| minutes.clamp(0, MAX_OFFSET_MINUTES);
        Self {
            taxi_pickup_minutes: clamp(self.taxi_pickup_minutes),
            airport_arrival_minutes: clamp(self.airport_arrival_minutes),
            lounge_entry_minutes: clamp(self.lounge_entry_minutes),
            gate_leave_minutes: clamp(self.gate_leave_minutes),
            boarding_minutes: clamp(self.boarding_minutes),
        }
    }
}

impl Default for TimelineOffsets {
    fn default() -> Self {
        Self {
            taxi_pickup_minutes: 15,
            airport_arrival_minutes: 75,
            lounge_entry_minutes: 90,
            gate_leave_minutes: 30,
            boarding_minutes: 20,
        }
    }
}

/// Two phases that are consecutive in the itinerary but scheduled backwards.
/// Happens when the departure is too close to "now" for the now-anchored
/// phases to fit in front of the departure-anchored ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleConflict {
    /// The phase that should come first but is scheduled later
    pub earlier: PhaseKey,
    pub later: PhaseKey,
    pub overlap_minutes: i64,
}

/// Ordered itinerary for one trip at one instant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timeline {
    pub computed_at: DateTime<Utc>,
    pub taxi_pickup_at: DateTime<Utc>,
    phases: Vec<PhaseEvent>,
    conflicts: Vec<ScheduleConflict>,
}

impl Timeline {
    /// Phases sorted by ascending time
    pub fn phases(&self) -> &[PhaseEvent] {
        &self.phases
    }

    pub fn conflicts(&self) -> &[ScheduleConflict] {
        &self.conflicts
    }

    /// True when the sorted order differs from the itinerary order
    pub fn is_degraded(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn phase(&self, key: PhaseKey) -> Option<&PhaseEvent> {
        self.phases.iter().find(|p| p.key == key)
    }

    /// Phases paired with their status at `now`
    pub fn views_at(&self, now: DateTime<Utc>) -> Vec<PhaseView<'_>> {
        derive_statuses(now, &self.phases)
            .into_iter()
            .zip(self.phases.iter())
            .map(|(status, phase)| PhaseView { phase, status })
            .collect()
    }
}

/// Derives the itinerary from a flight and the current instant
#[derive(Debug, Clone, Default)]
pub struct TimelineComputer {
    offsets: TimelineOffsets,
}

impl TimelineComputer {
    pub fn new(offsets: TimelineOffsets) -> Self {
        let clamped = offsets.clamped();
        if clamped != offsets {
            tracing::warn!("Timeline offsets out of range, clamped to {:?}", clamped);
        }
        Self { offsets: clamped }
    }

    pub fn offsets(&self) -> &TimelineOffsets {
        &self.offsets
    }

    /// Pure function of `flight` and `now`; safe to call on every tick.
    pub fn compute(&self, flight: &FlightContext, now: DateTime<Utc>) -> Timeline {
        let o = &self.offsets;
        let departure = flight.departure_at;

        let taxi_pickup_at = shift(now, o.taxi_pickup_minutes);
        let arrival_at = shift(now, o.airport_arrival_minutes);
        let lounge_at = shift(now, o.lounge_entry_minutes);
        let gate_at = shift(departure, -o.gate_leave_minutes);
        let boarding_at = shift(departure, -o.boarding_minutes);

        let mut phases = vec![
            PhaseEvent {
                key: PhaseKey::Ride,
                title: "Taxi Pickup".to_string(),
                subtitle: "From your location".to_string(),
                time: taxi_pickup_at,
                accent: Accent::Transport,
                call_to_action: Some(CallToAction::new("Book Taxi", Some(PhaseAction::BookTaxi))),
                sponsored: None,
            },
            PhaseEvent {
                key: PhaseKey::Airport,
                title: "Arrive at Airport".to_string(),
                subtitle: format!("{} · {}", flight.terminal, lead_label(departure - arrival_at)),
                time: arrival_at,
                accent: Accent::Location,
                call_to_action: Some(CallToAction::new("Get Directions", None)),
                sponsored: Some(SponsoredContent::samsonite()),
            },
            PhaseEvent {
                key: PhaseKey::Lounge,
                title: "Priority Pass Lounge".to_string(),
                subtitle: format!("Relax before your flight · {}", flight.terminal),
                time: lounge_at,
                accent: Accent::Lounge,
                call_to_action: Some(CallToAction::new("Book Lounge", Some(PhaseAction::BookLounge))),
                sponsored: Some(SponsoredContent::nike()),
            },
            PhaseEvent {
                key: PhaseKey::Gate,
                title: "Leave for Gate".to_string(),
                subtitle: format!("Gate {}", flight.gate),
                time: gate_at,
                accent: Accent::GateCall,
                call_to_action: Some(CallToAction::new("Open Gate Info", None)),
                sponsored: None,
            },
            PhaseEvent {
                key: PhaseKey::Boarding,
                title: "Boarding".to_string(),
                subtitle: format!("Gate {} · {}", flight.gate, flight.flight_number),
                time: boarding_at,
                accent: Accent::GateCall,
                call_to_action: Some(CallToAction::new("Show Boarding Pass", None)),
                sponsored: None,
            },
            PhaseEvent {
                key: PhaseKey::Flight,
                title: "Flight Departure".to_string(),
                subtitle: flight.flight_number.clone(),
                time: departure,
                accent: Accent::Flight,
                call_to_action: Some(CallToAction::new("View Boarding Pass", None)),
                sponsored: None,
            },
        ];

        let conflicts = detect_conflicts(&phases);
        for conflict in &conflicts {
            tracing::warn!(
                trip_id = %flight.trip_id,
                "Schedule conflict: {} is {} min after {}",
                conflict.earlier,
                conflict.overlap_minutes,
                conflict.later
            );
        }

        // stable, so equal times keep itinerary order
        phases.sort_by_key(|p| p.time);

        Timeline {
            computed_at: now,
            taxi_pickup_at,
            phases,
            conflicts,
        }
    }
}

/// Consecutive itinerary pairs whose times run backwards.
/// Expects `phases` in canonical order.
fn detect_conflicts(phases: &[PhaseEvent]) -> Vec<ScheduleConflict> {
    phases
        .windows(2)
        .filter(|pair| pair[1].time < pair[0].time)
        .map(|pair| ScheduleConflict {
            earlier: pair[0].key,
            later: pair[1].key,
            overlap_minutes: (pair[0].time - pair[1].time).num_minutes(),
        })
        .collect()
}

/// `anchor` moved by `minutes`; stays at `anchor` if that leaves chrono's range
fn shift(anchor: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    Duration::try_minutes(minutes)
        .and_then(|d| anchor.checked_add_signed(d))
        .unwrap_or(anchor)
}

fn lead_label(lead: Duration) -> String {
    let minutes = lead.num_minutes();
    if minutes <= 0 {
        return "at departure time".to_string();
    }
    format!("{}h {}m before flight", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    fn flight_departing_in(minutes: i64) -> FlightContext {
        FlightContext::demo(now(), Duration::minutes(minutes))
    }

    #[test]
    fn test_default_trip_offsets() {
        let computer = TimelineComputer::default();
        let flight = flight_departing_in(210);
        let timeline = computer.compute(&flight, now());

        assert_eq!(timeline.phases().len(), 6);
        let at = |key| timeline.phase(key).unwrap().time;
        assert_eq!(at(PhaseKey::Ride), now() + Duration::minutes(15));
        assert_eq!(at(PhaseKey::Airport), now() + Duration::minutes(75));
        assert_eq!(at(PhaseKey::Lounge), now() + Duration::minutes(90));
        assert_eq!(at(PhaseKey::Gate), flight.departure_at - Duration::minutes(30));
        assert_eq!(at(PhaseKey::Boarding), flight.departure_at - Duration::minutes(20));
        assert_eq!(at(PhaseKey::Flight), flight.departure_at);
        assert_eq!(timeline.taxi_pickup_at, at(PhaseKey::Ride));
    }

    #[test]
    fn test_default_trip_is_strictly_ordered() {
        let timeline = TimelineComputer::default().compute(&flight_departing_in(210), now());

        let keys: Vec<PhaseKey> = timeline.phases().iter().map(|p| p.key).collect();
        assert_eq!(keys, PhaseKey::ALL.to_vec());
        assert!(timeline.phases().windows(2).all(|w| w[0].time < w[1].time));
        assert!(!timeline.is_degraded());
    }

    #[test]
    fn test_close_departure_is_flagged_and_sorted() {
        let timeline = TimelineComputer::default().compute(&flight_departing_in(60), now());

        assert!(timeline.is_degraded());
        assert_eq!(
            timeline.conflicts(),
            &[ScheduleConflict {
                earlier: PhaseKey::Lounge,
                later: PhaseKey::Gate,
                overlap_minutes: 60,
            }]
        );

        assert_eq!(timeline.phases().len(), 6);
        assert!(timeline.phases().windows(2).all(|w| w[0].time <= w[1].time));
        assert_eq!(timeline.phases()[0].key, PhaseKey::Ride);
        assert_eq!(timeline.phases()[1].key, PhaseKey::Gate);
        assert_eq!(timeline.phases()[5].key, PhaseKey::Lounge);
    }

    #[test]
    fn test_sorted_for_any_departure() {
        let computer = TimelineComputer::default();
        for minutes in [-120, 0, 15, 45, 89, 90, 91, 120, 600] {
            let timeline = computer.compute(&flight_departing_in(minutes), now());
            assert_eq!(timeline.phases().len(), 6);
            assert!(
                timeline.phases().windows(2).all(|w| w[0].time <= w[1].time),
                "unsorted for departure in {} min",
                minutes
            );
        }
    }

    #[test]
    fn test_recomputation_is_deterministic() {
        let computer = TimelineComputer::default();
        let flight = flight_departing_in(210);
        assert_eq!(computer.compute(&flight, now()), computer.compute(&flight, now()));

        // now-anchored phases move with the clock, departure-anchored ones stay
        let later = computer.compute(&flight, now() + Duration::minutes(30));
        assert_eq!(later.phase(PhaseKey::Ride).unwrap().time, now() + Duration::minutes(45));
        assert_eq!(later.phase(PhaseKey::Flight).unwrap().time, flight.departure_at);
    }

    #[test]
    fn test_phase_texts() {
        let timeline = TimelineComputer::default().compute(&flight_departing_in(210), now());

        let airport = timeline.phase(PhaseKey::Airport).unwrap();
        assert_eq!(airport.subtitle, "Terminal 5 · 2h 15m before flight");
        assert_eq!(airport.sponsored.as_ref().unwrap().brand, "Samsonite");

        let ride = timeline.phase(PhaseKey::Ride).unwrap();
        assert_eq!(ride.time_label(), "09:15");
        assert_eq!(
            ride.call_to_action.as_ref().unwrap().action,
            Some(PhaseAction::BookTaxi)
        );

        assert_eq!(timeline.phase(PhaseKey::Gate).unwrap().subtitle, "Gate A23");
        assert_eq!(timeline.phase(PhaseKey::Flight).unwrap().subtitle, "BA 287");
    }

    #[test]
    fn test_custom_offsets() {
        let computer = TimelineComputer::new(TimelineOffsets {
            taxi_pickup_minutes: 5,
            ..Default::default()
        });
        let timeline = computer.compute(&flight_departing_in(210), now());
        assert_eq!(timeline.taxi_pickup_at, now() + Duration::minutes(5));
    }

    #[test]
    fn test_oversized_offsets_are_clamped() {
        let computer = TimelineComputer::new(TimelineOffsets {
            taxi_pickup_minutes: i64::MAX,
            gate_leave_minutes: i64::MIN,
            ..Default::default()
        });
        assert_eq!(computer.offsets().taxi_pickup_minutes, MAX_OFFSET_MINUTES);
        assert_eq!(computer.offsets().gate_leave_minutes, 0);

        let flight = flight_departing_in(210);
        let timeline = computer.compute(&flight, now());
        assert_eq!(timeline.taxi_pickup_at, now() + Duration::minutes(MAX_OFFSET_MINUTES));
        assert_eq!(timeline.phase(PhaseKey::Gate).unwrap().time, flight.departure_at);
    }

    #[test]
    fn test_shift_stays_in_range() {
        let edge = DateTime::<Utc>::MAX_UTC;
        assert_eq!(shift(edge, 15), edge);
        assert_eq!(shift(now(), i64::MAX), now());
    }
}
