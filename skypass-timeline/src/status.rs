use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::phase::PhaseEvent;

/// Lifecycle of a phase relative to "now". Derived on every tick, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseStatus {
    Completed,
    Current,
    Upcoming,
}

impl PhaseStatus {
    /// Short badge text
    pub fn badge(&self) -> &'static str {
        match self {
            PhaseStatus::Completed => "Done",
            PhaseStatus::Current => "Now",
            PhaseStatus::Upcoming => "Upcoming",
        }
    }
}

/// A phase together with its status at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseView<'a> {
    pub phase: &'a PhaseEvent,
    pub status: PhaseStatus,
}

/// Status of every phase at `now`, index-aligned with `phases`.
///
/// A phase strictly before `now` is completed. Of the rest, the earliest
/// one is current (first by position on ties); everything else is upcoming.
/// Works on unsorted input too.
pub fn derive_statuses(now: DateTime<Utc>, phases: &[PhaseEvent]) -> Vec<PhaseStatus> {
    let current = phases
        .iter()
        .enumerate()
        .filter(|(_, p)| p.time >= now)
        .min_by_key(|(i, p)| (p.time, *i))
        .map(|(i, _)| i);

    phases
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if p.time < now {
                PhaseStatus::Completed
            } else if Some(i) == current {
                PhaseStatus::Current
            } else {
                PhaseStatus::Upcoming
            }
        })
        .collect()
}
