pub mod phase;
pub mod computer;
pub mod status;

pub use phase::{Accent, CallToAction, PhaseAction, PhaseEvent, PhaseKey, SponsoredContent};
pub use computer::{ScheduleConflict, Timeline, TimelineComputer, TimelineOffsets, MAX_OFFSET_MINUTES};
pub use status::{derive_statuses, PhaseStatus, PhaseView};
