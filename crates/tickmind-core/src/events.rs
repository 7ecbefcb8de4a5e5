use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the engine produces an Event.
/// The CLI prints these as JSON lines; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ReminderStarted {
        interval_min: f64,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    ReminderStopped {
        at: DateTime<Utc>,
    },
    /// An interval elapsed: the audible cue and notification were fired and
    /// the next cycle was scheduled.
    AlertFired {
        elapsed_min: f64,
        next_duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// The user acknowledged the notification; the engine stopped itself.
    Acknowledged {
        at: DateTime<Utc>,
    },
    IntervalChanged {
        interval_min: f64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        running: bool,
        interval_min: f64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
}
