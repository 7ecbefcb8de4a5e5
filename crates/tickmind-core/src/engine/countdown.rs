//! Countdown engine implementation.
//!
//! The engine is a wall-clock-based state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` periodically
//! (nominally once per second) and `reconcile()` after a scheduling gap.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Counting -> (alert cycle, re-entrant) -> Counting | Idle
//! ```
//!
//! Remaining time is always recomputed from the target timestamp. A driver
//! whose ticks are throttled, coalesced, or suspended outright cannot make
//! the countdown lose time: the next tick or reconcile lands on the value
//! the wall clock dictates.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::{AckReceiver, AudioCue, Notifier, StopHandle};
use crate::clock::Clock;
use crate::error::ConfigError;
use crate::events::Event;
use crate::interval::IntervalLength;
use crate::prefs::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Idle,
    Counting,
}

/// Core countdown engine.
///
/// Owns the timer state exclusively; drivers read derived values and invoke
/// the operations, nothing else. All mutation happens on the caller's
/// thread - asynchrony enters only through the alert primitives, which
/// report back over the acknowledgment channel.
pub struct CountdownEngine {
    prefs: Box<dyn PreferenceStore>,
    audio: Box<dyn AudioCue>,
    notifier: Box<dyn Notifier>,
    clock: Arc<dyn Clock>,
    state: EngineState,
    /// Cached interval length; refreshed from the store on explicit change.
    interval: IntervalLength,
    /// Wall-clock instant the current cycle's alert fires. `Some` iff counting.
    target: Option<DateTime<Utc>>,
    /// Length the current cycle was started with. A mid-cycle interval
    /// change applies to the next cycle only.
    cycle_len: Option<IntervalLength>,
    /// Display-facing remaining time; derived, never decremented.
    remaining_secs: u64,
    /// Present while an alert's audible cue may still be sounding.
    active_cue: Option<Box<dyn StopHandle>>,
    acks: AckReceiver,
}

impl CountdownEngine {
    pub fn new(
        prefs: Box<dyn PreferenceStore>,
        audio: Box<dyn AudioCue>,
        notifier: Box<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let interval = prefs.interval();
        Self {
            prefs,
            audio,
            notifier,
            clock,
            state: EngineState::Idle,
            interval,
            target: None,
            cycle_len: None,
            remaining_secs: interval.as_secs(),
            active_cue: None,
            acks: AckReceiver::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn running(&self) -> bool {
        self.state == EngineState::Counting
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn interval(&self) -> IntervalLength {
        self.interval
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            running: self.running(),
            interval_min: self.interval.minutes(),
            remaining_secs: self.remaining_secs,
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a countdown cycle. No-op while already counting or when the
    /// interval rounds to zero seconds.
    pub fn start(&mut self) -> Option<Event> {
        if self.running() {
            return None;
        }
        if self.interval.is_zero() {
            tracing::debug!("start rejected: interval is zero");
            return None;
        }
        // An acknowledgment raced against a stop/start pair belongs to a
        // cycle that no longer exists; it must not kill this one.
        self.acks.drain();

        let now = self.clock.now();
        let secs = self.interval.as_secs();
        self.target = Some(now + Duration::seconds(secs as i64));
        self.cycle_len = Some(self.interval);
        self.remaining_secs = secs;
        self.state = EngineState::Counting;
        Some(Event::ReminderStarted {
            interval_min: self.interval.minutes(),
            duration_secs: secs,
            at: now,
        })
    }

    /// Stop the countdown, silencing any still-sounding cue first.
    /// Idempotent: stopping while idle is a no-op.
    pub fn stop(&mut self) -> Option<Event> {
        self.cancel_cue();
        if !self.running() {
            return None;
        }
        self.state = EngineState::Idle;
        self.target = None;
        self.cycle_len = None;
        // Show the next interval's full duration, not zero.
        self.remaining_secs = self.interval.as_secs();
        Some(Event::ReminderStopped {
            at: self.clock.now(),
        })
    }

    /// Call roughly once per second while counting.
    ///
    /// Returns `Some(Event::AlertFired)` when an interval elapses and
    /// `Some(Event::Acknowledged)` when a pending acknowledgment halts the
    /// engine. Ticking while idle is a no-op.
    pub fn tick(&mut self) -> Option<Event> {
        self.advance()
    }

    /// Forced recomputation outside the normal cadence.
    ///
    /// Call when the driver regains scheduling fidelity (the process was
    /// suspended, the tick sleep overslept). Idempotent; same elapse
    /// handling as `tick()`, so a gap spanning the target fires the alert
    /// cycle here rather than waiting for the next scheduled tick.
    pub fn reconcile(&mut self) -> Option<Event> {
        self.advance()
    }

    /// Update the interval preference, writing through the store.
    ///
    /// When idle the displayed remaining time resets to the new duration.
    /// A running cycle completes at the length it was started with.
    pub fn on_interval_change(&mut self, new: IntervalLength) -> Result<Option<Event>, ConfigError> {
        self.prefs.set_interval(new)?;
        self.interval = new;
        if !self.running() {
            self.remaining_secs = new.as_secs();
        }
        Ok(Some(Event::IntervalChanged {
            interval_min: new.minutes(),
            at: self.clock.now(),
        }))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) -> Option<Event> {
        if !self.running() {
            return None;
        }
        if self.acks.drain() {
            return self.acknowledge();
        }

        let now = self.clock.now();
        let target = self.target?;
        let remaining = clamped_remaining(target, now);
        if remaining > 0 {
            self.remaining_secs = remaining;
            return None;
        }

        // Interval elapsed: exactly one alert cycle, then reschedule with
        // the current preference.
        let elapsed = self.cycle_len.unwrap_or(self.interval);
        self.run_alert_cycle(elapsed);

        let secs = self.interval.as_secs();
        self.target = Some(now + Duration::seconds(secs as i64));
        self.cycle_len = Some(self.interval);
        self.remaining_secs = secs;
        Some(Event::AlertFired {
            elapsed_min: elapsed.minutes(),
            next_duration_secs: secs,
            at: now,
        })
    }

    /// The user acknowledged the notification: silence the cue and halt.
    fn acknowledge(&mut self) -> Option<Event> {
        let at = self.clock.now();
        self.stop();
        Some(Event::Acknowledged { at })
    }

    fn run_alert_cycle(&mut self, elapsed: IntervalLength) {
        // A cue from an earlier cycle still sounding is superseded.
        self.cancel_cue();
        match self.audio.play() {
            Ok(handle) => self.active_cue = Some(handle),
            Err(err) => tracing::warn!(error = %err, "audible cue unavailable"),
        }
        if let Err(err) = self.notifier.notify(elapsed, self.acks.handle()) {
            tracing::warn!(error = %err, "notification failed");
        }
    }

    fn cancel_cue(&mut self) {
        if let Some(mut cue) = self.active_cue.take() {
            cue.cancel();
        }
    }
}

/// Whole seconds from `now` until `target`, rounded to nearest and clamped
/// at zero.
fn clamped_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (target - now).num_milliseconds();
    let rounded = (millis as f64 / 1000.0).round() as i64;
    rounded.max(0) as u64
}
