//! # Tickmind Core Library
//!
//! Core logic for the tickmind interval reminder. The CLI binary is a thin
//! driver over this library.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: a wall-clock-based state machine. Remaining time
//!   is always recomputed from the target timestamp, never decremented per
//!   tick, so a throttled or suspended driver cannot make the display drift.
//!   The caller is responsible for invoking `tick()` periodically and
//!   `reconcile()` after a scheduling gap.
//! - **Alerts**: audible cue and desktop notification primitives behind
//!   traits, with an mpsc-backed acknowledgment channel feeding back into
//!   the engine.
//! - **Preferences**: a single TOML-backed store for the interval length.
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: the countdown state machine
//! - [`Config`]: persisted preferences
//! - [`AudioCue`] / [`Notifier`]: alert primitives
//! - [`Clock`]: time source abstraction (swap in [`FakeClock`] for tests)

pub mod alert;
pub mod clock;
pub mod engine;
pub mod error;
pub mod events;
pub mod interval;
pub mod prefs;

pub use alert::{AckHandle, AckReceiver, AudioCue, Notifier, StopHandle};
pub use clock::{Clock, FakeClock, SystemClock};
pub use engine::{CountdownEngine, EngineState};
pub use error::{AlertError, ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use interval::IntervalLength;
pub use prefs::{Config, MemoryPrefs, PreferenceStore};
