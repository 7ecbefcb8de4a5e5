//! Alert primitives: audible cue and desktop notification.
//!
//! The engine only decides *when* an alert fires; how sound and notification
//! are produced lives behind these traits. Acknowledgment travels back over
//! an mpsc channel so the primitives can complete asynchronously (a user may
//! click a notification minutes after the tick that raised it).

mod desktop;
mod sound;

pub use desktop::DesktopNotifier;
pub use sound::SystemSound;

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use crate::error::AlertError;
use crate::interval::IntervalLength;

/// Cancellation token for an audible cue that may still be sounding.
///
/// `cancel` is idempotent and safe to call after the cue finished naturally.
pub trait StopHandle: Send {
    fn cancel(&mut self);
}

/// Plays the audible alert. Returns a handle to silence it early.
pub trait AudioCue: Send {
    fn play(&mut self) -> Result<Box<dyn StopHandle>, AlertError>;
}

/// Raises a desktop notification for an elapsed interval.
///
/// Implementations fire `ack` when (and only if) the user acknowledges the
/// notification; non-acknowledgment simply never fires it. Permission being
/// denied or the notification daemon being absent must not be fatal.
pub trait Notifier: Send {
    fn notify(&mut self, elapsed: IntervalLength, ack: AckHandle) -> Result<(), AlertError>;
}

/// One-shot acknowledgment sender handed to the notifier for each alert.
#[derive(Debug)]
pub struct AckHandle {
    tx: Sender<()>,
}

impl AckHandle {
    /// Consumes the handle; at most one acknowledgment per alert.
    pub fn acknowledge(self) {
        // The receiver being gone just means the engine was dropped.
        let _ = self.tx.send(());
    }
}

/// The engine's end of the acknowledgment channel.
#[derive(Debug)]
pub struct AckReceiver {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl AckReceiver {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    pub fn handle(&self) -> AckHandle {
        AckHandle {
            tx: self.tx.clone(),
        }
    }

    /// Consumes every pending acknowledgment; true if there was at least one.
    pub fn drain(&self) -> bool {
        let mut any = false;
        loop {
            match self.rx.try_recv() {
                Ok(()) => any = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        any
    }
}

impl Default for AckReceiver {
    fn default() -> Self {
        Self::new()
    }
}

/// Notification body shown to the user.
pub(crate) fn alert_body(elapsed: IntervalLength) -> String {
    format!("Time is up! {elapsed} minutes have passed.")
}

#[cfg(test)]
pub(crate) mod fakes {
    //! Recording fakes for engine tests.

    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Default)]
    pub struct AudioLog {
        pub plays: u32,
        pub cancels: u32,
    }

    /// Records plays and cancels; clones share the log.
    #[derive(Debug, Clone, Default)]
    pub struct FakeAudio {
        log: Arc<Mutex<AudioLog>>,
        fail: bool,
    }

    impl FakeAudio {
        pub fn failing() -> Self {
            Self {
                log: Arc::default(),
                fail: true,
            }
        }

        pub fn plays(&self) -> u32 {
            self.log.lock().unwrap().plays
        }

        pub fn cancels(&self) -> u32 {
            self.log.lock().unwrap().cancels
        }
    }

    impl AudioCue for FakeAudio {
        fn play(&mut self) -> Result<Box<dyn StopHandle>, AlertError> {
            if self.fail {
                return Err(AlertError::NoPlayer);
            }
            self.log.lock().unwrap().plays += 1;
            Ok(Box::new(FakeStopHandle {
                log: self.log.clone(),
                cancelled: false,
            }))
        }
    }

    struct FakeStopHandle {
        log: Arc<Mutex<AudioLog>>,
        cancelled: bool,
    }

    impl StopHandle for FakeStopHandle {
        fn cancel(&mut self) {
            if !self.cancelled {
                self.cancelled = true;
                self.log.lock().unwrap().cancels += 1;
            }
        }
    }

    /// Records notifications and retains their ack handles so a test can
    /// acknowledge on demand.
    #[derive(Debug, Clone, Default)]
    pub struct FakeNotifier {
        inner: Arc<Mutex<FakeNotifierInner>>,
    }

    #[derive(Debug, Default)]
    struct FakeNotifierInner {
        notified: Vec<f64>,
        pending: Vec<AckHandle>,
    }

    impl FakeNotifier {
        pub fn notifications(&self) -> Vec<f64> {
            self.inner.lock().unwrap().notified.clone()
        }

        pub fn count(&self) -> usize {
            self.inner.lock().unwrap().notified.len()
        }

        /// Acknowledge the most recent notification, as a user click would.
        pub fn acknowledge_last(&self) {
            let handle = self.inner.lock().unwrap().pending.pop();
            if let Some(handle) = handle {
                handle.acknowledge();
            }
        }
    }

    impl Notifier for FakeNotifier {
        fn notify(&mut self, elapsed: IntervalLength, ack: AckHandle) -> Result<(), AlertError> {
            let mut inner = self.inner.lock().unwrap();
            inner.notified.push(elapsed.minutes());
            inner.pending.push(ack);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_channel_round_trip() {
        let rx = AckReceiver::new();
        assert!(!rx.drain());

        rx.handle().acknowledge();
        assert!(rx.drain());
        // Drained; nothing pending now.
        assert!(!rx.drain());
    }

    #[test]
    fn multiple_acks_collapse_into_one_drain() {
        let rx = AckReceiver::new();
        rx.handle().acknowledge();
        rx.handle().acknowledge();
        assert!(rx.drain());
        assert!(!rx.drain());
    }

    #[test]
    fn body_formats_whole_and_fractional_minutes() {
        let half = IntervalLength::new(0.5).unwrap();
        let whole = IntervalLength::new(30.0).unwrap();
        assert_eq!(alert_body(half), "Time is up! 0.5 minutes have passed.");
        assert_eq!(alert_body(whole), "Time is up! 30 minutes have passed.");
    }
}
