//! Desktop notification via notify-rust.
//!
//! Clicking the notification acknowledges the alert: the engine treats that
//! as a stop request (the reminder served its purpose). Dismissing it leaves
//! the countdown cycling. A missing or refusing notification daemon is
//! logged and otherwise ignored.

use notify_rust::Notification;
#[cfg(all(unix, not(target_os = "macos")))]
use notify_rust::Urgency;

use crate::error::AlertError;
use crate::interval::IntervalLength;

use super::{alert_body, AckHandle, Notifier};

/// notify-rust-backed desktop notifier.
pub struct DesktopNotifier {
    enabled: bool,
}

impl DesktopNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&mut self, elapsed: IntervalLength, ack: AckHandle) -> Result<(), AlertError> {
        if !self.enabled {
            return Ok(());
        }
        let body = alert_body(elapsed);

        // Showing can block on the notification daemon and waiting for the
        // user action blocks until the notification is closed, so both run
        // off-thread; the engine's tick must never wait on them.
        std::thread::spawn(move || {
            let mut notification = Notification::new();
            notification
                .summary("Interval reminder")
                .body(&body)
                .appname("tickmind")
                .icon("alarm-clock");

            #[cfg(all(unix, not(target_os = "macos")))]
            {
                notification
                    .urgency(Urgency::Critical)
                    .action("default", "Stop reminder");
                match notification.show() {
                    Ok(handle) => {
                        handle.wait_for_action(|action| {
                            if action != "__closed" {
                                ack.acknowledge();
                            }
                        });
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to show notification");
                    }
                }
            }

            #[cfg(not(all(unix, not(target_os = "macos"))))]
            {
                if let Err(err) = notification.show() {
                    tracing::warn!(error = %err, "failed to show notification");
                }
                // No action support here; the notification cannot acknowledge.
                drop(ack);
            }
        });

        Ok(())
    }
}
