//! One-shot alert cycle: verifies sound playback and desktop notification
//! permissions without waiting for an interval to elapse.

use tickmind_core::alert::{DesktopNotifier, SystemSound};
use tickmind_core::{AckReceiver, AudioCue, Config, Notifier, PreferenceStore};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    if config.notifications.sound {
        let mut sound =
            SystemSound::new().with_custom_sound(config.notifications.custom_sound.clone());
        match sound.play() {
            // The handle is dropped undisturbed; the cue plays out naturally.
            Ok(_handle) => {}
            Err(e) => eprintln!("sound unavailable: {e}"),
        }
    }

    let acks = AckReceiver::new();
    let mut notifier = DesktopNotifier::new(config.notifications.enabled);
    notifier.notify(config.interval(), acks.handle())?;

    println!("alert fired");
    // Give the detached playback and notification threads a moment to get
    // the first chime out before the process exits.
    std::thread::sleep(std::time::Duration::from_millis(500));
    Ok(())
}
