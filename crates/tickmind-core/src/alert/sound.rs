//! Audible cue playback via the system sound player.
//!
//! Probes for a `paplay`/`aplay` binary with a known sound file and plays a
//! repeating train (the reminder keeps chiming until cancelled or the train
//! runs out), spaced a few seconds apart. The returned [`StopHandle`] kills
//! the in-flight player process and stops the train.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::AlertError;

use super::{AudioCue, StopHandle};

/// Player binary / sound file pairs to probe, in preference order.
const SOUND_CANDIDATES: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
    ("aplay", "/usr/share/sounds/generic.wav"),
];

/// Seconds between repetitions of the cue.
const REPEAT_GAP: Duration = Duration::from_secs(3);

/// How often the playback thread checks for cancellation.
const POLL: Duration = Duration::from_millis(100);

/// System-player-backed audible cue.
pub struct SystemSound {
    repeats: u32,
    custom_sound: Option<PathBuf>,
}

impl SystemSound {
    pub fn new() -> Self {
        Self {
            repeats: 5,
            custom_sound: None,
        }
    }

    /// Use a user-configured sound file instead of the probed system sound.
    pub fn with_custom_sound(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.custom_sound = path.map(Into::into);
        self
    }

    fn resolve(&self) -> Option<(String, PathBuf)> {
        if let Some(custom) = &self.custom_sound {
            if custom.exists() {
                return Some(("paplay".into(), custom.clone()));
            }
            tracing::warn!(path = %custom.display(), "custom sound file not found, falling back");
        }
        SOUND_CANDIDATES
            .iter()
            .find(|(_, file)| Path::new(file).exists())
            .map(|(player, file)| ((*player).into(), PathBuf::from(file)))
    }
}

impl Default for SystemSound {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCue for SystemSound {
    fn play(&mut self) -> Result<Box<dyn StopHandle>, AlertError> {
        let (player, file) = self.resolve().ok_or(AlertError::NoPlayer)?;

        let cancelled = Arc::new(AtomicBool::new(false));
        let current: Arc<Mutex<Option<Child>>> = Arc::new(Mutex::new(None));
        let repeats = self.repeats;

        let thread_cancelled = cancelled.clone();
        let thread_current = current.clone();
        std::thread::spawn(move || {
            for _ in 0..repeats {
                if thread_cancelled.load(Ordering::SeqCst) {
                    break;
                }
                let child = Command::new(&player)
                    .arg(&file)
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn();
                match child {
                    Ok(child) => {
                        *thread_current.lock().unwrap() = Some(child);
                        // Wait for this repetition to finish or be killed.
                        loop {
                            let done = match thread_current.lock().unwrap().as_mut() {
                                Some(child) => !matches!(child.try_wait(), Ok(None)),
                                None => true,
                            };
                            if done || thread_cancelled.load(Ordering::SeqCst) {
                                break;
                            }
                            std::thread::sleep(POLL);
                        }
                        *thread_current.lock().unwrap() = None;
                    }
                    Err(err) => {
                        tracing::warn!(%player, error = %err, "failed to spawn sound player");
                        break;
                    }
                }
                // Gap before the next chime, interruptible.
                let mut waited = Duration::ZERO;
                while waited < REPEAT_GAP && !thread_cancelled.load(Ordering::SeqCst) {
                    std::thread::sleep(POLL);
                    waited += POLL;
                }
            }
        });

        Ok(Box::new(SoundStopHandle { cancelled, current }))
    }
}

struct SoundStopHandle {
    cancelled: Arc<AtomicBool>,
    current: Arc<Mutex<Option<Child>>>,
}

impl StopHandle for SoundStopHandle {
    fn cancel(&mut self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return; // Already cancelled.
        }
        // Silence the in-flight repetition immediately rather than letting
        // it play out.
        if let Some(child) = self.current.lock().unwrap().as_mut() {
            let _ = child.kill();
        }
    }
}
