//! Foreground reminder loop.
//!
//! Drives the countdown engine at a 1 Hz cadence. The sleep is measured with
//! a monotonic clock: an oversized gap means the process was suspended (the
//! CLI equivalent of a backgrounded tab), so the loop reconciles instead of
//! ticking and the display snaps back to the wall-clock truth.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use tickmind_core::alert::{DesktopNotifier, SystemSound};
use tickmind_core::{
    AlertError, AudioCue, Config, CountdownEngine, Event, IntervalLength, MemoryPrefs,
    PreferenceStore, StopHandle, SystemClock,
};

#[derive(Args)]
pub struct RunOpts {
    /// Interval length in minutes for this run (the stored preference is
    /// left untouched)
    #[arg(long)]
    pub interval: Option<IntervalLength>,
    /// Emit engine events as JSON lines instead of the countdown display
    #[arg(long)]
    pub json: bool,
}

const TICK: Duration = Duration::from_secs(1);

/// A sleep overshooting by this much means the cadence was suspended, not
/// merely jittered.
const GAP_THRESHOLD: Duration = Duration::from_secs(2);

/// Sound playback disabled by preference.
struct SilentAudio;

struct SilentHandle;

impl StopHandle for SilentHandle {
    fn cancel(&mut self) {}
}

impl AudioCue for SilentAudio {
    fn play(&mut self) -> Result<Box<dyn StopHandle>, AlertError> {
        Ok(Box::new(SilentHandle))
    }
}

pub fn run(opts: RunOpts) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let prefs: Box<dyn PreferenceStore> = match opts.interval {
        Some(interval) => Box::new(MemoryPrefs::new(interval)),
        None => Box::new(config.clone()),
    };
    let audio: Box<dyn AudioCue> = if config.notifications.sound {
        Box::new(SystemSound::new().with_custom_sound(config.notifications.custom_sound.clone()))
    } else {
        Box::new(SilentAudio)
    };
    let notifier = DesktopNotifier::new(config.notifications.enabled);

    let mut engine = CountdownEngine::new(
        prefs,
        audio,
        Box::new(notifier),
        Arc::new(SystemClock),
    );

    let Some(started) = engine.start() else {
        return Err(
            "interval is zero; set one with `tickmind-cli config set interval_minutes <minutes>`"
                .into(),
        );
    };
    emit(&opts, &started)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&shutdown))?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&shutdown))?;

    let mut last = Instant::now();
    while engine.running() {
        std::thread::sleep(TICK);

        if shutdown.load(Ordering::Relaxed) {
            // Stop before exiting so an in-flight cue is silenced.
            if let Some(event) = engine.stop() {
                emit(&opts, &event)?;
            }
            break;
        }

        let gap = last.elapsed();
        last = Instant::now();
        let event = if gap > TICK + GAP_THRESHOLD {
            tracing::debug!(gap_ms = gap.as_millis() as u64, "scheduling gap, reconciling");
            engine.reconcile()
        } else {
            engine.tick()
        };

        if let Some(event) = event {
            emit(&opts, &event)?;
        }
        if !opts.json {
            render(&engine);
        }
    }
    if !opts.json {
        println!();
    }
    Ok(())
}

fn render(engine: &CountdownEngine) {
    use std::io::Write;
    let secs = engine.remaining_secs();
    print!("\r{:02}:{:02} until next alert  ", secs / 60, secs % 60);
    let _ = std::io::stdout().flush();
}

fn emit(opts: &RunOpts, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    if opts.json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::ReminderStarted { interval_min, .. } => {
            println!("reminding every {interval_min} minutes (ctrl-c to stop)");
        }
        Event::AlertFired { elapsed_min, .. } => {
            println!("\n{elapsed_min} minutes elapsed, alert fired");
        }
        Event::Acknowledged { .. } => {
            println!("\nacknowledged, stopping");
        }
        Event::ReminderStopped { .. } => {
            println!("\nstopped");
        }
        _ => {}
    }
    Ok(())
}
