use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::sleep,
    time::{Duration, Instant},
};

use chrono::Local;
use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};

use crate::{
    cli::{heartbeat::HeartbeatArgs, inverter::InverterArgs, location::LocationArgs},
    prelude::*,
    store::{JsonLinesStore, Store},
};

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(flatten)]
    inverter: InverterArgs,

    #[clap(long, env = "POLLING_INTERVAL", default_value = "30s")]
    interval: humantime::Duration,

    #[clap(flatten)]
    location: LocationArgs,

    /// Append every snapshot to this JSON lines file.
    #[clap(long = "output", env = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    #[clap(flatten)]
    heartbeat: HeartbeatArgs,
}

impl WatchArgs {
    pub fn run(self) -> Result {
        let interval: Duration = self.interval.into();
        ensure!(!interval.is_zero(), "the polling interval must be positive");

        let collector = self.inverter.connect();
        let mut store = self.output_path.as_deref().map(JsonLinesStore::open).transpose()?;

        let should_terminate = Arc::new(AtomicBool::new(false));
        for signal in [SIGTERM, SIGINT] {
            signal_hook::flag::register(signal, Arc::clone(&should_terminate))?;
        }

        info!(%self.interval, "watching…");
        let mut ticker = Ticker::new(interval, Instant::now());
        while !should_terminate.load(Ordering::Relaxed) {
            let now = Local::now();
            if self.location.is_daylight(&now) {
                match collector.collect_at(now) {
                    Ok(snapshot) => {
                        if let Some(store) = &mut store
                            && let Err(error) = store.store(&snapshot)
                        {
                            error!("failed to store the snapshot: {error:#}");
                        }
                        self.heartbeat.send();
                    }
                    Err(error) => {
                        error!("cycle failed: {error:#}");
                    }
                }
            } else {
                debug!("outside daylight, skipping");
            }
            sleep_unless(&should_terminate, ticker.advance(Instant::now()));
        }

        info!("terminating…");
        Ok(())
    }
}

/// Fixed-period schedule that drops the ticks it has fallen behind on.
struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    const fn new(period: Duration, start: Instant) -> Self {
        Self { period, next: start }
    }

    /// Move to the nearest tick after `now` and return the time left until it.
    fn advance(&mut self, now: Instant) -> Duration {
        self.next += self.period;
        let mut n_skipped = 0_u32;
        while self.next <= now {
            self.next += self.period;
            n_skipped += 1;
        }
        if n_skipped != 0 {
            warn!(n_skipped, "the cycle overran the period");
        }
        self.next - now
    }
}

/// Sleep in short steps, so that a signal does not wait for the whole period.
fn sleep_unless(should_terminate: &AtomicBool, duration: Duration) {
    const STEP: Duration = Duration::from_millis(250);

    let deadline = Instant::now() + duration;
    while !should_terminate.load(Ordering::Relaxed) {
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            break;
        }
        sleep(left.min(STEP));
    }
}
