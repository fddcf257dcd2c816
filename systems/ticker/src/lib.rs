#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-interval scheduler that decouples game updates from the frame rate.

use std::time::Duration;

use retro_snake_core::Command;

/// Interval between game updates used by the classic game.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

/// Configuration parameters required to construct the ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    interval: Duration,
}

impl Config {
    /// Creates a new configuration firing once per `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Time between consecutive updates.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

/// Clock-driven gate that fires at most once per configured interval.
///
/// Timestamps are measured from an arbitrary fixed origin such as program
/// start. The ticker never catches up on missed intervals: a long frame
/// produces a single update.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    last_fire: Duration,
}

impl Ticker {
    /// Creates a ticker whose first interval starts at time zero.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            interval: config.interval(),
            last_fire: Duration::ZERO,
        }
    }

    /// Fires when at least one interval elapsed since the previous firing.
    ///
    /// Firing records `now` as the new reference point.
    pub fn try_fire(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_fire) >= self.interval {
            self.last_fire = now;
            true
        } else {
            false
        }
    }

    /// Emits a [`Command::Tick`] when the interval elapsed by `now`.
    pub fn handle(&mut self, now: Duration, out: &mut Vec<Command>) {
        if self.try_fire(now) {
            out.push(Command::Tick);
        }
    }

    /// Timestamp of the most recent firing.
    #[must_use]
    pub const fn last_fire(&self) -> Duration {
        self.last_fire
    }
}
