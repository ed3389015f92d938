//! Loading indicator timing
//!
//! Everything here is a function of a tick count or an elapsed duration, so
//! the indicator can be driven by any timer and tested without one.

use std::time::{Duration, Instant};

use crate::constants::{LOADING_MAX_DOTS, LOADING_TEXT, LOADING_TICK, PROGRESS_PERIOD};

/// Number of whole ticks that fit in `elapsed`
pub fn pulse_index(elapsed: Duration, tick: Duration) -> u64 {
    if tick.is_zero() {
        return 0;
    }
    (elapsed.as_nanos() / tick.as_nanos()) as u64
}

/// "Loading" with between zero and three trailing dots
pub fn loading_text(ticks: u64) -> String {
    let dots = ticks % (LOADING_MAX_DOTS as u64 + 1);
    format!("{}{}", LOADING_TEXT, ".".repeat(dots as usize))
}

/// Elapsed time wrapped into a 0..100 percentage of `period`
pub fn progress_percent(elapsed: Duration, period: Duration) -> f64 {
    if period.is_zero() {
        return 0.0;
    }
    (elapsed.as_secs_f64() / period.as_secs_f64() * 100.0) % 100.0
}

/// State of one mounted loading indicator
///
/// Only the activation instant is stored; text and progress are derived from
/// the time of the render.
#[derive(Clone, Copy, Debug)]
pub struct LoadingIndicator {
    started_at: Instant,
}

impl LoadingIndicator {
    pub fn activate(now: Instant) -> Self {
        LoadingIndicator { started_at: now }
    }

    pub fn ticks(&self, now: Instant) -> u64 {
        pulse_index(now.saturating_duration_since(self.started_at), LOADING_TICK)
    }

    pub fn text(&self, now: Instant) -> String {
        loading_text(self.ticks(now))
    }

    pub fn progress(&self, now: Instant) -> f64 {
        progress_percent(now.saturating_duration_since(self.started_at), PROGRESS_PERIOD)
    }
}
