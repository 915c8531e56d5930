#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic clock system that turns wall time into beat and pulse actions.
//!
//! The clock never reads a system timer. Adapters feed elapsed durations and
//! the clock replies with the actions the world must process: one
//! `IncrementBeat` per completed tick, preceded by a `Pulse` on every eighth
//! tick starting with the very first one.

use std::time::Duration;

use garden_core::{Action, DEFAULT_TIMESCALE, MAX_TIMESCALE, MIN_TIMESCALE};

/// Ticks between two automaton generations.
const TICKS_PER_PULSE: u64 = 8;

/// Tempo slider value; larger values tick faster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timescale(u32);

impl Timescale {
    /// Creates a timescale, clamping it into `[MIN_TIMESCALE, MAX_TIMESCALE]`.
    #[must_use]
    pub fn clamped(value: u32) -> Self {
        Self(value.clamp(MIN_TIMESCALE, MAX_TIMESCALE))
    }

    /// Retrieves the slider value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Wall-clock duration of one tick at this timescale.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        tick_interval(*self)
    }
}

impl Default for Timescale {
    fn default() -> Self {
        Self(DEFAULT_TIMESCALE)
    }
}

/// Tick interval of `(MAX_TIMESCALE + MIN_TIMESCALE) - timescale` milliseconds.
#[must_use]
pub fn tick_interval(timescale: Timescale) -> Duration {
    let millis = (MAX_TIMESCALE + MIN_TIMESCALE).saturating_sub(timescale.get());
    Duration::from_millis(u64::from(millis))
}

/// Normalizes wall time into frame units for `Action::Update`.
///
/// Returns zero when the frame period is not a positive, finite number.
#[must_use]
pub fn frame_delta(elapsed: Duration, frame_period_ms: f32) -> f32 {
    if !(frame_period_ms.is_finite() && frame_period_ms > 0.0) {
        return 0.0;
    }
    (elapsed.as_secs_f64() * 1000.0 / f64::from(frame_period_ms)) as f32
}

/// Pure system that accumulates elapsed time and emits beat actions.
#[derive(Debug)]
pub struct BeatClock {
    timescale: Timescale,
    accumulator: Duration,
    ticks: u64,
}

impl BeatClock {
    /// Creates a clock running at the provided timescale.
    #[must_use]
    pub fn new(timescale: Timescale) -> Self {
        Self {
            timescale,
            accumulator: Duration::ZERO,
            ticks: 0,
        }
    }

    /// Current timescale.
    #[must_use]
    pub const fn timescale(&self) -> Timescale {
        self.timescale
    }

    /// Number of ticks completed since creation or the last reset.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Changes the tempo; time already accumulated carries over.
    pub fn set_timescale(&mut self, timescale: Timescale) {
        self.timescale = timescale;
    }

    /// Restarts the tick stream so the next tick pulses again.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
        self.ticks = 0;
    }

    /// Consumes elapsed wall time and emits the actions of every completed tick.
    pub fn handle(&mut self, elapsed: Duration, out: &mut Vec<Action>) {
        let interval = self.timescale.tick_interval();
        if interval.is_zero() || elapsed.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(elapsed);
        while self.accumulator >= interval {
            self.accumulator -= interval;
            if self.ticks % TICKS_PER_PULSE == 0 {
                out.push(Action::Pulse);
            }
            out.push(Action::IncrementBeat);
            self.ticks += 1;
        }
    }
}
