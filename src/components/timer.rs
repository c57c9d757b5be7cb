//! Stopwatch and interval timer.
//!
//! A [`Timer`] has two independent faces:
//!
//! - a stopwatch driven by the wall clock (`start`, `pause`, `elapsed`,
//!   `tick`, `lap`, ...);
//! - an interval trigger driven by caller-supplied deltas (`set_interval`,
//!   `update`).
//!
//! Every operation that reads the clock has an `*_at(Instant)` variant so
//! callers (and tests) can supply the time explicitly.
//!
//! The behavior state machine owns one interval timer per pet to schedule
//! walks.

use std::time::Instant;

/// Tolerance applied when comparing the interval accumulator.
pub const INTERVAL_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Default)]
pub struct Timer {
    running: bool,
    paused: bool,
    /// Seconds accrued before the current running segment.
    accumulated: f32,
    segment_start: Option<Instant>,
    last_tick: Option<Instant>,
    last_lap: Option<Instant>,

    interval: f32,
    repeat: bool,
    interval_acc: f32,
    last_update: Option<Instant>,
}

fn seconds_between(from: Option<Instant>, to: Instant) -> f32 {
    from.map(|f| to.saturating_duration_since(f).as_secs_f32())
        .unwrap_or(0.0)
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Reset the accumulated time and begin running, unpaused. A partial
    /// interval is discarded; the interval length is kept.
    pub fn start_at(&mut self, now: Instant) {
        self.running = true;
        self.paused = false;
        self.accumulated = 0.0;
        self.interval_acc = 0.0;
        self.segment_start = Some(now);
        self.last_tick = Some(now);
        self.last_lap = Some(now);
        self.last_update = Some(now);
    }

    /// Stop running and clear the accumulated time and any partial interval.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.accumulated = 0.0;
        self.interval_acc = 0.0;
        self.segment_start = None;
    }

    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    /// Zero the accumulated time and any partial interval, keeping the
    /// running and paused flags.
    pub fn reset_at(&mut self, now: Instant) {
        self.accumulated = 0.0;
        self.interval_acc = 0.0;
        if self.running && !self.paused {
            self.segment_start = Some(now);
            self.last_tick = Some(now);
            self.last_lap = Some(now);
            self.last_update = Some(now);
        }
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn pause_at(&mut self, now: Instant) {
        if self.running && !self.paused {
            self.accumulated += seconds_between(self.segment_start, now);
            self.segment_start = None;
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    /// Continue accruing time. Time spent paused is not reported by `tick`
    /// or `lap`.
    pub fn resume_at(&mut self, now: Instant) {
        if self.running && self.paused {
            self.segment_start = Some(now);
            self.last_tick = Some(now);
            self.last_lap = Some(now);
            self.last_update = Some(now);
            self.paused = false;
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed_at(Instant::now())
    }

    /// Accumulated seconds, including the current running segment.
    pub fn elapsed_at(&self, now: Instant) -> f32 {
        if self.running && !self.paused {
            self.accumulated + seconds_between(self.segment_start, now)
        } else {
            self.accumulated
        }
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Seconds since the previous `tick`; 0 when stopped or paused.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        if !self.running || self.paused {
            return 0.0;
        }
        let dt = seconds_between(self.last_tick, now);
        self.last_tick = Some(now);
        dt
    }

    pub fn lap(&mut self) -> f32 {
        self.lap_at(Instant::now())
    }

    /// Like [`tick_at`](Self::tick_at) with its own reference point.
    pub fn lap_at(&mut self, now: Instant) -> f32 {
        if !self.running || self.paused {
            return 0.0;
        }
        let dt = seconds_between(self.last_lap, now);
        self.last_lap = Some(now);
        dt
    }

    pub fn set_interval(&mut self, seconds: f32, repeat: bool) {
        self.set_interval_at(seconds, repeat, Instant::now());
    }

    /// Arm the interval trigger. A stopped timer is started.
    ///
    /// `seconds <= 0` leaves interval mode disabled.
    pub fn set_interval_at(&mut self, seconds: f32, repeat: bool, now: Instant) {
        self.interval = seconds;
        self.repeat = repeat;
        self.interval_acc = 0.0;
        self.last_update = Some(now);
        if !self.running {
            self.start_at(now);
        }
    }

    /// Disarm interval mode. The stopwatch is unaffected.
    pub fn clear_interval(&mut self) {
        self.interval = 0.0;
        self.repeat = false;
        self.interval_acc = 0.0;
        self.last_update = None;
    }

    /// Feed `dt` seconds to the interval trigger.
    ///
    /// Returns `true` if at least one interval elapsed during this call. Several
    /// elapsed intervals still report a single `true`. A one-shot trigger stops
    /// the timer when it fires.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.interval <= 0.0 || !self.running || self.paused {
            return false;
        }
        self.interval_acc += dt.max(0.0);

        let mut fired = false;
        while self.interval_acc + INTERVAL_EPSILON >= self.interval {
            self.interval_acc -= self.interval;
            fired = true;
            if !self.repeat {
                self.running = false;
                self.interval_acc = 0.0;
                break;
            }
        }
        self.interval_acc = self.interval_acc.max(0.0);
        fired
    }

    pub fn update_from_clock(&mut self) -> bool {
        self.update_at(Instant::now())
    }

    /// [`update`](Self::update) with the delta measured since the previous
    /// clock-driven update.
    pub fn update_at(&mut self, now: Instant) -> bool {
        let dt = seconds_between(self.last_update, now);
        self.last_update = Some(now);
        self.update(dt)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
    pub fn is_paused(&self) -> bool {
        self.paused
    }
    pub fn interval(&self) -> f32 {
        self.interval
    }
    pub fn is_repeating(&self) -> bool {
        self.repeat
    }
    /// Seconds accumulated toward the next interval.
    pub fn interval_elapsed(&self) -> f32 {
        self.interval_acc
    }
    /// True when an interval is set and the timer can still fire.
    pub fn is_armed(&self) -> bool {
        self.interval > 0.0 && self.running
    }
}
