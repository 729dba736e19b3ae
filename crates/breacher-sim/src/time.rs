//! Fixed-timestep clock with pause and time scaling.

use breacher_core::constants::{DT, TIME_SCALE_MAX, TIME_SCALE_MIN};
use breacher_core::types::SimTime;

/// Accumulates scaled wall-clock time and releases it as whole ticks.
///
/// The simulation only ever steps in multiples of [`DT`]; fractional
/// remainders stay in the accumulator for the next update. Pausing
/// freezes the accumulator without discarding it.
#[derive(Debug, Clone)]
pub struct TimeSystem {
    time: SimTime,
    accumulator: f64,
    time_scale: f64,
    paused: bool,
}

impl TimeSystem {
    pub fn new(time_scale: f64) -> Self {
        Self {
            time: SimTime::default(),
            accumulator: 0.0,
            time_scale: time_scale.clamp(TIME_SCALE_MIN, TIME_SCALE_MAX),
            paused: false,
        }
    }

    /// Feed wall-clock seconds in; get the number of whole ticks that
    /// should resolve. Returns zero while paused.
    pub fn update(&mut self, dt: f64) -> u32 {
        if self.paused || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt * self.time_scale;
        let mut ticks = 0;
        while self.accumulator >= DT {
            self.accumulator -= DT;
            ticks += 1;
        }
        ticks
    }

    /// Advance the simulation clock by one tick.
    pub fn advance_tick(&mut self) {
        self.time.advance();
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Tick number that the pipeline is currently resolving.
    pub fn tick(&self) -> u64 {
        self.time.tick
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Clamped to the supported scale range; zero halts time without
    /// marking the clock paused.
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.clamp(TIME_SCALE_MIN, TIME_SCALE_MAX);
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }
}
