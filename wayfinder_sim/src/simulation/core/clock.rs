// wayfinder_sim/src/simulation/core/clock.rs

use bevy::prelude::*;

use crate::simulation::config::ScenarioConfig;

/// Simulated wall clock. Advances a fixed amount per frame so a run is
/// independent of how fast the host executes it.
#[derive(Resource, Debug, Clone)]
pub struct SimClock {
    now_ms: u64,
    frame_ms: u64,
    sensor_period_ms: u64,
    frames: u64,
}

impl SimClock {
    pub fn new(frame_rate_hz: f64, sensor_rate_hz: f64) -> Self {
        Self {
            now_ms: 0,
            frame_ms: period_ms(frame_rate_hz),
            sensor_period_ms: period_ms(sensor_rate_hz),
            frames: 0,
        }
    }

    pub fn from_config(config: &ScenarioConfig) -> Self {
        Self::new(
            config.simulation.frame_rate_hz,
            config.simulation.sensor_rate_hz,
        )
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    pub fn sensor_period_ms(&self) -> u64 {
        self.sensor_period_ms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.now_ms as f64 / 1000.0
    }

    /// Moves time forward by one frame and returns the new time.
    pub fn advance(&mut self) -> u64 {
        self.now_ms += self.frame_ms;
        self.frames += 1;
        self.now_ms
    }
}

fn period_ms(rate_hz: f64) -> u64 {
    if rate_hz > 0.0 {
        ((1000.0 / rate_hz).round() as u64).max(1)
    } else {
        1000
    }
}

pub fn advance_clock_system(mut clock: ResMut<SimClock>) {
    clock.advance();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods_are_rounded_to_whole_milliseconds() {
        let mut clock = SimClock::new(30.0, 50.0);
        assert_eq!(clock.frame_ms(), 33);
        assert_eq!(clock.sensor_period_ms(), 20);
        clock.advance();
        clock.advance();
        assert_eq!(clock.now_ms(), 66);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn non_positive_rates_fall_back_to_one_hertz() {
        assert_eq!(SimClock::new(0.0, -5.0).frame_ms(), 1000);
    }
}
