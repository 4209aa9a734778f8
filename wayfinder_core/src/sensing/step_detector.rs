// wayfinder_core/src/sensing/step_detector.rs

//! Peak-based footfall detection on the accelerometer magnitude.

use std::collections::VecDeque;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for step detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDetectorConfig {
    /// Number of magnitude samples kept.
    pub history_len: usize,
    /// Minimum time after an accepted step before the next can be accepted.
    pub refractory_ms: u64,
    /// Required height of the peak over the lower of its two neighbours.
    pub min_prominence: f64,
    /// Exclusive band the peak magnitude must fall in (gravity included).
    pub min_peak: f64,
    pub max_peak: f64,
}

impl Default for StepDetectorConfig {
    fn default() -> Self {
        Self {
            history_len: 10,
            refractory_ms: 300,
            min_prominence: 1.0,
            min_peak: 8.0,
            max_peak: 20.0,
        }
    }
}

/// One raw accelerometer reading, gravity included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelSample {
    pub accel: Vector3<f64>,
    /// Arrival time, milliseconds on a monotonic clock.
    pub timestamp_ms: u64,
}

impl AccelSample {
    pub fn new(x: f64, y: f64, z: f64, timestamp_ms: u64) -> Self {
        Self {
            accel: Vector3::new(x, y, z),
            timestamp_ms,
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.accel.norm()
    }
}

/// An accepted footfall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    /// Cumulative count including this step.
    pub count: u64,
    pub timestamp_ms: u64,
    /// Magnitude of the peak sample.
    pub peak: f64,
    /// Peak height over the lower neighbour.
    pub prominence: f64,
}

#[derive(Debug, Clone, Copy)]
struct MagnitudeSample {
    value: f64,
    timestamp_ms: u64,
}

/// Sliding-window peak detector.
///
/// Each sample is appended to a bounded history. Once three samples are
/// buffered and the refractory period since the last step has passed, the
/// last three magnitudes `(before, middle, after)` are tested: `middle` must
/// be a strict local maximum, stand more than `min_prominence` above the lower
/// neighbour and fall strictly inside `(min_peak, max_peak)`. An accepted step
/// is stamped with the arrival time of the sample that completed the window.
#[derive(Debug, Clone)]
pub struct StepDetector {
    config: StepDetectorConfig,
    history: VecDeque<MagnitudeSample>,
    last_step_ms: Option<u64>,
    step_count: u64,
}

impl StepDetector {
    pub fn new(config: StepDetectorConfig) -> Self {
        let capacity = config.history_len.max(3);
        Self {
            config,
            history: VecDeque::with_capacity(capacity),
            last_step_ms: None,
            step_count: 0,
        }
    }

    pub fn config(&self) -> &StepDetectorConfig {
        &self.config
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn last_step_ms(&self) -> Option<u64> {
        self.last_step_ms
    }

    /// Number of buffered magnitude samples.
    pub fn buffered(&self) -> usize {
        self.history.len()
    }

    pub fn process(&mut self, sample: &AccelSample) -> Option<StepEvent> {
        self.process_magnitude(sample.magnitude(), sample.timestamp_ms)
    }

    /// Feeds a precomputed magnitude.
    pub fn process_magnitude(&mut self, value: f64, timestamp_ms: u64) -> Option<StepEvent> {
        let capacity = self.config.history_len.max(3);
        while self.history.len() >= capacity {
            self.history.pop_front();
        }
        self.history.push_back(MagnitudeSample {
            value,
            timestamp_ms,
        });

        if self.history.len() < 3 {
            return None;
        }
        if let Some(last) = self.last_step_ms {
            if timestamp_ms.saturating_sub(last) < self.config.refractory_ms {
                return None;
            }
        }

        let n = self.history.len();
        let before = self.history[n - 3].value;
        let middle = self.history[n - 2].value;
        let after = self.history[n - 1].value;

        let is_peak = middle > before && middle > after;
        let prominence = middle - before.min(after);
        let in_band = middle > self.config.min_peak && middle < self.config.max_peak;
        if !(is_peak && prominence > self.config.min_prominence && in_band) {
            return None;
        }

        self.step_count += 1;
        self.last_step_ms = Some(timestamp_ms);
        debug!(
            "Step {} detected: peak {:.2}, prominence {:.2}",
            self.step_count, middle, prominence
        );
        Some(StepEvent {
            count: self.step_count,
            timestamp_ms,
            peak: middle,
            prominence,
        })
    }

    /// Clears history, timing and the step count.
    pub fn reset(&mut self) {
        self.history.clear();
        self.last_step_ms = None;
        self.step_count = 0;
    }
}

impl Default for StepDetector {
    fn default() -> Self {
        Self::new(StepDetectorConfig::default())
    }
}
