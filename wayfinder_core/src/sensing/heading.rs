// wayfinder_core/src/sensing/heading.rs

use tracing::trace;

use crate::utils::geometry::wrap_degrees;

/// A raw device-orientation reading. Platforms may omit any angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationSample {
    /// Compass-style rotation about the vertical axis, degrees.
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
    pub timestamp_ms: u64,
}

impl OrientationSample {
    pub fn from_alpha(alpha: f64, timestamp_ms: u64) -> Self {
        Self {
            alpha: Some(alpha),
            timestamp_ms,
            ..Default::default()
        }
    }
}

/// Which input currently drives the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingSource {
    #[default]
    Sensor,
    Simulated,
}

/// Device heading, always in [0, 360).
///
/// Keeps the last live sensor value and a separately controlled simulated
/// value; `degrees()` reports whichever source is selected.
#[derive(Debug, Clone, Default)]
pub struct HeadingState {
    sensor_deg: f64,
    simulated_deg: f64,
    source: HeadingSource,
    last_sample_ms: Option<u64>,
}

impl HeadingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a sensor sample. A sample without `alpha` leaves the last
    /// known heading untouched.
    pub fn apply(&mut self, sample: &OrientationSample) {
        if let Some(alpha) = sample.alpha.filter(|a| a.is_finite()) {
            self.sensor_deg = wrap_degrees(alpha);
            self.last_sample_ms = Some(sample.timestamp_ms);
            trace!("Heading sample {:.1}°", self.sensor_deg);
        }
    }

    /// Sets the simulated heading directly.
    pub fn set_simulated(&mut self, degrees: f64) {
        self.simulated_deg = wrap_degrees(degrees);
    }

    /// Turns the simulated heading by `delta` degrees, positive clockwise.
    pub fn rotate(&mut self, delta: f64) -> f64 {
        self.simulated_deg = wrap_degrees(self.simulated_deg + delta);
        self.simulated_deg
    }

    pub fn set_source(&mut self, source: HeadingSource) {
        self.source = source;
    }

    pub fn source(&self) -> HeadingSource {
        self.source
    }

    /// Heading from the live sensor, regardless of the selected source.
    pub fn sensor_degrees(&self) -> f64 {
        self.sensor_deg
    }

    pub fn simulated_degrees(&self) -> f64 {
        self.simulated_deg
    }

    /// Heading from the selected source.
    pub fn degrees(&self) -> f64 {
        match self.source {
            HeadingSource::Sensor => self.sensor_deg,
            HeadingSource::Simulated => self.simulated_deg,
        }
    }

    pub fn last_sample_ms(&self) -> Option<u64> {
        self.last_sample_ms
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sensor_heading_is_wrapped() {
        let mut heading = HeadingState::new();
        heading.apply(&OrientationSample::from_alpha(-30.0, 10));
        assert_abs_diff_eq!(heading.degrees(), 330.0);
        heading.apply(&OrientationSample::from_alpha(360.0, 20));
        assert_abs_diff_eq!(heading.degrees(), 0.0);
    }

    #[test]
    fn missing_alpha_keeps_last_heading() {
        let mut heading = HeadingState::new();
        heading.apply(&OrientationSample::from_alpha(45.0, 10));
        heading.apply(&OrientationSample {
            alpha: None,
            beta: Some(10.0),
            gamma: Some(-3.0),
            timestamp_ms: 20,
        });
        assert_abs_diff_eq!(heading.degrees(), 45.0);
        assert_eq!(heading.last_sample_ms(), Some(10));
    }

    #[test]
    fn simulated_rotation_wraps_both_ways() {
        let mut heading = HeadingState::new();
        heading.set_source(HeadingSource::Simulated);
        assert_abs_diff_eq!(heading.rotate(-15.0), 345.0);
        heading.set_simulated(350.0);
        assert_abs_diff_eq!(heading.rotate(15.0), 5.0);

        heading.apply(&OrientationSample::from_alpha(90.0, 0));
        assert_abs_diff_eq!(heading.degrees(), 5.0);
        assert_abs_diff_eq!(heading.sensor_degrees(), 90.0);
    }
}
