// wayfinder_core/src/sensing/mod.rs

//! Raw sensor interpretation: footfalls from acceleration and the device
//! heading from orientation samples.

mod heading;
mod step_detector;

pub use heading::{HeadingSource, HeadingState, OrientationSample};
pub use step_detector::{AccelSample, StepDetector, StepDetectorConfig, StepEvent};
