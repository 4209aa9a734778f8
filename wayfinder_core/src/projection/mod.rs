// wayfinder_core/src/projection/mod.rs

mod ar_projector;

pub use ar_projector::{ArFrame, ArProjector, ArrowCue, FrameContext, ProjectorConfig, ScreenPoint};
