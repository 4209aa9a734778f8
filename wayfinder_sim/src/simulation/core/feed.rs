// wayfinder_sim/src/simulation/core/feed.rs

use bevy::prelude::Resource;
use wayfinder_core::session::{SensorEvent, SensorPushError, SensorSubscription};

/// Producer end of the active session's sensor queue.
///
/// Empty until guidance starts. Systems that synthesize sensor samples push
/// through this instead of touching the session.
#[derive(Resource, Debug, Default)]
pub struct SensorFeed {
    subscription: Option<SensorSubscription>,
    pushed: u64,
    dropped: u64,
}

impl SensorFeed {
    pub fn attach(&mut self, subscription: SensorSubscription) {
        self.subscription = Some(subscription);
    }

    pub fn detach(&mut self) {
        self.subscription = None;
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Pushes one sample. A closed queue detaches the feed.
    pub fn push(&mut self, event: SensorEvent) -> Result<(), SensorPushError> {
        let Some(subscription) = &self.subscription else {
            return Err(SensorPushError::Closed);
        };
        match subscription.push(event) {
            Ok(()) => {
                self.pushed += 1;
                Ok(())
            }
            Err(SensorPushError::Full) => {
                self.dropped += 1;
                Err(SensorPushError::Full)
            }
            Err(SensorPushError::Closed) => {
                self.subscription = None;
                Err(SensorPushError::Closed)
            }
        }
    }

    pub fn pushed(&self) -> u64 {
        self.pushed
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
