// wayfinder_sim/src/simulation/plugins/navigation/scripted.rs

//! Stand-ins for the platform camera and permission prompts, answering the
//! way the scenario's `[collaborators]` section says.

use wayfinder_core::session::{
    CameraError, CameraProvider, CameraRequest, CameraStream, Permission, PermissionProvider,
    PermissionState,
};

use crate::simulation::config::{CameraOutcome, CollaboratorsConfig};

/// A stream that produces no pixels but tracks whether it was released.
#[derive(Debug)]
pub struct ScriptedStream {
    width: u32,
    height: u32,
    live: bool,
}

impl CameraStream for ScriptedStream {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn stop(&mut self) {
        self.live = false;
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScriptedCamera {
    outcome: CameraOutcome,
    opened: u32,
}

impl ScriptedCamera {
    pub fn new(outcome: CameraOutcome) -> Self {
        Self { outcome, opened: 0 }
    }

    pub fn opened(&self) -> u32 {
        self.opened
    }
}

impl CameraProvider for ScriptedCamera {
    fn open(&mut self, request: &CameraRequest) -> Result<Box<dyn CameraStream>, CameraError> {
        match self.outcome {
            CameraOutcome::Available => {
                self.opened += 1;
                Ok(Box::new(ScriptedStream {
                    width: request.ideal_width,
                    height: request.ideal_height,
                    live: true,
                }))
            }
            CameraOutcome::Denied => Err(CameraError::PermissionDenied),
            CameraOutcome::Unavailable => Err(CameraError::Unavailable(
                "no camera device in this scenario".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScriptedPermissions {
    camera: PermissionState,
    orientation: PermissionState,
}

impl ScriptedPermissions {
    pub fn from_config(config: &CollaboratorsConfig) -> Self {
        let camera = match config.camera {
            CameraOutcome::Denied => PermissionState::Denied,
            _ => PermissionState::Granted,
        };
        Self {
            camera,
            orientation: config.orientation,
        }
    }
}

impl PermissionProvider for ScriptedPermissions {
    fn request(&mut self, permission: Permission) -> PermissionState {
        match permission {
            Permission::Camera => self.camera,
            Permission::Orientation => self.orientation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_camera_honours_the_requested_size() {
        let mut camera = ScriptedCamera::new(CameraOutcome::Available);
        let mut stream = camera.open(&CameraRequest::default()).unwrap();
        assert_eq!(stream.resolution(), (1280, 720));
        assert!(stream.is_live());
        stream.stop();
        assert!(!stream.is_live());
        assert_eq!(camera.opened(), 1);
    }

    #[test]
    fn denied_camera_maps_to_permission_error() {
        let mut camera = ScriptedCamera::new(CameraOutcome::Denied);
        assert!(matches!(
            camera.open(&CameraRequest::default()),
            Err(CameraError::PermissionDenied)
        ));
        let mut permissions = ScriptedPermissions::from_config(&CollaboratorsConfig {
            camera: CameraOutcome::Denied,
            orientation: PermissionState::Granted,
        });
        assert_eq!(permissions.request(Permission::Camera), PermissionState::Denied);
        assert_eq!(permissions.request(Permission::Orientation), PermissionState::Granted);
    }
}
