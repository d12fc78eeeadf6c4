use video::{Camera, CameraError, RigConfig, TestPatternCamera};

/// Where the rig's frames come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// Synthetic gradient, no hardware needed.
    Pattern,
    /// Video4Linux devices (`/dev/video<index>`).
    V4l2,
}

pub type Cameras = [Box<dyn Camera>; 2];

/// Open both cameras of the rig. Nothing is started yet.
pub fn open_cameras(backend: Backend, config: &RigConfig) -> Result<Cameras, CameraError> {
    match backend {
        Backend::Pattern => {
            let cameras: Cameras = [
                Box::new(TestPatternCamera::new(0)),
                Box::new(TestPatternCamera::new(255)),
            ];
            Ok(cameras)
        }
        Backend::V4l2 => open_v4l2(config),
    }
}

#[cfg(feature = "v4l2")]
fn open_v4l2(config: &RigConfig) -> Result<Cameras, CameraError> {
    use video::V4l2Camera;

    let cameras: Cameras = [
        Box::new(V4l2Camera::new(config.first().clone())?),
        Box::new(V4l2Camera::new(config.second().clone())?),
    ];
    Ok(cameras)
}

#[cfg(not(feature = "v4l2"))]
fn open_v4l2(_config: &RigConfig) -> Result<Cameras, CameraError> {
    Err(CameraError::Device("built without the v4l2 feature".to_string()))
}
