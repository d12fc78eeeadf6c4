use {base::FrameError, std::fmt, std::time::Duration};

#[derive(Debug)]
pub enum CameraError {
    Device(String),
    Stream(String),
    Frame(FrameError),
    Channel(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::Stream(msg) => write!(f, "stream error: {msg}"),
            CameraError::Frame(err) => write!(f, "frame error: {err}"),
            CameraError::Channel(msg) => write!(f, "channel error: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CameraError::Frame(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}

impl From<FrameError> for CameraError {
    fn from(err: FrameError) -> Self {
        CameraError::Frame(err)
    }
}

/// Failure of one synchronized capture. `camera` is 1 or 2.
#[derive(Debug)]
pub enum CaptureError {
    Timeout { camera: usize, bound: Duration },
    Camera { camera: usize, source: CameraError },
    Stopped { camera: usize },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Timeout { camera, bound } => {
                write!(f, "camera {camera} did not deliver a frame within {bound:?}")
            }
            CaptureError::Camera { camera, source } => write!(f, "camera {camera}: {source}"),
            CaptureError::Stopped { camera } => write!(f, "camera {camera} capture thread stopped"),
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptureError::Camera { source, .. } => Some(source),
            _ => None,
        }
    }
}
