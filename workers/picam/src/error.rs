use {
    com::ComError,
    std::fmt,
    video::{CameraError, CaptureError},
};

#[derive(Debug)]
pub enum PicamError {
    Com(ComError),
    Capture(CaptureError),
    Camera(CameraError),
    Image(String),
}

impl fmt::Display for PicamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PicamError::Com(err) => write!(f, "{err}"),
            PicamError::Capture(err) => write!(f, "capture failed: {err}"),
            PicamError::Camera(err) => write!(f, "camera unavailable: {err}"),
            PicamError::Image(msg) => write!(f, "image error: {msg}"),
        }
    }
}

impl std::error::Error for PicamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PicamError::Com(err) => Some(err),
            PicamError::Capture(err) => Some(err),
            PicamError::Camera(err) => Some(err),
            PicamError::Image(_) => None,
        }
    }
}

impl From<ComError> for PicamError {
    fn from(err: ComError) -> Self {
        PicamError::Com(err)
    }
}

impl From<CaptureError> for PicamError {
    fn from(err: CaptureError) -> Self {
        PicamError::Capture(err)
    }
}

impl From<CameraError> for PicamError {
    fn from(err: CameraError) -> Self {
        PicamError::Camera(err)
    }
}

impl From<image::ImageError> for PicamError {
    fn from(err: image::ImageError) -> Self {
        PicamError::Image(err.to_string())
    }
}

impl From<std::io::Error> for PicamError {
    fn from(err: std::io::Error) -> Self {
        PicamError::Com(ComError::Io(err))
    }
}
