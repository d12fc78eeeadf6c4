use std::error::Error;
use std::time::Duration;
use video::{CameraError, CaptureError};

#[test]
fn test_camera_error_display() {
    assert!(CameraError::Device("gone".into()).to_string().contains("device error"));
    assert!(CameraError::Stream("eof".into()).to_string().contains("stream error"));
    assert!(CameraError::Channel("closed".into()).to_string().contains("channel error"));
}

#[test]
fn test_frame_error_converts_and_chains() {
    let frame_err = base::Frame::new(1, 1, vec![]).unwrap_err();
    let err: CameraError = frame_err.into();
    assert!(matches!(err, CameraError::Frame(_)));
    assert!(err.source().is_some());
}

#[test]
fn test_io_error_is_device_error() {
    let err: CameraError = std::io::Error::new(std::io::ErrorKind::NotFound, "no device").into();
    assert!(matches!(err, CameraError::Device(_)));
}

#[test]
fn test_capture_error_display() {
    let err = CaptureError::Timeout {
        camera: 2,
        bound: Duration::from_secs(2),
    };
    let display = err.to_string();
    assert!(display.contains("camera 2"));
    assert!(display.contains("2s"));

    let err = CaptureError::Camera {
        camera: 1,
        source: CameraError::Stream("eof".into()),
    };
    assert!(err.to_string().contains("camera 1"));
    assert!(err.source().is_some());

    assert!(CaptureError::Stopped { camera: 1 }.to_string().contains("stopped"));
}
