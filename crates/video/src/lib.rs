//! Camera capture for the stereo rig.
//!
//! This crate provides a blocking `Camera` trait with a test-pattern and an
//! optional V4L2 backend, and `CaptureRig`, which drives two cameras from
//! their own threads and hands out matched frame pairs.

pub mod config;
pub mod convert;
pub mod error;
pub mod pattern;
pub mod rig;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::{CameraConfig, DEFAULT_CAPTURE_TIMEOUT_MS, RigConfig};
pub use error::{CameraError, CaptureError};
pub use pattern::TestPatternCamera;
pub use rig::CaptureRig;
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
